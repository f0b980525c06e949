//! The built-in genre table
//!
//! Picking a genre samples uniformly from its fixed list; only the free-form
//! mood path talks to the remote model.

use rand::seq::SliceRandom;

use crate::models::MovieRecord;

/// Label used in place of a genre when the movie came from a mood query
pub const AI_CHOICE_LABEL: &str = "AI Choice";

pub struct GenreEntry {
    pub name: &'static str,
    pub tagline: &'static str,
    picks: &'static [CatalogMovie],
}

struct CatalogMovie {
    title: &'static str,
    year: &'static str,
    rating: &'static str,
    description: &'static str,
}

pub const GENRES: &[GenreEntry] = &[
    GenreEntry {
        name: "Action",
        tagline: "Dishoom Dishoom",
        picks: &[
            CatalogMovie {
                title: "Mad Max: Fury Road",
                year: "2015",
                rating: "8.1",
                description: "Pure adrenaline.",
            },
            CatalogMovie {
                title: "John Wick",
                year: "2014",
                rating: "7.4",
                description: "Never mess with a man's dog.",
            },
        ],
    },
    GenreEntry {
        name: "Comedy",
        tagline: "Haste Haste Pagol",
        picks: &[
            CatalogMovie {
                title: "Superbad",
                year: "2007",
                rating: "7.6",
                description: "High school cringe.",
            },
            CatalogMovie {
                title: "The Grand Budapest Hotel",
                year: "2014",
                rating: "8.1",
                description: "Quirky magic.",
            },
        ],
    },
    GenreEntry {
        name: "Horror",
        tagline: "Bhoy Pabi Na Toh?",
        picks: &[
            CatalogMovie {
                title: "Hereditary",
                year: "2018",
                rating: "7.3",
                description: "Disturbing drama.",
            },
            CatalogMovie {
                title: "The Shining",
                year: "1980",
                rating: "8.4",
                description: "Here's Johnny!",
            },
        ],
    },
    GenreEntry {
        name: "SciFi",
        tagline: "Matha Nosto",
        picks: &[
            CatalogMovie {
                title: "Interstellar",
                year: "2014",
                rating: "8.6",
                description: "Space travel.",
            },
            CatalogMovie {
                title: "Inception",
                year: "2010",
                rating: "8.8",
                description: "Dream within a dream.",
            },
        ],
    },
    GenreEntry {
        name: "Drama",
        tagline: "Emotional Atyachar",
        picks: &[
            CatalogMovie {
                title: "Parasite",
                year: "2019",
                rating: "8.5",
                description: "Class war masterpiece.",
            },
            CatalogMovie {
                title: "Whiplash",
                year: "2014",
                rating: "8.5",
                description: "Intense drumming.",
            },
        ],
    },
];

/// Seed moods for the randomize shortcut
pub const MOOD_SEEDS: &[&str] = &[
    "a heist set somewhere nobody would expect",
    "something cozy for a rainy sunday afternoon",
    "mind-bending sci-fi that rewards a rewatch",
    "a slow burn thriller with an unreliable narrator",
    "feel-good underdog sports story",
    "atmospheric horror, no jump scares",
];

/// Case-insensitive genre lookup by name
pub fn find(name: &str) -> Option<&'static GenreEntry> {
    let wanted = name.trim().to_lowercase();
    GENRES.iter().find(|g| g.name.to_lowercase() == wanted)
}

impl GenreEntry {
    /// Uniform random pick from this genre's fixed list
    pub fn random_pick(&self) -> MovieRecord {
        // Every catalog entry has at least one movie, so choose cannot fail.
        let pick = self
            .picks
            .choose(&mut rand::thread_rng())
            .unwrap_or(&self.picks[0]);
        MovieRecord::new(pick.title, pick.year, pick.rating, pick.description)
    }

}

/// Random seed mood for the randomize shortcut
pub fn random_mood() -> String {
    MOOD_SEEDS
        .choose(&mut rand::thread_rng())
        .unwrap_or(&MOOD_SEEDS[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert!(find("horror").is_some());
        assert!(find("HORROR").is_some());
        assert!(find("  SciFi ").is_some());
        assert!(find("Western").is_none());
    }

    #[test]
    fn test_every_genre_has_picks() {
        assert_eq!(GENRES.len(), 5);
        for genre in GENRES {
            assert!(!genre.picks.is_empty());
        }
    }

    #[test]
    fn test_horror_pick_matches_rating() {
        let horror = find("Horror").unwrap();
        for _ in 0..20 {
            let movie = horror.random_pick();
            match movie.title.as_str() {
                "Hereditary" => assert_eq!(movie.rating, "7.3"),
                "The Shining" => assert_eq!(movie.rating, "8.4"),
                other => panic!("unexpected horror pick: {}", other),
            }
        }
    }

    #[test]
    fn test_random_mood_comes_from_seed_list() {
        let mood = random_mood();
        assert!(MOOD_SEEDS.contains(&mood.as_str()));
    }
}
