//! Pure state → view-model mapping
//!
//! Each render pass rebuilds the whole view model from the UI state and a
//! fresh store snapshot. No mutation happens here; the front-end binds the
//! result to presentation.

use crate::app::{Step, UiState};
use crate::models::catalog::{self, AI_CHOICE_LABEL};
use crate::models::{FavoriteEntry, HistoryEntry, MovieRecord};
use crate::store::DenStore;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    GenreSelect {
        genres: Vec<GenreCard>,
        notice: Option<String>,
    },
    MoodInput {
        draft: String,
        is_loading: bool,
        notice: Option<String>,
    },
    Result {
        movie: MovieRecord,
        label: String,
        is_favorite: bool,
        hype: Option<String>,
        is_hype_loading: bool,
        notice: Option<String>,
    },
    MyList {
        favorites: Vec<FavoriteEntry>,
        history: Vec<HistoryEntry>,
        notice: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCard {
    pub name: String,
    pub tagline: String,
}

pub fn view_model(state: &UiState, store: &DenStore) -> ViewModel {
    match state.step {
        Step::GenreSelect => genre_select(state),
        Step::MoodInput => ViewModel::MoodInput {
            draft: state.custom_mood.clone(),
            is_loading: state.is_loading,
            notice: state.notice.clone(),
        },
        Step::Result => match &state.movie {
            Some(movie) => ViewModel::Result {
                movie: movie.clone(),
                label: state
                    .selected_genre
                    .clone()
                    .unwrap_or_else(|| AI_CHOICE_LABEL.to_string()),
                is_favorite: store.find_favorite(movie).is_some(),
                hype: state.ai_hype.clone(),
                is_hype_loading: state.is_hype_loading,
                notice: state.notice.clone(),
            },
            // A result step with no movie has nothing to show.
            None => genre_select(state),
        },
        Step::MyList => ViewModel::MyList {
            favorites: store.list_favorites(),
            history: store.list_history(),
            notice: state.notice.clone(),
        },
    }
}

fn genre_select(state: &UiState) -> ViewModel {
    ViewModel::GenreSelect {
        genres: catalog::GENRES
            .iter()
            .map(|g| GenreCard {
                name: g.name.to_string(),
                tagline: g.tagline.to_string(),
            })
            .collect(),
        notice: state.notice.clone(),
    }
}
