use std::sync::Arc;

use crate::client::RecommendationProvider;
use crate::error::DenResult;
use crate::models::catalog::{self, AI_CHOICE_LABEL};
use crate::models::MovieRecord;
use crate::store::DenStore;
use crate::view::{self, ViewModel};

use super::state::{Step, UiState};

/// An issued recommendation request, tagged with its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodRequest {
    pub generation: u64,
    pub mood: String,
}

/// An issued hype request, tagged with its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypeRequest {
    pub generation: u64,
    pub title: String,
    pub year: String,
}

/// The view-state controller
///
/// Owns the ephemeral UI state exclusively and dispatches every user action.
/// Remote calls split into a begin phase (validate, set the loading flag,
/// stamp a generation number) and an apply phase that checks the stamp: a
/// response whose generation is no longer current is dropped instead of
/// mutating state the user has already navigated away from.
pub struct App {
    state: UiState,
    store: DenStore,
    provider: Arc<dyn RecommendationProvider>,
    generation: u64,
}

impl App {
    pub fn new(store: DenStore, provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            state: UiState::new(),
            store,
            provider,
            generation: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn store(&self) -> &DenStore {
        &self.store
    }

    /// Renders the current state into a view model
    pub fn view(&self) -> ViewModel {
        view::view_model(&self.state, &self.store)
    }

    /// Invalidates any in-flight request and returns the new generation
    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    // ----- navigation -----

    /// Picks a fixed genre: uniform random sample from its static list
    pub fn pick_genre(&mut self, name: &str) {
        self.state.notice = None;
        let Some(genre) = catalog::find(name) else {
            self.state.notice = Some(format!("No genre called \"{}\" in the den.", name.trim()));
            return;
        };

        self.bump_generation();
        let movie = genre.random_pick();
        tracing::info!(genre = genre.name, title = %movie.title, "Genre pick");

        self.state.selected_genre = Some(genre.name.to_string());
        self.state.movie = Some(movie);
        self.state.ai_hype = None;
        self.state.is_loading = false;
        self.state.is_hype_loading = false;
        self.state.step = Step::Result;
        self.record_current_view();
    }

    pub fn begin_mood_entry(&mut self) {
        self.state.notice = None;
        self.state.step = Step::MoodInput;
    }

    pub fn set_mood(&mut self, text: &str) {
        self.state.custom_mood = text.to_string();
    }

    /// Fills the mood draft with a random seed (the `r` shortcut)
    pub fn randomize_mood(&mut self) {
        self.state.notice = None;
        self.state.custom_mood = catalog::random_mood();
        self.state.step = Step::MoodInput;
    }

    /// Opens the favorites/history view from anywhere
    pub fn open_my_list(&mut self) {
        self.state.notice = None;
        self.state.step = Step::MyList;
    }

    /// Explicit back: always lands on the genre picker
    pub fn back(&mut self) {
        self.state.notice = None;
        self.state.step = Step::GenreSelect;
    }

    /// Returns to the initial view and clears movie/mood/hype
    ///
    /// Never touches the persistent store.
    pub fn reset(&mut self) {
        self.bump_generation();
        self.state = UiState::new();
    }

    // ----- remote recommendation flow -----

    /// Validates the mood draft and stamps a request, or reports why not
    ///
    /// Whitespace-only moods fail here, before any network activity, and the
    /// step stays where it is.
    pub fn begin_mood_request(&mut self) -> Option<MoodRequest> {
        self.state.notice = None;
        let mood = self.state.custom_mood.trim().to_string();
        if mood.is_empty() {
            self.state.notice = Some("Tell me a mood first, even a vague one.".to_string());
            return None;
        }
        if self.state.is_loading {
            // Duplicate submit while one is in flight; the newer request wins.
            tracing::debug!("Resubmit while loading, superseding in-flight request");
        }

        self.state.is_loading = true;
        let generation = self.bump_generation();
        Some(MoodRequest { generation, mood })
    }

    /// Applies a finished recommendation request, discarding stale responses
    pub fn apply_recommendation(&mut self, generation: u64, outcome: DenResult<MovieRecord>) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale recommendation response"
            );
            return;
        }

        self.state.is_loading = false;
        match outcome {
            Ok(movie) => {
                self.state.selected_genre = Some(AI_CHOICE_LABEL.to_string());
                self.state.movie = Some(movie);
                self.state.ai_hype = None;
                self.state.step = Step::Result;
                self.record_current_view();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recommendation request failed");
                self.state.notice = Some(e.notice());
            }
        }
    }

    /// Submits the mood draft and waits for the recommendation
    pub async fn submit_mood(&mut self) {
        let Some(request) = self.begin_mood_request() else {
            return;
        };
        let outcome = self.provider.request_recommendation(&request.mood).await;
        self.apply_recommendation(request.generation, outcome);
    }

    // ----- hype flow -----

    /// Stamps a hype request for the movie on screen, if any
    pub fn begin_hype_request(&mut self) -> Option<HypeRequest> {
        self.state.notice = None;
        let movie = self.state.movie.as_ref()?;
        let (title, year) = (movie.title.clone(), movie.year.clone());
        if self.state.is_hype_loading {
            return None;
        }

        self.state.is_hype_loading = true;
        let generation = self.bump_generation();
        Some(HypeRequest {
            generation,
            title,
            year,
        })
    }

    /// Applies a finished hype request without changing step
    pub fn apply_hype(&mut self, generation: u64, outcome: DenResult<String>) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale hype response"
            );
            return;
        }

        self.state.is_hype_loading = false;
        match outcome {
            Ok(pitch) => self.state.ai_hype = Some(pitch),
            Err(e) => {
                tracing::warn!(error = %e, "Hype request failed");
                self.state.notice = Some(e.notice());
            }
        }
    }

    /// Asks for a hype pitch for the movie on screen
    pub async fn generate_hype(&mut self) {
        let Some(request) = self.begin_hype_request() else {
            return;
        };
        let outcome = self
            .provider
            .request_hype(&request.title, &request.year)
            .await;
        self.apply_hype(request.generation, outcome);
    }

    // ----- favorites and history -----

    /// Saves or unsaves the movie on screen (the `f` shortcut)
    pub fn toggle_favorite(&mut self) {
        self.state.notice = None;
        let Some(movie) = self.state.movie.clone() else {
            self.state.notice = Some("Nothing on screen to favorite yet.".to_string());
            return;
        };

        if let Some(existing) = self.store.find_favorite(&movie) {
            match self.store.remove_favorite(&existing.id) {
                Ok(()) => {
                    self.state.notice = Some(format!("Removed {} from favorites.", movie.title))
                }
                Err(e) => self.state.notice = Some(e.notice()),
            }
            return;
        }

        let label = self
            .state
            .selected_genre
            .clone()
            .unwrap_or_else(|| AI_CHOICE_LABEL.to_string());
        match self.store.add_favorite(&movie, &label) {
            Ok(true) => self.state.notice = Some(format!("Saved {} to favorites.", movie.title)),
            Ok(false) => self.state.notice = Some("Already in your favorites.".to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Favorite write failed");
                self.state.notice = Some(e.notice());
            }
        }
    }

    /// Removes a favorite by id from the my-list view
    pub fn remove_favorite(&mut self, id: &str) {
        self.state.notice = match self.store.remove_favorite(id) {
            Ok(()) => Some("Favorite removed.".to_string()),
            Err(e) => Some(e.notice()),
        };
    }

    /// Wipes favorites; the confirmation step lives in the front-end
    pub fn clear_favorites(&mut self) {
        self.state.notice = match self.store.clear_favorites() {
            Ok(()) => Some("Favorites cleared.".to_string()),
            Err(e) => Some(e.notice()),
        };
    }

    /// Wipes watch history; the confirmation step lives in the front-end
    pub fn clear_history(&mut self) {
        self.state.notice = match self.store.clear_history() {
            Ok(()) => Some("Watch history cleared.".to_string()),
            Err(e) => Some(e.notice()),
        };
    }

    /// Serializes favorites for download
    pub fn export_favorites(&mut self) -> Option<String> {
        self.state.notice = None;
        match self.store.export_favorites() {
            Ok(blob) => Some(blob),
            Err(e) => {
                self.state.notice = Some(e.notice());
                None
            }
        }
    }

    /// Merges an exported favorites document back in
    pub fn import_favorites(&mut self, blob: &str) {
        self.state.notice = match self.store.import_favorites(blob) {
            Ok(added) => Some(format!("Imported {} favorite(s).", added)),
            Err(e) => Some(e.notice()),
        };
    }

    /// Entering the result step always logs the view, idempotent per movie
    fn record_current_view(&mut self) {
        let Some(movie) = self.state.movie.clone() else {
            return;
        };
        let label = self
            .state
            .selected_genre
            .clone()
            .unwrap_or_else(|| AI_CHOICE_LABEL.to_string());
        if let Err(e) = self.store.record_view(&movie, &label) {
            // Persistence trouble never blocks the result view.
            tracing::warn!(error = %e, "Could not record watch history");
            self.state.notice = Some(e.notice());
        }
    }
}
