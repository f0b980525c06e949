use crate::models::MovieRecord;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GenreSelect,
    MoodInput,
    Result,
    MyList,
}

/// Ephemeral UI state, process-lifetime only
///
/// Fully determines what renders. Never persisted: the store is touched only
/// through explicit controller actions, and `reset` returns this struct to
/// its initial values without going anywhere near the collections.
#[derive(Debug, Clone)]
pub struct UiState {
    pub step: Step,
    pub selected_genre: Option<String>,
    pub movie: Option<MovieRecord>,
    pub custom_mood: String,
    pub is_loading: bool,
    pub ai_hype: Option<String>,
    pub is_hype_loading: bool,
    /// Transient one-line message (the toast); cleared by the next action
    pub notice: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            step: Step::GenreSelect,
            selected_genre: None,
            movie: None,
            custom_mood: String::new(),
            is_loading: false,
            ai_hype: None,
            is_hype_loading: false,
            notice: None,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
