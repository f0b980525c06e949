mod controller;
mod state;

pub use controller::{App, HypeRequest, MoodRequest};
pub use state::{Step, UiState};
