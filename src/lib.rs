//! Movie Den: a mood-driven movie picker
//!
//! Pick a genre and get a random pick from the built-in table, or describe a
//! mood and let the remote model choose. Favorites and watch history persist
//! across sessions through a pluggable key-value store.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod view;
