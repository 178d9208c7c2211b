pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod extractor;
pub mod mode;
pub mod summarizer;
pub mod text;

use std::sync::Arc;
use config::Config;
use db::SummaryStore;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: SummaryStore,
}
