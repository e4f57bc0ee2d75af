use crate::config::Config;
use crate::generation::runner::BatchRunner;
use crate::history::History;
use crate::settings::SettingsService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub settings: SettingsService,
    pub history: History,
    /// Owns the generator and the progress map. One batch at a time.
    pub runner: BatchRunner,
}
