use crate::config::Config;
use crate::screening::pipeline::ScreeningOptions;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Nothing here is mutated after startup; each screening request owns its own data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Derived from `config` once at startup.
    pub options: ScreeningOptions,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let options = config.screening_options();
        Self { config, options }
    }
}
