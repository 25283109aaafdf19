use crate::analysis::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable after startup; each request runs its own pass through it.
    pub analyzer: ResumeAnalyzer,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let analyzer = ResumeAnalyzer::new(config.analyzer.clone());
        Self { config, analyzer }
    }
}
