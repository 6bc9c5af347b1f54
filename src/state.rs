use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{Extractors, GeminiClient, ResumeAnalyzer};

/// Shared application state injected into route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: ResumeAnalyzer,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        Self::with_extractors(config, Extractors::default())
    }

    /// Same as [`AppState::new`] with caller-supplied document extractors.
    pub fn with_extractors(config: Config, extractors: Extractors) -> AppResult<Self> {
        let ai = GeminiClient::new(config.ai.clone())?;
        let analyzer = ResumeAnalyzer::new(config.upload_dir.clone(), extractors, ai);

        Ok(Self {
            config: Arc::new(config),
            analyzer,
        })
    }
}
