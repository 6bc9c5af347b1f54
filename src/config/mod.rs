use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub upload_dir: PathBuf,
    pub request_timeout_seconds: u64,
    pub ai: AiConfig,
}

/// Settings for the remote review model.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub mode: AiMode,
    pub model: String,
    pub endpoint_base: String,
    pub timeout: Duration,
}

/// Whether reviews are served from the canned demo text or the live API.
#[derive(Clone, PartialEq, Eq)]
pub enum AiMode {
    Demo,
    Live { api_key: String },
}

impl AiMode {
    pub fn label(&self) -> &'static str {
        match self {
            AiMode::Demo => "demo",
            AiMode::Live { .. } => "live",
        }
    }
}

// Keep keys out of `{:?}` log lines.
impl fmt::Debug for AiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiMode::Demo => f.write_str("Demo"),
            AiMode::Live { .. } => f.write_str("Live { api_key: \"<redacted>\" }"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let request_timeout_seconds = Self::parse_env_var("REQUEST_TIMEOUT_SECONDS", 30u64)
            .context("Failed to parse REQUEST_TIMEOUT_SECONDS")?;

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 5)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    info!("UPLOAD_DIR not set, using default: uploads");
                    PathBuf::from("uploads")
                }),
            request_timeout_seconds,
            ai: AiConfig {
                mode: Self::ai_mode_from_env()?,
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                endpoint_base: env::var("GEMINI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                timeout: Duration::from_secs(request_timeout_seconds),
            },
        };

        config.validate()?;

        if config.ai.mode == AiMode::Demo {
            warn!("No GEMINI_API_KEY configured (or AI_DEMO_MODE set); serving demo feedback");
        } else {
            info!(model = %config.ai.model, "Live AI reviews enabled");
        }

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn ai_mode_from_env() -> Result<AiMode> {
        let forced_demo = Self::parse_env_var("AI_DEMO_MODE", false)
            .context("Failed to parse AI_DEMO_MODE")?;

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(match api_key {
            Some(api_key) if !forced_demo => AiMode::Live { api_key },
            _ => AiMode::Demo,
        })
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.trim().parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 || self.ai.timeout.is_zero() {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECONDS must be greater than 0"));
        }
        if self.ai.model.trim().is_empty() {
            return Err(anyhow::anyhow!("GEMINI_MODEL must not be empty"));
        }
        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}
