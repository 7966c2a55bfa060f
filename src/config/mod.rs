use crate::workflows::scanner::ErrorStrategy;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub const SOURCE_DIR_VAR: &str = "FOTOMOVER_SOURCE_DIR";
pub const DEST_DIR_VAR: &str = "FOTOMOVER_DEST_DIR";
pub const ON_ERROR_VAR: &str = "FOTOMOVER_ON_ERROR";
pub const LOG_LEVEL_VAR: &str = "FOTOMOVER_LOG_LEVEL";

/// Top-level configuration for a run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub archive: ArchiveConfig,
    pub scan: ScanConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source_dir = non_empty_var(SOURCE_DIR_VAR).map(PathBuf::from);
        let destination_dir = non_empty_var(DEST_DIR_VAR).map(PathBuf::from);

        let on_error = match non_empty_var(ON_ERROR_VAR) {
            Some(value) => value
                .parse::<ErrorStrategy>()
                .map_err(|_| ConfigError::InvalidErrorStrategy { value })?,
            None => ErrorStrategy::default(),
        };

        let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            archive: ArchiveConfig {
                source_dir,
                destination_dir,
            },
            scan: ScanConfig { on_error },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Locations of the photo archive and the album the matches are destined for.
#[derive(Debug, Clone, Default)]
pub struct ArchiveConfig {
    pub source_dir: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
}

impl ArchiveConfig {
    pub fn source_dir(&self) -> Result<&Path, ConfigError> {
        self.source_dir
            .as_deref()
            .ok_or(ConfigError::MissingSetting {
                name: SOURCE_DIR_VAR,
            })
    }

    pub fn destination_dir(&self) -> Result<&Path, ConfigError> {
        self.destination_dir
            .as_deref()
            .ok_or(ConfigError::MissingSetting { name: DEST_DIR_VAR })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub on_error: ErrorStrategy,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting { name: &'static str },
    InvalidErrorStrategy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSetting { name } => {
                write!(f, "{name} must be set (or passed on the command line)")
            }
            ConfigError::InvalidErrorStrategy { value } => write!(
                f,
                "{ON_ERROR_VAR} must be 'fail-fast' or 'continue', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
