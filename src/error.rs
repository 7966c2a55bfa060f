use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::{ArchiveError, ReferenceDateError, ScanError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Archive(ArchiveError),
    Dates(ReferenceDateError),
    Scan(ScanError),
    Render(serde_json::Error),
    InvalidWeek { year: i32, week: u32 },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Archive(err) => write!(f, "archive error: {}", err),
            AppError::Dates(err) => write!(f, "date error: {}", err),
            AppError::Scan(err) => write!(f, "scan error: {}", err),
            AppError::Render(err) => write!(f, "could not render report: {}", err),
            AppError::InvalidWeek { year, week } => {
                write!(f, "ISO year {} has no week {}", year, week)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Archive(err) => Some(err),
            AppError::Dates(err) => Some(err),
            AppError::Scan(err) => Some(err),
            AppError::Render(err) => Some(err),
            AppError::InvalidWeek { .. } => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ArchiveError> for AppError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

impl From<ReferenceDateError> for AppError {
    fn from(value: ReferenceDateError) -> Self {
        Self::Dates(value)
    }
}

impl From<ScanError> for AppError {
    fn from(value: ScanError) -> Self {
        Self::Scan(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}
