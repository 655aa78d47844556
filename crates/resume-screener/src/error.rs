use crate::config::ConfigError;
use crate::screening::{BatchError, PreviewError, RoutingError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Routing(RoutingError),
    Batch(BatchError),
    Preview(PreviewError),
    Worker(tokio::task::JoinError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Routing(err) => write!(f, "routing error: {}", err),
            AppError::Batch(err) => write!(f, "screening error: {}", err),
            AppError::Preview(err) => write!(f, "could not preview file: {}", err),
            AppError::Worker(err) => write!(f, "screening worker failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Routing(err) => Some(err),
            AppError::Batch(err) => Some(err),
            AppError::Preview(err) => Some(err),
            AppError::Worker(err) => Some(err),
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

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RoutingError> for AppError {
    fn from(value: RoutingError) -> Self {
        Self::Routing(value)
    }
}

impl From<BatchError> for AppError {
    fn from(value: BatchError) -> Self {
        Self::Batch(value)
    }
}

impl From<PreviewError> for AppError {
    fn from(value: PreviewError) -> Self {
        Self::Preview(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Worker(value)
    }
}
