use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub output: OutputConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SCREENER_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_dir = env::var("SCREENER_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
        if base_dir.trim().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }

        let log_level = env::var("SCREENER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            output: OutputConfig {
                base_dir: PathBuf::from(base_dir),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the Accepted/Rejected buckets live.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub base_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyOutputDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyOutputDir => {
                write!(f, "SCREENER_OUTPUT_DIR must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
