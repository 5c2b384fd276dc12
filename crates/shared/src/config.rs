//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::RoundingPolicy;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Rounding applied at every monetary computation boundary.
    #[serde(default)]
    pub rounding: RoundingPolicy,
    /// Input files.
    #[serde(default)]
    pub input: InputConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input file configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Path to a JSON array of statement events.
    pub events_path: Option<String>,
    /// Path to a JSON chart of accounts. The standard chart is used when absent.
    pub chart_path: Option<String>,
    /// Account whose postings count as cash. `CASH` when absent.
    pub cash_account: Option<String>,
    /// Account net income rolls into. `RETAINED_EARNINGS` when absent.
    pub retained_earnings_account: Option<String>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Where to write the statement output. Stdout when absent.
    pub path: Option<String>,
    /// Pretty-print the JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Exit non-zero when any event was rejected as unbalanced.
    #[serde(default)]
    pub fail_on_posting_errors: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: default_pretty(),
            fail_on_posting_errors: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "hotelbooks=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `HOTELBOOKS__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOTELBOOKS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: Self = config.try_deserialize()?;
        loaded.rounding = RoundingPolicy::new(
            loaded.rounding.precision,
            loaded.rounding.bankers_rounding,
        );
        Ok(loaded)
    }

    /// Returns the events path, which a batch run cannot do without.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` when no events path is configured.
    pub fn events_path(&self) -> AppResult<&str> {
        self.input
            .events_path
            .as_deref()
            .ok_or_else(|| AppError::Configuration("input.events_path is not set".to_string()))
    }
}
