//! Game configuration: defaults, optional TOML file, CLI overrides.

use crate::games::mastermind::{MAX_RANGE, MatchRules};
use crate::source::{
    DEFAULT_PROVIDER_URL, FallbackGenerator, RandomOrgProvider, RetryPolicy, SequenceSource,
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Digits per code.
    code_length: usize,

    /// Exclusive upper bound on digit values (at most 10).
    code_range: u8,

    /// Guesses allowed per match.
    max_attempts: usize,

    /// Provider attempts before falling back, including the first.
    retry_attempts: usize,

    /// Pause between provider attempts, in milliseconds.
    retry_delay_ms: u64,

    /// Per-request timeout for the provider, in seconds.
    request_timeout_secs: u64,

    /// Random-integer service endpoint.
    provider_url: String,

    /// Skip the provider and always use the local generator.
    offline: bool,

    /// Seed for the local generator.
    seed: Option<u64>,

    /// Print the secret when a match starts (debugging aid).
    reveal_secret: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            code_length: 4,
            code_range: 8,
            max_attempts: 10,
            retry_attempts: 3,
            retry_delay_ms: 3000,
            request_timeout_secs: 5,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            offline: false,
            seed: None,
            reveal_secret: false,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            code_length = config.code_length,
            code_range = config.code_range,
            max_attempts = config.max_attempts,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Checks every setting and returns the match rules.
    ///
    /// # Errors
    ///
    /// Non-positive length, range or attempts, a range above 10, or zero
    /// provider attempts.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<MatchRules, ConfigError> {
        if self.retry_attempts == 0 {
            return Err(ConfigError::new("retry_attempts must be at least 1"));
        }
        if self.code_range > MAX_RANGE {
            return Err(ConfigError::new(format!(
                "code_range must be at most {}; each position is a single digit",
                MAX_RANGE
            )));
        }
        MatchRules::new(self.code_length, self.code_range, self.max_attempts)
            .map_err(|e| ConfigError::new(e.to_string()))
    }

    /// Retry settings for the provider.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Builds the secret source these settings describe.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    #[instrument(skip(self), fields(offline = self.offline))]
    pub fn build_source(&self) -> Result<SequenceSource, ConfigError> {
        let fallback = FallbackGenerator::new(self.seed);
        if self.offline {
            info!("Offline mode; provider disabled");
            return Ok(SequenceSource::offline(fallback));
        }
        let provider = RandomOrgProvider::new(
            &self.provider_url,
            Duration::from_secs(self.request_timeout_secs),
        )
        .map_err(|e| ConfigError::new(format!("Failed to build provider client: {}", e)))?;
        Ok(SequenceSource::new(Box::new(provider), fallback, self.retry_policy()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
