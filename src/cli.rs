//! Command-line interface for strictly_mastermind.

use clap::Parser;
use std::path::PathBuf;
use strictly_mastermind::{ConfigError, GameConfig};
use tracing::{debug, instrument};

/// Strictly Mastermind - guess the secret code
#[derive(Parser, Debug)]
#[command(name = "strictly_mastermind")]
#[command(about = "Terminal Mastermind: break the secret numeric code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (missing keys take defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Digits per secret code
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Digits range from 0 to RANGE-1 (at most 10)
    #[arg(short, long)]
    pub range: Option<u8>,

    /// Guesses allowed per match
    #[arg(short, long)]
    pub max_attempts: Option<usize>,

    /// Never contact the random number service
    #[arg(long)]
    pub offline: bool,

    /// Seed the local generator for reproducible codes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print each secret when its match starts
    #[arg(long)]
    pub reveal_secret: bool,

    /// Debug-level logging for this crate (stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads the config file (or defaults) and layers flags on top.
    ///
    /// # Errors
    ///
    /// An explicit `--config` path that cannot be read or parsed.
    #[instrument(skip(self))]
    pub fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        let config = self.apply(base);
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Overrides `config` with any flags that were given.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(length) = self.length {
            config = config.with_code_length(length);
        }
        if let Some(range) = self.range {
            config = config.with_code_range(range);
        }
        if let Some(max_attempts) = self.max_attempts {
            config = config.with_max_attempts(max_attempts);
        }
        if self.offline {
            config = config.with_offline(true);
        }
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        if self.reveal_secret {
            config = config.with_reveal_secret(true);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_values() {
        let cli = Cli::parse_from([
            "strictly_mastermind",
            "--length",
            "6",
            "--offline",
            "--seed",
            "9",
        ]);
        let base = GameConfig::from_toml_str("code_length = 5\nmax_attempts = 4\n").unwrap();
        let config = cli.apply(base);
        assert_eq!(*config.code_length(), 6);
        assert_eq!(*config.max_attempts(), 4);
        assert!(*config.offline());
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = Cli::parse_from(["strictly_mastermind"]);
        assert_eq!(cli.resolve_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let cli = Cli::parse_from(["strictly_mastermind", "--config", "/nonexistent/mm.toml"]);
        assert!(cli.resolve_config().is_err());
    }
}
