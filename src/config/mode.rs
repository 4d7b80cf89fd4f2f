//! Build mode flag

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by the CLI when `--mode` is not given
pub const MODE_ENV_VAR: &str = "PORTFOLIO_ENV";

/// Execution context the site is rendered for
///
/// Development output may contain authoring aids (the unpublished-post
/// banner, live reload); production output never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    /// Read the mode from `PORTFOLIO_ENV`, if set to a recognized value
    pub fn from_env() -> Option<Self> {
        let value = std::env::var(MODE_ENV_VAR).ok()?;
        match value.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", MODE_ENV_VAR, e);
                None
            }
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => f.write_str("development"),
            Mode::Production => f.write_str("production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("development".parse::<Mode>(), Ok(Mode::Development));
        assert_eq!("PROD".parse::<Mode>(), Ok(Mode::Production));
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn test_is_development() {
        assert!(Mode::Development.is_development());
        assert!(!Mode::Production.is_development());
    }
}
