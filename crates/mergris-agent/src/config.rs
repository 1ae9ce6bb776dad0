//! Agent configuration parsed from `key=value` argument strings.
//!
//! Agents are configured with whitespace-separated `key=value` tokens, e.g.
//! `"seed=7 alpha=0.0025 save=weights.bin"`. The implicit defaults
//! `name=unknown role=unknown` are applied before the caller's tokens, so a
//! later `name=` token overrides them.
//!
//! Recognized keys are validated once, here, at parse time; asking for a
//! hyperparameter later can no longer fail. Unrecognized keys are accepted
//! and ignored so one argument string can be shared across agent roles —
//! only a recognized key with a malformed value is an error.

use std::path::PathBuf;

/// Error parsing an agent configuration string.
#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// A token had no `=` separator.
    #[display("malformed token (expected key=value): {token}")]
    MalformedToken { token: String },
    /// A recognized key carried a value that does not parse.
    #[display("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Typed agent configuration.
///
/// One struct serves both agent roles; each agent reads the facets it
/// cares about (the environment only `name`/`role`/`seed`, the player
/// additionally `alpha`, `init`, `load`, and `save`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentConfig {
    /// Display name, `"unknown"` unless configured.
    pub name: String,
    /// Role label, `"unknown"` unless configured.
    pub role: String,
    /// Seed for the agent's private PRNG stream.
    pub seed: Option<u64>,
    /// General learning-rate configuration.
    pub alpha: Option<f32>,
    /// Marker: start from zero-initialized weight tables.
    pub init: bool,
    /// Weight file to load at construction.
    pub load: Option<PathBuf>,
    /// Weight file to persist to on shutdown.
    pub save: Option<PathBuf>,
}

impl AgentConfig {
    /// Parses an argument string, applying the implicit defaults first.
    pub fn parse(args: &str) -> Result<Self, ConfigError> {
        let mut config = Self {
            name: "unknown".to_owned(),
            role: "unknown".to_owned(),
            ..Self::default()
        };

        for token in args.split_whitespace() {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                ConfigError::MalformedToken {
                    token: token.to_owned(),
                }
            })?;
            match key {
                "name" => config.name = value.to_owned(),
                "role" => config.role = value.to_owned(),
                "seed" => config.seed = Some(parse_value("seed", value)?),
                "alpha" => config.alpha = Some(parse_value("alpha", value)?),
                "init" => config.init = true,
                "load" => config.load = Some(PathBuf::from(value)),
                "save" => config.save = Some(PathBuf::from(value)),
                // Unknown keys are deliberately inert; see module docs.
                _ => {}
            }
        }
        Ok(config)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_yields_defaults() {
        let config = AgentConfig::parse("").unwrap();
        assert_eq!(config.name, "unknown");
        assert_eq!(config.role, "unknown");
        assert_eq!(config.seed, None);
        assert_eq!(config.alpha, None);
        assert!(!config.init);
    }

    #[test]
    fn test_recognized_keys_are_typed() {
        let config =
            AgentConfig::parse("name=learner role=player seed=42 alpha=0.0025 init=1").unwrap();
        assert_eq!(config.name, "learner");
        assert_eq!(config.role, "player");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.alpha, Some(0.0025));
        assert!(config.init);
    }

    #[test]
    fn test_later_tokens_override_defaults() {
        let config = AgentConfig::parse("name=a name=b").unwrap();
        assert_eq!(config.name, "b");
    }

    #[test]
    fn test_paths_are_taken_verbatim() {
        let config = AgentConfig::parse("load=in.bin save=out/dir/model.bin").unwrap();
        assert_eq!(config.load, Some(PathBuf::from("in.bin")));
        assert_eq!(config.save, Some(PathBuf::from("out/dir/model.bin")));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = AgentConfig::parse("frobnicate=yes seed=1").unwrap();
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_malformed_token_is_fatal() {
        let err = AgentConfig::parse("seed").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MalformedToken {
                token: "seed".to_owned()
            }
        );
    }

    #[test]
    fn test_bad_numeric_value_is_fatal() {
        let err = AgentConfig::parse("seed=banana").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "seed",
                value: "banana".to_owned()
            }
        );
        assert!(AgentConfig::parse("alpha=--1").is_err());
    }
}
