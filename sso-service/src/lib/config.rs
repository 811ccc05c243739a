use std::env;
use std::path::Path;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub env: RunEnvironment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
}

/// Deployment environment, selects the log format and default verbosity.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunEnvironment {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SSO__DATABASE__URL, SSO__TOKEN__TTL_SECONDS, etc.)
    /// 2. `config_path` (`--config-path` or CONFIG_PATH), when given
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// The merged result is validated before it is returned.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "local".to_string());

        let mut builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config: Config = builder
            .add_source(Environment::with_prefix("SSO").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make the server unusable.
    ///
    /// # Errors
    /// * `token.ttl_seconds` outside `1..=MAX_TOKEN_TTL_SECONDS`
    /// * `server.timeout_seconds` of zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&self.token.ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECONDS, self.token.ttl_seconds
            )));
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "server.timeout_seconds must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::try_seconds(self.token.ttl_seconds).ok_or_else(|| {
            ConfigError::Message(format!(
                "token.ttl_seconds is out of range: {}",
                self.token.ttl_seconds
            ))
        })
    }

    /// Upper bound on the handling time of a single request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        let config: Config = ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    fn with_limits(ttl_seconds: i64, timeout_seconds: u64) -> String {
        format!(
            r#"
            env = "local"

            [database]
            url = "sqlite::memory:"

            [server]
            grpc_port = 44044
            timeout_seconds = {}

            [token]
            ttl_seconds = {}
            "#,
            timeout_seconds, ttl_seconds
        )
    }

    #[test]
    fn test_deserialize_full_config() {
        let config = from_toml(
            r#"
            env = "dev"

            [database]
            url = "sqlite://storage/sso.db"

            [server]
            grpc_port = 44044
            timeout_seconds = 5

            [token]
            ttl_seconds = 900
            "#,
        )
        .expect("Failed to deserialize config");

        assert_eq!(config.env, RunEnvironment::Dev);
        assert_eq!(config.database.url, "sqlite://storage/sso.db");
        assert_eq!(config.server.grpc_port, 44044);
        assert_eq!(config.token_ttl().unwrap(), chrono::Duration::minutes(15));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        let result = from_toml(
            r#"
            env = "staging"

            [database]
            url = "sqlite::memory:"

            [server]
            grpc_port = 1
            timeout_seconds = 1

            [token]
            ttl_seconds = 1
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result = from_toml(
            r#"
            env = "local"

            [database]
            url = "sqlite::memory:"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_token_ttl_is_rejected() {
        assert!(from_toml(&with_limits(0, 10)).is_err());
        assert!(from_toml(&with_limits(-5, 10)).is_err());
    }

    #[test]
    fn test_excessive_token_ttl_is_rejected() {
        assert!(from_toml(&with_limits(MAX_TOKEN_TTL_SECONDS + 1, 10)).is_err());
        assert!(from_toml(&with_limits(i64::MAX, 10)).is_err());

        let config = from_toml(&with_limits(MAX_TOKEN_TTL_SECONDS, 10))
            .expect("Longest lifetime should be accepted");
        assert_eq!(config.token_ttl().unwrap(), chrono::Duration::days(365));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(from_toml(&with_limits(3600, 0)).is_err());
    }

    #[test]
    fn test_token_ttl_out_of_duration_range() {
        let mut config = from_toml(&with_limits(3600, 10)).expect("Failed to deserialize config");
        config.token.ttl_seconds = i64::MAX;

        assert!(config.token_ttl().is_err());
    }

    #[test]
    fn test_load_from_config_path() {
        let path = env::temp_dir().join(format!("sso-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, with_limits(120, 3)).expect("Failed to write config file");

        let result = Config::load(Some(&path));
        std::fs::remove_file(&path).ok();

        let config = result.expect("Failed to load config");
        assert_eq!(config.token_ttl().unwrap(), chrono::Duration::minutes(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }
}
