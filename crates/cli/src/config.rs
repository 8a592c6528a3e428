//! Configuration loading from frontdesk.toml.

use guards::RouteOutcome;
use policy::RawPrincipal;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Principal to evaluate when none is given on the command line.
    /// Absent means nobody is signed in.
    #[serde(default)]
    pub principal: Option<RawPrincipal>,

    /// Where redirecting route outcomes send the user.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Redirect targets for the navigation layer.
#[derive(Debug, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
        }
    }
}

impl NavigationConfig {
    /// Redirect target for an outcome. `Allow` and `MaskAsNotFound` render in
    /// place and have none.
    pub fn redirect_for(&self, outcome: RouteOutcome) -> Option<&str> {
        match outcome {
            RouteOutcome::RedirectToLogin => Some(self.login_path.as_str()),
            RouteOutcome::RedirectToUnauthorized => Some(self.unauthorized_path.as_str()),
            RouteOutcome::Allow | RouteOutcome::MaskAsNotFound => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_unauthorized_path() -> String {
    "/unauthorized".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.navigation.login_path, &self.navigation.unauthorized_path] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidRedirect(path.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("redirect path must be absolute: '{0}'")]
    InvalidRedirect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.principal.is_none());
        assert_eq!(config.navigation.login_path, "/login");
        assert_eq!(config.navigation.unauthorized_path, "/unauthorized");
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[principal]
role = "Staff"
position = "Receptionist"

[navigation]
login_path = "/auth/sign-in"

[log]
filter = "frontdesk=debug"
"#;
        let config = Config::parse(toml).unwrap();
        let principal = config.principal.unwrap();
        assert_eq!(principal.role, "Staff");
        assert_eq!(principal.position.as_deref(), Some("Receptionist"));
        assert_eq!(config.navigation.login_path, "/auth/sign-in");
        assert_eq!(config.navigation.unauthorized_path, "/unauthorized");
        assert_eq!(config.log.filter, "frontdesk=debug");
    }

    #[test]
    fn test_redirect_targets() {
        let nav = NavigationConfig::default();
        assert_eq!(nav.redirect_for(RouteOutcome::RedirectToLogin), Some("/login"));
        assert_eq!(
            nav.redirect_for(RouteOutcome::RedirectToUnauthorized),
            Some("/unauthorized")
        );
        assert_eq!(nav.redirect_for(RouteOutcome::MaskAsNotFound), None);
        assert_eq!(nav.redirect_for(RouteOutcome::Allow), None);
    }

    #[test]
    fn test_relative_redirect_rejected() {
        let toml = r#"
[navigation]
unauthorized_path = "forbidden"
"#;
        assert!(matches!(
            Config::parse(toml),
            Err(ConfigError::InvalidRedirect(path)) if path == "forbidden"
        ));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            Config::parse("[principal\nrole = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}
