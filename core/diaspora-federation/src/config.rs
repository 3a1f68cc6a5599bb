//! Library configuration.
//!
//! Built in code with [`FederationConfig::new`] and the setters, or loaded
//! from a TOML file:
//!
//! ```toml
//! server_uri = "https://pod.example.org/"
//! certificate_authorities = "/etc/ssl/certs/ca-certificates.crt"
//! http_concurrency = 20
//! http_timeout = 30
//! http_verbose = false
//! environment = "production"
//! ```
//!
//! Loading never rejects a value of the wrong type; [`validate_config`]
//! reports it together with everything else at startup.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use crate::callbacks::Callbacks;
use crate::error::ConfigurationError;

pub const DEFAULT_HTTP_CONCURRENCY: u32 = 20;
pub const DEFAULT_HTTP_TIMEOUT: u64 = 30;
pub const DEFAULT_HTTP_REDIRECT_LIMIT: u32 = 4;

fn default_user_agent() -> String {
    format!("DiasporaFederation/{}", env!("CARGO_PKG_VERSION"))
}

/// Deployment environment. Development and test skip the CA bundle check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Development,
    Test,
}

impl Environment {
    pub fn is_permissive(self) -> bool {
        !matches!(self, Self::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            other => Err(ConfigurationError::new(format!(
                "environment: unknown environment {other}"
            ))),
        }
    }
}

/// Settings for the federation library and the host's HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FederationConfig {
    pub server_uri: Option<String>,
    pub certificate_authorities: Option<PathBuf>,
    pub http_concurrency: u32,
    /// Seconds.
    pub http_timeout: u64,
    pub http_verbose: bool,
    pub http_redirect_limit: u32,
    pub http_user_agent: String,
    pub environment: Environment,
    /// Keys from a config file whose values had the wrong type.
    invalid: Vec<&'static str>,
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            server_uri: None,
            certificate_authorities: None,
            http_concurrency: DEFAULT_HTTP_CONCURRENCY,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            http_verbose: false,
            http_redirect_limit: DEFAULT_HTTP_REDIRECT_LIMIT,
            http_user_agent: default_user_agent(),
            environment: Environment::default(),
            invalid: Vec::new(),
        }
    }
}

impl FederationConfig {
    pub fn new(server_uri: impl Into<String>) -> Self {
        Self {
            server_uri: Some(server_uri.into()),
            ..Self::default()
        }
    }

    pub fn with_certificate_authorities(mut self, path: impl Into<PathBuf>) -> Self {
        self.certificate_authorities = Some(path.into());
        self
    }

    pub fn with_http_concurrency(mut self, concurrency: u32) -> Self {
        self.http_concurrency = concurrency;
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout = seconds;
        self
    }

    pub fn with_http_verbose(mut self, verbose: bool) -> Self {
        self.http_verbose = verbose;
        self
    }

    pub fn with_http_redirect_limit(mut self, limit: u32) -> Self {
        self.http_redirect_limit = limit;
        self
    }

    pub fn with_http_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_user_agent = user_agent.into();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Parses a TOML document. Fails only on malformed TOML or an unknown
    /// `environment`.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigurationError> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| ConfigurationError::new(format!("invalid configuration file: {e}")))?;
        file.into_config()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::new(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded federation configuration from {:?}", path);
        Ok(config)
    }

    fn is_invalid(&self, key: &str) -> bool {
        self.invalid.iter().any(|invalid| *invalid == key)
    }
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    server_uri: Option<toml::Value>,
    certificate_authorities: Option<toml::Value>,
    http_concurrency: Option<toml::Value>,
    http_timeout: Option<toml::Value>,
    http_verbose: Option<toml::Value>,
    http_redirect_limit: Option<toml::Value>,
    http_user_agent: Option<toml::Value>,
    environment: Option<String>,
}

impl ConfigFile {
    fn into_config(self) -> Result<FederationConfig, ConfigurationError> {
        let mut config = FederationConfig::default();
        let mut invalid = Vec::new();

        if let Some(value) = self.server_uri {
            match value {
                toml::Value::String(uri) => config.server_uri = Some(uri),
                _ => invalid.push("server_uri"),
            }
        }
        if let Some(value) = self.certificate_authorities {
            match value {
                toml::Value::String(path) => config.certificate_authorities = Some(path.into()),
                _ => invalid.push("certificate_authorities"),
            }
        }
        if let Some(value) = self.http_concurrency {
            match unsigned(&value) {
                Some(n) => config.http_concurrency = n,
                None => invalid.push("http_concurrency"),
            }
        }
        if let Some(value) = self.http_timeout {
            match unsigned(&value) {
                Some(n) => config.http_timeout = n,
                None => invalid.push("http_timeout"),
            }
        }
        if let Some(value) = self.http_verbose {
            match value {
                toml::Value::Boolean(verbose) => config.http_verbose = verbose,
                _ => invalid.push("http_verbose"),
            }
        }
        if let Some(value) = self.http_redirect_limit {
            match unsigned(&value) {
                Some(n) => config.http_redirect_limit = n,
                None => invalid.push("http_redirect_limit"),
            }
        }
        if let Some(value) = self.http_user_agent {
            match value {
                toml::Value::String(agent) => config.http_user_agent = agent,
                _ => invalid.push("http_user_agent"),
            }
        }
        if let Some(environment) = self.environment {
            config.environment = environment.parse()?;
        }

        config.invalid = invalid;
        Ok(config)
    }
}

fn unsigned<T: TryFrom<i64>>(value: &toml::Value) -> Option<T> {
    value.as_integer().and_then(|n| T::try_from(n).ok())
}

/// Checks `config` and `callbacks` before the library is used.
///
/// Returns the first problem found, in this order: server URI, CA bundle
/// (skipped in permissive environments), HTTP settings, missing handlers.
pub fn validate_config(
    config: &FederationConfig,
    callbacks: &Callbacks,
) -> Result<(), ConfigurationError> {
    let result = check(config, callbacks);
    match &result {
        Ok(()) => info!(
            environment = %config.environment,
            "successfully configured the federation library"
        ),
        Err(e) => error!(error = %e, "federation configuration is invalid"),
    }
    result
}

fn check(config: &FederationConfig, callbacks: &Callbacks) -> Result<(), ConfigurationError> {
    let server_uri_ok = !config.is_invalid("server_uri")
        && config
            .server_uri
            .as_deref()
            .and_then(|uri| Url::parse(uri).ok())
            .is_some_and(|url| url.host_str().is_some_and(|host| !host.is_empty()));
    if !server_uri_ok {
        return Err(ConfigurationError::new("server_uri: Missing or invalid"));
    }

    if !config.environment.is_permissive() {
        let path = match &config.certificate_authorities {
            Some(path) if !config.is_invalid("certificate_authorities") => path,
            _ => {
                return Err(ConfigurationError::new(
                    "certificate_authorities: Not configured",
                ));
            }
        };
        if !path.is_file() {
            return Err(ConfigurationError::new(format!(
                "certificate_authorities: File not found: {}",
                path.display()
            )));
        }
    }

    for (key, message) in [
        ("http_concurrency", "http_concurrency: please configure a number"),
        ("http_timeout", "http_timeout: please configure a number"),
        ("http_verbose", "http_verbose: please configure a boolean"),
        ("http_redirect_limit", "http_redirect_limit: please configure a number"),
        ("http_user_agent", "http_user_agent: please configure a string"),
    ] {
        if config.is_invalid(key) {
            return Err(ConfigurationError::new(message));
        }
    }

    let missing = callbacks.missing_handlers();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|event| event.as_str()).collect();
        return Err(ConfigurationError::new(format!(
            "Missing handlers for {}",
            names.join(", ")
        )));
    }

    Ok(())
}
