// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup into a
//! [`Config`] value that is handed to [`crate::state::AppState`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH0_DOMAIN` | Token authority domain (JWKS host and issuer) | Required |
//! | `API_AUDIENCE` | Expected JWT audience claim | Required |
//! | `AUTH0_JWKS_URL` | Override for `https://{AUTH0_DOMAIN}/.well-known/jwks.json` | Derived |
//! | `JWKS_TIMEOUT_SECS` | Timeout for one key-set fetch | `10` |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance for `exp`/`nbf` | `0` |
//! | `DATABASE_PATH` | redb database file; in-memory store when unset | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const AUTH0_JWKS_URL_ENV: &str = "AUTH0_JWKS_URL";
pub const JWKS_TIMEOUT_ENV: &str = "JWKS_TIMEOUT_SECS";
pub const JWT_LEEWAY_ENV: &str = "JWT_LEEWAY_SECS";
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_JWKS_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the key set relative to the authority domain.
pub const JWKS_PATH: &str = ".well-known/jwks.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Token authority settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// Where the signing key set is published.
    pub jwks_url: Url,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Upper bound on one key-set fetch.
    pub jwks_timeout: Duration,
    /// Clock skew tolerance in seconds.
    pub leeway: u64,
}

impl AuthSettings {
    /// Derive the JWKS URL and issuer from an authority domain.
    pub fn for_domain(domain: &str, audience: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.trim();
        let domain = domain
            .strip_prefix("https://")
            .unwrap_or(domain)
            .trim_end_matches('/');
        if domain.is_empty() || domain.contains("://") || domain.contains('/') {
            return Err(ConfigError::Invalid {
                var: AUTH0_DOMAIN_ENV,
                reason: format!("expected a bare host name, got '{domain}'"),
            });
        }
        let base = Url::parse(&format!("https://{domain}/")).map_err(|e| ConfigError::Invalid {
            var: AUTH0_DOMAIN_ENV,
            reason: e.to_string(),
        })?;
        let jwks_url = base.join(JWKS_PATH).map_err(|e| ConfigError::Invalid {
            var: AUTH0_DOMAIN_ENV,
            reason: e.to_string(),
        })?;

        Ok(Self {
            jwks_url,
            issuer: base.to_string(),
            audience: audience.into(),
            jwks_timeout: DEFAULT_JWKS_TIMEOUT,
            leeway: 0,
        })
    }

    /// Fetch keys from a different URL, keeping issuer and audience.
    pub fn with_jwks_url(mut self, jwks_url: Url) -> Self {
        self.jwks_url = jwks_url;
        self
    }

    pub fn with_jwks_timeout(mut self, timeout: Duration) -> Self {
        self.jwks_timeout = timeout;
        self
    }

    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }
}

/// Process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub auth: AuthSettings,
    pub database_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let domain = var(AUTH0_DOMAIN_ENV).ok_or(ConfigError::Missing(AUTH0_DOMAIN_ENV))?;
        let audience = var(API_AUDIENCE_ENV).ok_or(ConfigError::Missing(API_AUDIENCE_ENV))?;

        let mut auth = AuthSettings::for_domain(&domain, audience)?;
        if let Some(raw) = var(AUTH0_JWKS_URL_ENV) {
            let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                var: AUTH0_JWKS_URL_ENV,
                reason: e.to_string(),
            })?;
            auth = auth.with_jwks_url(url);
        }
        if let Some(raw) = var(JWKS_TIMEOUT_ENV) {
            auth = auth.with_jwks_timeout(Duration::from_secs(parse_number(JWKS_TIMEOUT_ENV, &raw)?));
        }
        if let Some(raw) = var(JWT_LEEWAY_ENV) {
            auth = auth.with_leeway(parse_number(JWT_LEEWAY_ENV, &raw)?);
        }

        let port = match var(PORT_ENV) {
            Some(raw) => parse_number(PORT_ENV, &raw)?,
            None => DEFAULT_PORT,
        };

        let log_format = match var(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                var: LOG_FORMAT_ENV,
                reason,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host: var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            auth,
            database_path: var(DATABASE_PATH_ENV).map(PathBuf::from),
            log_format,
        })
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn derives_jwks_url_and_issuer_from_domain() {
        let settings = AuthSettings::for_domain("tenant.us.auth0.com", "drinks").unwrap();
        assert_eq!(
            settings.jwks_url.as_str(),
            "https://tenant.us.auth0.com/.well-known/jwks.json"
        );
        assert_eq!(settings.issuer, "https://tenant.us.auth0.com/");
        assert_eq!(settings.audience, "drinks");
        assert_eq!(settings.jwks_timeout, DEFAULT_JWKS_TIMEOUT);
        assert_eq!(settings.leeway, 0);
    }

    #[test]
    fn https_prefix_on_domain_is_ignored() {
        let settings =
            AuthSettings::for_domain("https://tenant.us.auth0.com/", "drinks").unwrap();
        assert_eq!(settings.issuer, "https://tenant.us.auth0.com/");
        assert_eq!(
            settings.jwks_url.as_str(),
            "https://tenant.us.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn rejects_domain_with_other_scheme_or_path() {
        for domain in ["http://tenant.us.auth0.com", "tenant.us.auth0.com/api", "https://", ""] {
            assert!(
                matches!(
                    AuthSettings::for_domain(domain, "drinks"),
                    Err(ConfigError::Invalid { var: AUTH0_DOMAIN_ENV, .. })
                ),
                "{domain:?} should be rejected"
            );
        }
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[
            (AUTH0_DOMAIN_ENV, "tenant.us.auth0.com"),
            (API_AUDIENCE_ENV, "drinks"),
        ]))
        .unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.database_path.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            (AUTH0_DOMAIN_ENV, "tenant.us.auth0.com"),
            (API_AUDIENCE_ENV, "drinks"),
            (AUTH0_JWKS_URL_ENV, "http://127.0.0.1:9999/jwks.json"),
            (JWKS_TIMEOUT_ENV, "3"),
            (JWT_LEEWAY_ENV, "30"),
            (PORT_ENV, "5000"),
            (DATABASE_PATH_ENV, "/var/lib/drinks.redb"),
            (LOG_FORMAT_ENV, "json"),
        ]))
        .unwrap();

        assert_eq!(config.auth.jwks_url.as_str(), "http://127.0.0.1:9999/jwks.json");
        // issuer still follows the domain
        assert_eq!(config.auth.issuer, "https://tenant.us.auth0.com/");
        assert_eq!(config.auth.jwks_timeout, Duration::from_secs(3));
        assert_eq!(config.auth.leeway, 30);
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/var/lib/drinks.redb"))
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_and_invalid_values_are_reported() {
        let err = Config::from_lookup(lookup(&[(API_AUDIENCE_ENV, "drinks")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(AUTH0_DOMAIN_ENV)));

        let err = Config::from_lookup(lookup(&[
            (AUTH0_DOMAIN_ENV, "tenant.us.auth0.com"),
            (API_AUDIENCE_ENV, "drinks"),
            (PORT_ENV, "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: PORT_ENV, .. }));
    }
}
