//! Runtime configuration read from environment variables.
//!
//! | Variable                   | Default                       |
//! |----------------------------|-------------------------------|
//! | `HOST`                     | `127.0.0.1`                   |
//! | `PORT`                     | `8080`                        |
//! | `DATABASE_URL`             | unset (in-memory repository)  |
//! | `DATABASE_MAX_CONNECTIONS` | `5`                           |
//! | `PUBLIC_URL`               | `http://localhost:{PORT}`     |
//! | `CONTACT_NAME`             | `Task Box Team`               |
//! | `CONTACT_EMAIL`            | unset                         |

use crate::openapi::{DocSettings, DEFAULT_CONTACT_NAME};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub public_url: String,
    pub contact_name: String,
    pub contact_email: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let database_max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", lookup("DATABASE_MAX_CONNECTIONS"), 5)?;
        let public_url =
            lookup("PUBLIC_URL").unwrap_or_else(|| format!("http://localhost:{port}"));
        let contact_name =
            lookup("CONTACT_NAME").unwrap_or_else(|| DEFAULT_CONTACT_NAME.to_string());
        let contact_email = lookup("CONTACT_EMAIL").filter(|email| !email.is_empty());

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            public_url,
            contact_name,
            contact_email,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// What the OpenAPI document advertises for this deployment.
    pub fn doc_settings(&self) -> DocSettings {
        DocSettings {
            server_url: self.public_url.clone(),
            contact_name: self.contact_name.clone(),
            contact_email: self.contact_email.clone(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
