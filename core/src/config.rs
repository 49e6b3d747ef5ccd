//! External service configuration.
//!
//! A service named `datastage` is configured by properties such as
//! `DATASTAGE_URL` or `DATASTAGE_AUTH_TYPE`. They are read from the process
//! environment and from a credentials file in dotenv format; environment
//! variables take precedence. The credentials file is the one named by
//! `IBM_CREDENTIALS_FILE`, else `ibm-credentials.env` in the working
//! directory, else `ibm-credentials.env` in the home directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::auth::{Authenticator, AUTH_TYPE_BASIC, AUTH_TYPE_BEARER_TOKEN, AUTH_TYPE_NOAUTH};
use crate::error::ConfigError;

pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";
pub const DEFAULT_CREDENTIALS_FILE: &str = "ibm-credentials.env";

pub const PROP_URL: &str = "URL";
pub const PROP_AUTH_TYPE: &str = "AUTH_TYPE";
pub const PROP_BEARER_TOKEN: &str = "BEARER_TOKEN";
pub const PROP_USERNAME: &str = "USERNAME";
pub const PROP_PASSWORD: &str = "PASSWORD";
pub const PROP_DISABLE_SSL: &str = "DISABLE_SSL";

/// Properties of one service, keyed by property name without the prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalConfig {
    service_name: String,
    properties: HashMap<String, String>,
}

impl ExternalConfig {
    /// Read configuration for `service_name` from the credentials file and
    /// the process environment.
    pub fn read(service_name: &str) -> Result<Self, ConfigError> {
        let mut config = match credentials_file_path() {
            Some(path) => Self::from_credentials_file(service_name, &path)?,
            None => Self::empty(service_name),
        };
        config.merge(Self::from_vars(service_name, std::env::vars()));
        debug!(
            service = service_name,
            properties = config.properties.len(),
            "resolved external configuration"
        );
        Ok(config)
    }

    pub fn empty(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            properties: HashMap::new(),
        }
    }

    /// Collect the properties of `service_name` from name/value pairs.
    pub fn from_vars<I>(service_name: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{}_", env_prefix(service_name));
        let properties = vars
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(&prefix)
                    .filter(|property| !property.is_empty())
                    .map(|property| (property.to_string(), value))
            })
            .collect();
        Self {
            service_name: service_name.to_string(),
            properties,
        }
    }

    pub fn from_credentials_file(service_name: &str, path: &Path) -> Result<Self, ConfigError> {
        let file_error = |source| ConfigError::CredentialsFile {
            path: path.display().to_string(),
            source,
        };
        let vars = dotenvy::from_path_iter(path)
            .map_err(file_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(file_error)?;
        debug!(path = %path.display(), "read credentials file");
        Ok(Self::from_vars(service_name, vars))
    }

    /// Overlay `other` on top of `self`.
    pub fn merge(&mut self, other: ExternalConfig) {
        self.properties.extend(other.properties);
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties
            .get(property)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn service_url(&self) -> Option<&str> {
        self.get(PROP_URL)
    }

    pub fn disable_ssl(&self) -> bool {
        self.get(PROP_DISABLE_SSL)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Build the authenticator described by `AUTH_TYPE` and its properties.
    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        let auth_type = self
            .get(PROP_AUTH_TYPE)
            .ok_or_else(|| ConfigError::MissingAuthType {
                service: self.service_name.clone(),
            })?
            .to_ascii_lowercase();

        match auth_type.as_str() {
            AUTH_TYPE_NOAUTH => Ok(Authenticator::NoAuth),
            AUTH_TYPE_BEARER_TOKEN => {
                let token = self.require(AUTH_TYPE_BEARER_TOKEN, PROP_BEARER_TOKEN)?;
                Ok(Authenticator::BearerToken(token))
            }
            AUTH_TYPE_BASIC => Ok(Authenticator::Basic {
                username: self.require(AUTH_TYPE_BASIC, PROP_USERNAME)?,
                password: self.require(AUTH_TYPE_BASIC, PROP_PASSWORD)?,
            }),
            _ => Err(ConfigError::UnsupportedAuthType {
                service: self.service_name.clone(),
                auth_type,
            }),
        }
    }

    fn require(&self, auth_type: &'static str, property: &'static str) -> Result<String, ConfigError> {
        self.get(property)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingProperty {
                service: self.service_name.clone(),
                auth_type,
                property,
            })
    }
}

/// `ibm_api-for.flows` becomes `IBM_API_FOR_FLOWS`.
pub fn env_prefix(service_name: &str) -> String {
    service_name
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

fn credentials_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CREDENTIALS_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CREDENTIALS_FILE);
    if local.is_file() {
        return Some(local);
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CREDENTIALS_FILE))
        .filter(|path| path.is_file())
}
