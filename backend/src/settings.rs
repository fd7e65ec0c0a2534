//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `STUDENTS_*` environment variables over an
//! optional config file. Everything has a default so the service starts with
//! no configuration at all, backed by the in-memory store.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{NestedMergePolicy, UnknownMergePolicy};

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    /// `nested_merge` names no known policy.
    #[error(transparent)]
    InvalidMergePolicy(#[from] UnknownMergePolicy),
}

/// Top-level service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENTS")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Port overriding the one in `bind_addr`.
    pub port: Option<u16>,
    /// PostgreSQL connection string; unset selects the in-memory store.
    pub database_url: Option<String>,
    /// Nested object handling for updates: `replace` or `deep`.
    pub nested_merge: Option<String>,
}

impl AppSettings {
    /// Resolve the listen address.
    ///
    /// `ambient_port` is a port taken from the process environment outside the
    /// `STUDENTS_` namespace (a plain `PORT`); the explicit `port` setting wins
    /// over it.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when `bind_addr` does not
    /// parse.
    pub fn socket_addr(&self, ambient_port: Option<u16>) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_str();
        let mut addr: SocketAddr =
            value
                .parse()
                .map_err(|source| SettingsError::InvalidBindAddr {
                    value: value.to_owned(),
                    source,
                })?;
        if let Some(port) = self.port.or(ambient_port) {
            addr.set_port(port);
        }
        Ok(addr)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Parsed nested merge policy, defaulting to replace.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidMergePolicy`] for unknown names.
    pub fn merge_policy(&self) -> Result<NestedMergePolicy, SettingsError> {
        match self.nested_merge.as_deref() {
            Some(name) => Ok(name.parse()?),
            None => Ok(NestedMergePolicy::default()),
        }
    }
}
