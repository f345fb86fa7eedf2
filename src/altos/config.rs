//! Client configuration and credential resolution

use crate::altos::error::{AltosError, Result};
use crate::altos::types::{Credentials, Endpoints};
use std::env;

/// Environment variable consulted when no username is given explicitly
pub const USERNAME_ENV: &str = "ALTOS_USERNAME";

/// Everything an [`AltosClient`](crate::altos::client::AltosClient) needs.
///
/// Credentials are resolved once, here, and never re-read afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
}

impl ClientConfig {
    /// Resolve credentials against the process environment.
    ///
    /// An empty `username` falls back to `ALTOS_USERNAME`; if that is unset too
    /// this is a configuration error. The password is taken as given.
    pub fn resolve(username: &str, password: &str) -> Result<Self> {
        Self::resolve_with(username, password, |key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::resolve`] with an explicit variable lookup
    pub fn resolve_with<F>(username: &str, password: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = if username.is_empty() {
            lookup(USERNAME_ENV)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    AltosError::Config(format!(
                        "no username given and {} is not set",
                        USERNAME_ENV
                    ))
                })?
        } else {
            username.to_string()
        };

        Ok(Self {
            credentials: Credentials::new(username, password),
            endpoints: Endpoints::default(),
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}
