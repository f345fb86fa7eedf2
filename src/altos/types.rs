//! Core data types for the Altos client
//! Pure data structures with no network behavior

use crate::altos::dates::normalize_date;
use crate::altos::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Listing of rental files for the US-wide extended county set
pub const DEFAULT_LIST_ENDPOINT: &str =
    "https://data.altos.re/api/list?type=rental&county=us_all-extended";

/// Prefix for a dated rental file; the `YYYY-MM-DD` date is appended verbatim
pub const DEFAULT_FILE_ENDPOINT: &str =
    "https://data.altos.re/api/data?type=rental&county=us_all-extended&date=";

/// Basic-auth credentials, fixed for the lifetime of a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote resources the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub list_url: String,
    pub file_url_prefix: String,
}

impl Endpoints {
    /// File prefix with the normalized `YYYY-MM-DD` date appended
    pub fn file_url(&self, date: &str) -> Result<String> {
        Ok(format!("{}{}", self.file_url_prefix, normalize_date(date)?))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            list_url: DEFAULT_LIST_ENDPOINT.to_string(),
            file_url_prefix: DEFAULT_FILE_ENDPOINT.to_string(),
        }
    }
}

/// One record from the listing endpoint.
///
/// The provider's schema is not ours to enforce: every field is kept as-is and
/// only `date` is ever read by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileEntry(pub Map<String, Value>);

impl FileEntry {
    /// Snapshot date (`YYYY-MM-DD`), if present and a string
    pub fn date(&self) -> Option<&str> {
        self.0.get("date").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
