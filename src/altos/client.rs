//! HTTP client for the Altos rental data API

use crate::altos::config::ClientConfig;
use crate::altos::error::{AltosError, Result};
use crate::altos::types::{Credentials, Endpoints, FileEntry};
use crate::altos::utils::{deflate_downloaded_file, write_response_to_file};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Authenticated access to the weekly rental snapshots.
///
/// Holds nothing but its credentials and endpoints; every call is independent.
#[derive(Debug, Clone)]
pub struct AltosClient {
    http: Client,
    credentials: Credentials,
    endpoints: Endpoints,
}

impl AltosClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| AltosError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            credentials: config.credentials,
            endpoints: config.endpoints,
        })
    }

    /// Build a client from optional credentials; an empty username is looked
    /// up in `ALTOS_USERNAME`.
    pub fn from_credentials(username: &str, password: &str) -> Result<Self> {
        Self::new(ClientConfig::resolve(username, password)?)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Download URL for the snapshot published on `date`
    pub fn file_url_for_date(&self, date: &str) -> Result<String> {
        self.endpoints.file_url(date)
    }

    /// Available snapshot files, most recent first
    pub async fn list_files(&self) -> Result<Vec<FileEntry>> {
        info!("Fetching Altos file listing from {}", self.endpoints.list_url);

        let response = self
            .http
            .get(self.endpoints.list_url.as_str())
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()
            .await?
            .error_for_status()?;

        let files: Vec<FileEntry> = response.json().await?;
        info!("Listing returned {} files", files.len());
        Ok(files)
    }

    /// Stream `url` into `download_path`, overwriting whatever is there.
    ///
    /// Altos files are gzipped; see [`AltosClient::decompress_file`].
    pub async fn download_file(&self, url: &str, download_path: &Path, auth: bool) -> Result<u64> {
        info!("Downloading {} to {:?}", url, download_path);

        let mut request = self.http.get(url);
        if auth {
            request = request.basic_auth(
                self.credentials.username(),
                Some(self.credentials.password()),
            );
        } else {
            debug!("Sending unauthenticated request");
        }

        let response = request.send().await?.error_for_status()?;
        let written = write_response_to_file(response, download_path).await?;

        info!("Downloaded {} bytes", written);
        Ok(written)
    }

    /// Decompress a downloaded `.gz` file alongside itself and return the new path
    pub fn decompress_file(download_path: impl AsRef<Path>) -> Result<PathBuf> {
        deflate_downloaded_file(download_path)
    }

    /// Date (`YYYY-MM-DD`) of the newest file the API offers
    pub async fn latest_file_date(&self) -> Result<String> {
        let files = self.list_files().await?;
        let latest = files
            .first()
            .ok_or_else(|| AltosError::Lookup("file listing is empty".to_string()))?;

        latest
            .date()
            .map(str::to_string)
            .ok_or_else(|| AltosError::Lookup("latest file has no date field".to_string()))
    }
}
