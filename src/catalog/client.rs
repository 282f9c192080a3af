// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use tracing::debug;

use super::error::{CatalogError, CatalogResult};

/// Environment variable holding the catalog API client id.
pub const CLIENT_ID_VAR: &str = "client_id";

/// Environment variable holding the catalog API client secret.
pub const CLIENT_SECRET_VAR: &str = "client_secret";

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Extract a playlist identifier from a share URL.
///
/// Takes the last path segment and strips any trailing query string, so
/// `https://open.spotify.com/playlist/ABC123?si=xyz` yields `ABC123`.
pub fn playlist_id_from_url(url: &str) -> &str {
    let tail = url.rsplit('/').next().unwrap_or(url);
    tail.split('?').next().unwrap_or(tail)
}

/// Source of playlist track listings.
///
/// The ingest stage depends on this seam rather than on [`CatalogClient`]
/// directly, so tests can substitute a canned source.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one playlist's full track listing as the raw JSON document
    /// returned by the API.
    async fn playlist_tracks(&self, playlist_id: &str) -> CatalogResult<Value>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the music catalog API, authenticating with the
/// client-credentials flow.
pub struct CatalogClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    accounts_url: String,
    api_url: String,
}

impl CatalogClient {
    /// Create a client with explicit credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Create a client from the `client_id` / `client_secret` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if either variable is absent; missing
    /// credentials are a fatal configuration error.
    pub fn from_env() -> CatalogResult<Self> {
        let client_id = env::var(CLIENT_ID_VAR).map_err(|_| {
            CatalogError::ConfigError(format!("environment variable '{}' not set", CLIENT_ID_VAR))
        })?;
        let client_secret = env::var(CLIENT_SECRET_VAR).map_err(|_| {
            CatalogError::ConfigError(format!(
                "environment variable '{}' not set",
                CLIENT_SECRET_VAR
            ))
        })?;
        Ok(Self::new(client_id, client_secret))
    }

    /// Override the accounts (token) endpoint base URL.
    pub fn with_accounts_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_url = url.into();
        self
    }

    /// Override the API endpoint base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Exchange client credentials for a bearer token.
    async fn access_token(&self) -> CatalogResult<String> {
        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        debug!("Obtained catalog API token");
        Ok(token.access_token)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn playlist_tracks(&self, playlist_id: &str) -> CatalogResult<Value> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!(
                "{}/v1/playlists/{}/tracks",
                self.api_url, playlist_id
            ))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let document: Value = response.json().await?;
        debug!("Fetched track listing for playlist={}", playlist_id);
        Ok(document)
    }
}
