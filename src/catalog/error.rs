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

use thiserror::Error;

/// Errors that can occur while talking to the catalog API
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Catalog API returned status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("JSON decode error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = CatalogError::ConfigError("missing client_id".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing client_id");
    }

    #[test]
    fn test_api_error_display() {
        let error = CatalogError::ApiError {
            status: 401,
            body: "invalid token".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Catalog API returned status 401: invalid token"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: CatalogError = json_error.into();
        assert!(error.to_string().contains("JSON decode error"));
    }
}
