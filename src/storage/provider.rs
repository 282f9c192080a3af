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
use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::error::StorageResult;

/// Metadata about an object in storage
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Full key of the object
    pub path: String,

    /// Object size in bytes
    pub size: u64,

    /// Last modified timestamp (if available)
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Generic trait for cloud storage providers
///
/// This trait provides a unified interface for the operations the pipeline
/// performs against its bucket. Individual writes, copies, and deletes are
/// atomic (platform-guaranteed); multi-object sequences built on top of them
/// are not.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Get the base path/prefix for this storage provider.
    fn base_path(&self) -> &str;

    /// Write an object, replacing any existing object at the same key.
    ///
    /// # Arguments
    ///
    /// * `path` - The key to write to (relative to base_path)
    /// * `bytes` - The object contents
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Credentials are invalid or expired
    /// * Network or storage access errors occur
    async fn put_object(&self, path: &str, bytes: Bytes) -> StorageResult<()>;

    /// Read the full contents of an object.
    ///
    /// # Arguments
    ///
    /// * `path` - The key of the object (relative to base_path)
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The object does not exist
    /// * Network or storage access errors occur
    async fn read_object(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// List all objects under the given prefix, optionally filtered by a key
    /// suffix (e.g. `.json`).
    ///
    /// # Arguments
    ///
    /// * `prefix` - The prefix to list under (relative to base_path)
    /// * `suffix` - Optional key suffix filter applied to the results
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<FileMetadata>)` - Metadata for every matching object
    /// * `Err(StorageError)` - If listing fails
    async fn list_objects(
        &self,
        prefix: &str,
        suffix: Option<&str>,
    ) -> StorageResult<Vec<FileMetadata>>;

    /// Copy an object to a new key, replacing any existing destination object.
    ///
    /// # Arguments
    ///
    /// * `from` - Source key (relative to base_path)
    /// * `to` - Destination key (relative to base_path)
    async fn copy_object(&self, from: &str, to: &str) -> StorageResult<()>;

    /// Delete an object.
    ///
    /// # Arguments
    ///
    /// * `path` - The key of the object to delete (relative to base_path)
    async fn delete_object(&self, path: &str) -> StorageResult<()>;

    /// Get a full provider-specific URL for a key.
    ///
    /// # Returns
    ///
    /// A String containing the full provider-specific URL
    /// (e.g., "s3://bucket/path", "file:///path").
    fn uri_from_path(&self, path: &str) -> String;
}

impl Debug for dyn StorageProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "StorageProvider(base_path={})", self.base_path())
    }
}

/// Helper function to create an ObjectPath from a string
pub(crate) fn string_to_path(s: &str) -> ObjectPath {
    ObjectPath::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_file_metadata_creation() {
        let metadata = FileMetadata {
            path: "raw_data/to_process/doc.json".to_string(),
            size: 1024,
            last_modified: None,
        };

        assert_eq!(metadata.path, "raw_data/to_process/doc.json");
        assert_eq!(metadata.size, 1024);
        assert!(metadata.last_modified.is_none());
    }

    #[test]
    fn test_file_metadata_with_timestamp() {
        let now = Utc::now();
        let metadata = FileMetadata {
            path: "raw_data/to_process/doc.json".to_string(),
            size: 2048,
            last_modified: Some(now),
        };

        assert_eq!(metadata.last_modified.unwrap(), now);
    }

    #[test]
    fn test_string_to_path() {
        let path_str = "raw_data/to_process/doc.json";
        let object_path = string_to_path(path_str);
        assert_eq!(object_path.as_ref(), path_str);
    }

    #[test]
    fn test_string_to_path_empty() {
        let object_path = string_to_path("");
        assert_eq!(object_path.as_ref(), "");
    }
}
