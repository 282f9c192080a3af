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

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::PlaylistDocument;
use crate::layout::{self, Table};
use crate::storage::{error::StorageError, FileMetadata, StorageProvider};

use super::tables::{project_albums, project_artists, project_songs};

/// Errors that abort a transformation run.
///
/// Any failure aborts the whole run. No documents are archived on error, so
/// everything is re-processed by the next run; partition overwrites make that
/// rerun safe.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date parse error: {0}")]
    Date(#[from] chrono::ParseError),
}

/// Result type for transformation
pub type TransformResult<T> = Result<T, TransformError>;

/// Outcome of one transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// Number of pending raw documents consumed.
    pub documents: usize,

    /// Rows written to the albums table.
    pub albums: usize,

    /// Rows written to the artists table.
    pub artists: usize,

    /// Rows written to the songs table.
    pub songs: usize,

    /// Raw documents moved to the processed prefix.
    pub archived: usize,
}

/// Builder for constructing a [`Transformer`].
pub struct TransformerBuilder {
    storage: Arc<dyn StorageProvider>,
}

impl TransformerBuilder {
    /// Creates a new `TransformerBuilder` with the given storage provider.
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Builds the `Transformer` instance.
    pub fn build(self) -> Transformer {
        Transformer {
            storage: self.storage,
        }
    }
}

/// The transformation stage.
///
/// One run drains the to-process prefix: every pending raw playlist document
/// is parsed, the union of their items is projected into the three curated
/// tables, each table is written as a dated CSV partition, and the consumed
/// documents are archived.
///
/// # Examples
///
/// ```no_run
/// use tracklake::storage::{StorageConfig, StorageProviderFactory};
/// use tracklake::transform::Transformer;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = StorageConfig::aws().with_option("bucket", "my-bucket");
/// let storage = StorageProviderFactory::from_config(config).await?;
///
/// let transformer = Transformer::builder(storage).build();
/// let report = transformer.run().await?;
/// println!("{} songs written", report.songs);
/// # Ok(())
/// # }
/// ```
pub struct Transformer {
    storage: Arc<dyn StorageProvider>,
}

impl Transformer {
    /// Creates a new `TransformerBuilder` for constructing a `Transformer`.
    pub fn builder(storage: Arc<dyn StorageProvider>) -> TransformerBuilder {
        TransformerBuilder::new(storage)
    }

    /// Run one transformation over all pending raw documents.
    ///
    /// The to-process prefix is listed exactly once; the same listing drives
    /// both the read phase and the archive phase, so documents ingested while
    /// the run is in flight are left for the next run.
    ///
    /// # Errors
    ///
    /// Returns an error if listing, reading, parsing, projecting, or writing
    /// fails. On error nothing is archived.
    pub async fn run(&self) -> TransformResult<TransformReport> {
        let pending = self
            .storage
            .list_objects(layout::RAW_TO_PROCESS_PREFIX, Some(".json"))
            .await?;

        if pending.is_empty() {
            warn!("No pending raw documents, nothing to transform");
            return Ok(TransformReport::default());
        }
        info!("Transforming {} pending raw document(s)", pending.len());

        let mut documents = Vec::with_capacity(pending.len());
        for meta in &pending {
            let bytes = self.storage.read_object(&meta.path).await?;
            let document: PlaylistDocument = serde_json::from_slice(&bytes)?;
            documents.push(document);
        }

        let albums = project_albums(&documents);
        let artists = project_artists(&documents);
        let songs = project_songs(&documents)?;

        let run_date = Utc::now().date_naive();
        self.write_table(Table::Album, &albums, run_date).await?;
        self.write_table(Table::Artist, &artists, run_date).await?;
        self.write_table(Table::Songs, &songs, run_date).await?;

        let archived = self.archive(&pending).await?;

        Ok(TransformReport {
            documents: documents.len(),
            albums: albums.len(),
            artists: artists.len(),
            songs: songs.len(),
            archived,
        })
    }

    /// Serialize one table to CSV and write its dated partition. A rerun on
    /// the same date writes the same key and overwrites the partition.
    async fn write_table<R: Serialize>(
        &self,
        table: Table,
        rows: &[R],
        run_date: chrono::NaiveDate,
    ) -> TransformResult<()> {
        let body = rows_to_csv(rows)?;
        let key = layout::table_partition_key(table, run_date);
        self.storage.put_object(&key, body.into()).await?;
        info!(
            "Wrote {} {} row(s) to {}",
            rows.len(),
            table.dir(),
            self.storage.uri_from_path(&key)
        );
        Ok(())
    }

    /// Move the consumed raw documents to the processed prefix, keeping their
    /// file names. Copies before deletes, per document.
    async fn archive(&self, consumed: &[FileMetadata]) -> TransformResult<usize> {
        for meta in consumed {
            let destination = layout::processed_key_for(&meta.path);
            self.storage.copy_object(&meta.path, &destination).await?;
            self.storage.delete_object(&meta.path).await?;
        }
        info!("Archived {} raw document(s)", consumed.len());
        Ok(consumed.len())
    }
}

/// Serialize rows to CSV bytes. `csv` derives the header from the first
/// serialized row, so an empty table produces an empty file.
fn rows_to_csv<R: Serialize>(rows: &[R]) -> TransformResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{error::StorageResult, StorageConfig, StorageProviderFactory};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    async fn local_storage(dir: &TempDir) -> Arc<dyn StorageProvider> {
        let config =
            StorageConfig::local().with_option("path", dir.path().to_string_lossy().to_string());
        StorageProviderFactory::from_config(config).await.unwrap()
    }

    const RAW_DOC: &str = r#"{
        "items": [
            {
                "added_at": "2024-03-01T09:30:00Z",
                "track": {
                    "id": "t1",
                    "name": "First Song",
                    "duration_ms": 201000,
                    "popularity": 83,
                    "external_urls": {"spotify": "https://open.spotify.com/track/t1"},
                    "album": {
                        "id": "al1",
                        "name": "Album One",
                        "release_date": "2024-02-16",
                        "total_tracks": 12,
                        "external_urls": {"spotify": "https://open.spotify.com/album/al1"}
                    },
                    "artists": [
                        {"id": "ar1", "name": "Artist One",
                         "external_urls": {"spotify": "https://open.spotify.com/artist/ar1"}}
                    ]
                }
            }
        ]
    }"#;

    async fn seed_pending(storage: &Arc<dyn StorageProvider>, file_name: &str, body: &str) {
        let key = format!("{}/{}", layout::RAW_TO_PROCESS_PREFIX, file_name);
        storage
            .put_object(&key, body.as_bytes().to_vec().into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_writes_tables_and_archives() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        seed_pending(&storage, "spotify_raw_a.json", RAW_DOC).await;

        let transformer = Transformer::builder(Arc::clone(&storage)).build();
        let report = transformer.run().await.unwrap();

        assert_eq!(
            report,
            TransformReport {
                documents: 1,
                albums: 1,
                artists: 1,
                songs: 1,
                archived: 1,
            }
        );

        // Partitions exist at the dated keys
        let run_date = Utc::now().date_naive();
        for table in [Table::Album, Table::Artist, Table::Songs] {
            let key = layout::table_partition_key(table, run_date);
            assert!(storage.read_object(&key).await.is_ok(), "missing {}", key);
        }

        // The to-process prefix is drained and the archive holds the document
        let pending = storage
            .list_objects(layout::RAW_TO_PROCESS_PREFIX, Some(".json"))
            .await
            .unwrap();
        assert!(pending.is_empty());
        let processed = storage
            .list_objects(layout::RAW_PROCESSED_PREFIX, Some(".json"))
            .await
            .unwrap();
        assert_eq!(processed.len(), 1);
        assert!(processed[0].path.ends_with("spotify_raw_a.json"));
    }

    #[tokio::test]
    async fn test_songs_csv_content() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        seed_pending(&storage, "spotify_raw_a.json", RAW_DOC).await;

        let transformer = Transformer::builder(Arc::clone(&storage)).build();
        transformer.run().await.unwrap();

        let key = layout::table_partition_key(Table::Songs, Utc::now().date_naive());
        let body = storage.read_object(&key).await.unwrap();
        let csv = String::from_utf8(body).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "song_id,song_name,duration_ms,url,popularity,song_added,album_id,artist_id"
        );
        assert_eq!(
            lines.next().unwrap(),
            "t1,First Song,201000,https://open.spotify.com/track/t1,83,2024-03-01,al1,ar1"
        );
        assert!(lines.next().is_none());
    }

    #[tokio::test]
    async fn test_documents_are_unioned_before_dedup() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        // Same document twice, under different keys
        seed_pending(&storage, "spotify_raw_a.json", RAW_DOC).await;
        seed_pending(&storage, "spotify_raw_b.json", RAW_DOC).await;

        let transformer = Transformer::builder(Arc::clone(&storage)).build();
        let report = transformer.run().await.unwrap();

        assert_eq!(report.documents, 2);
        assert_eq!(report.songs, 1);
        assert_eq!(report.albums, 1);
        assert_eq!(report.artists, 1);
        assert_eq!(report.archived, 2);
    }

    #[tokio::test]
    async fn test_empty_pending_is_a_degenerate_success() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;

        let transformer = Transformer::builder(Arc::clone(&storage)).build();
        let report = transformer.run().await.unwrap();

        assert_eq!(report, TransformReport::default());

        // No partitions were written
        let written = storage
            .list_objects(layout::TRANSFORMED_PREFIX, None)
            .await
            .unwrap();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document_aborts_without_archiving() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        seed_pending(&storage, "spotify_raw_bad.json", "{not json").await;

        let transformer = Transformer::builder(Arc::clone(&storage)).build();
        let result = transformer.run().await;
        assert!(matches!(result, Err(TransformError::Json(_))));

        // The bad document stays pending
        let pending = storage
            .list_objects(layout::RAW_TO_PROCESS_PREFIX, Some(".json"))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn test_same_date_rerun_overwrites_partition() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        let transformer = Transformer::builder(Arc::clone(&storage)).build();

        seed_pending(&storage, "spotify_raw_a.json", RAW_DOC).await;
        transformer.run().await.unwrap();

        // Second batch on the same date carries a different track
        let second = RAW_DOC.replace("t1", "t2");
        seed_pending(&storage, "spotify_raw_b.json", &second).await;
        transformer.run().await.unwrap();

        let key = layout::table_partition_key(Table::Songs, Utc::now().date_naive());
        let body = String::from_utf8(storage.read_object(&key).await.unwrap()).unwrap();
        assert!(body.contains("t2,"));
        assert!(!body.contains("t1,"));
    }

    /// Delegates to a real provider, but sneaks a new pending document into
    /// the bucket during the read phase.
    struct LateArrivalStorage {
        inner: Arc<dyn StorageProvider>,
        injected: AtomicBool,
    }

    #[async_trait::async_trait]
    impl StorageProvider for LateArrivalStorage {
        fn base_path(&self) -> &str {
            self.inner.base_path()
        }

        async fn put_object(&self, path: &str, bytes: bytes::Bytes) -> StorageResult<()> {
            self.inner.put_object(path, bytes).await
        }

        async fn read_object(&self, path: &str) -> StorageResult<Vec<u8>> {
            if !self.injected.swap(true, Ordering::SeqCst) {
                let key = format!("{}/spotify_raw_late.json", layout::RAW_TO_PROCESS_PREFIX);
                self.inner
                    .put_object(&key, RAW_DOC.as_bytes().to_vec().into())
                    .await?;
            }
            self.inner.read_object(path).await
        }

        async fn list_objects(
            &self,
            prefix: &str,
            suffix: Option<&str>,
        ) -> StorageResult<Vec<crate::storage::FileMetadata>> {
            self.inner.list_objects(prefix, suffix).await
        }

        async fn copy_object(&self, from: &str, to: &str) -> StorageResult<()> {
            self.inner.copy_object(from, to).await
        }

        async fn delete_object(&self, path: &str) -> StorageResult<()> {
            self.inner.delete_object(path).await
        }

        fn uri_from_path(&self, path: &str) -> String {
            self.inner.uri_from_path(path)
        }
    }

    #[tokio::test]
    async fn test_document_arriving_mid_run_is_left_pending() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        seed_pending(&storage, "spotify_raw_a.json", RAW_DOC).await;

        let sneaky: Arc<dyn StorageProvider> = Arc::new(LateArrivalStorage {
            inner: Arc::clone(&storage),
            injected: AtomicBool::new(false),
        });
        let transformer = Transformer::builder(sneaky).build();
        let report = transformer.run().await.unwrap();

        // Only the document present at listing time was consumed
        assert_eq!(report.documents, 1);
        assert_eq!(report.archived, 1);

        let pending = storage
            .list_objects(layout::RAW_TO_PROCESS_PREFIX, Some(".json"))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert!(pending[0].path.ends_with("spotify_raw_late.json"));
    }

    #[test]
    fn test_rows_to_csv_empty_table() {
        let rows: Vec<super::super::tables::AlbumRow> = vec![];
        let body = rows_to_csv(&rows).unwrap();
        assert!(body.is_empty());
    }
}
