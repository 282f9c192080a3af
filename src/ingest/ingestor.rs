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

use crate::catalog::{playlist_id_from_url, CatalogError, CatalogSource};
use crate::job::{JobRunState, JobRunner};
use crate::layout;
use crate::storage::{error::StorageError, StorageProvider};

/// Errors that abort an ingestion run.
///
/// Fetch and storage-write failures are fatal; job-trigger failures are not
/// errors at all (see [`TriggerOutcome`]).
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

/// What happened to the downstream job trigger.
///
/// The raw document is already stored by the time the trigger fires, so a
/// trigger failure does not fail the ingestion; it is surfaced here instead
/// of being logged and forgotten, letting the caller distinguish "ingested,
/// trigger unknown" from "both succeeded".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TriggerOutcome {
    /// The job run was started; `state` is a single immediate probe, which
    /// generally reports a non-terminal state.
    Triggered { run_id: String, state: JobRunState },
    /// Starting the job run failed.
    Failed { reason: String },
    /// No job runner is configured.
    Skipped,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Key the raw playlist document was stored under.
    pub raw_object_key: String,

    /// Outcome of the downstream job trigger.
    pub trigger: TriggerOutcome,
}

/// Builder for constructing an [`Ingestor`].
pub struct IngestorBuilder {
    catalog: Arc<dyn CatalogSource>,
    storage: Arc<dyn StorageProvider>,
    job_runner: Option<Arc<dyn JobRunner>>,
    job_name: Option<String>,
}

impl IngestorBuilder {
    /// Creates a new `IngestorBuilder` with the given catalog source and
    /// storage provider.
    pub fn new(catalog: Arc<dyn CatalogSource>, storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            catalog,
            storage,
            job_runner: None,
            job_name: None,
        }
    }

    /// Configure the downstream transformation job to trigger after the raw
    /// document is stored.
    pub fn with_job_trigger(
        mut self,
        job_runner: Arc<dyn JobRunner>,
        job_name: impl Into<String>,
    ) -> Self {
        self.job_runner = Some(job_runner);
        self.job_name = Some(job_name.into());
        self
    }

    /// Builds the `Ingestor` instance.
    pub fn build(self) -> Ingestor {
        Ingestor {
            catalog: self.catalog,
            storage: self.storage,
            job_runner: self.job_runner,
            job_name: self.job_name,
        }
    }
}

/// The ingestion stage.
///
/// Holds explicitly constructed, passed-in client handles; nothing here is
/// process-global, so invocations of a long-lived process share no hidden
/// state.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use tracklake::catalog::CatalogClient;
/// use tracklake::ingest::Ingestor;
/// use tracklake::storage::{StorageConfig, StorageProviderFactory};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = StorageConfig::aws().with_option("bucket", "my-bucket");
/// let storage = StorageProviderFactory::from_config(config).await?;
/// let catalog = Arc::new(CatalogClient::from_env()?);
///
/// let ingestor = Ingestor::builder(catalog, storage).build();
/// let report = ingestor
///     .run("https://open.spotify.com/playlist/ABC123?si=xyz")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Ingestor {
    catalog: Arc<dyn CatalogSource>,
    storage: Arc<dyn StorageProvider>,
    job_runner: Option<Arc<dyn JobRunner>>,
    job_name: Option<String>,
}

impl Ingestor {
    /// Creates a new `IngestorBuilder` for constructing an `Ingestor`.
    pub fn builder(
        catalog: Arc<dyn CatalogSource>,
        storage: Arc<dyn StorageProvider>,
    ) -> IngestorBuilder {
        IngestorBuilder::new(catalog, storage)
    }

    /// Run one ingestion: fetch the playlist's track listing, store it as a
    /// timestamped raw JSON object, then trigger the transformation job.
    ///
    /// # Arguments
    ///
    /// * `playlist_url` - Playlist share URL (or bare playlist id)
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch, JSON encoding, or storage write
    /// fails. Trigger failures do not error; they are reported in
    /// [`IngestReport::trigger`].
    pub async fn run(&self, playlist_url: &str) -> IngestResult<IngestReport> {
        let playlist_id = playlist_id_from_url(playlist_url);
        info!("Fetching track listing for playlist={}", playlist_id);

        let document = self.catalog.playlist_tracks(playlist_id).await?;
        let body = serde_json::to_vec(&document)?;

        let raw_object_key = layout::raw_object_key(Utc::now());
        self.storage
            .put_object(&raw_object_key, body.into())
            .await?;
        info!(
            "Stored raw playlist document at {}",
            self.storage.uri_from_path(&raw_object_key)
        );

        let trigger = self.trigger_transform_job().await;

        Ok(IngestReport {
            raw_object_key,
            trigger,
        })
    }

    /// Start the transformation job and probe its state once, without waiting
    /// for completion.
    async fn trigger_transform_job(&self) -> TriggerOutcome {
        let (Some(runner), Some(job_name)) = (&self.job_runner, &self.job_name) else {
            info!("No job runner configured, skipping transform trigger");
            return TriggerOutcome::Skipped;
        };

        match runner.start_job_run(job_name).await {
            Ok(run_id) => {
                let state = match runner.job_run_state(job_name, &run_id).await {
                    Ok(state) => state,
                    Err(e) => {
                        warn!("Failed to probe state of job={} run={}: {}", job_name, run_id, e);
                        JobRunState::Other("UNKNOWN".to_string())
                    }
                };
                info!("Job status: job={} run={} state={}", job_name, run_id, state);
                TriggerOutcome::Triggered { run_id, state }
            }
            Err(e) => {
                warn!("Failed to trigger job={}: {}", job_name, e);
                TriggerOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogResult;
    use crate::job::{JobError, JobResult};
    use crate::storage::{StorageConfig, StorageProviderFactory};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct FixedCatalog {
        document: Value,
    }

    #[async_trait]
    impl CatalogSource for FixedCatalog {
        async fn playlist_tracks(&self, _playlist_id: &str) -> CatalogResult<Value> {
            Ok(self.document.clone())
        }
    }

    struct HappyRunner;

    #[async_trait]
    impl JobRunner for HappyRunner {
        async fn start_job_run(&self, _job_name: &str) -> JobResult<String> {
            Ok("run-1".to_string())
        }

        async fn job_run_state(&self, _job_name: &str, _run_id: &str) -> JobResult<JobRunState> {
            Ok(JobRunState::Running)
        }
    }

    struct BrokenRunner;

    #[async_trait]
    impl JobRunner for BrokenRunner {
        async fn start_job_run(&self, _job_name: &str) -> JobResult<String> {
            Err(JobError::ApiError {
                status: 503,
                body: "runner unavailable".to_string(),
            })
        }

        async fn job_run_state(&self, _job_name: &str, _run_id: &str) -> JobResult<JobRunState> {
            unreachable!("start failed, state must not be probed")
        }
    }

    async fn local_storage(dir: &TempDir) -> Arc<dyn StorageProvider> {
        let config =
            StorageConfig::local().with_option("path", dir.path().to_string_lossy().to_string());
        StorageProviderFactory::from_config(config).await.unwrap()
    }

    fn sample_document() -> Value {
        json!({"items": [{"added_at": "2024-03-01T09:30:00Z", "track": {"id": "t1"}}]})
    }

    #[tokio::test]
    async fn test_run_stores_raw_document_verbatim() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        let catalog = Arc::new(FixedCatalog {
            document: sample_document(),
        });

        let ingestor = Ingestor::builder(catalog, Arc::clone(&storage)).build();
        let report = ingestor.run("https://open.spotify.com/playlist/P1?si=x").await.unwrap();

        assert!(report
            .raw_object_key
            .starts_with("raw_data/to_process/spotify_raw_"));
        assert!(report.raw_object_key.ends_with(".json"));
        assert_eq!(report.trigger, TriggerOutcome::Skipped);

        let stored = storage.read_object(&report.raw_object_key).await.unwrap();
        let stored: Value = serde_json::from_slice(&stored).unwrap();
        assert_eq!(stored, sample_document());
    }

    #[tokio::test]
    async fn test_run_reports_trigger_state() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        let catalog = Arc::new(FixedCatalog {
            document: sample_document(),
        });

        let ingestor = Ingestor::builder(catalog, storage)
            .with_job_trigger(Arc::new(HappyRunner), "transform_job")
            .build();
        let report = ingestor.run("P1").await.unwrap();

        assert_eq!(
            report.trigger,
            TriggerOutcome::Triggered {
                run_id: "run-1".to_string(),
                state: JobRunState::Running,
            }
        );
    }

    #[tokio::test]
    async fn test_trigger_failure_does_not_fail_ingestion() {
        let dir = TempDir::new().unwrap();
        let storage = local_storage(&dir).await;
        let catalog = Arc::new(FixedCatalog {
            document: sample_document(),
        });

        let ingestor = Ingestor::builder(catalog, Arc::clone(&storage))
            .with_job_trigger(Arc::new(BrokenRunner), "transform_job")
            .build();
        let report = ingestor.run("P1").await.unwrap();

        // The raw document is stored even though the trigger failed
        let pending = storage
            .list_objects("raw_data/to_process", Some(".json"))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);

        match report.trigger {
            TriggerOutcome::Failed { reason } => {
                assert!(reason.contains("runner unavailable"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
