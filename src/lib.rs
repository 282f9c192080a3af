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

//! # Tracklake
//!
//! A Rust library implementing a two-stage batch pipeline for playlist metadata:
//!
//! - **Ingest**: authenticate to a music catalog API, fetch one playlist's track
//!   listing, store the raw JSON under a "to-process" prefix in an object store,
//!   and ask a managed job runner to start the transformation job.
//! - **Transform**: read every pending raw document, flatten the nested
//!   track/album/artist structures into three deduplicated CSV tables written as
//!   dated partitions, then archive the consumed raw documents by copy-then-delete.
//!
//! The object store is the only coordination medium between the two stages; both
//! run as single-invocation batch jobs scheduled externally.
//!
//! ## Quick Start
//!
//! ### Transforming pending documents on a local filesystem
//!
//! ```rust,no_run
//! use tracklake::storage::{StorageConfig, StorageProviderFactory};
//! use tracklake::transform::Transformer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::local().with_option("path", "./demos/data");
//! let storage = StorageProviderFactory::from_config(config).await?;
//!
//! let transformer = Transformer::builder(storage).build();
//! let report = transformer.run().await?;
//! println!("{:?}", report);
//! # Ok(())
//! # }
//! ```
//!
//! ### Ingesting a playlist into AWS S3
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracklake::catalog::CatalogClient;
//! use tracklake::ingest::Ingestor;
//! use tracklake::storage::{StorageConfig, StorageProviderFactory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::aws()
//!     .with_option("bucket", "my-bucket")
//!     .with_option("region", "us-east-1");
//! let storage = StorageProviderFactory::from_config(config).await?;
//!
//! // Credentials come from the `client_id` / `client_secret` environment variables.
//! let catalog = Arc::new(CatalogClient::from_env()?);
//!
//! let ingestor = Ingestor::builder(catalog, storage).build();
//! let report = ingestor
//!     .run("https://open.spotify.com/playlist/37i9dQZEVXbNG2KDcFcKOF?si=abc")
//!     .await?;
//! println!("stored {}", report.raw_object_key);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog API client and playlist document models
//! - [`ingest`] - The ingestion stage
//! - [`job`] - Managed job runner abstraction
//! - [`layout`] - Bucket layout: key prefixes and key builders
//! - [`storage`] - Cloud storage abstraction layer
//! - [`transform`] - The transformation stage and table projections
//! - [`util`] - Utility functions and helpers

pub mod catalog;
pub mod ingest;
pub mod job;
pub mod layout;
pub mod storage;
pub mod transform;
pub mod util;

// Re-export commonly used types
pub use catalog::CatalogClient;
pub use ingest::{IngestReport, Ingestor, TriggerOutcome};
pub use storage::StorageConfig;
pub use transform::{TransformReport, Transformer};
