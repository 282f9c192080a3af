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

//! Run the transform stage against the bundled sample data.
//!
//! The sample bucket lives at `demos/data/` and holds one raw playlist
//! document under `raw_data/to_process/`. Running this example writes the
//! three table partitions under `demos/data/transformed_data/` and archives
//! the document to `raw_data/processed/`.
//!
//! ```sh
//! cargo run --example local_transform
//! ```

use tracklake::storage::{StorageConfig, StorageProviderFactory};
use tracklake::transform::Transformer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StorageConfig::local().with_option("path", "./demos/data");
    let storage = StorageProviderFactory::from_config(config).await?;

    let transformer = Transformer::builder(storage).build();
    let report = transformer.run().await?;

    println!(
        "documents={} albums={} artists={} songs={} archived={}",
        report.documents, report.albums, report.artists, report.songs, report.archived
    );
    Ok(())
}
