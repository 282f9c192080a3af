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

use clap::{Parser, Subcommand};
use std::error::Error;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tracklake::catalog::CatalogClient;
use tracklake::ingest::Ingestor;
use tracklake::job::HttpJobRunner;
use tracklake::storage::{StorageConfig, StorageProviderFactory};
use tracklake::transform::Transformer;

#[derive(Parser)]
#[command(
    name = "tracklake",
    about = "Batch pipeline: ingest playlist metadata into object storage and curate it into albums/artists/songs tables"
)]
struct Cli {
    /// Storage backend: local, aws, azure, or gcs
    #[arg(long, default_value = "local")]
    storage: String,

    /// Bucket (aws/gcs) or container (azure) name
    #[arg(long)]
    bucket: Option<String>,

    /// Base directory for local storage
    #[arg(long)]
    path: Option<String>,

    /// Extra storage options as key=value (repeatable), e.g. -o region=us-east-1
    #[arg(short = 'o', long = "storage-option", value_parser = parse_key_val)]
    storage_options: Vec<(String, String)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one playlist's track listing, store the raw JSON, and trigger
    /// the transformation job
    Ingest {
        /// Playlist share URL or bare playlist id
        playlist_url: String,

        /// Name of the transformation job to trigger after ingesting
        #[arg(long)]
        job_name: Option<String>,

        /// Base URL of the job runner's HTTP API
        #[arg(long)]
        job_runner_url: Option<String>,
    },
    /// Transform all pending raw documents into dated CSV partitions and
    /// archive them
    Transform,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: {}", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn storage_config(cli: &Cli) -> StorageConfig {
    let mut config = StorageConfig::new(&cli.storage);
    if let Some(bucket) = &cli.bucket {
        let key = if cli.storage == "azure" { "container" } else { "bucket" };
        config = config.with_option(key, bucket);
    }
    if let Some(path) = &cli.path {
        config = config.with_option("path", path);
    }
    for (key, value) in &cli.storage_options {
        config = config.with_option(key, value);
    }
    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let storage = StorageProviderFactory::from_config(storage_config(&cli)).await?;

    match cli.command {
        Command::Ingest {
            playlist_url,
            job_name,
            job_runner_url,
        } => {
            let catalog = Arc::new(CatalogClient::from_env()?);
            let mut builder = Ingestor::builder(catalog, storage);
            if let (Some(job_name), Some(runner_url)) = (job_name, job_runner_url) {
                let runner = Arc::new(HttpJobRunner::new(runner_url)?);
                builder = builder.with_job_trigger(runner, job_name);
            }

            let report = builder.build().run(&playlist_url).await?;
            info!("Ingestion complete: {}", serde_json::to_string(&report)?);
        }
        Command::Transform => {
            let transformer = Transformer::builder(storage).build();
            let report = transformer.run().await?;
            info!(
                "Transformation complete: {}",
                serde_json::to_string(&report)?
            );
        }
    }

    Ok(())
}
