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

//! Bucket layout shared by the ingest and transform stages.
//!
//! All keys live in a single bucket: raw playlist documents land under a
//! "to-process" prefix, move to a "processed" prefix once consumed, and the
//! curated tables are written as dated partitions under `transformed_data/`.

use chrono::{DateTime, NaiveDate, Utc};

/// Prefix for raw documents awaiting transformation.
pub const RAW_TO_PROCESS_PREFIX: &str = "raw_data/to_process";

/// Prefix raw documents are archived to after transformation.
pub const RAW_PROCESSED_PREFIX: &str = "raw_data/processed";

/// Root prefix for the curated tables.
pub const TRANSFORMED_PREFIX: &str = "transformed_data";

/// The three curated tables produced by the transform stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Album,
    Artist,
    Songs,
}

impl Table {
    /// Directory segment for this table under [`TRANSFORMED_PREFIX`].
    pub fn dir(&self) -> &'static str {
        match self {
            Table::Album => "album",
            Table::Artist => "artist",
            Table::Songs => "songs",
        }
    }
}

/// Build the storage key for a raw playlist document ingested at `at`.
///
/// The timestamp carries millisecond resolution, which keeps keys unique
/// across runs under any sane invocation cadence.
pub fn raw_object_key(at: DateTime<Utc>) -> String {
    format!(
        "{}/spotify_raw_{}.json",
        RAW_TO_PROCESS_PREFIX,
        at.format("%Y-%m-%dT%H-%M-%S%.3f")
    )
}

/// The file name component of a storage key (everything after the last `/`).
pub fn object_file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Archive destination for a consumed raw document, preserving its file name.
pub fn processed_key_for(raw_key: &str) -> String {
    format!("{}/{}", RAW_PROCESSED_PREFIX, object_file_name(raw_key))
}

/// Storage key for one table's dated CSV partition.
///
/// A rerun on the same calendar date writes the same key, so the partition is
/// overwritten rather than accumulated.
pub fn table_partition_key(table: Table, date: NaiveDate) -> String {
    format!(
        "{}/{}/{}_transformed_{}/part-00000.csv",
        TRANSFORMED_PREFIX,
        table.dir(),
        table.dir(),
        date
    )
}
