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

//! Music catalog API client and playlist document models.
//!
//! The ingest stage treats the API response as an opaque JSON blob (it is
//! stored verbatim). The typed models in [`model`] exist for the transform
//! stage, which reads the stored documents schema-on-read.

pub mod client;
pub mod error;
pub mod model;

// Public exports
pub use client::{playlist_id_from_url, CatalogClient, CatalogSource};
pub use error::{CatalogError, CatalogResult};
pub use model::PlaylistDocument;
