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

//! Managed job runner abstraction.
//!
//! The job runner is an external collaborator: the ingest stage only starts a
//! named job and probes its state once. [`HttpJobRunner`] talks to a runner
//! exposing a start/status HTTP surface; tests substitute their own
//! [`JobRunner`] implementations.

pub mod http;
pub mod runner;

// Public exports
pub use http::HttpJobRunner;
pub use runner::{JobError, JobResult, JobRunState, JobRunner};
