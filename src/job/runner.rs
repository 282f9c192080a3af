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
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Errors that can occur while talking to the job runner
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Job runner returned status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// Result type for job runner operations
pub type JobResult<T> = Result<T, JobError>;

/// State of a job run as reported by the runner.
///
/// A probe issued right after triggering generally reports a non-terminal
/// state; the pipeline only logs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobRunState {
    Starting,
    Running,
    Succeeded,
    Failed,
    /// Any state string this crate does not recognize.
    Other(String),
}

impl JobRunState {
    /// Parse a runner-reported state string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "STARTING" => JobRunState::Starting,
            "RUNNING" => JobRunState::Running,
            "SUCCEEDED" => JobRunState::Succeeded,
            "FAILED" => JobRunState::Failed,
            _ => JobRunState::Other(raw.to_string()),
        }
    }
}

impl Display for JobRunState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JobRunState::Starting => write!(f, "STARTING"),
            JobRunState::Running => write!(f, "RUNNING"),
            JobRunState::Succeeded => write!(f, "SUCCEEDED"),
            JobRunState::Failed => write!(f, "FAILED"),
            JobRunState::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Generic trait for managed job runners
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Start a run of the named job.
    ///
    /// # Returns
    ///
    /// The runner-assigned run identifier.
    async fn start_job_run(&self, job_name: &str) -> JobResult<String>;

    /// Get the current state of a run of the named job.
    async fn job_run_state(&self, job_name: &str, run_id: &str) -> JobResult<JobRunState>;
}
