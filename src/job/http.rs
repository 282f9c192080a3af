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
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::runner::{JobError, JobResult, JobRunState, JobRunner};

#[derive(Debug, Deserialize)]
struct StartRunResponse {
    run_id: String,
}

#[derive(Debug, Deserialize)]
struct RunStateResponse {
    state: String,
}

/// Job runner client for runners exposing an HTTP start/status surface:
/// `POST {base}/jobs/{name}/runs` and `GET {base}/jobs/{name}/runs/{id}`.
pub struct HttpJobRunner {
    http: reqwest::Client,
    base_url: String,
}

impl HttpJobRunner {
    /// Create a runner client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn new(base_url: impl Into<String>) -> JobResult<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl JobRunner for HttpJobRunner {
    async fn start_job_run(&self, job_name: &str) -> JobResult<String> {
        let response = self
            .http
            .post(format!("{}/jobs/{}/runs", self.base_url, job_name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let started: StartRunResponse = response.json().await?;
        debug!("Started job={} run_id={}", job_name, started.run_id);
        Ok(started.run_id)
    }

    async fn job_run_state(&self, job_name: &str, run_id: &str) -> JobResult<JobRunState> {
        let response = self
            .http
            .get(format!(
                "{}/jobs/{}/runs/{}",
                self.base_url, job_name, run_id
            ))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let run: RunStateResponse = response.json().await?;
        Ok(JobRunState::parse(&run.state))
    }
}
