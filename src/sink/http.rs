//! HTTP collector sink.
//!
//! POSTs the result list of each cycle as a JSON array to
//! `server_url` + `path`. Any non-2xx answer is a delivery failure.

use std::time::Duration;

use reqwest::Client;

use crate::config::SinkConfig;
use crate::cycle::CycleReport;
use crate::sink::{ResultSink, SinkError};

#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    url: String,
}

impl HttpSink {
    pub fn new(config: &SinkConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| SinkError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            url: join_url(&config.server_url, &config.path),
        })
    }

    /// Full collector URL reports are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ResultSink for HttpSink {
    async fn deliver(&self, report: &CycleReport) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(&report.results)
            .send()
            .await
            .map_err(|source| SinkError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        tracing::info!(url = %self.url, results = report.results.len(), "Results sent to server successfully");
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}
