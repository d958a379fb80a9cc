//! HTTP(S) probing.
//!
//! # Responsibilities
//! - Issue one GET per endpoint per cycle
//! - Enforce a whole-exchange deadline (connect + redirects + headers)
//! - Enforce the per-endpoint redirect limit
//! - Turn every failure into a classified `ProbeResult`
//!
//! # Design Decisions
//! - One reqwest client per distinct redirect limit, shared by all probes
//! - Deadline enforced with `tokio::time::timeout`; the request future is
//!   dropped when it fires, which releases the connection
//! - TLS verification follows `ProbeConfig::accept_invalid_certs`

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use reqwest::Client;
use thiserror::Error;
use tokio::time;

use crate::config::ProbeConfig;
use crate::observability::metrics;
use crate::probe::classify::{classify, ErrorKind};
use crate::probe::types::{EndpointSpec, ProbeResult};
use crate::probe::Prober;

/// Errors raised while constructing a prober.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Probes endpoints over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpProber {
    config: ProbeConfig,
    /// Clients keyed by redirect limit.
    clients: HashMap<usize, Client>,
}

impl HttpProber {
    /// Build a prober with a client for every redirect limit in `endpoints`.
    pub fn new(config: ProbeConfig, endpoints: &[EndpointSpec]) -> Result<Self, ProbeError> {
        let mut clients = HashMap::new();
        for endpoint in endpoints {
            if !clients.contains_key(&endpoint.max_redirects) {
                let client = build_client(&config, endpoint.max_redirects)?;
                clients.insert(endpoint.max_redirects, client);
            }
        }

        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate and hostname verification disabled for probes");
        }

        Ok(Self { config, clients })
    }

    async fn send(&self, endpoint: &EndpointSpec, timeout: Duration) -> Result<(u16, f64), ErrorKind> {
        // Endpoints outside the construction set get a one-off client.
        let client = match self.clients.get(&endpoint.max_redirects) {
            Some(client) => client.clone(),
            None => build_client(&self.config, endpoint.max_redirects).map_err(|e| classify(&e))?,
        };

        let start = Instant::now();
        let request = client.get(&endpoint.url).send();

        match time::timeout(timeout, request).await {
            Ok(Ok(response)) => {
                let elapsed = start.elapsed().as_secs_f64();
                Ok((response.status().as_u16(), elapsed))
            }
            Ok(Err(e)) => {
                tracing::debug!(site = %endpoint.name, error = ?e, "Probe transport error");
                Err(classify(&e))
            }
            Err(_) => Err(ErrorKind::Timeout),
        }
    }
}

impl Prober for HttpProber {
    async fn probe(&self, endpoint: &EndpointSpec, timeout: Duration) -> ProbeResult {
        let result = match self.send(endpoint, timeout).await {
            Ok((status, elapsed)) => ProbeResult::completed(endpoint, status, elapsed),
            Err(kind) => {
                tracing::error!(
                    site = %endpoint.name,
                    url = %endpoint.url,
                    error = %kind,
                    "Error checking site"
                );
                ProbeResult::failed(endpoint, kind)
            }
        };

        metrics::record_probe(&result);
        result
    }
}

fn build_client(config: &ProbeConfig, max_redirects: usize) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .redirect(Policy::limited(max_redirects))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .danger_accept_invalid_hostnames(config.accept_invalid_certs)
        .no_proxy()
        .build()
}
