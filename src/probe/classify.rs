//! Failure classification.
//!
//! Maps a raw transport failure onto a small, stable set of categories.
//! Categories are checked in precedence order across the whole source
//! chain, so a timeout buried under a connect error still reads as a
//! timeout:
//!
//! ```text
//! Timeout → DnsFailure → ConnectionClosed → Transport(root cause) → Unknown
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

/// Stable failure category of a probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "reason", rename_all = "snake_case")]
pub enum ErrorKind {
    /// Deadline elapsed during connect or read.
    Timeout,
    /// Host name could not be resolved.
    DnsFailure,
    /// Peer closed the connection mid-exchange.
    ConnectionClosed,
    /// Any other network, protocol, TLS or redirect-limit failure.
    Transport(String),
    /// Nothing recognizable, not even a message.
    Unknown,
}

impl ErrorKind {
    /// Human-readable message reported in `ProbeResult::error_message`.
    pub fn message(&self) -> String {
        match self {
            ErrorKind::Timeout => "Connection timed out".to_string(),
            ErrorKind::DnsFailure => "DNS lookup failed".to_string(),
            ErrorKind::ConnectionClosed => "Connection closed by remote server".to_string(),
            ErrorKind::Transport(reason) => reason.clone(),
            ErrorKind::Unknown => "Unknown error".to_string(),
        }
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::DnsFailure => "dns_failure",
            ErrorKind::ConnectionClosed => "connection_closed",
            ErrorKind::Transport(_) => "transport",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// Resolver messages from hyper-util, glibc, macOS and Windows.
const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "temporary failure in name resolution",
];

const CLOSED_MARKERS: &[&str] = &[
    "connection closed before message completed",
    "connection reset by peer",
];

/// Classify a failure by walking its source chain.
pub fn classify(error: &(dyn StdError + 'static)) -> ErrorKind {
    let chain: Vec<&(dyn StdError + 'static)> =
        std::iter::successors(Some(error), |&e| e.source()).collect();

    if chain.iter().any(|e| is_timeout(*e)) {
        return ErrorKind::Timeout;
    }
    if chain.iter().any(|e| is_dns_failure(*e)) {
        return ErrorKind::DnsFailure;
    }
    if chain.iter().any(|e| is_connection_closed(*e)) {
        return ErrorKind::ConnectionClosed;
    }

    let reason = chain
        .iter()
        .rev()
        .map(|e| e.to_string())
        .find(|text| !text.trim().is_empty());

    match reason {
        Some(reason) => ErrorKind::Transport(reason.trim().to_string()),
        None => ErrorKind::Unknown,
    }
}

fn is_timeout(error: &(dyn StdError + 'static)) -> bool {
    if let Some(e) = error.downcast_ref::<reqwest::Error>() {
        return e.is_timeout();
    }
    if let Some(e) = error.downcast_ref::<hyper::Error>() {
        return e.is_timeout();
    }
    if let Some(e) = error.downcast_ref::<io::Error>() {
        return e.kind() == io::ErrorKind::TimedOut;
    }
    error.is::<tokio::time::error::Elapsed>()
}

fn is_dns_failure(error: &(dyn StdError + 'static)) -> bool {
    let text = error.to_string().to_lowercase();
    DNS_MARKERS.iter().any(|marker| text.contains(marker))
}

fn is_connection_closed(error: &(dyn StdError + 'static)) -> bool {
    if let Some(e) = error.downcast_ref::<hyper::Error>() {
        if e.is_incomplete_message() || e.is_closed() {
            return true;
        }
    }
    if let Some(e) = error.downcast_ref::<io::Error>() {
        if matches!(
            e.kind(),
            io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::UnexpectedEof
                | io::ErrorKind::BrokenPipe
        ) {
            return true;
        }
    }
    let text = error.to_string().to_lowercase();
    CLOSED_MARKERS.iter().any(|marker| text.contains(marker))
}
