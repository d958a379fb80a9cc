//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::time::Duration;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::probe::EndpointSpec;

/// Root configuration for the site monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Cycle scheduling settings.
    pub monitor: MonitorSettings,

    /// Probe client settings.
    pub probe: ProbeConfig,

    /// Result delivery settings.
    pub sink: SinkConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Monitored endpoints, in document order.
    #[serde(deserialize_with = "deserialize_endpoints")]
    pub endpoints: Vec<EndpointSpec>,
}

/// Cycle scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Delay between the end of one cycle and the start of the next, in seconds.
    pub interval_secs: u64,

    /// Maximum number of probes in flight at once.
    pub batch_size: usize,

    /// Whole-exchange deadline for a single probe, in seconds.
    pub timeout_secs: u64,
}

impl MonitorSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: 10,
        }
    }
}

/// HTTP client configuration for probes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// User-Agent header sent with every probe.
    pub user_agent: String,

    /// Skip certificate and hostname verification.
    ///
    /// WARNING: enabled by default so that endpoints with self-signed or
    /// misconfigured certificates still report reachability. Set to `false`
    /// to require valid TLS.
    pub accept_invalid_certs: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("site-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: true,
        }
    }
}

/// Which sink receives cycle reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Log a summary of each report.
    Log,
    /// POST each report to a collector over HTTP.
    Http,
}

/// Result sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,

    /// Collector base URL (HTTP sink only).
    pub server_url: String,

    /// Path appended to `server_url`.
    pub path: String,

    /// Delivery request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::Log,
            server_url: "http://localhost:3000".to_string(),
            path: "/api/status".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format (full, compact, pretty).
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "full".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// An `[endpoints]` value: either a bare URL or a detailed table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EndpointEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default = "default_max_redirects")]
        max_redirects: usize,
        #[serde(default)]
        special_handling: bool,
    },
}

fn default_max_redirects() -> usize {
    EndpointSpec::DEFAULT_MAX_REDIRECTS
}

impl EndpointEntry {
    fn into_spec(self, name: String) -> EndpointSpec {
        match self {
            EndpointEntry::Url(url) => EndpointSpec::new(name, url),
            EndpointEntry::Detailed {
                url,
                max_redirects,
                special_handling,
            } => EndpointSpec {
                name,
                url,
                max_redirects,
                special_handling,
            },
        }
    }
}

/// Deserialize the `[endpoints]` table into an ordered list.
///
/// Keys are visited in document order, which becomes probe order.
fn deserialize_endpoints<'de, D>(deserializer: D) -> Result<Vec<EndpointSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EndpointsVisitor;

    impl<'de> Visitor<'de> for EndpointsVisitor {
        type Value = Vec<EndpointSpec>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of endpoint name to URL or endpoint table")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut endpoints = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, entry)) = map.next_entry::<String, EndpointEntry>()? {
                if endpoints.iter().any(|e: &EndpointSpec| e.name == name) {
                    return Err(de::Error::custom(format!("duplicate endpoint `{}`", name)));
                }
                endpoints.push(entry.into_spec(name));
            }
            Ok(endpoints)
        }
    }

    deserializer.deserialize_map(EndpointsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.monitor.interval_secs, 60);
        assert_eq!(config.monitor.batch_size, 5);
        assert_eq!(config.monitor.timeout(), Duration::from_secs(10));
        assert!(config.probe.accept_invalid_certs);
        assert!(config.probe.user_agent.starts_with("site-monitor/"));
        assert_eq!(config.sink.kind, SinkKind::Log);
        assert!(config.endpoints.is_empty());
    }

    #[test]
    fn test_endpoints_keep_document_order() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [endpoints]
            "gov.gr" = "https://www.gov.gr"
            gsis = "https://www.gsis.gr"
            efka = { url = "https://www.efka.gov.gr", max_redirects = 2, special_handling = true }
            alpha = "https://alpha.example"
            "#,
        )
        .unwrap();

        let names: Vec<_> = config.endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["gov.gr", "gsis", "efka", "alpha"]);

        assert_eq!(config.endpoints[0].max_redirects, 5);
        assert!(!config.endpoints[0].special_handling);
        assert_eq!(config.endpoints[2].url, "https://www.efka.gov.gr");
        assert_eq!(config.endpoints[2].max_redirects, 2);
        assert!(config.endpoints[2].special_handling);
    }

    #[test]
    fn test_detailed_entry_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [endpoints]
            site = { url = "https://site.example" }
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoints[0].max_redirects, 5);
        assert!(!config.endpoints[0].special_handling);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [monitor]
            interval_secs = 30
            batch_size = 2

            [probe]
            accept_invalid_certs = false

            [sink]
            kind = "http"
            server_url = "http://collector:3000"
            "#,
        )
        .unwrap();
        assert_eq!(config.monitor.interval(), Duration::from_secs(30));
        assert_eq!(config.monitor.batch_size, 2);
        assert_eq!(config.monitor.timeout_secs, 10);
        assert!(!config.probe.accept_invalid_certs);
        assert_eq!(config.sink.kind, SinkKind::Http);
        assert_eq!(config.sink.path, "/api/status");
    }
}
