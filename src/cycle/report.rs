//! Aggregated result of one cycle.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::probe::ProbeResult;

/// Results of one full pass over all endpoints.
///
/// `results` is in endpoint order. A report only exists once every
/// endpoint has been probed; it is never built from a partial pass.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    #[serde(rename = "duration_seconds", serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub results: Vec<ProbeResult>,
}

impl CycleReport {
    pub fn up_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_up).count()
    }

    pub fn down_count(&self) -> usize {
        self.results.len() - self.up_count()
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{EndpointSpec, ErrorKind};

    #[test]
    fn test_counts_and_json() {
        let a = EndpointSpec::new("a", "http://a.example");
        let b = EndpointSpec::new("b", "http://b.example");
        let c = EndpointSpec::new("c", "http://c.example");
        let report = CycleReport {
            started_at: Utc::now(),
            duration: Duration::from_millis(1500),
            results: vec![
                ProbeResult::completed(&a, 200, 0.1),
                ProbeResult::completed(&b, 503, 0.2),
                ProbeResult::failed(&c, ErrorKind::DnsFailure),
            ],
        };
        assert_eq!(report.up_count(), 1);
        assert_eq!(report.down_count(), 2);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["duration_seconds"], 1.5);
        assert_eq!(value["results"].as_array().unwrap().len(), 3);
        assert_eq!(value["results"][2]["error_kind"]["category"], "dns_failure");
    }
}
