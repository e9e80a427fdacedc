use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::time::Duration;


/// Normalized view of a response body. Exactly one shape per body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Normalized {
    /// Ping job with per-probe measurements
    PingJob(PingJob),

    /// Flattened metric groups
    MetricGroups(Vec<MetricGroup>),

    /// Body as received, when no structured shape matched
    RawText(String),
}


impl Normalized {
    /// Ping job, if that's the matched shape
    pub fn ping_job(&self) -> Option<&PingJob> {
        match self {
            Normalized::PingJob(job) => Some(job),
            _ => None,
        }
    }


    /// Metric groups, if that's the matched shape
    pub fn metric_groups(&self) -> Option<&[MetricGroup]> {
        match self {
            Normalized::MetricGroups(groups) => Some(groups),
            _ => None,
        }
    }


    /// Raw text, if nothing structured matched
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Normalized::RawText(text) => Some(text),
            _ => None,
        }
    }
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
/// Completed (or running) ping job
pub struct PingJob {
    /// Job id
    pub id: Option<String>,

    /// Pinged target
    pub target: Option<String>,

    /// Job status as reported by server
    pub status: Option<String>,

    /// Execution start timestamp
    pub executed_at: Option<String>,

    /// Execution finish timestamp
    pub finished_at: Option<String>,

    /// Whole job duration, only when positive
    pub total_duration_millis: Option<i64>,

    /// Per-probe measurements, never empty
    pub results: Vec<PingMeasurement>,
}


impl PingJob {
    /// Execution start as timestamp, when it's valid RFC 3339
    pub fn executed_at_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.executed_at.as_deref())
    }


    /// Execution finish as timestamp, when it's valid RFC 3339
    pub fn finished_at_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.finished_at.as_deref())
    }


    /// Whole job duration
    pub fn total_duration(&self) -> Option<Duration> {
        self.total_duration_millis
            .and_then(|millis| u64::try_from(millis).ok())
            .map(Duration::from_millis)
    }
}


fn parse_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value.and_then(|timestamp| DateTime::parse_from_rfc3339(timestamp).ok())
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
/// Single probe of a ping job
pub struct PingMeasurement {
    /// Measurement id
    pub id: Option<String>,

    /// Measurement type
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Measurement status
    pub status: Option<String>,

    /// Probe duration, only when positive
    pub duration_millis: Option<i64>,

    /// Ping metrics
    pub metrics: Option<PingMetrics>,
}


/// Ping statistics of a single probe. None means "not reported".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PingMetrics {
    /// Probe location name
    pub location: Option<String>,

    /// Probe country
    pub country: Option<String>,

    /// Resolved target IP
    pub ip: Option<String>,

    /// Packets transmitted
    pub transmitted: Option<i64>,

    /// Packets received
    pub received: Option<i64>,

    /// Packet loss in percent
    pub packet_loss_percent: Option<f64>,

    /// Minimum round trip in ms
    pub min_rtt_ms: Option<f64>,

    /// Average round trip in ms
    pub avg_rtt_ms: Option<f64>,

    /// Maximum round trip in ms
    pub max_rtt_ms: Option<f64>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Titled list of flattened metrics
pub struct MetricGroup {
    /// Group title, usually the check type
    pub title: Option<String>,

    /// Flattened metrics in source order
    pub metrics: Vec<MetricItem>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Labeled metric value
pub struct MetricItem {
    /// Human-readable label
    pub label: String,

    /// Stringified value
    pub value: String,
}


impl MetricItem {
    /// New metric item
    pub fn new(label: &str, value: &str) -> MetricItem {
        MetricItem {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}
