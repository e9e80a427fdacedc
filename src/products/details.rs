use crate::products::normalized::PingJob;
use serde::{Deserialize, Serialize};


/// Typed details of the first probe, per check type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CheckDetails {
    /// HTTP check details
    Http(HttpCheckResult),

    /// Ping job
    Ping(PingJob),

    /// TCP port check details
    Tcp(TcpCheckResult),

    /// Traceroute details
    Traceroute(TracerouteCheckResult),

    /// DNS lookup details
    DnsLookup(DnsLookupResult),
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// HTTP check probe
pub struct HttpCheckResult {
    /// Probe id
    pub id: Option<String>,

    /// Probe status
    pub status: Option<String>,

    /// Probe duration
    pub duration_millis: Option<i64>,

    /// Probe location
    pub location: Option<String>,

    /// Probe country
    pub country: Option<String>,

    /// HTTP response time
    pub time_millis: Option<i64>,

    /// HTTP status code returned by the target
    pub status_code: Option<i64>,

    /// Target IP
    pub ip: Option<String>,

    /// Result description
    pub result: Option<String>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// TCP port check probe
pub struct TcpCheckResult {
    /// Probe id
    pub id: Option<String>,

    /// Probe status
    pub status: Option<String>,

    /// Probe duration
    pub duration_millis: Option<i64>,

    /// Probe location
    pub location: Option<String>,

    /// Probe country
    pub country: Option<String>,

    /// Time to connect
    pub connect_time_millis: Option<i64>,

    /// Port state, ex. "open"
    pub connection_status: Option<String>,

    /// Target IP
    pub ip: Option<String>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Single traceroute hop
pub struct TracerouteHop {
    /// Hop number
    pub hop: Option<i64>,

    /// Hop address
    pub ip: Option<String>,

    /// Hop time as reported
    pub time: Option<String>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// Traceroute probe
pub struct TracerouteCheckResult {
    /// Probe id
    pub id: Option<String>,

    /// Probe status
    pub status: Option<String>,

    /// Probe duration
    pub duration_millis: Option<i64>,

    /// Probe message
    pub message: Option<String>,

    /// Hops, never empty
    pub hops: Vec<TracerouteHop>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// DNS lookup probe
pub struct DnsLookupResult {
    /// Probe id
    pub id: Option<String>,

    /// Probe status
    pub status: Option<String>,

    /// Probe duration
    pub duration_millis: Option<i64>,

    /// Probe location
    pub location: Option<String>,

    /// Probe country
    pub country: Option<String>,

    /// Resolved records, never empty
    pub records: Vec<String>,

    /// Records TTL
    pub ttl: Option<String>,
}
