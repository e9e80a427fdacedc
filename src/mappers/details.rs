use crate::{
    checks::check::CheckType,
    mappers::{json::*, ping::ping_job_from},
    products::details::*,
};
use serde_json::Value;


/// Typed details of the first probe, picked by check type
pub fn extract_details(check_type: CheckType, body: Option<&str>) -> Option<CheckDetails> {
    let json = parse_object(body)?;
    match check_type {
        CheckType::Http => http_result_from(&json).map(CheckDetails::Http),
        CheckType::Ping => ping_job_from(&json).map(CheckDetails::Ping),
        CheckType::TcpPort => tcp_result_from(&json).map(CheckDetails::Tcp),
        CheckType::Traceroute => traceroute_result_from(&json).map(CheckDetails::Traceroute),
        CheckType::DnsLookup => dns_lookup_result_from(&json).map(CheckDetails::DnsLookup),
    }
}


/// First "result" element with its nested probe object of given name
fn first_probe<'a>(json: &'a JsonObject, probe: &str) -> Option<(&'a JsonObject, &'a JsonObject)> {
    let result = json.opt_array("result")?.first()?.as_object()?;
    let nested = result.opt_object(probe)?;
    Some((result, nested))
}


/// HTTP check details
pub fn parse_http_result(body: Option<&str>) -> Option<HttpCheckResult> {
    parse_object(body).and_then(|json| http_result_from(&json))
}


fn http_result_from(json: &JsonObject) -> Option<HttpCheckResult> {
    let (result, http) = first_probe(json, "http")?;
    Some(HttpCheckResult {
        id: result.opt_text("id"),
        status: result.opt_text("status"),
        duration_millis: result.positive_i64("durationMillis"),
        location: http.opt_text("location"),
        country: http.opt_text("country"),
        time_millis: http.positive_i64("timeMillis"),
        status_code: http.non_negative_i64("statusCode"),
        ip: http.opt_text("ip"),
        result: http.opt_text("result"),
    })
}


/// TCP port check details
pub fn parse_tcp_result(body: Option<&str>) -> Option<TcpCheckResult> {
    parse_object(body).and_then(|json| tcp_result_from(&json))
}


fn tcp_result_from(json: &JsonObject) -> Option<TcpCheckResult> {
    let (result, tcp) = first_probe(json, "tcp")?;
    Some(TcpCheckResult {
        id: result.opt_text("id"),
        status: result.opt_text("status"),
        duration_millis: result.positive_i64("durationMillis"),
        location: tcp.opt_text("location"),
        country: tcp.opt_text("country"),
        connect_time_millis: tcp.positive_i64("connectTimeMillis"),
        connection_status: tcp.opt_text("status"),
        ip: tcp.opt_text("ip"),
    })
}


/// Traceroute details. Absent when no hop was reported.
pub fn parse_traceroute_result(body: Option<&str>) -> Option<TracerouteCheckResult> {
    parse_object(body).and_then(|json| traceroute_result_from(&json))
}


fn traceroute_result_from(json: &JsonObject) -> Option<TracerouteCheckResult> {
    let (result, traceroute) = first_probe(json, "traceroute")?;
    let hops: Vec<TracerouteHop> = traceroute
        .opt_array("hops")
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .map(|hop| {
            TracerouteHop {
                hop: hop.non_negative_i64("hop"),
                ip: hop.opt_text("ip"),
                time: hop.opt_text("time"),
            }
        })
        .collect();

    if hops.is_empty() {
        return None;
    }

    Some(TracerouteCheckResult {
        id: result.opt_text("id"),
        status: result.opt_text("status"),
        duration_millis: result.positive_i64("durationMillis"),
        message: result.opt_text("message"),
        hops,
    })
}


/// DNS lookup details. Absent when no record was reported.
pub fn parse_dns_lookup_result(body: Option<&str>) -> Option<DnsLookupResult> {
    parse_object(body).and_then(|json| dns_lookup_result_from(&json))
}


fn dns_lookup_result_from(json: &JsonObject) -> Option<DnsLookupResult> {
    let (result, dns) = first_probe(json, "dns")?;
    let records: Vec<String> = dns
        .opt_array("records")
        .into_iter()
        .flatten()
        .filter_map(stringify)
        .filter(|record| !record.trim().is_empty())
        .collect();

    if records.is_empty() {
        return None;
    }

    Some(DnsLookupResult {
        id: result.opt_text("id"),
        status: result.opt_text("status"),
        duration_millis: result.positive_i64("durationMillis"),
        location: dns.opt_text("location"),
        country: dns.opt_text("country"),
        records,
        ttl: dns.opt_text("ttl"),
    })
}
