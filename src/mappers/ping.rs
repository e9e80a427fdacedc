use crate::{
    mappers::json::*,
    products::normalized::{PingJob, PingMeasurement, PingMetrics},
    *,
};
use serde_json::Value;


/// Read ping job from response body
pub fn parse_ping_job(body: Option<&str>) -> Option<PingJob> {
    parse_object(body).and_then(|json| ping_job_from(&json))
}


/// Read ping job from parsed response.
/// Requires a "result" array with at least one element carrying a "ping" object.
pub fn ping_job_from(json: &JsonObject) -> Option<PingJob> {
    let results = json.opt_array("result")?;
    let measurements: Vec<PingMeasurement> = results
        .iter()
        .filter_map(Value::as_object)
        .filter_map(ping_measurement_from)
        .collect();

    if measurements.is_empty() {
        trace!(
            "ping_job_from: 'result' array of {} elements has no ping measurements",
            results.len()
        );
        return None;
    }

    Some(PingJob {
        id: json.opt_string("id"),
        target: json.opt_string("target"),
        status: json.opt_string("status"),
        executed_at: json.opt_string("executedAt"),
        finished_at: json.opt_string("finishedAt"),
        total_duration_millis: json.positive_i64("totalDurationMillis"),
        results: measurements,
    })
}


fn ping_measurement_from(element: &JsonObject) -> Option<PingMeasurement> {
    let ping = element.opt_object("ping")?;
    Some(PingMeasurement {
        id: element.opt_string("id"),
        kind: element.opt_string("type"),
        status: element.opt_string("status"),
        duration_millis: element.positive_i64("durationMillis"),
        metrics: Some(PingMetrics {
            location: ping.opt_string("location"),
            country: ping.opt_string("country"),
            ip: ping.opt_string("ip"),
            transmitted: ping.non_negative_i64("transmitted"),
            received: ping.non_negative_i64("received"),
            packet_loss_percent: ping.real_f64("packetLoss"),
            min_rtt_ms: ping.real_f64("minRtt"),
            avg_rtt_ms: ping.real_f64("avgRtt"),
            max_rtt_ms: ping.real_f64("maxRtt"),
        }),
    })
}
