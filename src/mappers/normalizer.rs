use crate::{
    mappers::{json::*, metrics::metric_groups_from, ping::ping_job_from},
    products::normalized::Normalized,
    *,
};
use serde_json::Value;
use std::collections::BTreeSet;


/// Single shape attempt over a parsed response object
type Attempt = fn(&JsonObject, &NormalizerOptions) -> Option<Normalized>;


/// Shape attempts in priority order. Payloads may satisfy several shapes at once,
/// first match wins.
const ATTEMPTS: [(&str, Attempt); 2] = [
    ("ping job", attempt_ping_job),
    ("metric groups", attempt_metric_groups),
];


#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Normalizer tunables
pub struct NormalizerOptions {
    /// Top-level metric keys skipped while flattening
    pub ignored_metric_keys: BTreeSet<String>,
}


impl NormalizerOptions {
    /// Options skipping given metric keys
    pub fn ignoring<I, S>(keys: I) -> NormalizerOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NormalizerOptions {
            ignored_metric_keys: keys.into_iter().map(Into::into).collect(),
        }
    }


    /// Key is skipped during flattening
    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignored_metric_keys.contains(key)
    }
}


/// Normalize response body with default options
pub fn normalize(body: Option<&str>) -> Normalized {
    normalize_with(body, &NormalizerOptions::default())
}


/// Normalize response body into exactly one shape:
/// ping job, metric groups, or the raw body when nothing structured matches.
/// Blank body yields empty raw text.
#[instrument(skip_all)]
pub fn normalize_with(body: Option<&str>, options: &NormalizerOptions) -> Normalized {
    let body = match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => return Normalized::RawText(String::new()),
    };

    let json = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(json)) => json,
        Ok(_) => {
            debug!("Response body isn't a JSON object. Keeping raw text.");
            return Normalized::RawText(body.to_string());
        }
        Err(err) => {
            debug!("Response body isn't valid JSON: {}. Keeping raw text.", err);
            return Normalized::RawText(body.to_string());
        }
    };

    ATTEMPTS
        .iter()
        .find_map(|(name, attempt)| {
            attempt(&json, options).map(|normalized| {
                trace!("Response body matched shape: {}", name);
                normalized
            })
        })
        .unwrap_or_else(|| Normalized::RawText(body.to_string()))
}


fn attempt_ping_job(json: &JsonObject, _options: &NormalizerOptions) -> Option<Normalized> {
    ping_job_from(json).map(Normalized::PingJob)
}


fn attempt_metric_groups(json: &JsonObject, options: &NormalizerOptions) -> Option<Normalized> {
    Some(metric_groups_from(json, options))
        .filter(|groups| !groups.is_empty())
        .map(Normalized::MetricGroups)
}
