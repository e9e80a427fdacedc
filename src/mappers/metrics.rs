use crate::{
    mappers::{json::*, normalizer::NormalizerOptions},
    products::normalized::{MetricGroup, MetricItem},
};
use serde_json::Value;


/// Read metric groups from parsed response.
///
/// Groups come from each "results" element carrying a "metrics" object (titled by its
/// "checkType"), followed by the top-level "metrics" object (titled by top-level "checkType").
/// Groups without any metric are skipped.
pub fn metric_groups_from(json: &JsonObject, options: &NormalizerOptions) -> Vec<MetricGroup> {
    let from_results = json
        .opt_array("results")
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .filter_map(|result| metric_group_of(result, options));

    let from_top_level = metric_group_of(json, options);

    from_results.chain(from_top_level).collect()
}


fn metric_group_of(holder: &JsonObject, options: &NormalizerOptions) -> Option<MetricGroup> {
    let metrics = flatten_metrics(holder.opt_object("metrics")?, options);
    if metrics.is_empty() {
        return None;
    }
    Some(MetricGroup {
        title: holder.opt_text("checkType"),
        metrics,
    })
}


/// Flatten metrics object into labeled items, in key order.
/// Nested objects are expanded one level as "parent.child"; deeper values are kept as JSON text.
pub fn flatten_metrics(metrics: &JsonObject, options: &NormalizerOptions) -> Vec<MetricItem> {
    let mut items = vec![];
    for (key, value) in metrics.iter() {
        if options.is_ignored(key) {
            continue;
        }
        match value {
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested.iter() {
                    if let Some(text) = stringify(nested_value) {
                        items.push(MetricItem {
                            label: format_metric_label(&format!("{}.{}", key, nested_key)),
                            value: text,
                        });
                    }
                }
            }
            other => {
                if let Some(text) = stringify(other) {
                    items.push(MetricItem {
                        label: format_metric_label(key),
                        value: text,
                    });
                }
            }
        }
    }
    items
}


/// Turn raw metric key into a label: "http.status_code" -> "Http Status Code"
pub fn format_metric_label(raw: &str) -> String {
    raw.replace(['_', '.'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}


fn capitalize(word: &str) -> String {
    let lowercase = word.to_lowercase();
    let mut chars = lowercase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
