use serde_json::{Map, Value};


/// JSON object type used by all mappers
pub type JsonObject = Map<String, Value>;


/// Parse body as a JSON object. Anything else (blank, invalid, array, scalar) yields None.
pub fn parse_object(body: Option<&str>) -> Option<JsonObject> {
    let body = body.filter(|body| !body.trim().is_empty())?;
    match serde_json::from_str(body) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) | Err(_) => None,
    }
}


/// String form of a JSON value. Strings are taken verbatim, null is absent,
/// everything else keeps its JSON text.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}


/// Lenient accessors over a JSON object. Null and missing fields read as absent.
pub trait JsonObjectExt {
    /// Field as string, non-string scalars stringified
    fn opt_string(&self, key: &str) -> Option<String>;

    /// Field as string, blank values read as absent
    fn opt_text(&self, key: &str) -> Option<String>;

    /// Field as integer; numeric strings are parsed, fractions truncated
    fn opt_i64(&self, key: &str) -> Option<i64>;

    /// Field as float; numeric strings are parsed
    fn opt_f64(&self, key: &str) -> Option<f64>;

    /// Nested object field
    fn opt_object(&self, key: &str) -> Option<&JsonObject>;

    /// Nested array field
    fn opt_array(&self, key: &str) -> Option<&Vec<Value>>;

    /// Integer present only when strictly positive (durations)
    fn positive_i64(&self, key: &str) -> Option<i64> {
        self.opt_i64(key).filter(|value| *value > 0)
    }

    /// Integer present only when not negative (counters)
    fn non_negative_i64(&self, key: &str) -> Option<i64> {
        self.opt_i64(key).filter(|value| *value >= 0)
    }

    /// Float present only when not NaN
    fn real_f64(&self, key: &str) -> Option<f64> {
        self.opt_f64(key).filter(|value| !value.is_nan())
    }
}


impl JsonObjectExt for JsonObject {
    fn opt_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(stringify)
    }


    fn opt_text(&self, key: &str) -> Option<String> {
        self.opt_string(key).filter(|text| !text.trim().is_empty())
    }


    fn opt_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(number) => {
                number
                    .as_i64()
                    .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
            }
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>().ok().or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|float| !float.is_nan())
                        .map(|float| float.trunc() as i64)
                })
            }
            _ => None,
        }
    }


    fn opt_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }


    fn opt_object(&self, key: &str) -> Option<&JsonObject> {
        self.get(key).and_then(Value::as_object)
    }


    fn opt_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }
}
