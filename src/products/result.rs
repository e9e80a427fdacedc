use crate::{mappers::normalizer::*, products::normalized::Normalized};
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// Uniform envelope of a single submit/fetch call
pub struct CheckResult {
    /// HTTP status code, absent on transport failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u32>,

    /// Async job UUID announced by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    /// Raw response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Human-readable transport failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}


impl CheckResult {
    /// New response result
    pub fn response(status_code: u32, job_id: Option<String>, body: String) -> CheckResult {
        CheckResult {
            status_code: Some(status_code),
            job_id,
            body: Some(body),
            error: None,
        }
    }


    /// New failure result
    pub fn failure<E: ToString>(error: E) -> CheckResult {
        CheckResult {
            status_code: None,
            job_id: None,
            body: None,
            error: Some(error.to_string()),
        }
    }


    /// Request reached the server and got any response
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }


    /// Server created an async job that can be polled
    pub fn is_pending_job(&self) -> bool {
        self.is_success() && self.job_id.is_some()
    }


    /// Normalized view of the body
    pub fn normalized(&self, options: &NormalizerOptions) -> Normalized {
        normalize_with(self.body.as_deref(), options)
    }
}


/// Implement JSON serialization on .to_string():
impl ToString for CheckResult {
    fn to_string(&self) -> String {
        serde_json::to_string(&self)
            .unwrap_or_else(|_| String::from("{\"error\": \"CheckResult serialization failure\"}"))
    }
}
