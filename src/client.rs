use crate::{
    checks::{check::CheckRequest, credentials::Credentials},
    config::Config,
    configuration::*,
    mappers::json::*,
    products::{result::CheckResult, unexpected::Unexpected},
    utilities::trim_base_url,
    *,
};
use curl::{
    easy::{Auth, Easy2, Handler, List, WriteError},
    Error as CurlError,
};
use std::{fmt, sync::Mutex, time::Duration};
use uuid::Uuid;


/// Collects response content from Curl:
pub struct Collector(Vec<u8>);


impl Handler for Collector {
    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        self.0.extend_from_slice(data);
        Ok(data.len())
    }
}


impl fmt::Debug for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.0.iter().take(50).map(|c| format!("{:x}", c)).collect();
        write!(f, "Collector({} bytes, first 50 in hex: {}…)", self.0.len(), preview)
    }
}


/// Blocking client of the diagnostics server.
///
/// Safe to share between threads. Idle Curl handles are pooled so their connection
/// cache survives between calls; the pool lock is never held during a request.
pub struct HostClient {
    base_url: String,
    timeout: Duration,
    connection_timeout: Duration,
    user_agent: String,
    max_idle_handles: usize,
    idle: Mutex<Vec<Easy2<Collector>>>,
}


impl fmt::Debug for HostClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connection_timeout", &self.connection_timeout)
            .field("user_agent", &self.user_agent)
            .field("max_idle_handles", &self.max_idle_handles)
            .finish()
    }
}


impl HostClient {
    /// New client from configuration
    pub fn new(config: &Config) -> HostClient {
        HostClient {
            base_url: config.base_url(),
            timeout: config.timeout(),
            connection_timeout: config.connection_timeout(),
            user_agent: config.user_agent(),
            max_idle_handles: config.max_idle_handles(),
            idle: Mutex::new(vec![]),
        }
    }


    /// New client of given server with default settings
    pub fn with_base_url(base_url: &str) -> HostClient {
        HostClient::new(&Config {
            base_url: Some(trim_base_url(base_url).to_string()),
            ..Config::default()
        })
    }


    /// Checks endpoint URL
    pub fn checks_url(&self) -> String {
        format!("{}{}", self.base_url, CHECKS_ENDPOINT)
    }


    /// Job URL
    pub fn job_url(&self, job_id: &str) -> String {
        format!("{}/{}", self.checks_url(), job_id)
    }


    /// Submit a check. Never fails: transport problems land in CheckResult.error
    #[instrument(skip(self, credentials), fields(check_type = %request.check_type(), target = %request.target()))]
    pub fn submit(&self, credentials: &Credentials, request: &CheckRequest) -> CheckResult {
        let payload = match serde_json::to_vec(&request.payload()) {
            Ok(payload) => payload,
            Err(err) => {
                let unexpected = Unexpected::PayloadProblem(err.to_string());
                error!("{}", unexpected);
                return CheckResult::failure(unexpected);
            }
        };
        debug!("Submitting check payload: {}", String::from_utf8_lossy(&payload));
        self.execute(&self.checks_url(), credentials, Some(&payload))
    }


    /// Fetch job state. Never fails: transport problems land in CheckResult.error
    #[instrument(skip(self, credentials))]
    pub fn fetch_job(&self, credentials: &Credentials, job_id: &str) -> CheckResult {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            warn!("Fetch skipped: {}", Unexpected::EmptyJobId);
            return CheckResult::failure(Unexpected::EmptyJobId);
        }
        self.execute(&self.job_url(job_id), credentials, None)
    }


    /// Perform request on a pooled handle and reduce the outcome.
    /// POST when payload is given, GET otherwise.
    fn execute(&self, url: &str, credentials: &Credentials, payload: Option<&[u8]>) -> CheckResult {
        let mut curl = self.checkout();
        let outcome = self
            .load_handler(&mut curl, url, credentials, payload)
            .map_err(|err| Unexpected::HandlerFailed(url.to_string(), describe_curl_error(&err)))
            .and_then(|_| self.perform(&mut curl, url));
        self.checkin(curl);
        reduce(url, outcome)
    }


    fn perform(&self, curl: &mut Easy2<Collector>, url: &str) -> Result<(u32, String), Unexpected> {
        curl.perform()
            .map_err(|err| self.produce_unexpected(url, &err))?;
        let status_code = curl
            .response_code()
            .map_err(|err| Unexpected::ResponseUnreadable(url.to_string(), describe_curl_error(&err)))?;
        let body = String::from_utf8_lossy(&curl.get_ref().0).into_owned();
        Ok((status_code, body))
    }


    /// Configure Curl handle for a single request
    fn load_handler(
        &self,
        curl: &mut Easy2<Collector>,
        url: &str,
        credentials: &Credentials,
        payload: Option<&[u8]>,
    ) -> Result<(), CurlError> {
        curl.url(url)?;
        trace!("Curl URL: {}", url);
        curl.useragent(&self.user_agent)?;

        // Basic auth, sent preemptively: "Authorization: Basic base64(user:pass)"
        let mut auth = Auth::new();
        auth.basic(true);
        curl.http_auth(&auth)?;
        curl.username(&credentials.username)?;
        curl.password(&credentials.password)?;

        let mut headers = List::new();
        headers.append("Accept: application/json")?;
        match payload {
            Some(data) => {
                trace!("Curl method: POST, payload of {} bytes", data.len());
                curl.post(true)?;
                curl.post_fields_copy(data)?;
                headers.append(&format!("Content-Type: {}", JSON_CONTENT_TYPE))?;
                headers.append("Expect:")?;
            }
            None => {
                trace!("Curl method: GET");
                curl.get(true)?;
            }
        }
        curl.http_headers(headers)?;

        curl.follow_location(false)?;
        curl.connect_timeout(self.connection_timeout)?;
        curl.timeout(self.timeout)?;
        curl.max_connects(CHECK_MAX_CONNECTIONS)?;
        Ok(())
    }


    /// Take idle handle from pool or create a new one
    fn checkout(&self) -> Easy2<Collector> {
        let reused = match self.idle.lock() {
            Ok(mut idle) => idle.pop(),
            Err(err) => {
                warn!("Curl handle pool unavailable: {}", err);
                None
            }
        };
        reused.unwrap_or_else(|| {
            trace!("Creating new Curl handle");
            Easy2::new(Collector(Vec::new()))
        })
    }


    /// Clear handle state and return it to pool, unless pool is full
    fn checkin(&self, mut curl: Easy2<Collector>) {
        curl.reset();
        curl.get_mut().0.clear();
        if let Ok(mut idle) = self.idle.lock() {
            if idle.len() < self.max_idle_handles {
                idle.push(curl);
            }
        }
    }


    /// Converts CurlError to Unexpected
    fn produce_unexpected(&self, url: &str, err: &CurlError) -> Unexpected {
        let details = describe_curl_error(err);
        if err.is_operation_timedout() {
            Unexpected::HttpConnectionFailed(url.to_string(), self.timeout.as_secs())
        } else if err.is_couldnt_resolve_host() || err.is_couldnt_resolve_proxy() {
            Unexpected::HostUnresolvable(url.to_string(), details)
        } else if err.is_ssl_connect_error()
            || err.is_peer_failed_verification()
            || err.is_ssl_certproblem()
            || err.is_ssl_cacert()
            || err.is_ssl_cipher()
            || err.is_ssl_issuer_error()
        {
            Unexpected::TLSProblem(url.to_string(), details)
        } else {
            Unexpected::URLConnectionProblem(url.to_string(), details)
        }
    }
}


/// Single reduction point of request outcomes
fn reduce(url: &str, outcome: Result<(u32, String), Unexpected>) -> CheckResult {
    match outcome {
        Ok((status_code, body)) => {
            let job_id = parse_job_id(&body);
            info!(
                "URL: {} responded with code: {}, body length: {}, job id: {}",
                url,
                status_code,
                body.len(),
                job_id.as_deref().unwrap_or("none")
            );
            CheckResult::response(status_code, job_id, body)
        }
        Err(unexpected) => {
            error!("{}", unexpected);
            CheckResult::failure(unexpected)
        }
    }
}


/// Job id from response body: top-level "id" in canonical hyphenated UUID form
pub fn parse_job_id(body: &str) -> Option<String> {
    let id = parse_object(Some(body))?.opt_string("id")?;
    let uuid = Uuid::parse_str(&id).ok()?;
    if uuid.hyphenated().to_string().eq_ignore_ascii_case(&id) {
        Some(id)
    } else {
        debug!("Ignoring non-canonical job id: {}", id);
        None
    }
}


/// Curl error with its symbolic CURLE_* reason
fn describe_curl_error(err: &CurlError) -> String {
    format!("{} ({})", err, curl_reason(err))
}


fn curl_reason(err: &CurlError) -> &'static str {
    if err.is_unsupported_protocol() {
        "CURLE_UNSUPPORTED_PROTOCOL"
    } else if err.is_url_malformed() {
        "CURLE_URL_MALFORMAT"
    } else if err.is_couldnt_resolve_proxy() {
        "CURLE_COULDNT_RESOLVE_PROXY"
    } else if err.is_couldnt_resolve_host() {
        "CURLE_COULDNT_RESOLVE_HOST"
    } else if err.is_couldnt_connect() {
        "CURLE_COULDNT_CONNECT"
    } else if err.is_operation_timedout() {
        "CURLE_OPERATION_TIMEDOUT"
    } else if err.is_ssl_connect_error() {
        "CURLE_SSL_CONNECT_ERROR"
    } else if err.is_peer_failed_verification() {
        "CURLE_PEER_FAILED_VERIFICATION"
    } else if err.is_ssl_certproblem() {
        "CURLE_SSL_CERTPROBLEM"
    } else if err.is_ssl_cacert() {
        "CURLE_SSL_CACERT"
    } else if err.is_got_nothing() {
        "CURLE_GOT_NOTHING"
    } else if err.is_send_error() {
        "CURLE_SEND_ERROR"
    } else if err.is_recv_error() {
        "CURLE_RECV_ERROR"
    } else if err.is_http2_error() {
        "CURLE_HTTP2"
    } else if err.is_failed_init() {
        "CURLE_FAILED_INIT"
    } else if err.is_unknown_option() {
        "CURLE_UNKNOWN_OPTION"
    } else {
        "CURLE_OTHER"
    }
}
