//
// Default configuration and default values:
//


/// Default diagnostics server base URL:
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Checks endpoint path, relative to base URL:
pub const CHECKS_ENDPOINT: &str = "/api/checks";

/// Content type of submitted check payloads:
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Default user agent name:
pub const DEFAULT_USER_AGENT_NAME: &str = "hostmaster";


/// Check request timeout in seconds
pub const CHECK_TIMEOUT: u64 = 15;

/// Check connection timeout in seconds
pub const CHECK_CONNECTION_TIMEOUT: u64 = 30;

/// Max cached connections per Curl handle
pub const CHECK_MAX_CONNECTIONS: u32 = 10;

/// Max idle Curl handles kept in the client pool
pub const DEFAULT_MAX_IDLE_HANDLES: usize = 8;


/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Environment variable holding explicit path to the configuration file
pub const CONFIG_PATH_ENV: &str = "HOSTMASTER_CONFIG";

/// Message used when no credentials are available
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Credentials are missing: provide username and password";
