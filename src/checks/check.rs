use crate::products::unexpected::RequestError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};


#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Diagnostic check kinds supported by the server
pub enum CheckType {
    /// HTTP reachability
    Http,

    /// ICMP ping
    Ping,

    /// TCP port probe
    TcpPort,

    /// Traceroute
    Traceroute,

    /// DNS lookup
    DnsLookup,
}


impl CheckType {
    /// All check types, in UI order
    pub const ALL: [CheckType; 5] = [
        CheckType::Http,
        CheckType::Ping,
        CheckType::TcpPort,
        CheckType::Traceroute,
        CheckType::DnsLookup,
    ];


    /// Wire name of check type
    pub fn name(&self) -> &'static str {
        match self {
            CheckType::Http => "HTTP",
            CheckType::Ping => "PING",
            CheckType::TcpPort => "TCP_PORT",
            CheckType::Traceroute => "TRACEROUTE",
            CheckType::DnsLookup => "DNS_LOOKUP",
        }
    }


    /// Check type requires a port
    pub fn needs_port(&self) -> bool {
        matches!(self, CheckType::TcpPort)
    }
}


impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


impl FromStr for CheckType {
    type Err = RequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CheckType::ALL
            .iter()
            .find(|check_type| check_type.name().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| RequestError::UnknownCheckType(value.to_string()))
    }
}


#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Validated check submission
pub struct CheckRequest {
    check_type: CheckType,
    target: String,
    port: Option<u16>,
}


impl CheckRequest {
    /// New check request. Port is kept only for TCP_PORT checks.
    pub fn new(
        check_type: CheckType,
        target: &str,
        port: Option<i64>,
    ) -> Result<CheckRequest, RequestError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(RequestError::EmptyTarget);
        }
        let port = if check_type.needs_port() {
            let port = port.ok_or(RequestError::MissingPort)?;
            match u16::try_from(port) {
                Ok(valid) if valid > 0 => Some(valid),
                _ => return Err(RequestError::PortOutOfRange(port)),
            }
        } else {
            None
        };
        Ok(CheckRequest {
            check_type,
            target: target.to_string(),
            port,
        })
    }


    /// HTTP check of URL
    pub fn http(target: &str) -> Result<CheckRequest, RequestError> {
        Self::new(CheckType::Http, target, None)
    }


    /// Ping check of host
    pub fn ping(target: &str) -> Result<CheckRequest, RequestError> {
        Self::new(CheckType::Ping, target, None)
    }


    /// TCP port check of host
    pub fn tcp_port(target: &str, port: i64) -> Result<CheckRequest, RequestError> {
        Self::new(CheckType::TcpPort, target, Some(port))
    }


    /// Traceroute to host
    pub fn traceroute(target: &str) -> Result<CheckRequest, RequestError> {
        Self::new(CheckType::Traceroute, target, None)
    }


    /// DNS lookup of name
    pub fn dns_lookup(target: &str) -> Result<CheckRequest, RequestError> {
        Self::new(CheckType::DnsLookup, target, None)
    }


    /// Check type
    pub fn check_type(&self) -> CheckType {
        self.check_type
    }


    /// Check target
    pub fn target(&self) -> &str {
        &self.target
    }


    /// Port, present only for TCP_PORT checks
    pub fn port(&self) -> Option<u16> {
        self.port
    }


    /// Wire payload of this request
    pub fn payload(&self) -> CheckPayload<'_> {
        CheckPayload {
            check_types: [self.check_type],
            target: &self.target,
            port: self.port.filter(|_| self.check_type.needs_port()),
        }
    }
}


#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// JSON body posted to the checks endpoint
pub struct CheckPayload<'a> {
    /// Single requested check type
    pub check_types: [CheckType; 1],

    /// Check target
    pub target: &'a str,

    /// Port for TCP_PORT checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}
