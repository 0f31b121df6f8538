
//! Pattern matching and processing help for HTTP request methods.

// https://developer.mozilla.org/en-US/docs/Web/HTTP/Methods

use std::str::FromStr;

use anyhow::{Result, anyhow};
use strum_macros::{EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum HttpRequestMethod {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
    PATCH,
}

/// The methods the page and file handlers actually implement; the
/// server loop answers the rest with 501.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpRequestMethodSimple {
    GET,
    HEAD,
    POST,
}

impl HttpRequestMethodSimple {
    pub fn is_post(self) -> bool {
        match self {
            HttpRequestMethodSimple::GET => false,
            HttpRequestMethodSimple::HEAD => false,
            HttpRequestMethodSimple::POST => true
        }
    }
    pub fn to_http_request_method(self) -> HttpRequestMethod {
        match self {
            HttpRequestMethodSimple::GET => HttpRequestMethod::GET,
            HttpRequestMethodSimple::HEAD => HttpRequestMethod::HEAD,
            HttpRequestMethodSimple::POST => HttpRequestMethod::POST
        }
    }
}

impl HttpRequestMethod {
    pub fn maybe_from_str(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(
            |_| anyhow!("invalid http request method {s:?}"))
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_post(self) -> bool {
        match self {
            Self::POST => true,
            _ => false
        }
    }

    pub fn to_simple(self) -> Option<HttpRequestMethodSimple> {
        match self {
            Self::GET => Some(HttpRequestMethodSimple::GET),
            Self::HEAD => Some(HttpRequestMethodSimple::HEAD),
            Self::POST => Some(HttpRequestMethodSimple::POST),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_from_str() {
        assert_eq!(HttpRequestMethod::maybe_from_str("GET").unwrap(),
                   HttpRequestMethod::GET);
        assert_eq!(HttpRequestMethod::maybe_from_str("POST").unwrap()
                   .to_simple(),
                   Some(HttpRequestMethodSimple::POST));
        assert_eq!(HttpRequestMethod::maybe_from_str("PATCH").unwrap()
                   .to_simple(),
                   None);
        assert!(HttpRequestMethod::maybe_from_str("get").is_err());
        assert_eq!(HttpRequestMethod::GET.as_str(), "GET");
    }
}
