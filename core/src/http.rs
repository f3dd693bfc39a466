//! HTTP exchange types for the Calendly client.
//!
//! # Design
//! Requests and responses are plain data. `CalendlyClient::build_*` methods
//! produce an `HttpRequest` and `CalendlyClient::parse_*` methods consume an
//! `HttpResponse`; a `Transport` sits in between and is the only piece that
//! touches the network.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded,
//! cloned into test fixtures, or replayed without lifetime concerns.

use std::fmt;

/// Header carrying the API token on every request.
pub const AUTH_HEADER: &str = "X-TOKEN";

/// Content type of form-encoded request bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute, with any query parameters already merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value, ignoring the case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `status` is the transport status line. The provider mirrors it inside the
/// JSON body, and only the body copy is interpreted by the parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "https://calendly.com/api/v1/echo".to_string(),
            headers: vec![(AUTH_HEADER.to_string(), "secret".to_string())],
            body: None,
        };
        assert_eq!(req.header("x-token"), Some("secret"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn method_renders_as_verb() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
