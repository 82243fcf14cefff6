//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::http::error::ParseError;
use crate::http::method::{HttpVersion, Method};

/// Represents an HTTP request.
///
/// Header names are stored lowercase; lookups through [`HttpRequest::get_header`]
/// are case-insensitive. Query parameters are parsed from the path when the
/// request is constructed. Path parameters are filled in by the router once a
/// route pattern has matched.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers, keyed by lowercase name
    pub headers: HashMap<String, String>,
    /// The raw request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the path
    pub query_params: HashMap<String, String>,
    /// Path parameters captured by the matched route pattern
    pub path_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    pub fn new(
        method: Method,
        path: String,
        version: HttpVersion,
        headers: HashMap<String, String>,
    ) -> Self {
        let query_params = path
            .split_once('?')
            .map(|(_, query)| {
                query
                    .split('&')
                    .filter(|s| !s.is_empty())
                    .map(|pair| match pair.split_once('=') {
                        Some((k, v)) => (k.to_string(), v.to_string()),
                        None => (pair.to_string(), String::new()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
            query_params,
            path_params: HashMap::new(),
        }
    }

    /// Create a new HTTP request with the given body.
    pub fn with_body(
        method: Method,
        path: String,
        version: HttpVersion,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> Self {
        let mut request = Self::new(method, path, version, headers);
        request.body = body;
        request
    }

    /// The request path without its query string.
    pub fn route_path(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// Check if a header exists (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Get a path parameter captured by the matched route pattern.
    pub fn get_path_param(&self, name: &str) -> Option<&String> {
        self.path_params.get(name)
    }

    /// Check if the request carries a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|ct| ct.starts_with("application/json"))
    }

    /// Parse the request body as JSON.
    ///
    /// Fails when the content type is not `application/json` or the body is
    /// not valid JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        if !self.is_json() {
            return Err(ParseError::MissingHeader(
                "Content-Type: application/json".to_string(),
            ));
        }

        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Split a raw request buffer at the blank line separating the header section
/// from the body. Without a blank line the whole buffer is the header section.
fn split_head_body(input: &[u8]) -> (&[u8], &[u8]) {
    if let Some(pos) = input.windows(4).position(|w| w == b"\r\n\r\n") {
        (&input[..pos], &input[pos + 4..])
    } else if let Some(pos) = input.windows(2).position(|w| w == b"\n\n") {
        (&input[..pos], &input[pos + 2..])
    } else {
        (input, &[])
    }
}

/// Parse an HTTP request from a byte slice.
///
/// Handles both CRLF and LF line endings. The body is everything after the
/// blank line, truncated to `Content-Length` when that header is present and
/// numeric. HTTP/1.1 requests must carry a `Host` header.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyRequest);
    }

    let (head, body) = split_head_body(input);
    let head_str = String::from_utf8_lossy(head);

    let lines: Vec<&str> = head_str
        .split(|c| c == '\n' || c == '\r')
        .filter(|s| !s.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ParseError::EmptyRequest);
    }

    // Request line: method, path, version
    let request_line = lines[0];
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;
    let path = parts[1].to_string();
    let version = HttpVersion::from_str(parts[2])?;

    // Headers: lowercase keys, last duplicate wins
    let mut headers = HashMap::new();
    for line in lines.iter().skip(1) {
        match line.split_once(':') {
            Some((name, value)) => {
                headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
            None => return Err(ParseError::InvalidHeaderFormat),
        }
    }

    // Host is only required for HTTP/1.1
    if version == HttpVersion::Http11 && !headers.contains_key("host") {
        return Err(ParseError::MissingHeader("Host".to_string()));
    }

    let body = match headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
    {
        Some(len) if len < body.len() => body[..len].to_vec(),
        _ => body.to_vec(),
    };

    Ok(HttpRequest::with_body(method, path, version, headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_parse_simple_get_request() {
        let input = b"GET /api/users HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let req = parse_request(input).unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/api/users");
        assert_eq!(req.version, HttpVersion::Http11);
        assert_eq!(req.headers.get("host"), Some(&"localhost".to_string()));
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_case_insensitive_headers() {
        let input = b"GET / HTTP/1.1\r\nHoSt: example.com\r\n\r\n";
        let req = parse_request(input).unwrap();

        assert_eq!(req.get_header("Host"), Some(&"example.com".to_string()));
        assert_eq!(req.get_header("HOST"), Some(&"example.com".to_string()));
        assert!(req.has_header("host"));
        assert!(!req.has_header("nonexistent"));
    }

    #[test]
    fn test_missing_host_header() {
        let input = b"GET / HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
        let err = parse_request(input).unwrap_err();

        assert!(matches!(err, ParseError::MissingHeader(h) if h == "Host"));
    }

    #[test]
    fn test_http10_without_host() {
        // HTTP/1.0 doesn't require a Host header
        let input = b"GET /api/users HTTP/1.0\r\nUser-Agent: test\r\n\r\n";
        let req = parse_request(input).unwrap();

        assert_eq!(req.version, HttpVersion::Http10);
        assert!(!req.headers.contains_key("host"));
    }

    #[test]
    fn test_invalid_method() {
        let input = b"INVALID / HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let err = parse_request(input).unwrap_err();

        assert!(matches!(err, ParseError::InvalidMethod(_)));
    }

    #[test]
    fn test_invalid_http_version() {
        let input = b"GET / HTTP/9.9\r\nHost: localhost\r\n\r\n";
        let err = parse_request(input).unwrap_err();

        assert!(matches!(err, ParseError::InvalidVersion(_)));
    }

    #[test]
    fn test_invalid_header_format() {
        let input = b"GET / HTTP/1.1\r\nInvalidHeader\r\nHost: localhost\r\n\r\n";
        let err = parse_request(input).unwrap_err();

        assert!(matches!(err, ParseError::InvalidHeaderFormat));
    }

    #[test]
    fn test_empty_request() {
        let err = parse_request(b"").unwrap_err();

        assert!(matches!(err, ParseError::EmptyRequest));
    }

    #[test]
    fn test_incomplete_request_line() {
        let input = b"GET\r\nHost: localhost\r\n\r\n";
        let err = parse_request(input).unwrap_err();

        assert!(matches!(err, ParseError::MalformedRequestLine(_)));
    }

    #[test]
    fn test_duplicate_headers_last_wins() {
        let input = b"GET / HTTP/1.1\r\n\
            Host: example.com\r\n\
            Custom: first\r\n\
            Custom: second\r\n\r\n";
        let req = parse_request(input).unwrap();

        assert_eq!(req.headers.get("custom"), Some(&"second".to_string()));
    }

    #[test]
    fn test_body_after_blank_line() {
        let input = b"POST /api/users HTTP/1.1\r\n\
            Host: localhost\r\n\
            Content-Type: application/json\r\n\
            Content-Length: 16\r\n\r\n\
            {\"username\":\"a\"}";
        let req = parse_request(input).unwrap();

        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body, b"{\"username\":\"a\"}");
    }

    #[test]
    fn test_body_truncated_to_content_length() {
        let input = b"POST / HTTP/1.1\r\n\
            Host: localhost\r\n\
            Content-Length: 5\r\n\r\n\
            hello trailing garbage";
        let req = parse_request(input).unwrap();

        assert_eq!(req.body, b"hello");
    }

    #[test]
    fn test_body_without_content_length_is_kept_whole() {
        let input = b"POST / HTTP/1.1\r\nHost: localhost\r\n\r\nraw body";
        let req = parse_request(input).unwrap();

        assert_eq!(req.body, b"raw body");
    }

    #[test]
    fn test_lf_only_line_endings() {
        let input = b"POST / HTTP/1.1\nHost: localhost\n\nbody";
        let req = parse_request(input).unwrap();

        assert_eq!(req.headers.get("host"), Some(&"localhost".to_string()));
        assert_eq!(req.body, b"body");
    }

    #[test]
    fn test_json_body() {
        #[derive(Deserialize)]
        struct Payload {
            name: String,
        }

        let input = b"POST / HTTP/1.1\r\n\
            Host: localhost\r\n\
            Content-Type: application/json\r\n\r\n\
            {\"name\":\"rust\"}";
        let req = parse_request(input).unwrap();

        assert!(req.is_json());
        let payload: Payload = req.json().unwrap();
        assert_eq!(payload.name, "rust");
    }

    #[test]
    fn test_json_requires_content_type() {
        #[derive(Debug, Deserialize)]
        struct Payload {}

        let input = b"POST / HTTP/1.1\r\nHost: localhost\r\n\r\n{}";
        let req = parse_request(input).unwrap();

        assert!(!req.is_json());
        let err = req.json::<Payload>().unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader(_)));
    }

    #[test]
    fn test_query_params() {
        let input = b"GET /api/users?username=a&country=se HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let req = parse_request(input).unwrap();

        assert_eq!(req.path, "/api/users?username=a&country=se");
        assert_eq!(req.route_path(), "/api/users");
        assert_eq!(req.get_query_param("username"), Some(&"a".to_string()));
        assert_eq!(req.get_query_param("country"), Some(&"se".to_string()));
        assert_eq!(req.get_query_param("missing"), None);
    }

    #[test]
    fn test_query_param_without_value() {
        let input = b"GET /?flag HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let req = parse_request(input).unwrap();

        assert_eq!(req.get_query_param("flag"), Some(&String::new()));
    }
}
