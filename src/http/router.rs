//! Route table entries and path pattern matching.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::error::Error;
use crate::http::method::Method;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

/// Type alias for a boxed future that resolves to a handler result.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function stored in the route table.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// A route in the HTTP server.
#[derive(Clone)]
pub struct Route {
    /// The path pattern to match. A segment starting with `:` captures the
    /// corresponding request segment as a path parameter.
    pub pattern: String,
    /// The HTTP methods this route handles.
    pub methods: Vec<Method>,
    /// The handler function.
    pub handler: HandlerFn,
}

impl Route {
    /// Match a request path against this route's pattern.
    ///
    /// Returns the captured path parameters on a match, `None` otherwise.
    /// The query string, if any, takes no part in the match.
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let path = path.split('?').next().unwrap_or(path);
        let mut params = HashMap::new();

        let mut pattern_segments = self.pattern.split('/').filter(|s| !s.is_empty());
        let mut path_segments = path.split('/').filter(|s| !s.is_empty());

        loop {
            match (pattern_segments.next(), path_segments.next()) {
                (Some(pattern), Some(segment)) => {
                    if let Some(name) = pattern.strip_prefix(':') {
                        params.insert(name.to_string(), segment.to_string());
                    } else if pattern != segment {
                        return None;
                    }
                }
                (None, None) => return Some(params),
                // One side ran out of segments before the other
                _ => return None,
            }
        }
    }
}
