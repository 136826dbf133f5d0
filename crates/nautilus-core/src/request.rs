//! Read-only request view consulted by pipeline stages

use http::{HeaderMap, HeaderName, Method, Uri};

/// Read-only view of an inbound request.
///
/// Owned by the host pipeline and never mutated by interceptors; stages
/// read headers and the path to make their per-request decisions.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// HTTP method
    pub method: Method,

    /// Request URI
    pub uri: Uri,

    /// Inbound headers
    pub headers: HeaderMap,
}

impl RequestHead {
    /// Create a request view from its parts.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }

    /// URL path component of the request.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Header value as a string, `None` when absent or not valid UTF-8.
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl<T> From<&http::Request<T>> for RequestHead {
    fn from(req: &http::Request<T>) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }
}
