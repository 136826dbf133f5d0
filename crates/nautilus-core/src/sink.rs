//! Response sink capability and an in-memory implementation

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// Write side of a response: body bytes plus header and status mutation.
///
/// Transports implement this once for their connection type. Pipeline
/// stages that rewrite the body wrap a sink and forward every operation
/// they do not intercept.
pub trait ResponseSink {
    /// Write a chunk of body bytes, returning how many were accepted.
    ///
    /// Errors are the transport's own [`std::io::Error`], passed through
    /// unchanged.
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize>;

    /// Set the response status code.
    fn set_status(&mut self, status: StatusCode);

    /// Set a response header, replacing any previous value.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Remove a response header if present.
    fn remove_header(&mut self, name: HeaderName);

    /// Write an entire buffer, retrying short writes.
    fn write_all(&mut self, mut buf: &[u8]) -> std::io::Result<()> {
        while !buf.is_empty() {
            let n = self.write(buf)?;
            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "sink accepted no bytes",
                ));
            }
            buf = &buf[n..];
        }
        Ok(())
    }
}

/// In-memory [`ResponseSink`] that captures status, headers, and body.
///
/// Used by tests throughout the workspace and by embedders that render a
/// response before handing it to their transport.
#[derive(Debug, Default)]
pub struct BufferSink {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferSink {
    /// Create an empty sink with status `200 OK`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Captured headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Captured body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the sink, returning the captured body.
    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }
}

impl ResponseSink for BufferSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn remove_header(&mut self, name: HeaderName) {
        self.headers.remove(name);
    }
}
