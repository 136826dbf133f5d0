//! Per-request streaming compression session
//!
//! A [`CompressionSession`] decorates a [`ResponseSink`]: body writes
//! route through a gzip encoder before reaching the wrapped sink, while
//! header and status operations pass straight through. The session holds
//! the only mutable borrow of the sink for its lifetime, so while it is
//! open nothing can write around the compressor.

use crate::level::CompressionLevel;
use flate2::write::GzEncoder;
use http::header::CONTENT_LENGTH;
use http::{HeaderName, HeaderValue, StatusCode};
use nautilus_core::ResponseSink;
use std::fmt;
use std::io::Write;

/// Adapter giving the encoder `io::Write` access to the borrowed sink.
struct SinkWriter<'a> {
    sink: &'a mut dyn ResponseSink,
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// An open compressor bound to exactly one underlying sink for the
/// duration of a request.
///
/// Call [`finish`](Self::finish) when the request completes. If the stack
/// unwinds first (handler panic, aborted connection), `Drop` closes the
/// stream so the gzip trailer is never left off.
pub struct CompressionSession<'a> {
    // `None` only once finalization has run.
    encoder: Option<GzEncoder<SinkWriter<'a>>>,
}

impl<'a> CompressionSession<'a> {
    /// Bind a compressor to `sink` for the remainder of a request.
    pub fn new(sink: &'a mut dyn ResponseSink, level: CompressionLevel) -> Self {
        Self {
            encoder: Some(GzEncoder::new(SinkWriter { sink }, level.to_flate2())),
        }
    }

    /// Flush buffered data, write the gzip trailer, and drop the stale
    /// `Content-Length` the handler may have declared for the
    /// uncompressed body.
    ///
    /// Consumes the session; finalization runs exactly once.
    pub fn finish(mut self) -> std::io::Result<()> {
        self.close()
    }

    fn close(&mut self) -> std::io::Result<()> {
        let Some(encoder) = self.encoder.take() else {
            return Ok(());
        };
        let mut writer = encoder.finish()?;
        writer.sink.remove_header(CONTENT_LENGTH);
        Ok(())
    }
}

impl ResponseSink for CompressionSession<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.encoder.as_mut() {
            Some(encoder) => encoder.write(buf),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "compression session already finalized",
            )),
        }
    }

    fn set_status(&mut self, status: StatusCode) {
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.get_mut().sink.set_status(status);
        }
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.get_mut().sink.set_header(name, value);
        }
    }

    fn remove_header(&mut self, name: HeaderName) {
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.get_mut().sink.remove_header(name);
        }
    }
}

impl Drop for CompressionSession<'_> {
    fn drop(&mut self) {
        // Unwind path: the trailer still has to go out, and errors have
        // nowhere to be reported.
        let _ = self.close();
    }
}

impl fmt::Debug for CompressionSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionSession")
            .field("open", &self.encoder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use nautilus_core::BufferSink;
    use std::io::Read;

    fn gunzip(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_round_trip() {
        let mut sink = BufferSink::new();
        let mut session = CompressionSession::new(&mut sink, CompressionLevel::DEFAULT);
        session.write_all(b"hello, ").unwrap();
        session.write_all(b"world").unwrap();
        session.finish().unwrap();

        assert_eq!(gunzip(sink.body()), b"hello, world");
    }

    #[test]
    fn test_round_trip_at_every_level() {
        let payload = "the quick brown fox jumps over the lazy dog\n".repeat(64);
        for raw in -1..=9 {
            let level = CompressionLevel::from_i32(raw).unwrap();
            let mut sink = BufferSink::new();
            let mut session = CompressionSession::new(&mut sink, level);
            session.write_all(payload.as_bytes()).unwrap();
            session.finish().unwrap();

            assert_eq!(gunzip(sink.body()), payload.as_bytes(), "level {raw}");
        }
    }

    #[test]
    fn test_header_and_status_pass_through() {
        let mut sink = BufferSink::new();
        {
            let mut session = CompressionSession::new(&mut sink, CompressionLevel::DEFAULT);
            session.set_status(StatusCode::ACCEPTED);
            session.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            session.finish().unwrap();
        }

        assert_eq!(sink.status(), StatusCode::ACCEPTED);
        assert_eq!(sink.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn test_finish_clears_content_length() {
        let mut sink = BufferSink::new();
        {
            let mut session = CompressionSession::new(&mut sink, CompressionLevel::DEFAULT);
            session.set_header(CONTENT_LENGTH, HeaderValue::from_static("1234"));
            session.write_all(b"body").unwrap();
            session.finish().unwrap();
        }

        assert!(!sink.headers().contains_key(CONTENT_LENGTH));
        assert_eq!(gunzip(sink.body()), b"body");
    }

    #[test]
    fn test_drop_without_finish_still_writes_trailer() {
        let mut sink = BufferSink::new();
        {
            let mut session = CompressionSession::new(&mut sink, CompressionLevel::DEFAULT);
            session.write_all(b"partial output").unwrap();
            // Simulates an unwinding handler: the session is dropped
            // without finish() ever running.
        }

        assert_eq!(gunzip(sink.body()), b"partial output");
    }

    #[test]
    fn test_empty_body_produces_valid_stream() {
        let mut sink = BufferSink::new();
        CompressionSession::new(&mut sink, CompressionLevel::DEFAULT)
            .finish()
            .unwrap();

        assert_eq!(gunzip(sink.body()), b"");
    }

    /// Sink whose write path always fails with a transport error.
    #[derive(Debug, Default)]
    struct FailingSink;

    impl ResponseSink for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))
        }

        fn set_status(&mut self, _status: StatusCode) {}
        fn set_header(&mut self, _name: HeaderName, _value: HeaderValue) {}
        fn remove_header(&mut self, _name: HeaderName) {}
    }

    #[test]
    fn test_underlying_write_error_propagates_unchanged() {
        let mut sink = FailingSink;
        let mut session = CompressionSession::new(&mut sink, CompressionLevel::DEFAULT);
        // Small writes land in the encoder's buffer; the transport error
        // surfaces at the latest when the stream is finalized.
        let _ = session.write_all(b"data");
        let err = session.finish().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::ConnectionReset);
    }
}
