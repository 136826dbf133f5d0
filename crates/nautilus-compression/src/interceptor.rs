//! Gzip response interceptor
//!
//! The pipeline stage tying policy and session together: decide
//! eligibility up front, swap the write path for a
//! [`CompressionSession`], run the downstream handler, and finalize on
//! every exit path.

use crate::config::CompressionConfig;
use crate::policy::should_compress;
use crate::session::CompressionSession;
use http::header::{CONTENT_ENCODING, VARY};
use http::HeaderValue;
use nautilus_core::{Interceptor, Next, RequestHead, ResponseSink, Result};
use tracing::{debug, warn};

/// Pipeline stage that gzips eligible response bodies on the fly.
///
/// Ineligible requests pass through untouched. For eligible ones the
/// downstream handler writes through a per-request [`CompressionSession`];
/// the `Content-Encoding` and `Vary` headers are declared before the
/// first body byte, and any stale `Content-Length` is cleared when the
/// session closes.
#[derive(Debug, Clone)]
pub struct GzipInterceptor {
    config: CompressionConfig,
}

impl GzipInterceptor {
    /// Stage with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CompressionConfig::default())
    }

    /// Stage with an explicit configuration.
    pub fn with_config(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Stage compressing at the given level, defaults elsewhere.
    pub fn with_level(level: crate::CompressionLevel) -> Self {
        Self::with_config(CompressionConfig {
            level: level.as_i32(),
            ..CompressionConfig::default()
        })
    }
}

impl Default for GzipInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for GzipInterceptor {
    fn around(
        &self,
        req: &RequestHead,
        sink: &mut dyn ResponseSink,
        next: Next<'_>,
    ) -> Result<()> {
        if !self.config.enabled || !should_compress(req) {
            return next.run(req, sink);
        }

        let level = match self.config.compression_level() {
            Ok(level) => level,
            Err(err) => {
                // Out-of-range level: abort activation, serve uncompressed.
                warn!(error = %err, "compression skipped");
                return next.run(req, sink);
            }
        };

        let mut session = CompressionSession::new(sink, level);
        // Headers must be declared before the first body byte reaches the
        // transport.
        session.set_header(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        session.set_header(VARY, HeaderValue::from_static("Accept-Encoding"));
        debug!(path = req.path(), level = level.as_i32(), "compressing response");

        let handled = next.run(req, &mut session);
        let finished = session.finish();

        // A handler error outranks a flush error; the session is closed
        // either way.
        handled?;
        finished?;
        Ok(())
    }
}
