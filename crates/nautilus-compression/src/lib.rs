//! # Nautilus Compression
//!
//! Streaming gzip response compression for the Nautilus HTTP pipeline.
//!
//! The stage decides per request whether the response is worth
//! compressing, then rewrites the response stream through a gzip
//! encoder without buffering the whole body:
//! - [`should_compress`]: the eligibility policy, a pure predicate over
//!   request headers and path
//! - [`CompressionSession`]: the streaming response wrapper
//! - [`GzipInterceptor`]: the pipeline stage tying the two together
//!
//! ```
//! use nautilus_compression::GzipInterceptor;
//! use nautilus_core::prelude::*;
//!
//! let pipeline = Pipeline::builder()
//!     .with(GzipInterceptor::new())
//!     .handler(|_req: &RequestHead, sink: &mut dyn ResponseSink| -> Result<()> {
//!         sink.write_all(b"hello")?;
//!         Ok(())
//!     });
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod config;
pub mod interceptor;
pub mod level;
pub mod policy;
pub mod session;

pub use config::CompressionConfig;
pub use interceptor::GzipInterceptor;
pub use level::CompressionLevel;
pub use policy::should_compress;
pub use session::CompressionSession;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::CompressionConfig;
    pub use crate::interceptor::GzipInterceptor;
    pub use crate::level::CompressionLevel;
    pub use crate::policy::should_compress;
    pub use crate::session::CompressionSession;
}
