//! # Nautilus Core
//!
//! Core types, traits, and error handling for the Nautilus HTTP pipeline.
//!
//! This crate provides the foundational abstractions shared by pipeline
//! stages:
//! - The [`ResponseSink`] write capability and its in-memory
//!   [`BufferSink`] implementation
//! - The read-only [`RequestHead`] view of an inbound request
//! - The [`Interceptor`]/[`Handler`] chain with [`Pipeline`] as the
//!   entry point
//! - Error types

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod pipeline;
pub mod request;
pub mod sink;

pub use error::{Error, Result};
pub use pipeline::{Handler, Interceptor, Next, Pipeline, PipelineBuilder};
pub use request::RequestHead;
pub use sink::{BufferSink, ResponseSink};

// Re-export commonly used HTTP types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{Handler, Interceptor, Next, Pipeline, PipelineBuilder};
    pub use crate::request::RequestHead;
    pub use crate::sink::{BufferSink, ResponseSink};
}
