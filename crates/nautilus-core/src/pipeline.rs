//! Interceptor chain and final-handler plumbing
//!
//! A [`Pipeline`] is an ordered stack of [`Interceptor`]s in front of one
//! [`Handler`]. Each interceptor wraps the write path of everything
//! downstream of it: it receives the request view, the response sink, and
//! a [`Next`] that runs the remainder of the chain exactly once.

use crate::request::RequestHead;
use crate::sink::ResponseSink;
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Final stage of a pipeline: produces the response through the sink.
pub trait Handler: Send + Sync {
    /// Handle the request, writing the response through `sink`.
    fn handle(&self, req: &RequestHead, sink: &mut dyn ResponseSink) -> Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&RequestHead, &mut dyn ResponseSink) -> Result<()> + Send + Sync,
{
    fn handle(&self, req: &RequestHead, sink: &mut dyn ResponseSink) -> Result<()> {
        self(req, sink)
    }
}

/// A pipeline stage wrapped around the downstream write path.
pub trait Interceptor: Send + Sync + fmt::Debug {
    /// Process the request.
    ///
    /// Implementations must invoke `next` exactly once, synchronously,
    /// and may substitute their own [`ResponseSink`] for the one handed
    /// to the rest of the chain.
    fn around(
        &self,
        req: &RequestHead,
        sink: &mut dyn ResponseSink,
        next: Next<'_>,
    ) -> Result<()>;
}

/// The remaining stages of a chain, ending at the final handler.
///
/// Consumed by [`run`](Next::run), so a stage cannot invoke the rest of
/// the chain twice.
pub struct Next<'a> {
    stack: &'a [Arc<dyn Interceptor>],
    handler: &'a dyn Handler,
}

impl Next<'_> {
    /// Run the next interceptor, or the final handler once the stack is
    /// exhausted.
    pub fn run(self, req: &RequestHead, sink: &mut dyn ResponseSink) -> Result<()> {
        match self.stack.split_first() {
            Some((stage, rest)) => stage.around(
                req,
                sink,
                Next {
                    stack: rest,
                    handler: self.handler,
                },
            ),
            None => self.handler.handle(req, sink),
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.stack.len())
            .finish()
    }
}

/// Owned interceptor stack plus final handler.
///
/// Cheap to clone and safe to share across request-handling threads;
/// per-request state lives in the sinks, not here.
#[derive(Clone)]
pub struct Pipeline {
    stack: Arc<[Arc<dyn Interceptor>]>,
    handler: Arc<dyn Handler>,
}

impl Pipeline {
    /// Start building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run one request through every stage and the final handler.
    pub fn handle(&self, req: &RequestHead, sink: &mut dyn ResponseSink) -> Result<()> {
        Next {
            stack: &self.stack,
            handler: &*self.handler,
        }
        .run(req, sink)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stack.len())
            .finish()
    }
}

/// Builder for [`Pipeline`]
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    stack: Vec<Arc<dyn Interceptor>>,
}

impl PipelineBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Append an interceptor; stages run in insertion order.
    #[must_use]
    pub fn with(mut self, stage: impl Interceptor + 'static) -> Self {
        self.stack.push(Arc::new(stage));
        self
    }

    /// Finish the chain with its handler, producing the pipeline.
    pub fn handler(self, handler: impl Handler + 'static) -> Pipeline {
        Pipeline {
            stack: self.stack.into(),
            handler: Arc::new(handler),
        }
    }
}
