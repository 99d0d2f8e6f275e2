//! Middleware layer.
//!
//! Middleware intercepts a request on its way to the terminal
//! [`Handler`](crate::Handler) and is the right place for cross-cutting
//! concerns: structured tracing, request-id injection, authentication-header
//! inspection, rate limiting.
//!
//! Each middleware receives a [`Next`], the rest of the chain. Calling
//! [`Next::run`] continues; returning without calling it short-circuits, and
//! nothing after this middleware runs. `run` takes `self`, so the rest of the
//! chain runs at most once per request.
//!
//! ```rust
//! use stitch::{Next, Request, ResponseWriter};
//! use http::StatusCode;
//!
//! fn require_auth(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
//!     if req.header("authorization").is_none() {
//!         w.write_status(StatusCode::UNAUTHORIZED);
//!         return;
//!     }
//!     next.run(w, req);
//! }
//! ```

use std::fmt;
use std::slice;
use std::sync::Arc;

use crate::request::Request;
use crate::response::ResponseWriter;

/// One interceptor in a chain.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, w: &mut ResponseWriter, req: &Request, next: Next<'_>);
}

/// A middleware shared across concurrent requests.
pub type SharedMiddleware = Arc<dyn Middleware>;

/// Adapter that lets a plain function or closure act as a [`Middleware`].
pub struct MiddlewareFn<F>(pub F);

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(&mut ResponseWriter, &Request, Next<'_>) + Send + Sync + 'static,
{
    fn call(&self, w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
        (self.0)(w, req, next)
    }
}

// ── Continuation ──────────────────────────────────────────────────────────────

/// Something a [`Next`] can invoke: a bound step or the terminal handler.
pub(crate) trait Link {
    fn call(&self, w: &mut ResponseWriter, req: &Request);
}

/// The rest of the chain, handed to each middleware.
pub struct Next<'a> {
    link: &'a dyn Link,
}

impl<'a> Next<'a> {
    pub(crate) fn new(link: &'a dyn Link) -> Self {
        Self { link }
    }

    /// Runs the remaining middleware and then the terminal handler.
    ///
    /// The request passed here is what the rest of the chain sees, so a
    /// middleware may forward a modified clone instead of `req`.
    pub fn run(self, w: &mut ResponseWriter, req: &Request) {
        self.link.call(w, req)
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

// ── Chain ─────────────────────────────────────────────────────────────────────

/// Ordered middleware. Index 0 runs first.
#[derive(Clone, Default)]
pub struct Chain(Vec<SharedMiddleware>);

impl Chain {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SharedMiddleware> {
        self.0.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, SharedMiddleware> {
        self.0.iter()
    }

    /// Calls `f` on every middleware in invocation order.
    pub fn for_each(&self, f: impl FnMut(&SharedMiddleware)) {
        self.0.iter().for_each(f)
    }

    pub(crate) fn extend(&mut self, middleware: Vec<SharedMiddleware>) {
        self.0.extend(middleware)
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a SharedMiddleware;
    type IntoIter = slice::Iter<'a, SharedMiddleware>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.0.len()).finish()
    }
}
