//! Terminal handlers.
//!
//! A [`Handler`] is the innermost step of a chain. It sees the request and
//! the response sink but never a continuation: whatever it writes is the
//! response.
//!
//! ```text
//! fn hello(w: &mut ResponseWriter, req: &Request) { … }   ← user writes this
//!        ↓ use_handler_fn(hello)
//! Arc::new(HandlerFn(hello))                               ← adapter
//!        ↓ stored as SharedHandler = Arc<dyn Handler>
//! handler.call(w, req)  at request time                    ← one vtable dispatch
//! ```

use std::fmt::Write as _;
use std::sync::Arc;

use crate::request::Request;
use crate::response::ResponseWriter;

/// Body written by the default terminal handler.
pub const DEFAULT_BODY: &str = "hello world!";

/// The innermost, unconditional step of a chain.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, w: &mut ResponseWriter, req: &Request);
}

/// A handler shared across concurrent requests.
pub type SharedHandler = Arc<dyn Handler>;

/// Adapter that lets a plain function or closure act as a [`Handler`].
pub struct HandlerFn<F>(pub F);

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
{
    fn call(&self, w: &mut ResponseWriter, req: &Request) {
        (self.0)(w, req)
    }
}

/// Used when no terminal handler is configured.
pub(crate) struct Greeting;

impl Handler for Greeting {
    fn call(&self, w: &mut ResponseWriter, _req: &Request) {
        // Writing into the in-memory sink cannot fail.
        let _ = w.write_str(DEFAULT_BODY);
    }
}
