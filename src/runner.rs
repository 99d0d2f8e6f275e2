//! Chain construction and invocation.
//!
//! # How a request walks the chain
//!
//! For every request the runner binds each middleware to the rest of the
//! chain, innermost first:
//!
//! ```text
//! middleware: [m0, m1, m2]      handler: h
//!
//! Terminal(h)
//! Step { m2, next: Terminal(h) }
//! Step { m1, next: Step { m2, … } }
//! Step { m0, next: Step { m1, … } }   ← called with (w, req)
//! ```
//!
//! Calling the outermost step runs `m0`; its [`Next`] runs `m1`, and so on
//! down to `h`. A middleware that returns without running its `Next` ends the
//! walk there. Each step owns the next one, so no loop variable is captured
//! and nothing outlives the call.

use tracing::debug;

use crate::error::Error;
use crate::handler::Handler;
use crate::middleware::{Link, Middleware, Next};
use crate::options::{Options, Setter};
use crate::request::Request;
use crate::response::ResponseWriter;

/// A [`Handler`] that runs its middleware in order before delegating to the
/// terminal handler.
///
/// Build it once at startup and share it: the configuration is never mutated
/// after [`build`](Runner::build), so one runner serves any number of
/// concurrent requests.
#[derive(Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    /// Applies `setters` in order on top of [`Options::default`].
    ///
    /// The first failing setter aborts the build; its error comes back
    /// wrapped in [`Error::InvalidOption`] and no runner is produced.
    ///
    /// ```rust
    /// use stitch::{Runner, use_handler_fn, with_fn, Next, Request, ResponseWriter};
    ///
    /// fn log(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
    ///     next.run(w, req);
    /// }
    ///
    /// let runner = Runner::build([
    ///     with_fn([log]),
    ///     use_handler_fn(|w: &mut ResponseWriter, _req: &Request| w.write_bytes(b"ok")),
    /// ])
    /// .unwrap();
    /// ```
    pub fn build(setters: impl IntoIterator<Item = Setter>) -> Result<Self, Error> {
        let mut options = Options::default();
        for set in setters {
            if let Err(e) = set(&mut options) {
                debug!(error = %e, "rejected runner option");
                return Err(Error::InvalidOption(Box::new(e)));
            }
        }
        debug!(middleware = options.middleware.len(), "runner built");
        Ok(Self { options })
    }

    /// A copy of the configuration.
    ///
    /// The copy has its own chain; the middleware and handler inside it are
    /// the same shared values the runner calls.
    pub fn snapshot(&self) -> Options {
        self.options.clone()
    }
}

impl Handler for Runner {
    fn call(&self, w: &mut ResponseWriter, req: &Request) {
        let mut last: Box<dyn Link + '_> = Box::new(Terminal(self.options.handler.as_ref()));
        for middleware in self.options.middleware.iter().rev() {
            last = Box::new(Step { middleware: middleware.as_ref(), next: last });
        }
        last.call(w, req);
    }
}

// ── Bound steps ───────────────────────────────────────────────────────────────

struct Terminal<'a>(&'a dyn Handler);

impl Link for Terminal<'_> {
    fn call(&self, w: &mut ResponseWriter, req: &Request) {
        self.0.call(w, req)
    }
}

/// One middleware bound to the rest of the chain.
struct Step<'a> {
    middleware: &'a dyn Middleware,
    next: Box<dyn Link + 'a>,
}

impl Link for Step<'_> {
    fn call(&self, w: &mut ResponseWriter, req: &Request) {
        self.middleware.call(w, req, Next::new(&*self.next))
    }
}
