//! Runner configuration.
//!
//! [`Runner::build`](crate::Runner::build) starts from [`Options::default`]
//! and applies each [`Setter`] in the order given. The first setter that
//! fails aborts the build.
//!
//! Rust has no null trait objects, so "absent" is spelled `None`: every
//! setter that validates its input takes `impl Into<Option<_>>` and rejects
//! `None`.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::handler::{Greeting, HandlerFn, SharedHandler};
use crate::middleware::{Chain, MiddlewareFn, Next, SharedMiddleware};
use crate::request::Request;
use crate::response::ResponseWriter;

/// The settable configuration of a [`Runner`](crate::Runner).
#[derive(Clone)]
pub struct Options {
    pub middleware: Chain,
    pub handler: SharedHandler,
}

impl Default for Options {
    /// Empty chain; the terminal handler writes
    /// [`DEFAULT_BODY`](crate::DEFAULT_BODY).
    fn default() -> Self {
        Self { middleware: Chain::default(), handler: Arc::new(Greeting) }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("middleware", &self.middleware)
            .finish_non_exhaustive()
    }
}

/// One configuration step applied by `Runner::build`.
pub type Setter = Box<dyn FnOnce(&mut Options) -> Result<(), Error> + Send>;

/// Appends middleware after everything appended so far, keeping call-site
/// order.
///
/// Fails with [`Error::NilMiddleware`] if any item is `None`; nothing is
/// appended in that case.
pub fn with<I>(middleware: I) -> Setter
where
    I: IntoIterator,
    I::Item: Into<Option<SharedMiddleware>>,
{
    let middleware: Vec<Option<SharedMiddleware>> =
        middleware.into_iter().map(Into::into).collect();
    Box::new(move |o: &mut Options| {
        let middleware = middleware
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::NilMiddleware)?;
        o.middleware.extend(middleware);
        Ok(())
    })
}

/// Like [`with`], for plain functions. Each one is wrapped in
/// [`MiddlewareFn`].
///
/// Every item in one batch has the same type `F`. Distinct fn items or
/// closures have distinct types, so mix them by casting to a common
/// `fn(&mut ResponseWriter, &Request, Next<'_>)` pointer, or wrap each in
/// `Arc::new(MiddlewareFn(f))` and pass the batch to [`with`].
///
/// ```rust
/// use stitch::{Next, Request, ResponseWriter, Runner, with_fn};
///
/// fn tag(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
///     w.write_bytes(b"tagged ");
///     next.run(w, req);
/// }
///
/// let runner = Runner::build([with_fn([tag])]).unwrap();
/// assert_eq!(runner.snapshot().middleware.len(), 1);
/// ```
pub fn with_fn<I, F>(funcs: I) -> Setter
where
    I: IntoIterator,
    I::Item: Into<Option<F>>,
    F: Fn(&mut ResponseWriter, &Request, Next<'_>) + Send + Sync + 'static,
{
    let funcs: Vec<Option<F>> = funcs.into_iter().map(Into::into).collect();
    Box::new(move |o: &mut Options| {
        if funcs.iter().any(Option::is_none) {
            return Err(Error::NilMiddleware);
        }
        let wrapped = funcs
            .into_iter()
            .flatten()
            .map(|f| Arc::new(MiddlewareFn(f)) as SharedMiddleware)
            .collect();
        o.middleware.extend(wrapped);
        Ok(())
    })
}

/// Sets the terminal handler. Applied more than once, the last one wins.
///
/// Fails with [`Error::NilHandler`] for `None`.
pub fn use_handler(handler: impl Into<Option<SharedHandler>>) -> Setter {
    let handler = handler.into();
    Box::new(move |o: &mut Options| {
        o.handler = handler.ok_or(Error::NilHandler)?;
        Ok(())
    })
}

/// Wraps `f` in [`HandlerFn`] and delegates to [`use_handler`].
pub fn use_handler_fn<F>(f: F) -> Setter
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
{
    use_handler(Arc::new(HandlerFn(f)) as SharedHandler)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Step = fn(&mut ResponseWriter, &Request, Next<'_>);

    fn pass(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
        next.run(w, req)
    }

    #[test]
    fn with_rejects_nil_without_appending() {
        let mut opts = Options::default();
        let mw: SharedMiddleware = Arc::new(MiddlewareFn(pass));

        let err = with([Some(mw), None])(&mut opts).unwrap_err();

        assert!(matches!(err, Error::NilMiddleware));
        assert!(opts.middleware.is_empty());
    }

    #[test]
    fn with_fn_rejects_nil_without_appending() {
        let mut opts = Options::default();

        let err = with_fn::<_, Step>([Some(pass as Step), None])(&mut opts).unwrap_err();

        assert!(matches!(err, Error::NilMiddleware));
        assert!(opts.middleware.is_empty());
    }

    #[test]
    fn appends_follow_previous_ones() {
        let mut opts = Options::default();
        let a: SharedMiddleware = Arc::new(MiddlewareFn(pass));
        let b: SharedMiddleware = Arc::new(MiddlewareFn(pass));

        with([a.clone()])(&mut opts).unwrap();
        with_fn([pass as Step, pass])(&mut opts).unwrap();
        with([b.clone()])(&mut opts).unwrap();

        assert_eq!(opts.middleware.len(), 4);
        assert!(Arc::ptr_eq(opts.middleware.get(0).unwrap(), &a));
        assert!(Arc::ptr_eq(opts.middleware.get(3).unwrap(), &b));
    }

    #[test]
    fn last_handler_wins() {
        let mut opts = Options::default();
        let first: SharedHandler = Arc::new(HandlerFn(|_: &mut ResponseWriter, _: &Request| {}));
        let second: SharedHandler = Arc::new(HandlerFn(|_: &mut ResponseWriter, _: &Request| {}));

        use_handler(first)(&mut opts).unwrap();
        use_handler(second.clone())(&mut opts).unwrap();

        assert!(Arc::ptr_eq(&opts.handler, &second));
    }

    #[test]
    fn use_handler_rejects_nil() {
        let mut opts = Options::default();
        let err = use_handler(None)(&mut opts).unwrap_err();
        assert!(matches!(err, Error::NilHandler));
    }
}
