//! # stitch
//!
//! Stitches an ordered list of middleware in front of a terminal handler and
//! hands back a single [`Handler`]. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! stitch does not route, parse or authenticate. It orders and delegates:
//!
//! - Middleware runs in the order it was appended, first to last.
//! - Each middleware gets a [`Next`]. Run it to continue; drop it to
//!   short-circuit, and nothing after that middleware runs.
//! - The terminal handler runs last, and only if every middleware continued.
//! - Configuration is validated once, in [`Runner::build`]. After that the
//!   runner is immutable and serves concurrent requests without locks.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use stitch::{Next, Request, ResponseWriter, Runner, Server, use_handler_fn, with_fn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), stitch::Error> {
//!     let app = Runner::build([
//!         with_fn([require_auth]),
//!         use_handler_fn(hello),
//!     ])?;
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//!
//! fn require_auth(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
//!     if req.header("authorization").is_none() {
//!         w.write_status(StatusCode::UNAUTHORIZED);
//!         return;
//!     }
//!     next.run(w, req);
//! }
//!
//! fn hello(w: &mut ResponseWriter, _req: &Request) {
//!     w.write_bytes(b"hello");
//! }
//! ```

mod error;
mod handler;
mod options;
mod request;
mod response;
mod runner;
mod server;

pub mod middleware;

pub use error::Error;
pub use handler::{DEFAULT_BODY, Handler, HandlerFn, SharedHandler};
pub use middleware::{Chain, Middleware, MiddlewareFn, Next, SharedMiddleware};
pub use options::{Options, Setter, use_handler, use_handler_fn, with, with_fn};
pub use request::Request;
pub use response::ResponseWriter;
pub use runner::Runner;
pub use server::Server;
