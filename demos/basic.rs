//! Minimal stitch example: request ids, access logging and a bearer-token
//! check in front of one handler.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/
//!   curl -i -H 'authorization: Bearer letmein' http://localhost:3000/users/42

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use http::{HeaderValue, StatusCode};
use stitch::{
    Middleware, Next, Request, ResponseWriter, Runner, Server, SharedMiddleware, use_handler_fn,
    with, with_fn,
};

#[tokio::main]
async fn main() -> Result<(), stitch::Error> {
    tracing_subscriber::fmt::init();

    let app = Runner::build([
        with([Arc::new(RequestId::default()) as SharedMiddleware]),
        with_fn([access_log as fn(&mut ResponseWriter, &Request, Next<'_>), require_token]),
        use_handler_fn(whoami),
    ])?;

    Server::bind("0.0.0.0:3000").serve(app).await
}

/// Tags every request and response with a monotonically increasing id.
#[derive(Default)]
struct RequestId {
    next_id: AtomicU64,
}

impl Middleware for RequestId {
    fn call(&self, w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
        let id = HeaderValue::from(self.next_id.fetch_add(1, Ordering::Relaxed));
        w.insert_header(http::header::HeaderName::from_static("x-request-id"), id.clone());

        let mut req = req.clone();
        req.headers_mut().insert("x-request-id", id);
        next.run(w, &req);
    }
}

fn access_log(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
    let started = Instant::now();
    next.run(w, req);
    tracing::info!(
        method = %req.method(),
        path = req.path(),
        status = w.status().as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request",
    );
}

// Rejecting here means the handler never runs.
fn require_token(w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
    if req.header("authorization") != Some("Bearer letmein") {
        w.write_status(StatusCode::UNAUTHORIZED);
        w.write_bytes(b"missing or wrong token\n");
        return;
    }
    next.run(w, req);
}

fn whoami(w: &mut ResponseWriter, req: &Request) {
    let id = req.header("x-request-id").unwrap_or("-");
    w.insert_header(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    w.write_bytes(format!(r#"{{"path":"{}","request_id":"{id}"}}"#, req.path()).as_bytes());
}
