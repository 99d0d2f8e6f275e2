//! The response sink handed to every middleware and handler.
//!
//! A [`ResponseWriter`] records what the chain writes: one status line, a
//! header map, and a growing body. The server turns it into a hyper response
//! once the chain returns. Tests read it back directly.

use std::fmt;
use std::io;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;

/// Side-effecting response sink.
///
/// The status is fixed by the first call to [`write_status`] or the first
/// body write, whichever comes first; body writes without an explicit status
/// imply `200 OK`. Later status writes are ignored and logged at debug.
///
/// `ResponseWriter` implements both [`fmt::Write`] and [`io::Write`], so
/// `write!(w, "...")` works either way.
///
/// [`write_status`]: ResponseWriter::write_status
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn write_status(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(prev) => {
                tracing::debug!(%prev, ignored = %status, "superfluous write_status call");
            }
        }
    }

    /// Appends to the body, committing `200 OK` if no status was written yet.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(bytes);
    }

    /// The committed status, or `200 OK` if nothing has been written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, lossily decoded. Mostly useful in tests.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub(crate) fn into_response(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body.freeze()));
        *res.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *res.headers_mut() = self.headers;
        res
    }
}

impl fmt::Write for ResponseWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;

    #[test]
    fn first_status_wins() {
        let mut w = ResponseWriter::new();
        w.write_status(StatusCode::UNAUTHORIZED);
        w.write_status(StatusCode::OK);
        w.write_bytes(b"denied");

        assert_eq!(w.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(w.body_string(), "denied");
    }

    #[test]
    fn body_write_commits_ok() {
        let mut w = ResponseWriter::new();
        write!(w, "{}{}", 1, 2).unwrap();
        w.write_status(StatusCode::CREATED);

        assert_eq!(w.status(), StatusCode::OK);
        assert_eq!(w.body(), b"12");
    }

    #[test]
    fn into_response_keeps_headers() {
        let mut w = ResponseWriter::new();
        w.insert_header(http::header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        w.write_status(StatusCode::NO_CONTENT);

        let res = w.into_response();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers()["content-type"], "text/plain");
    }
}
