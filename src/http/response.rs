use super::header::{HeaderName, IntoHeaderName};
use super::{Bytes, HeaderMap, HeaderValue, StatusCode};

/// The outgoing response a view writes into.
///
/// A fresh response is `200 OK` with no headers and an empty body.
#[derive(Clone, Debug, Default)]
pub struct Response {
    /// The response's status
    pub status: StatusCode,

    /// The response's headers
    pub headers: HeaderMap,

    /// The response body
    pub body: Bytes,
}

impl Response {
    /// Create an empty `200 OK` response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status of this response.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Append a header to this response.
    pub fn header<K>(mut self, name: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.append(name, value);
        self
    }

    /// Replace the body of this response.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get the first value of a header, if it is valid UTF-8.
    pub fn header_str(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl From<StatusCode> for Response {
    fn from(status: StatusCode) -> Self {
        Response::new().status(status)
    }
}
