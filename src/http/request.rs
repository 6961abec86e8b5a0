use super::{Bytes, HeaderMap, Method, Uri, Version};

/// An incoming HTTP request.
#[derive(Clone, Debug, Default)]
pub struct Request {
    /// The request's method
    pub method: Method,

    /// The request's URI
    pub uri: Uri,

    /// The request's version
    pub version: Version,

    /// The request's headers
    pub headers: HeaderMap,

    /// The request body.
    pub body: Bytes,
}

impl Request {
    /// Create an empty request with the given method and URI.
    pub fn new(method: Method, uri: Uri) -> Self {
        Request {
            method,
            uri,
            ..Request::default()
        }
    }

    /// Shorthand for a `GET` request to `uri`.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is not a valid URI.
    pub fn get(uri: &'static str) -> Self {
        Request::new(Method::GET, Uri::from_static(uri))
    }

    /// Shorthand for a `POST` request to `uri`.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is not a valid URI.
    pub fn post(uri: &'static str) -> Self {
        Request::new(Method::POST, Uri::from_static(uri))
    }

    /// Replace the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}
