//! Errors that reject a request.

use crate::http::{header, HeaderValue, Method, Methods, Response, StatusCode};

use std::any::Any;
use std::fmt::{self, Debug, Display};

/// An error capable of rejecting a request with an HTTP error response.
pub trait Reject: Debug + Display + Send + Sync + 'static {
    /// Reject the request with an HTTP error response.
    fn reject(self) -> Response;

    /// The status of the response this error rejects with.
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl Reject for StatusCode {
    fn reject(self) -> Response {
        Response::from(self)
    }

    fn status(&self) -> StatusCode {
        *self
    }
}

/// A dynamically typed rejection.
///
/// Views may fail with any type implementing [`Reject`]. The adapters never
/// translate these errors, so the original value is always available
/// through [`downcast_ref`](Rejection::downcast_ref).
pub struct Rejection {
    inner: Box<dyn BoxedReject>,
}

impl Rejection {
    /// Create a new `Rejection`.
    pub fn new<E>(err: E) -> Self
    where
        E: IntoRejection,
    {
        err.into_rejection()
    }

    /// Convert this error into an HTTP response.
    ///
    /// This method is analogous to [`Reject::reject`],
    /// which cannot be implemented directly due to
    /// coherence rules.
    pub fn reject(self) -> Response {
        self.inner.reject_boxed()
    }

    /// The status this rejection responds with.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Whether the underlying error is a `T`.
    pub fn is<T: Reject>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Get a reference to the underlying error if it is a `T`.
    pub fn downcast_ref<T: Reject>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }
}

trait BoxedReject: Reject {
    fn reject_boxed(self: Box<Self>) -> Response;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Reject> BoxedReject for T {
    fn reject_boxed(self: Box<Self>) -> Response {
        Reject::reject(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E> From<E> for Rejection
where
    E: Reject,
{
    fn from(err: E) -> Self {
        Self {
            inner: Box::new(err),
        }
    }
}

/// A type that can be converted into a [`Rejection`].
///
/// This trait allows [`Rejection`] itself to be returned
/// from views while not implementing [`Reject`] directly.
/// You shouldn't have to worry about this trait, but it
/// may show up in error messages when [`Reject`] is not
/// implemented.
pub trait IntoRejection: Send + 'static {
    fn into_rejection(self) -> Rejection;
}

impl<E> IntoRejection for E
where
    E: Reject,
{
    fn into_rejection(self) -> Rejection {
        self.into()
    }
}

impl IntoRejection for Rejection {
    fn into_rejection(self) -> Rejection {
        self
    }
}

/// An error carrying an HTTP status, and optionally some detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    status: StatusCode,
    detail: Option<String>,
}

impl HttpError {
    pub fn new(status: StatusCode) -> Self {
        HttpError {
            status,
            detail: None,
        }
    }

    /// Attach a human readable detail, sent as the response body.
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.status, detail),
            None => write!(f, "{}", self.status),
        }
    }
}

impl Reject for HttpError {
    fn reject(self) -> Response {
        let response = Response::from(self.status);
        match self.detail {
            Some(detail) => response.body(detail),
            None => response,
        }
    }

    fn status(&self) -> StatusCode {
        self.status
    }
}

/// The request method is not accepted by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNotAllowed {
    method: Method,
    allow: String,
}

impl MethodNotAllowed {
    /// `method` was rejected by a view accepting `allowed`.
    pub fn new<'a>(method: Method, allowed: impl IntoIterator<Item = &'a Method>) -> Self {
        let allow = allowed
            .into_iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        MethodNotAllowed { method, allow }
    }

    pub(crate) fn with_allow(method: Method, allow: impl Into<String>) -> Self {
        MethodNotAllowed {
            method,
            allow: allow.into(),
        }
    }

    pub(crate) fn from_methods(method: Method, allowed: &Methods) -> Self {
        MethodNotAllowed {
            method,
            allow: allowed.allow_header(),
        }
    }

    /// The rejected method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The methods the view does accept, as an `Allow` header value.
    pub fn allow(&self) -> &str {
        &self.allow
    }
}

impl Display for MethodNotAllowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method {} not allowed", self.method)
    }
}

impl Reject for MethodNotAllowed {
    fn reject(self) -> Response {
        let response = Response::from(StatusCode::METHOD_NOT_ALLOWED);
        match HeaderValue::from_str(&self.allow) {
            Ok(allow) if !self.allow.is_empty() => response.header(header::ALLOW, allow),
            _ => response,
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

/// A declared handler that deliberately has no implementation.
///
/// Dispatch never produces this error, it only surfaces when a view
/// returns it from one of its own handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotImplemented {
    method: Method,
}

impl NotImplemented {
    pub fn new(method: Method) -> Self {
        NotImplemented { method }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl Display for NotImplemented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler for {} is not implemented", self.method)
    }
}

impl Reject for NotImplemented {
    fn reject(self) -> Response {
        Response::from(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
