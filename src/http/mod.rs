//! The HTTP values a view works with.

mod method;
mod params;
mod request;
mod response;

pub use bytes::Bytes;
pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri, Version};

pub use method::{is_recognized, method_key, Methods, MethodsError, ALL_METHODS};
pub use params::Params;
pub use request::Request;
pub use response::Response;
