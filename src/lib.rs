//! Uniform async handlers from views of any shape.
//!
//! A view is a sync function, an async function, or an instance of a
//! [`ClassBasedView`]. [`create_callable_view`] classifies it once, and
//! returns a [`CallableView`] that every request to the route is sent to.

pub mod http;

mod adapt;
mod dispatch;
mod handler;
mod offload;
mod reject;
mod view;

pub use async_trait::async_trait;
pub use dispatch::{create_callable_view, ViewDispatcher};
pub use handler::{
    AsyncMethodFn, AsyncViewFn, CallableView, Handler, SyncMethodFn, SyncViewFn,
};
pub use offload::Offload;
pub use reject::{
    HttpError, IntoRejection, MethodNotAllowed, NotImplemented, Reject, Rejection,
};
pub use view::{
    declared_method_views, marker, view_name, BoundMethod, ClassBasedView, ClassInstance,
    DeclaredMethods, IntoView, MethodHandler, MethodTable, Named, Shape, View,
};
pub use view::{AsyncFunction, SyncFunction};
