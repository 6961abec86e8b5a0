//! The uniform handler every view is adapted into.

mod erased;
mod function;

pub(crate) use erased::{
    AsyncCall, AsyncFn, BoundAsync, BoundSync, Callable, Lifted, SyncCall, SyncFn,
};
pub use function::{AsyncMethodFn, AsyncViewFn, SyncMethodFn, SyncViewFn};

use crate::http::{Method, Params, Request, Response};
use crate::reject::Rejection;
use crate::view::{Named, Shape};

use std::fmt;
use std::sync::Arc;

/// An asynchronous HTTP handler.
///
/// You should not need to implement this trait directly, views are
/// adapted into a [`CallableView`] which implements it.
#[async_trait::async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Handle a request, writing the outcome into `res`.
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection>;
}

/// A view adapted into a [`Handler`].
///
/// Created once by the [`ViewDispatcher`](crate::ViewDispatcher) and then
/// called for every matching request. Cloning is cheap, clones share the
/// underlying view.
#[derive(Clone)]
pub struct CallableView {
    name: Arc<str>,
    shape: Shape,
    allowed: Arc<[Method]>,
    handler: Arc<dyn Handler>,
}

impl CallableView {
    pub(crate) fn new(
        name: impl Into<Arc<str>>,
        shape: Shape,
        allowed: Vec<Method>,
        handler: impl Handler,
    ) -> Self {
        CallableView {
            name: name.into(),
            shape,
            allowed: allowed.into(),
            handler: Arc::new(handler),
        }
    }

    /// The name of the adapted view.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shape the view was classified as.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The methods this view responds to without rejecting.
    ///
    /// For function views this is the list they were registered with. For
    /// class views it is every method they declare a handler for, which is
    /// every recognized method if they declare a catch-all.
    pub fn allowed_methods(&self) -> &[Method] {
        &self.allowed
    }

    /// Handle a request.
    pub async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        self.handler.call(req, res, params).await
    }
}

#[async_trait::async_trait]
impl Handler for CallableView {
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        self.handler.call(req, res, params).await
    }
}

impl Named for CallableView {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CallableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableView")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("allowed", &self.allowed)
            .finish()
    }
}
