use crate::handler::function::{AsyncMethodFn, AsyncViewFn, SyncMethodFn, SyncViewFn};
use crate::http::{Params, Request, Response};
use crate::offload::Offload;
use crate::reject::{IntoRejection, Rejection};

use std::marker::PhantomData;
use std::sync::Arc;

/// A type-erased asynchronous view.
#[async_trait::async_trait]
pub(crate) trait AsyncCall: Send + Sync + 'static {
    async fn call(&self, req: &Request, res: &mut Response, params: &Params)
        -> Result<(), Rejection>;
}

/// A type-erased synchronous view.
pub(crate) trait SyncCall: Send + Sync + 'static {
    fn call(&self, req: &Request, res: &mut Response, params: &Params) -> Result<(), Rejection>;
}

/// A view function, or a method bound to its class view, in either shape.
#[derive(Clone)]
pub(crate) enum Callable {
    Sync(Arc<dyn SyncCall>),
    Async(Arc<dyn AsyncCall>),
}

impl Callable {
    pub(crate) fn is_async(&self) -> bool {
        matches!(self, Callable::Async(_))
    }

    pub(crate) async fn call(
        &self,
        offload: Offload,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        match self {
            Callable::Async(f) => f.call(req, res, params).await,
            Callable::Sync(f) => Lifted::new(f.clone(), offload).call(req, res, params).await,
        }
    }
}

/// A synchronous view lifted onto the async execution model.
///
/// This is the only place synchronous views are run from.
pub(crate) struct Lifted {
    view: Arc<dyn SyncCall>,
    offload: Offload,
}

impl Lifted {
    pub(crate) fn new(view: Arc<dyn SyncCall>, offload: Offload) -> Self {
        Lifted { view, offload }
    }
}

#[async_trait::async_trait]
impl AsyncCall for Lifted {
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        let view = self.view.clone();
        self.offload
            .run(req, res, params, move |req, res, params| {
                view.call(req, res, params)
            })
            .await
    }
}

/// An async function view.
pub(crate) struct AsyncFn<F, E> {
    f: F,
    _e: PhantomData<fn() -> E>,
}

impl<F, E> AsyncFn<F, E> {
    pub(crate) fn new(f: F) -> Self {
        AsyncFn { f, _e: PhantomData }
    }
}

#[async_trait::async_trait]
impl<F, E> AsyncCall for AsyncFn<F, E>
where
    F: for<'a> AsyncViewFn<'a, Error = E>,
    E: IntoRejection,
{
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        AsyncViewFn::call(&self.f, req, res, params)
            .await
            .map_err(Rejection::new)
    }
}

/// A sync function view.
pub(crate) struct SyncFn<F, E> {
    f: F,
    _e: PhantomData<fn() -> E>,
}

impl<F, E> SyncFn<F, E> {
    pub(crate) fn new(f: F) -> Self {
        SyncFn { f, _e: PhantomData }
    }
}

impl<F, E> SyncCall for SyncFn<F, E>
where
    F: for<'a> SyncViewFn<'a, Error = E>,
    E: IntoRejection,
{
    fn call(&self, req: &Request, res: &mut Response, params: &Params) -> Result<(), Rejection> {
        SyncViewFn::call(&self.f, req, res, params).map_err(Rejection::new)
    }
}

/// An async method bound to its class view.
pub(crate) struct BoundAsync<V, F, E> {
    view: Arc<V>,
    method: F,
    _e: PhantomData<fn() -> E>,
}

impl<V, F, E> BoundAsync<V, F, E> {
    pub(crate) fn new(view: Arc<V>, method: F) -> Self {
        BoundAsync {
            view,
            method,
            _e: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<V, F, E> AsyncCall for BoundAsync<V, F, E>
where
    V: Send + Sync + 'static,
    F: for<'a> AsyncMethodFn<'a, V, Error = E>,
    E: IntoRejection,
{
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        AsyncMethodFn::call(&self.method, &*self.view, req, res, params)
            .await
            .map_err(Rejection::new)
    }
}

/// A sync method bound to its class view.
pub(crate) struct BoundSync<V, F, E> {
    view: Arc<V>,
    method: F,
    _e: PhantomData<fn() -> E>,
}

impl<V, F, E> BoundSync<V, F, E> {
    pub(crate) fn new(view: Arc<V>, method: F) -> Self {
        BoundSync {
            view,
            method,
            _e: PhantomData,
        }
    }
}

impl<V, F, E> SyncCall for BoundSync<V, F, E>
where
    V: Send + Sync + 'static,
    F: for<'a> SyncMethodFn<'a, V, Error = E>,
    E: IntoRejection,
{
    fn call(&self, req: &Request, res: &mut Response, params: &Params) -> Result<(), Rejection> {
        SyncMethodFn::call(&self.method, &*self.view, req, res, params).map_err(Rejection::new)
    }
}
