//! Traits naming the function shapes a view can have.
//!
//! Async functions borrow their arguments in the future they return, which
//! can't be written as a plain `Fn` bound. Each trait here takes the borrow
//! lifetime as a parameter and is used as `for<'a> F: Trait<'a>`.

use crate::http::{Params, Request, Response};
use crate::reject::IntoRejection;

use std::future::Future;

/// An asynchronous function view.
///
/// Implemented for functions such as:
/// ```
/// # use tapas::http::{Params, Request, Response};
/// # use tapas::HttpError;
/// async fn index(req: &Request, res: &mut Response, params: &Params) -> Result<(), HttpError> {
///     Ok(())
/// }
/// ```
pub trait AsyncViewFn<'a>: Send + Sync + 'static {
    type Error: IntoRejection;
    type Future: Future<Output = Result<(), Self::Error>> + Send + 'a;

    fn call(&self, req: &'a Request, res: &'a mut Response, params: &'a Params) -> Self::Future;
}

impl<'a, F, O, E> AsyncViewFn<'a> for F
where
    F: Fn(&'a Request, &'a mut Response, &'a Params) -> O + Send + Sync + 'static,
    O: Future<Output = Result<(), E>> + Send + 'a,
    E: IntoRejection,
{
    type Error = E;
    type Future = O;

    fn call(&self, req: &'a Request, res: &'a mut Response, params: &'a Params) -> O {
        self(req, res, params)
    }
}

/// A synchronous function view.
pub trait SyncViewFn<'a>: Send + Sync + 'static {
    type Error: IntoRejection;

    fn call(
        &self,
        req: &'a Request,
        res: &'a mut Response,
        params: &'a Params,
    ) -> Result<(), Self::Error>;
}

impl<'a, F, E> SyncViewFn<'a> for F
where
    F: Fn(&'a Request, &'a mut Response, &'a Params) -> Result<(), E> + Send + Sync + 'static,
    E: IntoRejection,
{
    type Error = E;

    fn call(&self, req: &'a Request, res: &'a mut Response, params: &'a Params) -> Result<(), E> {
        self(req, res, params)
    }
}

/// An asynchronous method of a class view `V`, such as `V::get`.
pub trait AsyncMethodFn<'a, V>: Send + Sync + 'static {
    type Error: IntoRejection;
    type Future: Future<Output = Result<(), Self::Error>> + Send + 'a;

    fn call(
        &self,
        view: &'a V,
        req: &'a Request,
        res: &'a mut Response,
        params: &'a Params,
    ) -> Self::Future;
}

impl<'a, V, F, O, E> AsyncMethodFn<'a, V> for F
where
    V: 'a,
    F: Fn(&'a V, &'a Request, &'a mut Response, &'a Params) -> O + Send + Sync + 'static,
    O: Future<Output = Result<(), E>> + Send + 'a,
    E: IntoRejection,
{
    type Error = E;
    type Future = O;

    fn call(&self, view: &'a V, req: &'a Request, res: &'a mut Response, params: &'a Params) -> O {
        self(view, req, res, params)
    }
}

/// A synchronous method of a class view `V`.
pub trait SyncMethodFn<'a, V>: Send + Sync + 'static {
    type Error: IntoRejection;

    fn call(
        &self,
        view: &'a V,
        req: &'a Request,
        res: &'a mut Response,
        params: &'a Params,
    ) -> Result<(), Self::Error>;
}

impl<'a, V, F, E> SyncMethodFn<'a, V> for F
where
    V: 'a,
    F: Fn(&'a V, &'a Request, &'a mut Response, &'a Params) -> Result<(), E>
        + Send
        + Sync
        + 'static,
    E: IntoRejection,
{
    type Error = E;

    fn call(
        &self,
        view: &'a V,
        req: &'a Request,
        res: &'a mut Response,
        params: &'a Params,
    ) -> Result<(), E> {
        self(view, req, res, params)
    }
}
