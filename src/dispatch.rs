use crate::adapt::{from_sync, FromAsync, FromClass};
use crate::handler::CallableView;
use crate::http::Methods;
use crate::offload::Offload;
use crate::view::{IntoView, View};

/// Turns views of any shape into a [`CallableView`].
///
/// ```
/// use tapas::http::{Method, Methods, Params, Request, Response};
/// use tapas::{HttpError, Offload, ViewDispatcher};
///
/// async fn index(_: &Request, res: &mut Response, _: &Params) -> Result<(), HttpError> {
///     res.body = "hello".into();
///     Ok(())
/// }
///
/// let dispatcher = ViewDispatcher::new().offload(Offload::Inline);
/// let view = dispatcher.create_callable_view(index, Methods::only(Method::GET));
/// assert_eq!(view.name(), "index");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ViewDispatcher {
    offload: Offload,
}

impl ViewDispatcher {
    /// Create a dispatcher that runs sync views on the blocking pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how sync views, and sync methods of class views, are run.
    pub fn offload(mut self, offload: Offload) -> Self {
        self.offload = offload;
        self
    }

    /// Adapt `view` into a uniform handler.
    ///
    /// Function views reject any request whose method is not in `methods`
    /// with `405 Method Not Allowed`. Class views ignore `methods`, they
    /// accept whichever methods they declare handlers for.
    pub fn create_callable_view<M>(&self, view: impl IntoView<M>, methods: Methods) -> CallableView {
        let view = view.into_view();
        let shape = view.shape();

        tracing::debug!(
            view = %view.name(),
            %shape,
            methods = %methods.allow_header(),
            "adapting view"
        );

        match view {
            View::AsyncFunction(f) => {
                let handler = FromAsync::new(f.f, methods);
                CallableView::new(f.name, shape, handler.allowed(), handler)
            }
            View::SyncFunction(f) => {
                let handler = from_sync(f.f, methods, self.offload);
                CallableView::new(f.name, shape, handler.allowed(), handler)
            }
            View::ClassInstance(instance) => {
                let name = instance.name.clone();
                let handler = FromClass::new(instance, self.offload);
                CallableView::new(name, shape, handler.allowed(), handler)
            }
        }
    }
}

/// Adapt `view` into a uniform handler with the default [`ViewDispatcher`].
pub fn create_callable_view<M>(view: impl IntoView<M>, methods: Methods) -> CallableView {
    ViewDispatcher::new().create_callable_view(view, methods)
}
