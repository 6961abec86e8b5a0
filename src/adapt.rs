//! Adapters turning each view shape into a [`Handler`].

use crate::handler::{AsyncCall, Handler, Lifted, SyncCall};
use crate::http::{Method, Methods, Params, Request, Response, ALL_METHODS};
use crate::offload::Offload;
use crate::reject::{MethodNotAllowed, Rejection};
use crate::view::ClassInstance;

use std::sync::Arc;

use once_cell::sync::OnceCell;

/// An async function view guarded by a method allow-list.
pub(crate) struct FromAsync {
    view: Arc<dyn AsyncCall>,
    methods: Methods,
}

impl FromAsync {
    pub(crate) fn new(view: Arc<dyn AsyncCall>, methods: Methods) -> Self {
        FromAsync { view, methods }
    }

    pub(crate) fn allowed(&self) -> Vec<Method> {
        self.methods.iter().cloned().collect()
    }
}

#[async_trait::async_trait]
impl Handler for FromAsync {
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        if !self.methods.contains(&req.method) {
            tracing::debug!(method = %req.method, allow = %self.methods.allow_header(), "rejecting request");
            return Err(MethodNotAllowed::from_methods(req.method.clone(), &self.methods).into());
        }

        self.view.call(req, res, params).await
    }
}

/// A sync function view is lifted, then guarded exactly like an async one.
pub(crate) fn from_sync(view: Arc<dyn SyncCall>, methods: Methods, offload: Offload) -> FromAsync {
    FromAsync::new(Arc::new(Lifted::new(view, offload)), methods)
}

/// A class view, dispatching on the request method.
pub(crate) struct FromClass {
    instance: ClassInstance,
    offload: Offload,
    allow: OnceCell<String>,
}

impl FromClass {
    pub(crate) fn new(instance: ClassInstance, offload: Offload) -> Self {
        FromClass {
            instance,
            offload,
            allow: OnceCell::new(),
        }
    }

    pub(crate) fn allowed(&self) -> Vec<Method> {
        if self.instance.has_handle() {
            return ALL_METHODS.to_vec();
        }

        self.instance.declared_methods().cloned().collect()
    }

    fn allow(&self) -> &str {
        self.allow.get_or_init(|| {
            self.instance
                .declared_methods()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
    }
}

#[async_trait::async_trait]
impl Handler for FromClass {
    async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        let (key, callable) = match self.instance.resolve(&req.method) {
            Some(resolved) => resolved,
            None => {
                tracing::debug!(method = %req.method, view = %self.instance.name(), "no handler declared");
                return Err(MethodNotAllowed::with_allow(req.method.clone(), self.allow()).into());
            }
        };

        tracing::trace!(
            method = %req.method,
            handler = key,
            offloaded = !callable.is_async(),
            "dispatching to class view"
        );

        callable.call(self.offload, req, res, params).await
    }
}
