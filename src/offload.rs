//! Running synchronous views without stalling the async scheduler.

use crate::http::{Params, Request, Response, StatusCode};
use crate::reject::{HttpError, Rejection};

use std::mem;

/// How synchronous views are lifted onto the async execution model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Offload {
    /// Run the view on tokio's blocking thread pool and await it.
    ///
    /// Must be used from within a tokio runtime.
    #[default]
    Blocking,
    /// Run the view directly on the calling task.
    ///
    /// A slow view stalls every other task on the same thread,
    /// only use this when that is acceptable.
    Inline,
}

impl Offload {
    /// Run `f` with the given request, response and parameters, and wait
    /// for it to complete.
    ///
    /// With [`Offload::Blocking`] the worker gets its own copy of the
    /// request and parameters, and the response is moved over and back,
    /// so whatever the view wrote is visible afterwards even if it failed.
    /// A panic in `f` is resumed on the awaiting task.
    pub async fn run<F>(
        self,
        req: &Request,
        res: &mut Response,
        params: &Params,
        f: F,
    ) -> Result<(), Rejection>
    where
        F: FnOnce(&Request, &mut Response, &Params) -> Result<(), Rejection> + Send + 'static,
    {
        match self {
            Offload::Inline => f(req, res, params),
            Offload::Blocking => {
                let req = req.clone();
                let params = params.clone();
                let mut out = mem::take(res);

                let worker = tokio::task::spawn_blocking(move || {
                    let result = f(&req, &mut out, &params);
                    (out, result)
                });

                match worker.await {
                    Ok((out, result)) => {
                        *res = out;
                        result
                    }
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(err) => {
                        tracing::debug!(error = %err, "offloaded view was cancelled");
                        Err(HttpError::new(StatusCode::SERVICE_UNAVAILABLE)
                            .detail("view was cancelled")
                            .into())
                    }
                }
            }
        }
    }
}
