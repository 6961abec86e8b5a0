use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use tapas::http::{header, Method, Methods, Params, Request, Response, StatusCode};
use tapas::{
    create_callable_view, HttpError, MethodNotAllowed, Offload, Reject, Shape, View,
    ViewDispatcher,
};

async fn index(_: &Request, _: &mut Response, _: &Params) -> Result<(), HttpError> {
    Ok(())
}

async fn hello(_: &Request, res: &mut Response, params: &Params) -> Result<(), HttpError> {
    let name = params.get("name").unwrap_or("world");
    res.body = format!("Hello, {}!", name).into();
    Ok(())
}

fn hello_sync(_: &Request, res: &mut Response, params: &Params) -> Result<(), HttpError> {
    let name = params.get("name").unwrap_or("world");
    res.body = format!("Hello, {}!", name).into();
    Ok(())
}

#[tokio::test]
async fn async_view_allows_listed_methods() {
    let view = create_callable_view(index, Methods::only(Method::GET));
    assert_eq!(view.shape(), Shape::AsyncFunction);

    let mut res = Response::new();
    view.call(&Request::get("/"), &mut res, &Params::new())
        .await
        .unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_empty());

    let err = view
        .call(&Request::post("/"), &mut res, &Params::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(err.is::<MethodNotAllowed>());
}

#[tokio::test]
async fn sync_view_matches_direct_call() {
    let params = [("name", "ferris")].into_iter().collect::<Params>();
    let req = Request::get("/hello/ferris");

    let mut direct = Response::new();
    hello_sync(&req, &mut direct, &params).unwrap();

    for offload in [Offload::Blocking, Offload::Inline] {
        let view = ViewDispatcher::new()
            .offload(offload)
            .create_callable_view(hello_sync, Methods::only(Method::GET));
        assert_eq!(view.shape(), Shape::SyncFunction);

        let mut res = Response::new();
        view.call(&req, &mut res, &params).await.unwrap();
        assert_eq!(res.status, direct.status);
        assert_eq!(res.body, direct.body);
    }
}

#[tokio::test]
async fn async_view_receives_params() {
    let view = create_callable_view(hello, Methods::default());
    let params = [("name", "tapas")].into_iter().collect::<Params>();

    let mut res = Response::new();
    view.call(&Request::get("/hello/tapas"), &mut res, &params)
        .await
        .unwrap();
    assert_eq!(res.body, "Hello, tapas!");
}

static CALLS: AtomicUsize = AtomicUsize::new(0);

fn counted(_: &Request, res: &mut Response, _: &Params) -> Result<(), HttpError> {
    CALLS.fetch_add(1, Ordering::SeqCst);
    res.status = StatusCode::CREATED;
    res.body = "created".into();
    Ok(())
}

#[tokio::test]
async fn disallowed_method_never_reaches_view() {
    let view = create_callable_view(counted, "POST, PUT".parse().unwrap());

    for method in [Method::GET, Method::DELETE, Method::PATCH] {
        let mut res = Response::new();
        let err = view
            .call(&Request::new(method, "/".parse().unwrap()), &mut res, &Params::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.is_empty());
    }
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);

    let mut res = Response::new();
    view.call(&Request::post("/"), &mut res, &Params::new())
        .await
        .unwrap();
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn method_not_allowed_lists_allowed_methods() {
    let view = create_callable_view(index, "GET, POST".parse().unwrap());
    assert_eq!(view.allowed_methods(), [Method::GET, Method::POST]);

    let mut res = Response::new();
    let err = view
        .call(&Request::new(Method::DELETE, "/".parse().unwrap()), &mut res, &Params::new())
        .await
        .unwrap_err();

    let rejected = err.reject();
    assert_eq!(rejected.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(rejected.header_str(&header::ALLOW), Some("GET, POST"));
}

#[derive(Debug, PartialEq)]
struct Teapot {
    brewing: &'static str,
}

impl fmt::Display for Teapot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refusing to brew {}", self.brewing)
    }
}

impl Reject for Teapot {
    fn reject(self) -> Response {
        Response::from(StatusCode::IM_A_TEAPOT)
    }

    fn status(&self) -> StatusCode {
        StatusCode::IM_A_TEAPOT
    }
}

async fn brew(_: &Request, res: &mut Response, _: &Params) -> Result<(), Teapot> {
    res.body = "half".into();
    Err(Teapot { brewing: "coffee" })
}

fn brew_sync(_: &Request, res: &mut Response, _: &Params) -> Result<(), Teapot> {
    res.body = "half".into();
    Err(Teapot { brewing: "coffee" })
}

#[tokio::test]
async fn view_errors_propagate_unchanged() {
    for view in [
        create_callable_view(brew, Methods::default()),
        create_callable_view(brew_sync, Methods::default()),
    ] {
        let mut res = Response::new();
        let err = view
            .call(&Request::get("/"), &mut res, &Params::new())
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<Teapot>(),
            Some(&Teapot { brewing: "coffee" })
        );
        assert_eq!(err.to_string(), "refusing to brew coffee");
        // whatever the view wrote before failing is kept
        assert_eq!(res.body, "half");
    }
}

static THREADS: Mutex<Vec<ThreadId>> = Mutex::new(Vec::new());

fn record_thread(_: &Request, _: &mut Response, _: &Params) -> Result<(), HttpError> {
    THREADS.lock().unwrap().push(thread::current().id());
    Ok(())
}

#[tokio::test]
async fn blocking_offload_runs_on_another_thread() {
    let caller = thread::current().id();

    let view = ViewDispatcher::new()
        .offload(Offload::Blocking)
        .create_callable_view(record_thread, Methods::default());
    view.call(&Request::get("/"), &mut Response::new(), &Params::new())
        .await
        .unwrap();

    let view = ViewDispatcher::new()
        .offload(Offload::Inline)
        .create_callable_view(record_thread, Methods::default());
    view.call(&Request::get("/"), &mut Response::new(), &Params::new())
        .await
        .unwrap();

    let threads = THREADS.lock().unwrap();
    assert_eq!(threads.len(), 2);
    assert_ne!(threads[0], caller);
    assert_eq!(threads[1], caller);
}

#[tokio::test]
async fn explicit_views_and_names() {
    let view = View::from_async(hello).named("greet");
    assert_eq!(view.shape(), Shape::AsyncFunction);

    let view = create_callable_view(view, Methods::default());
    assert_eq!(view.name(), "greet");

    let view = create_callable_view(View::from_sync(hello_sync), Methods::default());
    assert_eq!(view.name(), "hello_sync");
    assert_eq!(view.shape(), Shape::SyncFunction);
}

#[tokio::test]
async fn handlers_are_shared_across_tasks() {
    let view = create_callable_view(hello_sync, Methods::default());

    let tasks = (0..8)
        .map(|i| {
            let view = view.clone();
            tokio::spawn(async move {
                let params = [("name", i.to_string())].into_iter().collect::<Params>();
                let mut res = Response::new();
                view.call(&Request::get("/"), &mut res, &params).await.unwrap();
                res.body
            })
        })
        .collect::<Vec<_>>();

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), format!("Hello, {}!", i));
    }
}
