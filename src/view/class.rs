use crate::handler::{AsyncMethodFn, BoundAsync, BoundSync, Callable, SyncMethodFn};
use crate::http::{method_key, Method, Params, Request, Response, ALL_METHODS};
use crate::offload::Offload;
use crate::reject::{IntoRejection, Rejection};
use crate::view::{marker, Named};

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A view that handles requests through methods named after HTTP methods.
///
/// Implementors declare which handlers they provide, anything not declared
/// is answered with `405 Method Not Allowed`. Handlers are ordinary methods,
/// sync or async:
///
/// ```
/// use tapas::http::{Params, Request, Response};
/// use tapas::{ClassBasedView, HttpError, MethodTable};
///
/// struct Greeting;
///
/// impl Greeting {
///     async fn get(&self, _: &Request, res: &mut Response, _: &Params) -> Result<(), HttpError> {
///         res.body = "hello".into();
///         Ok(())
///     }
///
///     fn delete(&self, _: &Request, _: &mut Response, _: &Params) -> Result<(), HttpError> {
///         Ok(())
///     }
/// }
///
/// impl ClassBasedView for Greeting {
///     fn declare(methods: &mut MethodTable<Self>) {
///         methods.get(Self::get).delete(Self::delete);
///     }
/// }
/// ```
///
/// A view that declares a catch-all with [`MethodTable::handle`] receives
/// every request, whatever its method, and its per-method handlers are
/// never called.
pub trait ClassBasedView: Send + Sync + Sized + 'static {
    /// Declare the handlers of this view.
    fn declare(methods: &mut MethodTable<Self>);
}

trait Bind<V>: Send + Sync {
    fn bind(self: Box<Self>, view: &Arc<V>) -> Callable;
}

struct AsyncMethod<F, E>(F, PhantomData<fn() -> E>);

impl<V, F, E> Bind<V> for AsyncMethod<F, E>
where
    V: Send + Sync + 'static,
    F: for<'a> AsyncMethodFn<'a, V, Error = E>,
    E: IntoRejection,
{
    fn bind(self: Box<Self>, view: &Arc<V>) -> Callable {
        Callable::Async(Arc::new(BoundAsync::new(view.clone(), self.0)))
    }
}

struct SyncMethod<F, E>(F, PhantomData<fn() -> E>);

impl<V, F, E> Bind<V> for SyncMethod<F, E>
where
    V: Send + Sync + 'static,
    F: for<'a> SyncMethodFn<'a, V, Error = E>,
    E: IntoRejection,
{
    fn bind(self: Box<Self>, view: &Arc<V>) -> Callable {
        Callable::Sync(Arc::new(BoundSync::new(view.clone(), self.0)))
    }
}

/// A method of `V` that can be declared as a handler.
///
/// Implemented for sync and async methods with the signature
/// `(&V, &Request, &mut Response, &Params) -> Result<(), E>`.
pub trait MethodHandler<V, M>: Send + Sync + 'static {
    #[doc(hidden)]
    fn into_bind(self) -> BindMethod<V>;
}

#[doc(hidden)]
pub struct BindMethod<V>(Box<dyn Bind<V>>);

impl<V, F, E> MethodHandler<V, (marker::Async, E)> for F
where
    V: Send + Sync + 'static,
    F: for<'a> AsyncMethodFn<'a, V, Error = E>,
    E: IntoRejection,
{
    fn into_bind(self) -> BindMethod<V> {
        BindMethod(Box::new(AsyncMethod(self, PhantomData)))
    }
}

impl<V, F, E> MethodHandler<V, (marker::Sync, E)> for F
where
    V: Send + Sync + 'static,
    F: for<'a> SyncMethodFn<'a, V, Error = E>,
    E: IntoRejection,
{
    fn into_bind(self) -> BindMethod<V> {
        BindMethod(Box::new(SyncMethod(self, PhantomData)))
    }
}

/// The handlers a [`ClassBasedView`] declares.
pub struct MethodTable<V> {
    handle: Option<Box<dyn Bind<V>>>,
    methods: Vec<(Method, Box<dyn Bind<V>>)>,
}

impl<V> MethodTable<V>
where
    V: Send + Sync + 'static,
{
    fn new() -> Self {
        MethodTable {
            handle: None,
            methods: Vec::with_capacity(ALL_METHODS.len()),
        }
    }

    /// Declare a catch-all handler, called for every request method.
    pub fn handle<H, M>(&mut self, handler: H) -> &mut Self
    where
        H: MethodHandler<V, M>,
    {
        self.handle = Some(handler.into_bind().0);
        self
    }

    fn insert(&mut self, method: Method, bind: Box<dyn Bind<V>>) -> &mut Self {
        match self.methods.iter_mut().find(|(m, _)| *m == method) {
            Some((_, existing)) => *existing = bind,
            None => self.methods.push((method, bind)),
        }
        self
    }

    fn take(&mut self, method: &Method) -> Option<Box<dyn Bind<V>>> {
        let index = self.methods.iter().position(|(m, _)| m == method)?;
        Some(self.methods.swap_remove(index).1)
    }
}

macro_rules! declare_method {
    ($name:ident => Method::$method:ident) => {
        #[doc = concat!("Declare the handler for `", stringify!($method), "` requests.")]
        pub fn $name<H, M>(&mut self, handler: H) -> &mut Self
        where
            H: MethodHandler<V, M>,
        {
            self.insert(Method::$method, handler.into_bind().0)
        }
    };
}

impl<V> MethodTable<V>
where
    V: Send + Sync + 'static,
{
    declare_method!(get => Method::GET);
    declare_method!(post => Method::POST);
    declare_method!(put => Method::PUT);
    declare_method!(patch => Method::PATCH);
    declare_method!(delete => Method::DELETE);
    declare_method!(head => Method::HEAD);
    declare_method!(options => Method::OPTIONS);
}

/// A class view instance, with its declared handlers bound to it.
///
/// The handler table is built once, when the instance is created.
pub struct ClassInstance {
    pub(crate) name: Cow<'static, str>,
    handle: Option<Callable>,
    methods: Vec<(Method, &'static str, Callable)>,
}

impl ClassInstance {
    /// Bind the handlers `V` declares to `view`.
    pub fn new<V>(view: V) -> Self
    where
        V: ClassBasedView,
    {
        Self::from_arc(Arc::new(view))
    }

    /// Bind the handlers `V` declares to a shared `view`.
    pub fn from_arc<V>(view: Arc<V>) -> Self
    where
        V: ClassBasedView,
    {
        let mut table = MethodTable::new();
        V::declare(&mut table);

        let handle = table.handle.take().map(|bind| bind.bind(&view));

        let mut methods = Vec::with_capacity(table.methods.len());
        for method in ALL_METHODS {
            if let (Some(bind), Some(key)) = (table.take(&method), method_key(&method)) {
                methods.push((method, key, bind.bind(&view)));
            }
        }

        ClassInstance {
            name: Cow::Borrowed(super::type_name::<V>()),
            handle,
            methods,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the view declares a catch-all handler.
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    /// The handler for a request with the given method.
    ///
    /// The catch-all wins over everything else. Otherwise the handler
    /// declared for `method`, if any.
    pub(crate) fn resolve(&self, method: &Method) -> Option<(&'static str, &Callable)> {
        if let Some(handle) = &self.handle {
            return Some(("handle", handle));
        }

        self.methods
            .iter()
            .find(|(m, _, _)| m == method)
            .map(|(_, key, callable)| (*key, callable))
    }

    /// The methods declared with a per-method handler, in canonical order.
    pub fn declared_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().map(|(method, _, _)| method)
    }
}

impl Named for ClassInstance {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<V: ClassBasedView> From<V> for ClassInstance {
    fn from(view: V) -> Self {
        ClassInstance::new(view)
    }
}

impl fmt::Debug for ClassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInstance")
            .field("name", &self.name)
            .field("handle", &self.handle.is_some())
            .field(
                "methods",
                &self.methods.iter().map(|(_, key, _)| key).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A handler of a class view, bound to its instance.
#[derive(Clone)]
pub struct BoundMethod<'a> {
    key: &'static str,
    callable: &'a Callable,
}

impl<'a> BoundMethod<'a> {
    /// The key this handler is declared under, `"handle"` or a lowercase
    /// method name.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Whether the handler is an async method.
    pub fn is_async(&self) -> bool {
        self.callable.is_async()
    }

    /// Call the handler directly, offloading it if it is synchronous.
    pub async fn call(
        &self,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        self.call_with(Offload::default(), req, res, params).await
    }

    /// Call the handler, lifting it with `offload` if it is synchronous.
    pub async fn call_with(
        &self,
        offload: Offload,
        req: &Request,
        res: &mut Response,
        params: &Params,
    ) -> Result<(), Rejection> {
        self.callable.call(offload, req, res, params).await
    }
}

impl fmt::Debug for BoundMethod<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("key", &self.key)
            .field("async", &self.is_async())
            .finish()
    }
}

/// The handlers declared by a class view.
///
/// See [`declared_method_views`].
pub struct DeclaredMethods<'a> {
    handle: Option<&'a Callable>,
    methods: std::slice::Iter<'a, (Method, &'static str, Callable)>,
}

impl<'a> Iterator for DeclaredMethods<'a> {
    type Item = (&'static str, BoundMethod<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(callable) = self.handle.take() {
            return Some(("handle", BoundMethod { key: "handle", callable }));
        }

        self.methods
            .next()
            .map(|(_, key, callable)| {
                let key = *key;
                (key, BoundMethod { key, callable })
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.methods.len() + usize::from(self.handle.is_some());
        (len, Some(len))
    }
}

impl ExactSizeIterator for DeclaredMethods<'_> {}

/// The handlers a class view declares, as `(key, handler)` pairs.
///
/// The catch-all comes first under the key `"handle"`, followed by one pair
/// per declared method in canonical order, keyed by the lowercase method
/// name. Each call starts a fresh enumeration.
pub fn declared_method_views(instance: &ClassInstance) -> DeclaredMethods<'_> {
    DeclaredMethods {
        handle: instance.handle.as_ref(),
        methods: instance.methods.iter(),
    }
}
