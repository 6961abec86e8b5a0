//! The shapes a view can take, and how values are classified into them.

mod class;

pub use class::{
    declared_method_views, BoundMethod, ClassBasedView, ClassInstance, DeclaredMethods,
    MethodHandler, MethodTable,
};

use crate::handler::{AsyncCall, AsyncFn, AsyncViewFn, SyncCall, SyncFn, SyncViewFn};
use crate::reject::IntoRejection;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// The shape of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A plain function, lifted onto a worker before being called.
    SyncFunction,
    /// An async function.
    AsyncFunction,
    /// An instance of a [`ClassBasedView`], dispatching on the request method.
    ClassInstance,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::SyncFunction => "sync function",
            Shape::AsyncFunction => "async function",
            Shape::ClassInstance => "class instance",
        })
    }
}

/// A view, classified by its shape.
///
/// Views are usually created through [`IntoView`], which picks the shape
/// from the type of the value.
pub enum View {
    SyncFunction(SyncFunction),
    AsyncFunction(AsyncFunction),
    ClassInstance(ClassInstance),
}

/// A synchronous function view.
pub struct SyncFunction {
    pub(crate) name: Cow<'static, str>,
    pub(crate) f: Arc<dyn SyncCall>,
}

/// An asynchronous function view.
pub struct AsyncFunction {
    pub(crate) name: Cow<'static, str>,
    pub(crate) f: Arc<dyn AsyncCall>,
}

impl View {
    /// Classify an async function.
    pub fn from_async<F, E>(f: F) -> View
    where
        F: for<'a> AsyncViewFn<'a, Error = E>,
        E: IntoRejection,
    {
        View::AsyncFunction(AsyncFunction {
            name: Cow::Borrowed(type_name::<F>()),
            f: Arc::new(AsyncFn::new(f)),
        })
    }

    /// Classify a sync function.
    pub fn from_sync<F, E>(f: F) -> View
    where
        F: for<'a> SyncViewFn<'a, Error = E>,
        E: IntoRejection,
    {
        View::SyncFunction(SyncFunction {
            name: Cow::Borrowed(type_name::<F>()),
            f: Arc::new(SyncFn::new(f)),
        })
    }

    /// Classify an instance of a class view.
    pub fn from_class<V>(view: V) -> View
    where
        V: ClassBasedView,
    {
        View::ClassInstance(ClassInstance::new(view))
    }

    /// Override the name this view is known by.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> View {
        let name = name.into();
        match &mut self {
            View::SyncFunction(v) => v.name = name,
            View::AsyncFunction(v) => v.name = name,
            View::ClassInstance(v) => v.name = name,
        }
        self
    }

    pub fn shape(&self) -> Shape {
        match self {
            View::SyncFunction(_) => Shape::SyncFunction,
            View::AsyncFunction(_) => Shape::AsyncFunction,
            View::ClassInstance(_) => Shape::ClassInstance,
        }
    }

    /// The declared name of the function, or the type name of the instance.
    pub fn name(&self) -> &str {
        match self {
            View::SyncFunction(v) => &v.name,
            View::AsyncFunction(v) => &v.name,
            View::ClassInstance(v) => &v.name,
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name())
            .field("shape", &self.shape())
            .finish()
    }
}

/// Marker types used to select an [`IntoView`] implementation.
pub mod marker {
    pub struct Sync;
    pub struct Async;
    pub struct Class;
}

/// A value that can be classified into a [`View`].
///
/// The marker parameter lets the compiler pick the one implementation
/// that applies, so sync functions, async functions, and class views can
/// all be passed to the same registration call.
pub trait IntoView<M> {
    fn into_view(self) -> View;
}

impl IntoView<()> for View {
    fn into_view(self) -> View {
        self
    }
}

impl IntoView<()> for ClassInstance {
    fn into_view(self) -> View {
        View::ClassInstance(self)
    }
}

impl<F, E> IntoView<(marker::Async, E)> for F
where
    F: for<'a> AsyncViewFn<'a, Error = E>,
    E: IntoRejection,
{
    fn into_view(self) -> View {
        View::from_async(self)
    }
}

impl<F, E> IntoView<(marker::Sync, E)> for F
where
    F: for<'a> SyncViewFn<'a, Error = E>,
    E: IntoRejection,
{
    fn into_view(self) -> View {
        View::from_sync(self)
    }
}

impl<V> IntoView<marker::Class> for V
where
    V: ClassBasedView,
{
    fn into_view(self) -> View {
        View::from_class(self)
    }
}

/// A value with a name, for diagnostics.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for View {
    fn name(&self) -> &str {
        View::name(self)
    }
}

impl Named for str {
    fn name(&self) -> &str {
        self
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        T::name(self)
    }
}

/// The name of a view for logs and diagnostics, prefixed with the name of
/// `base` if given.
///
/// ```
/// # use tapas::{view_name, View};
/// # use tapas::http::{Params, Request, Response};
/// # use tapas::HttpError;
/// fn index(_: &Request, _: &mut Response, _: &Params) -> Result<(), HttpError> {
///     Ok(())
/// }
///
/// let view = View::from_sync(index);
/// assert_eq!(view_name(&view, None), "index");
/// assert_eq!(view_name(&view, Some(&"Pages")), "Pages.index");
/// ```
pub fn view_name(view: &dyn Named, base: Option<&dyn Named>) -> String {
    match base {
        Some(base) => format!("{}.{}", base.name(), view.name()),
        None => view.name().to_owned(),
    }
}

/// The unqualified name of `T`: `crate::views::index` becomes `index`.
pub(crate) fn type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = match full.find('<') {
        Some(generics) => &full[..generics],
        None => full,
    };

    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting;

    mod nested {
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn short_type_names() {
        assert_eq!(type_name::<Greeting>(), "Greeting");
        assert_eq!(type_name::<nested::Wrapper<Greeting>>(), "Wrapper");
        assert_eq!(type_name::<u32>(), "u32");
    }

    #[test]
    fn names_join_with_base() {
        assert_eq!(view_name(&"index", None), "index");
        assert_eq!(view_name(&"index", Some(&"Foo")), "Foo.index");
        assert_eq!(view_name(&String::from("Bar"), Some(&"Foo")), "Foo.Bar");
    }
}
