use super::Method;

use std::fmt::Write;
use std::str::FromStr;

/// Every HTTP method a view can be registered for, in canonical order.
///
/// This order is the order class views are inspected in, see
/// [`declared_method_views`](crate::declared_method_views).
pub const ALL_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// The lowercase key a class view declares a handler for `method` under.
///
/// Returns `None` for methods outside [`ALL_METHODS`].
pub fn method_key(method: &Method) -> Option<&'static str> {
    let key = match *method {
        Method::GET => "get",
        Method::POST => "post",
        Method::PUT => "put",
        Method::PATCH => "patch",
        Method::DELETE => "delete",
        Method::HEAD => "head",
        Method::OPTIONS => "options",
        _ => return None,
    };

    Some(key)
}

/// Whether `method` is one of [`ALL_METHODS`].
pub fn is_recognized(method: &Method) -> bool {
    method_key(method).is_some()
}

/// An error building a [`Methods`] list.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MethodsError {
    /// The list had no methods in it.
    #[error("a view must allow at least one method")]
    Empty,
    /// The list contained something that is not a recognized HTTP method.
    #[error("unrecognized HTTP method `{0}`")]
    Unrecognized(String),
}

/// The methods a function view accepts.
///
/// Never empty, and every entry is one of [`ALL_METHODS`]. Methods keep
/// the order they were given in, with duplicates removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Methods(Vec<Method>);

impl Methods {
    /// Build a method list.
    pub fn new<I>(methods: I) -> Result<Self, MethodsError>
    where
        I: IntoIterator<Item = Method>,
    {
        let mut list = Vec::with_capacity(ALL_METHODS.len());

        for method in methods {
            if !is_recognized(&method) {
                return Err(MethodsError::Unrecognized(method.as_str().to_owned()));
            }

            if !list.contains(&method) {
                list.push(method);
            }
        }

        if list.is_empty() {
            return Err(MethodsError::Empty);
        }

        Ok(Methods(list))
    }

    /// A list allowing only `method`.
    ///
    /// # Panics
    ///
    /// Panics if `method` is not one of [`ALL_METHODS`].
    pub fn only(method: Method) -> Self {
        assert!(is_recognized(&method), "unrecognized HTTP method `{}`", method);
        Methods(vec![method])
    }

    /// Whether `method` is allowed.
    pub fn contains(&self, method: &Method) -> bool {
        self.0.contains(method)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The value of an `Allow` header listing these methods.
    pub fn allow_header(&self) -> String {
        let mut allow = String::new();
        for (i, method) in self.0.iter().enumerate() {
            if i > 0 {
                allow.push_str(", ");
            }
            let _ = write!(allow, "{}", method);
        }
        allow
    }
}

impl Default for Methods {
    /// Function views accept `GET` unless told otherwise.
    fn default() -> Self {
        Methods(vec![Method::GET])
    }
}

fn parse_one(name: &str) -> Result<Method, MethodsError> {
    let upper = name.trim().to_ascii_uppercase();
    ALL_METHODS
        .iter()
        .find(|method| method.as_str() == upper)
        .cloned()
        .ok_or_else(|| MethodsError::Unrecognized(name.trim().to_owned()))
}

impl TryFrom<&[&str]> for Methods {
    type Error = MethodsError;

    fn try_from(names: &[&str]) -> Result<Self, MethodsError> {
        let methods = names
            .iter()
            .map(|name| parse_one(name))
            .collect::<Result<Vec<_>, _>>()?;
        Methods::new(methods)
    }
}

impl<const N: usize> TryFrom<[&str; N]> for Methods {
    type Error = MethodsError;

    fn try_from(names: [&str; N]) -> Result<Self, MethodsError> {
        Methods::try_from(&names[..])
    }
}

impl FromStr for Methods {
    type Err = MethodsError;

    /// Parse a comma separated list, such as `"GET, POST"`.
    fn from_str(s: &str) -> Result<Self, MethodsError> {
        let names = s
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .collect::<Vec<_>>();
        Methods::try_from(&names[..])
    }
}

impl<'a> IntoIterator for &'a Methods {
    type Item = &'a Method;
    type IntoIter = std::slice::Iter<'a, Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_canonical_order() {
        let keys = ALL_METHODS
            .iter()
            .map(|m| method_key(m).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            ["get", "post", "put", "patch", "delete", "head", "options"]
        );
        assert_eq!(method_key(&Method::TRACE), None);
    }

    #[test]
    fn parse() {
        let methods: Methods = "get, POST,get".parse().unwrap();
        assert_eq!(methods.iter().cloned().collect::<Vec<_>>(), [Method::GET, Method::POST]);
        assert_eq!(methods.allow_header(), "GET, POST");

        assert_eq!("".parse::<Methods>(), Err(MethodsError::Empty));
        assert_eq!(
            Methods::try_from(["GET", "BREW"]),
            Err(MethodsError::Unrecognized("BREW".into()))
        );
        assert_eq!(
            Methods::new([Method::CONNECT]),
            Err(MethodsError::Unrecognized("CONNECT".into()))
        );
    }
}
