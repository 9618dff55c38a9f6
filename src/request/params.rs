use crate::error::{Error, ErrorContext};
use crate::Result;
use std::fmt::Display;

/// One named parameter. A missing value is rendered as an empty value
/// (`name=`) but still takes part in request identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    name: String,
    value: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Display) -> Self {
        Self {
            name: name.into(),
            value: Some(value.to_string()),
        }
    }

    pub fn without_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Ordered list of request parameters.
///
/// Order is significant: two lists with the same pairs in a different order
/// are different requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Params {
    pairs: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.push(name, value);
        self
    }

    /// Append a parameter whose value may be absent.
    pub fn with_opt<V: Display>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(name, v),
            None => self.pairs.push(Param::without_value(name)),
        }
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Display) {
        self.pairs.push(Param::new(name, value));
    }

    /// Build from a flat `name, value, name, value, ...` sequence.
    ///
    /// An odd number of entries is rejected with [`Error::MalformedRequest`].
    pub fn from_flat<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flat: Vec<String> = items.into_iter().map(Into::into).collect();
        if flat.len() % 2 == 1 {
            return Err(Error::malformed_request_with_context(
                "invalid argument list: every parameter name must be followed by its value",
                ErrorContext::new()
                    .with_details(format!("got {} entries", flat.len()))
                    .with_source("params"),
            ));
        }
        let mut pairs = Vec::with_capacity(flat.len() / 2);
        let mut iter = flat.into_iter();
        while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
            pairs.push(Param {
                name,
                value: Some(value),
            });
        }
        Ok(Self { pairs })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<N: Into<String>, V: Display> FromIterator<(N, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().map(|(n, v)| Param::new(n, v)).collect(),
        }
    }
}

/// Build a [`Params`] list in call order.
///
/// ```
/// use restful_ws_client::params;
///
/// let p = params! { "str" => "dog", "maxResults" => 100 };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::request::Params::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::request::Params::new()$(.with($name, $value))+
    };
}
