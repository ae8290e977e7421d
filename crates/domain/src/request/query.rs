//! Query string parameter types

use serde::{Deserialize, Serialize};

/// A single query string parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter name
    pub name: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of query parameters.
///
/// Unlike [`Headers`](crate::request::Headers), repeated names are kept:
/// `add("tag", "a")` followed by `add("tag", "b")` produces `?tag=a&tag=b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a parameter, keeping any existing entries with the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.items.push(QueryParam::new(name, value));
    }

    /// Returns the first value for a parameter name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Returns an iterator over all parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryParam> {
        self.items.iter()
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
