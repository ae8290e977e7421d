//! HTTP header types
//!
//! Header names are matched case-insensitively everywhere, and `set` uses
//! last-write-wins semantics: setting a name that is already present replaces
//! the earlier value instead of appending a duplicate.

use serde::{Deserialize, Serialize};

/// A single HTTP header with name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    pub name: String,
    /// The header value (e.g., "application/json")
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of HTTP headers with case-insensitive names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets a header, replacing any existing value under the same name.
    ///
    /// Name comparison is case-insensitive; the surviving entry keeps the
    /// spelling and position in the list of the latest write.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let header = Header::new(name, value);
        self.items
            .retain(|h| !h.name.eq_ignore_ascii_case(&header.name));
        self.items.push(header);
    }

    /// Returns the value for a header name, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if a header with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns an iterator over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_then_get() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "application/json");
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn get_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.set("X-Request-Id", "abc");
        assert_eq!(headers.get("x-request-id"), Some("abc"));
        assert_eq!(headers.get("X-REQUEST-ID"), Some("abc"));
        assert_eq!(headers.get("X-Missing"), None);
    }

    #[test]
    fn set_overwrites_regardless_of_case() {
        let mut headers = Headers::new();
        headers.set("Foo", "one");
        headers.set("foo", "two");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("FOO"), Some("two"));
    }

    #[test]
    fn latest_write_keeps_its_spelling() {
        let mut headers = Headers::new();
        headers.set("accept", "text/html");
        headers.set("Accept", "application/json");
        let names: Vec<_> = headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Accept"]);
    }

    #[test]
    fn collects_from_pairs() {
        let headers: Headers = vec![
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string()),
            ("a".to_string(), "3".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("A"), Some("3"));
        assert_eq!(headers.get("B"), Some("2"));
    }
}
