//! HTTP request body types

use serde::{Deserialize, Serialize};

/// The kind of request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBodyKind {
    /// No body
    #[default]
    None,
    /// Raw text body with an explicit content type
    Raw {
        /// The content type (e.g., "application/json", "text/plain")
        content_type: String,
    },
    /// Form URL encoded body
    FormUrlEncoded,
}

/// HTTP request body with content and type information.
///
/// For [`RequestBodyKind::FormUrlEncoded`] the content holds the already
/// encoded `key=value&key=value` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestBody {
    /// The kind of body
    pub kind: RequestBodyKind,
    /// The body content as a string
    #[serde(default)]
    pub content: String,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: RequestBodyKind::None,
            content: String::new(),
        }
    }

    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::raw(content, "application/json")
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::raw(content, "text/plain")
    }

    /// Creates a raw body with an explicit content type.
    #[must_use]
    pub fn raw(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            kind: RequestBodyKind::Raw {
                content_type: content_type.into(),
            },
            content: content.into(),
        }
    }

    /// Creates a form body from an already urlencoded payload.
    #[must_use]
    pub fn form_urlencoded(encoded: impl Into<String>) -> Self {
        Self {
            kind: RequestBodyKind::FormUrlEncoded,
            content: encoded.into(),
        }
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::is_empty is not const
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, RequestBodyKind::None) || self.content.is_empty()
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match &self.kind {
            RequestBodyKind::None => None,
            RequestBodyKind::Raw { content_type } => Some(content_type),
            RequestBodyKind::FormUrlEncoded => Some("application/x-www-form-urlencoded"),
        }
    }
}
