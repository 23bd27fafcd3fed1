//! Media types as used in `Accept` and `Content-Type` headers.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque media type string such as `application/json`.
///
/// Compared by its raw value; no parameter normalisation is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaType(Cow<'static, str>);

impl MediaType {
    pub const TEXT_PLAIN: MediaType = MediaType::from_static("text/plain");
    pub const APPLICATION_OCTET_STREAM: MediaType = MediaType::from_static("application/octet-stream");
    pub const APPLICATION_JSON: MediaType = MediaType::from_static("application/json");
    pub const MULTIPART_FORM_DATA: MediaType = MediaType::from_static("multipart/form-data");

    pub fn new(raw: impl Into<String>) -> Self {
        Self(Cow::Owned(raw.into()))
    }

    pub const fn from_static(raw: &'static str) -> Self {
        Self(Cow::Borrowed(raw))
    }

    /// `multipart/form-data` with a boundary parameter.
    ///
    /// A blank boundary yields the bare [`MediaType::MULTIPART_FORM_DATA`].
    pub fn multipart_form_data(boundary: &str) -> Self {
        let boundary = boundary.trim();
        if boundary.is_empty() {
            return Self::MULTIPART_FORM_DATA;
        }
        Self::new(format!("{}; boundary={boundary}", Self::MULTIPART_FORM_DATA))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary type: everything before the first `;`, trimmed.
    pub fn essence(&self) -> &str {
        essence(&self.0)
    }
}

/// Primary type of a raw media type value, e.g. `text/html` for
/// `text/html; charset=utf-8`.
pub(crate) fn essence(raw: &str) -> &str {
    raw.split(';').next().unwrap_or_default().trim()
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaType {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for MediaType {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for MediaType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_compare_with_owned_values() {
        assert_eq!(MediaType::APPLICATION_JSON, MediaType::from("application/json"));
        assert_ne!(MediaType::APPLICATION_JSON, MediaType::TEXT_PLAIN);
    }

    #[test]
    fn multipart_with_blank_boundary_is_bare() {
        assert_eq!(MediaType::multipart_form_data(""), MediaType::MULTIPART_FORM_DATA);
        assert_eq!(MediaType::multipart_form_data("   "), MediaType::MULTIPART_FORM_DATA);
    }

    #[test]
    fn multipart_with_boundary() {
        assert_eq!(
            MediaType::multipart_form_data("123").as_str(),
            "multipart/form-data; boundary=123"
        );
        assert_eq!(
            MediaType::multipart_form_data(" abc ").as_str(),
            "multipart/form-data; boundary=abc"
        );
    }

    #[test]
    fn essence_strips_parameters() {
        assert_eq!(MediaType::new("text/html; charset=utf-8").essence(), "text/html");
        assert_eq!(MediaType::APPLICATION_JSON.essence(), "application/json");
        assert_eq!(essence("; charset=utf-8"), "");
    }
}
