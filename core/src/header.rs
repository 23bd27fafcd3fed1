//! HTTP header name/value pairs and case-insensitive lookup.
//!
//! # Design
//! Headers are kept as an ordered `Vec<Header>` rather than a map: duplicates
//! are legal on the wire and their order is preserved end to end. Lookup by
//! name is case-insensitive and "first wins"; equality of two headers is
//! exact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::media_type::MediaType;

/// A single HTTP header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawHeader")]
pub struct Header {
    name: String,
    value: String,
}

/// Wire shape of a [`Header`]; deserialization goes through [`Header::new`].
#[derive(Deserialize)]
struct RawHeader {
    name: String,
    value: String,
}

impl From<RawHeader> for Header {
    fn from(raw: RawHeader) -> Self {
        Header::new(raw.name, raw.value)
    }
}

impl Header {
    /// Create a header. Surrounding whitespace is trimmed from both parts.
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            value: value.as_ref().trim().to_string(),
        }
    }

    /// Parse a `Name: Value` line.
    ///
    /// Splits once on the first `:`. Returns `None` when there is no colon or
    /// when either side is empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, value) = raw.split_once(':')?;
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self::new(name, value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The `Name: Value` wire form.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }

    /// Informs the server about the types of data that can be sent back.
    pub fn accept(media_type: MediaType) -> Self {
        Self::new("Accept", media_type.as_str())
    }

    /// Credentials to authenticate a user agent with a server.
    pub fn authorization(value: impl AsRef<str>) -> Self {
        Self::new("Authorization", value)
    }

    /// Size of the body in bytes.
    pub fn content_length(length: usize) -> Self {
        Self::new("Content-Length", length.to_string())
    }

    /// Media type of the body.
    pub fn content_type(media_type: MediaType) -> Self {
        Self::new("Content-Type", media_type.as_str())
    }

    pub fn user_agent(agent: impl AsRef<str>) -> Self {
        Self::new("User-Agent", agent)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Returned by [`Header::from_str`] for lines that are not `Name: Value`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid header line: {0:?}")]
pub struct InvalidHeader(pub String);

impl FromStr for Header {
    type Err = InvalidHeader;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidHeader(s.to_string()))
    }
}

/// Case-insensitive lookup over an ordered header collection.
pub trait HeaderList {
    /// First header whose name matches `name`, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&Header>;

    /// Every header whose name matches `name`, in order.
    fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> + 'a;
}

impl HeaderList for [Header] {
    fn header(&self, name: &str) -> Option<&Header> {
        self.iter().find(|h| h.name.eq_ignore_ascii_case(name))
    }

    fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> + 'a {
        self.iter().filter(move |h| h.name.eq_ignore_ascii_case(name))
    }
}
