//! Incoming HTTP responses and body conversion.
//!
//! # Design
//! A `Response` is built once by the client and never changes. It carries a
//! copy of the request that produced it (after middleware ran) so validators
//! can correlate the two without any shared state.

use std::fmt;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{DecodeError, Error, Result};
use crate::header::Header;
use crate::request::Request;
use crate::status::StatusCode;

/// Character set used to turn the body into text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    /// ISO-8859-1.
    Latin1,
    /// A label this crate cannot decode; kept for diagnostics.
    Other(String),
}

impl TextEncoding {
    /// Map an IANA charset label, ignoring case and surrounding quotes.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().trim_matches('"');
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => TextEncoding::Utf8,
            "us-ascii" | "ascii" => TextEncoding::Ascii,
            "iso-8859-1" | "iso_8859-1" | "latin1" | "l1" => TextEncoding::Latin1,
            _ => TextEncoding::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Ascii => "us-ascii",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Other(label) => label,
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        let invalid = || DecodeError::Text {
            encoding: self.label().to_string(),
        };
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| invalid()),
            TextEncoding::Ascii if bytes.is_ascii() => Ok(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Ascii => Err(invalid()),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Other(label) => Err(DecodeError::UnsupportedEncoding(label.clone())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Converts a response body into a structured value.
pub trait BodyDecoder {
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, DecodeError>;
}

/// The default decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    id: Uuid,
    original_request: Request,
    status: StatusCode,
    headers: Vec<Header>,
    body: Vec<u8>,
    text_encoding: TextEncoding,
}

impl Response {
    /// A response with no headers, an empty body and UTF-8 text encoding.
    pub fn new(original_request: Request, status: StatusCode) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_request,
            status,
            headers: Vec::new(),
            body: Vec::new(),
            text_encoding: TextEncoding::Utf8,
        }
    }

    pub fn with_headers(mut self, headers: Vec<Header>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = text_encoding;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The request as it was sent, after every before-hook ran.
    pub fn original_request(&self) -> &Request {
        &self.original_request
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn text_encoding(&self) -> &TextEncoding {
        &self.text_encoding
    }

    /// Decode the body as JSON.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        self.decode_with(&JsonDecoder)
    }

    pub fn decode_with<T, D>(&self, decoder: &D) -> Result<T, DecodeError>
    where
        T: DeserializeOwned,
        D: BodyDecoder,
    {
        decoder.decode(&self.body)
    }

    /// The body as text, using the response's text encoding.
    pub fn text(&self) -> Result<String, DecodeError> {
        self.text_encoding.decode(&self.body)
    }
}

/// Explicit conversion from a finished exchange, used by [`crate::Client::fetch`].
pub trait FromResponse: Sized {
    fn from_response(response: Response) -> Result<Self>;
}

impl FromResponse for Response {
    fn from_response(response: Response) -> Result<Self> {
        Ok(response)
    }
}

impl FromResponse for Vec<u8> {
    fn from_response(response: Response) -> Result<Self> {
        Ok(response.into_body())
    }
}

impl FromResponse for String {
    fn from_response(response: Response) -> Result<Self> {
        Ok(response.text()?)
    }
}

/// A JSON body decoded into `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> FromResponse for Json<T> {
    fn from_response(response: Response) -> Result<Self> {
        response.decode().map(Json).map_err(Error::from)
    }
}
