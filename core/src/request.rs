//! Outgoing HTTP requests.
//!
//! # Design
//! `Request` is a plain value. The URL and id are fixed at construction;
//! method, headers, body and timeout stay public so middleware can rewrite
//! them before the request is sent. The client always works on its own copy,
//! so nothing a middleware does is visible to the caller.

use std::time::Duration;

use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::header::Header;
use crate::media_type::MediaType;
use crate::method::Method;

/// Timeout applied when none is set explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    id: Uuid,
    url: Url,
    pub method: Method,
    /// Ordered; duplicates allowed.
    pub headers: Vec<Header>,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

impl Request {
    /// A `GET` request for `url` with no headers, no body and the default timeout.
    pub fn new(url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            method: Method::Get,
            headers: Vec::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = Header>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Serialize `value` as the JSON body and declare `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value).map_err(Error::Encode)?;
        self.headers.push(Header::content_type(MediaType::APPLICATION_JSON));
        self.body = Some(body);
        Ok(self)
    }

    /// Build the equivalent `http::Request`. A missing body becomes an empty one.
    pub fn to_http(&self) -> Result<http::Request<Vec<u8>>> {
        self.http_request()
            .map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    pub(crate) fn http_request(&self) -> Result<http::Request<Vec<u8>>, http::Error> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str());
        for header in &self.headers {
            builder = builder.header(header.name(), header.value());
        }
        builder.body(self.body.clone().unwrap_or_default())
    }
}

/// Anything that can be turned into a [`Request`] for [`crate::Client::fetch`].
pub trait IntoRequest {
    fn into_request(self) -> Result<Request>;
}

impl IntoRequest for Request {
    fn into_request(self) -> Result<Request> {
        Ok(self)
    }
}

impl IntoRequest for &Request {
    fn into_request(self) -> Result<Request> {
        Ok(self.clone())
    }
}

/// The URI must be absolute. Unknown methods fall back to `GET`, and header
/// values that are not visible ASCII are dropped.
impl IntoRequest for http::Request<Vec<u8>> {
    fn into_request(self) -> Result<Request> {
        let (parts, body) = self.into_parts();
        let url = Url::parse(&parts.uri.to_string())?;
        let method = Method::parse(parts.method.as_str()).unwrap_or_default();
        let headers = parts.headers.iter().filter_map(|(name, value)| {
            value.to_str().ok().map(|value| Header::new(name.as_str(), value))
        });

        let mut request = Request::new(url).with_method(method).with_headers(headers);
        if !body.is_empty() {
            request.body = Some(body);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Request {
        Request::parse("http://localhost:3000/items").unwrap()
    }

    #[test]
    fn defaults() {
        let req = request();
        assert_eq!(req.method, Method::Get);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
        assert_eq!(req.timeout, Duration::from_secs(60));
        assert_eq!(req.url().as_str(), "http://localhost:3000/items");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(request().id(), request().id());
    }

    #[test]
    fn clone_keeps_id() {
        let req = request();
        assert_eq!(req.clone().id(), req.id());
    }

    #[test]
    fn parse_rejects_relative_urls() {
        let err = Request::parse("/items").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn builder_keeps_duplicate_headers_in_order() {
        let req = request()
            .with_method(Method::Post)
            .with_header(Header::new("X-Tag", "a"))
            .with_header(Header::new("X-Tag", "b"))
            .with_body("hello")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.headers, vec![Header::new("X-Tag", "a"), Header::new("X-Tag", "b")]);
        assert_eq!(req.body.as_deref(), Some(&b"hello"[..]));
        assert_eq!(req.timeout, Duration::from_secs(5));
    }

    #[test]
    fn json_sets_body_and_content_type() {
        #[derive(Serialize)]
        struct Item<'a> {
            title: &'a str,
        }

        let req = request().json(&Item { title: "Buy milk" }).unwrap();
        assert_eq!(req.headers, vec![Header::content_type(MediaType::APPLICATION_JSON)]);
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
    }

    #[test]
    fn to_http_carries_every_part() {
        let req = request()
            .with_method(Method::Put)
            .with_header(Header::accept(MediaType::APPLICATION_JSON))
            .with_body("{}");
        let converted = req.to_http().unwrap();
        assert_eq!(*converted.method(), http::Method::PUT);
        assert_eq!(converted.uri().to_string(), "http://localhost:3000/items");
        assert_eq!(converted.headers()["accept"], "application/json");
        assert_eq!(converted.body().as_slice(), b"{}");
    }

    #[test]
    fn to_http_rejects_invalid_header_names() {
        let req = request().with_header(Header::new("Bad Name", "x"));
        assert!(matches!(req.to_http(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn from_http_request() {
        let raw = http::Request::builder()
            .method("PATCH")
            .uri("https://example.com/a?b=c")
            .header("Content-Type", "text/plain")
            .body(b"patch".to_vec())
            .unwrap();
        let req = raw.into_request().unwrap();
        assert_eq!(req.method, Method::Patch);
        assert_eq!(req.url().as_str(), "https://example.com/a?b=c");
        assert_eq!(req.headers, vec![Header::new("content-type", "text/plain")]);
        assert_eq!(req.body.as_deref(), Some(&b"patch"[..]));
    }

    #[test]
    fn from_http_request_falls_back_to_get() {
        let raw = http::Request::builder()
            .method("PURGE")
            .uri("http://example.com/")
            .body(Vec::new())
            .unwrap();
        let req = raw.into_request().unwrap();
        assert_eq!(req.method, Method::Get);
        assert!(req.body.is_none());
    }

    #[test]
    fn from_http_request_needs_absolute_uri() {
        let raw = http::Request::builder().uri("/relative").body(Vec::new()).unwrap();
        assert!(matches!(raw.into_request(), Err(Error::InvalidUrl(_))));
    }
}
