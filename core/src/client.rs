//! The exchange pipeline.
//!
//! # Design
//! `Client` owns a transport and an ordered list of middleware. A `send`
//! runs every before-hook in registration order on a local copy of the
//! request, makes one transport call, then runs every after-hook in the same
//! order on the response. The first failure at any stage ends the call.
//!
//! Both phases use registration order; the response phase is not reversed.
//! A validator registered first therefore sees the response first.
//!
//! The middleware list can only change through `&mut self`, so it is fixed
//! for the duration of every `send`. Concurrent sends share nothing mutable.

use std::sync::Arc;

use tracing::{debug, debug_span, trace};
use ureq::Agent;

use crate::error::{Error, Result};
use crate::middleware::Middleware;
use crate::request::{IntoRequest, Request};
use crate::response::{FromResponse, Response, TextEncoding};
use crate::status::StatusCode;
use crate::transport::{self, Transport};

#[derive(Debug, Clone)]
pub struct Client<T = Agent> {
    transport: T,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Client<Agent> {
    /// A client backed by [`transport::agent`], with no middleware.
    pub fn ureq() -> Self {
        Self::new(transport::agent())
    }
}

impl Default for Client<Agent> {
    fn default() -> Self {
        Self::ureq()
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            middleware: Vec::new(),
        }
    }

    /// Append a middleware; it runs after every middleware already registered.
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.push_middleware(Arc::new(middleware));
        self
    }

    pub fn push_middleware(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Registered middleware, in the order they run.
    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one exchange.
    ///
    /// Middleware sees and may rewrite `request` before it is sent; the
    /// response's [`Response::original_request`] is the rewritten request.
    /// If an after-hook fails, the response is dropped and only the error
    /// is returned.
    pub fn send(&self, request: Request) -> Result<Response> {
        let span = debug_span!(
            "send",
            id = %request.id(),
            method = %request.method,
            url = %request.url()
        );
        let _guard = span.enter();

        let mut working = request;
        for middleware in &self.middleware {
            trace!(?middleware, "before_send");
            middleware
                .before_send(&mut working)
                .inspect_err(|e| debug!(error = %e, "request rejected by middleware"))?;
        }

        let raw = self.transport.execute(&working).map_err(|e| {
            debug!(error = %e, "transport failed");
            Error::transport(e)
        })?;

        let text_encoding = raw
            .charset
            .as_deref()
            .map(TextEncoding::from_label)
            .unwrap_or_default();
        let response = Response::new(working, StatusCode::from_u16(raw.status))
            .with_headers(raw.headers)
            .with_body(raw.body)
            .with_text_encoding(text_encoding);

        for middleware in &self.middleware {
            trace!(?middleware, "after_receive");
            middleware
                .after_receive(&response)
                .inspect_err(|e| debug!(error = %e, "response rejected by middleware"))?;
        }

        debug!(status = %response.status(), "exchange complete");
        Ok(response)
    }

    /// Send and convert the response, e.g. into `String` or [`crate::Json`].
    pub fn fetch<R: FromResponse>(&self, request: impl IntoRequest) -> Result<R> {
        R::from_response(self.send(request.into_request()?)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::header::{Header, HeaderList};
    use crate::media_type::MediaType;
    use crate::middleware::{AcceptHeaderValidation, StatusCodeValidation};
    use crate::transport::RawResponse;

    /// Replies with a canned response and remembers every request it saw.
    #[derive(Debug, Default)]
    struct Canned {
        reply: RawResponse,
        seen: Mutex<Vec<Request>>,
    }

    impl Canned {
        fn new(status: u16, headers: Vec<Header>, body: &str) -> Self {
            Self {
                reply: RawResponse {
                    status,
                    headers,
                    body: body.as_bytes().to_vec(),
                    charset: None,
                },
                seen: Mutex::default(),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl Transport for Canned {
        type Error = std::io::Error;

        fn execute(&self, request: &Request) -> Result<RawResponse, Self::Error> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    #[derive(Debug)]
    struct Down;

    impl Transport for Down {
        type Error = std::io::Error;

        fn execute(&self, _request: &Request) -> Result<RawResponse, Self::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"))
        }
    }

    #[derive(Debug)]
    struct AddHeader(&'static str, &'static str);

    impl Middleware for AddHeader {
        fn before_send(&self, request: &mut Request) -> Result<()> {
            request.headers.push(Header::new(self.0, self.1));
            Ok(())
        }
    }

    fn request() -> Request {
        Request::parse("http://localhost:3000/items").unwrap()
    }

    #[test]
    fn send_without_middleware() {
        let client = Client::new(Canned::new(200, vec![], "hello"));
        let res = client.send(request()).unwrap();
        assert_eq!(res.status(), StatusCode::Ok);
        assert_eq!(res.body(), b"hello");
        assert_eq!(client.transport().calls(), 1);
    }

    #[test]
    fn before_hooks_rewrite_a_local_copy() {
        let client = Client::new(Canned::new(200, vec![], "")).with_middleware(AddHeader("X-Trace", "1"));
        let original = request();
        let res = client.send(original.clone()).unwrap();

        assert!(original.headers.is_empty());
        assert_eq!(res.original_request().headers, vec![Header::new("X-Trace", "1")]);
        assert_eq!(res.original_request().id(), original.id());
        let seen = client.transport().seen.lock().unwrap();
        assert_eq!(seen[0].headers.header("x-trace").unwrap().value(), "1");
    }

    #[test]
    fn response_carries_transport_parts() {
        let headers = vec![Header::content_type(MediaType::APPLICATION_JSON)];
        let mut canned = Canned::new(201, headers.clone(), "{}");
        canned.reply.charset = Some("ISO-8859-1".to_string());

        let res = Client::new(canned).send(request()).unwrap();
        assert_eq!(res.status(), StatusCode::Created);
        assert_eq!(res.headers(), headers.as_slice());
        assert_eq!(res.text_encoding(), &TextEncoding::Latin1);
    }

    #[test]
    fn unknown_status_becomes_custom() {
        let res = Client::new(Canned::new(299, vec![], "")).send(request()).unwrap();
        assert!(matches!(res.status(), StatusCode::Custom(299)));
    }

    #[test]
    fn after_hook_failure_discards_response() {
        let client = Client::new(Canned::new(500, vec![], "boom"))
            .with_middleware(StatusCodeValidation::success_only());
        let err = client.send(request()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(client.transport().calls(), 1);
    }

    #[test]
    fn transport_failure_is_passed_through() {
        let client = Client::new(Down).with_middleware(StatusCodeValidation::success_only());
        let err = client.send(request()).unwrap_err();
        match err {
            Error::Transport(source) => assert_eq!(source.to_string(), "connection refused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validators_compose() {
        let canned = Canned::new(200, vec![Header::content_type(MediaType::TEXT_PLAIN)], "ok");
        let client = Client::new(canned)
            .with_middleware(StatusCodeValidation::success_only())
            .with_middleware(AcceptHeaderValidation);

        let plain = request().with_header(Header::accept(MediaType::TEXT_PLAIN));
        assert!(client.send(plain).is_ok());

        let json = request().with_header(Header::accept(MediaType::APPLICATION_JSON));
        assert!(client.send(json).is_err());
    }

    #[test]
    fn fetch_converts_the_body() {
        let client = Client::new(Canned::new(200, vec![], "hello"));
        let text: String = client.fetch(&request()).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn fetch_reports_bad_urls_before_sending() {
        let client = Client::new(Canned::new(200, vec![], ""));
        let raw = http::Request::builder().uri("/relative").body(Vec::new()).unwrap();
        let err = client.fetch::<Response>(raw).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn push_middleware_appends_in_order() {
        let mut client = Client::new(Canned::new(200, vec![], ""));
        client.push_middleware(Arc::new(AddHeader("X-Order", "first")));
        client.push_middleware(Arc::new(AddHeader("X-Order", "second")));
        assert_eq!(client.middleware().len(), 2);

        let res = client.send(request()).unwrap();
        let order: Vec<_> = res
            .original_request()
            .headers
            .headers_named("x-order")
            .map(|h| h.value().to_string())
            .collect();
        assert_eq!(order, ["first", "second"]);
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
        assert_send_sync::<Client<Canned>>();
    }
}
