//! Typed HTTP exchanges with a middleware pipeline.
//!
//! # Overview
//! Describes requests and responses as plain values (method, status, headers,
//! media types) and runs each exchange through an ordered list of
//! [`Middleware`] around a single call to a pluggable [`Transport`]. Socket
//! I/O, TLS, redirects and connection reuse belong to the transport; the
//! default one is a `ureq` agent.
//!
//! # Design
//! - `Client::send` runs before-hooks, the transport call, then after-hooks,
//!   all in registration order. The first failure ends the exchange.
//! - Middleware rewrites a client-local copy of the request; the caller's
//!   value is never touched.
//! - Nothing is retried or cached here. Callers own any retry policy.
//!
//! ```no_run
//! use relay_core::{AcceptHeaderValidation, Client, Header, Json, MediaType, Request, StatusCodeValidation};
//!
//! # fn main() -> relay_core::Result<()> {
//! let client = Client::ureq()
//!     .with_middleware(StatusCodeValidation::success_only())
//!     .with_middleware(AcceptHeaderValidation);
//!
//! let request = Request::parse("http://localhost:3000/echo")?
//!     .with_header(Header::accept(MediaType::APPLICATION_JSON));
//! let Json(body): Json<serde_json::Value> = client.fetch(request)?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod header;
pub mod media_type;
pub mod method;
pub mod middleware;
pub mod request;
pub mod response;
pub mod status;
pub mod transport;

pub use client::Client;
pub use error::{BoxError, DecodeError, Error, Result, ValidationError};
pub use header::{Header, HeaderList, InvalidHeader};
pub use media_type::MediaType;
pub use method::{Method, UnknownMethod};
pub use middleware::{AcceptHeaderValidation, Middleware, StatusCodeValidation};
pub use request::{IntoRequest, Request, DEFAULT_TIMEOUT};
pub use response::{BodyDecoder, FromResponse, Json, JsonDecoder, Response, TextEncoding};
pub use status::StatusCode;
pub use transport::{agent, RawResponse, Transport, UreqError, BODY_LIMIT};
