//! The boundary to the network.
//!
//! # Design
//! The client never touches sockets. It hands a fully built [`Request`] to a
//! [`Transport`] and gets back the untyped pieces of the reply. Anything that
//! can perform an HTTP round-trip can implement the trait; the crate ships an
//! implementation for `ureq::Agent`.

mod ureq_3;

use std::sync::Arc;

use crate::header::Header;
use crate::request::Request;

pub use ureq_3::{agent, UreqError, BODY_LIMIT};

/// What a transport hands back for a completed round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// In the order received.
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
    /// Charset label from the `Content-Type` header, if any.
    pub charset: Option<String>,
}

/// Performs one HTTP round-trip.
///
/// Status codes are data: a transport must return 4xx and 5xx replies as
/// `Ok` and reserve `Err` for failures to complete the exchange at all.
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(&self, request: &Request) -> Result<RawResponse, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn execute(&self, request: &Request) -> Result<RawResponse, Self::Error> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Error = T::Error;

    fn execute(&self, request: &Request) -> Result<RawResponse, Self::Error> {
        (**self).execute(request)
    }
}
