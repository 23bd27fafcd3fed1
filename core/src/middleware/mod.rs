//! Request/response interceptors.
//!
//! A middleware can rewrite the outgoing request, inspect the incoming
//! response, or both. Either hook defaults to a no-op. The client runs both
//! phases in registration order; see [`crate::Client::send`].

mod accept;
mod status;

use std::fmt;

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;

pub use accept::AcceptHeaderValidation;
pub use status::StatusCodeValidation;

pub trait Middleware: Send + Sync + fmt::Debug {
    /// Runs before the request is handed to the transport. An error aborts
    /// the exchange; later middleware and the transport are skipped.
    fn before_send(&self, _request: &mut Request) -> Result<()> {
        Ok(())
    }

    /// Runs once the response is built. An error aborts the exchange and
    /// the response is dropped.
    fn after_receive(&self, _response: &Response) -> Result<()> {
        Ok(())
    }
}
