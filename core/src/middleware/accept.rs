use crate::error::{Result, ValidationError};
use crate::header::HeaderList;
use crate::media_type::essence;
use crate::middleware::Middleware;
use crate::response::Response;

/// Checks that the response `Content-Type` matches what the request asked for
/// in `Accept`.
///
/// Only the primary type is compared (parameters after `;` are ignored), and
/// the comparison ignores ASCII case. A request without a usable `Accept`
/// header is never checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptHeaderValidation;

impl AcceptHeaderValidation {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for AcceptHeaderValidation {
    fn after_receive(&self, response: &Response) -> Result<()> {
        let request = response.original_request();
        let expected = match request.headers.header("Accept").map(|h| essence(h.value())) {
            Some(expected) if !expected.is_empty() => expected,
            _ => return Ok(()),
        };

        let received = response
            .headers()
            .header("Content-Type")
            .map(|h| essence(h.value()))
            .filter(|received| !received.is_empty());
        let Some(received) = received else {
            return Err(ValidationError::MissingContentType {
                url: request.url().clone(),
                expected: expected.to_string(),
            }
            .into());
        };

        if !expected.eq_ignore_ascii_case(received) {
            return Err(ValidationError::ContentTypeMismatch {
                url: request.url().clone(),
                expected: expected.to_string(),
                received: received.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
