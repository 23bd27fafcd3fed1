use std::ops::RangeInclusive;

use crate::error::{Result, ValidationError};
use crate::middleware::Middleware;
use crate::response::Response;
use crate::status::StatusCode;

/// Rejects responses whose status falls outside an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodeValidation {
    allowed: RangeInclusive<StatusCode>,
}

impl StatusCodeValidation {
    pub fn new(allowed: RangeInclusive<StatusCode>) -> Self {
        Self { allowed }
    }

    pub fn between(min: impl Into<StatusCode>, max: impl Into<StatusCode>) -> Self {
        Self::new(min.into()..=max.into())
    }

    /// Accepts `200..=299` only.
    pub fn success_only() -> Self {
        Self::between(200u16, 299u16)
    }

    pub fn allowed(&self) -> &RangeInclusive<StatusCode> {
        &self.allowed
    }
}

impl Middleware for StatusCodeValidation {
    fn after_receive(&self, response: &Response) -> Result<()> {
        let status = response.status();
        if self.allowed.contains(&status) {
            return Ok(());
        }
        Err(ValidationError::BadStatusCode {
            url: response.original_request().url().clone(),
            status,
        }
        .into())
    }
}
