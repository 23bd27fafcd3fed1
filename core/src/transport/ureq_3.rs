use std::time::Duration;

use ureq::{Agent, AsSendBody};

use super::{RawResponse, Transport};
use crate::header::Header;
use crate::request::Request;

/// Largest response body the ureq transport will buffer.
///
/// Bodies past this size fail with [`UreqError::Ureq`] (`BodyExceedsLimit`).
pub const BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// A `ureq` agent that returns 4xx/5xx responses as data rather than `Err`.
pub fn agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

#[derive(Debug, thiserror::Error)]
pub enum UreqError {
    /// The request could not be expressed as an `http::Request`.
    #[error("could not build request: {0}")]
    Build(#[from] http::Error),

    #[error(transparent)]
    Ureq(#[from] ureq::Error),
}

impl Transport for Agent {
    type Error = UreqError;

    /// Runs `request` with its timeout as ureq's global per-call timeout.
    ///
    /// Status-as-error is switched off per call, so any agent can be used.
    /// The body is read whole, up to [`BODY_LIMIT`] bytes.
    fn execute(&self, request: &Request) -> Result<RawResponse, Self::Error> {
        let (parts, body) = request.http_request()?.into_parts();
        let response = match request.body {
            Some(_) => run(self, http::Request::from_parts(parts, body.as_slice()), request.timeout)?,
            None => run(self, http::Request::from_parts(parts, ()), request.timeout)?,
        };

        let (parts, mut body) = response.into_parts();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|value| Header::new(name.as_str(), value)))
            .collect();
        let charset = body.charset().map(str::to_string);
        let body = body.with_config().limit(BODY_LIMIT).read_to_vec()?;

        Ok(RawResponse {
            status: parts.status.as_u16(),
            headers,
            body,
            charset,
        })
    }
}

fn run<S: AsSendBody>(
    agent: &Agent,
    request: http::Request<S>,
    timeout: Duration,
) -> Result<http::Response<ureq::Body>, ureq::Error> {
    let request = agent
        .configure_request(request)
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build();
    agent.run(request)
}
