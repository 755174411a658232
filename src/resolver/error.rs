use serde::Serialize;
use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

#[derive(Debug, Clone, Error, Serialize)]
/// Errors of the DNS resolution step.
///
/// Must be `Send` because it is used by async functions which might run on
/// different threads.
pub enum Error {
    #[error("request timed out")]
    Timeout,
    #[error("invalid domain name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
    #[error("resolver error: {reason}")]
    ResolveError { reason: String },
}

impl From<ResolveError> for Error {
    fn from(error: ResolveError) -> Self {
        match error.kind() {
            ResolveErrorKind::Timeout => Error::Timeout,
            _ => Error::ResolveError {
                reason: error.to_string(),
            },
        }
    }
}
