use thiserror::Error;

/// Error type returned by service layer functions.
///
/// Client mistakes and store failures are kept apart so that the transport
/// layer can answer 400 for the former and 503 for the latter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Month/year/page bounds are malformed.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// A date string could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// A parameter required by the selected mode is absent.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
    /// Request data violates a value constraint.
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    /// Request parameters failed form validation.
    #[error("{0}")]
    Form(String),
    /// The requested entity does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// The record store could not serve the request.
    #[error("record store unavailable")]
    StoreUnavailable,
    /// Stored data violates an invariant.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
