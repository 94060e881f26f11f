//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here instead.

use crate::domain::query::QueryError;
use crate::domain::types::TypeConstraintError;
use crate::forms::records::RecordsQueryFormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<QueryError> for ServiceError {
    fn from(val: QueryError) -> Self {
        match val {
            QueryError::InvalidRange(message) => ServiceError::InvalidRange(message),
            QueryError::InvalidDate(value) => ServiceError::InvalidDate(value),
            QueryError::MissingParameter(name) => ServiceError::MissingParameter(name),
        }
    }
}

impl From<RecordsQueryFormError> for ServiceError {
    fn from(val: RecordsQueryFormError) -> Self {
        match val {
            RecordsQueryFormError::Missing(name) => ServiceError::MissingParameter(name),
            RecordsQueryFormError::Query(err) => err.into(),
            RecordsQueryFormError::Validation(message) => ServiceError::Form(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_keep_their_kind() {
        assert_eq!(
            ServiceError::from(QueryError::MissingParameter("year")),
            ServiceError::MissingParameter("year")
        );
        assert_eq!(
            ServiceError::from(QueryError::InvalidDate("13/45/2019".into())),
            ServiceError::InvalidDate("13/45/2019".into())
        );
    }

    #[test]
    fn form_errors_map_to_client_errors() {
        assert_eq!(
            ServiceError::from(RecordsQueryFormError::Missing("startYear")),
            ServiceError::MissingParameter("startYear")
        );
        assert!(matches!(
            ServiceError::from(RecordsQueryFormError::Query(QueryError::InvalidRange(
                "start 2020-01 is after end 2019-12".into()
            ))),
            ServiceError::InvalidRange(_)
        ));
    }

    #[test]
    fn constraint_errors_become_validation_failures() {
        let err = RepositoryError::from(TypeConstraintError::EmptyString("vessel name"));
        assert!(matches!(err, RepositoryError::ValidationError(_)));
        let err = ServiceError::from(TypeConstraintError::InvalidMonth(13));
        assert!(matches!(err, ServiceError::TypeConstraint(_)));
    }
}
