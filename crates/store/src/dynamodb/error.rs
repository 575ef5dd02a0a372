//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `authsession_core::storage`.
//! Not-found is handled by the callers and never reaches this module.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use authsession_core::storage::RepositoryError;

/// Coarse classification of a DynamoDB service error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Authorization,
    Throttled,
    TableMissing,
    Validation,
    Internal,
    Other,
}

/// Pure function: classify a service error code.
pub fn classify_error_code(code: Option<&str>) -> ErrorClass {
    match code {
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "MissingAuthenticationTokenException"
            | "IncompleteSignature"
            | "ExpiredTokenException",
        ) => ErrorClass::Authorization,
        Some(
            "ProvisionedThroughputExceededException"
            | "RequestLimitExceeded"
            | "ThrottlingException"
            | "LimitExceededException",
        ) => ErrorClass::Throttled,
        Some("ResourceNotFoundException") => ErrorClass::TableMissing,
        Some("ValidationException") => ErrorClass::Validation,
        Some("InternalServerError" | "ServiceUnavailable") => ErrorClass::Internal,
        _ => ErrorClass::Other,
    }
}

/// Map a GetItem/PutItem/DeleteItem SDK error to RepositoryError.
pub fn map_operation_error<E, R>(err: SdkError<E, R>, operation: &'static str) -> RepositoryError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    map_sdk_error(err, operation, RepositoryError::QueryFailed)
}

/// Map a DescribeTable/CreateTable/DeleteTable SDK error to RepositoryError.
pub fn map_provisioning_error<E, R>(
    err: SdkError<E, R>,
    operation: &'static str,
) -> RepositoryError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    map_sdk_error(err, operation, RepositoryError::Provisioning)
}

fn map_sdk_error<E, R>(
    err: SdkError<E, R>,
    operation: &'static str,
    other: fn(String) -> RepositoryError,
) -> RepositoryError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    if matches!(
        err,
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_)
    ) {
        return RepositoryError::ConnectionFailed(format!(
            "{} failed: {}",
            operation,
            DisplayErrorContext(&err)
        ));
    }

    let code = err.as_service_error().and_then(|e| e.code());
    let message = err
        .as_service_error()
        .and_then(|e| e.message())
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    match classify_error_code(code) {
        ErrorClass::Authorization => {
            RepositoryError::Unauthorized(format!("{} denied: {}", operation, message))
        }
        ErrorClass::Throttled => {
            other(format!("{}: Request limit exceeded, please retry", operation))
        }
        ErrorClass::TableMissing => other(format!("{}: Table not found", operation)),
        ErrorClass::Validation => RepositoryError::InvalidInput(message),
        ErrorClass::Internal => other(format!("{}: DynamoDB internal server error", operation)),
        ErrorClass::Other => other(format!("{} failed: {}", operation, message)),
    }
}
