//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `postdesk_core::storage`.
//! Only throughput and request-rate limits count as throttling; transaction
//! conflicts are reported as failed queries.

use std::error::Error;
use std::fmt::{Debug, Display};

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use postdesk_core::storage::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    let err = match service_error(err) {
        Ok(err) => err,
        Err(transport) => return transport,
    };
    match &err {
        GetItemError::ProvisionedThroughputExceededException(_)
        | GetItemError::RequestLimitExceeded(_) => StoreError::Throttled(describe(&err, "GetItem")),
        _ => StoreError::QueryFailed(describe(&err, "GetItem")),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    let err = match service_error(err) {
        Ok(err) => err,
        Err(transport) => return transport,
    };
    match &err {
        ScanError::ProvisionedThroughputExceededException(_) | ScanError::RequestLimitExceeded(_) => {
            StoreError::Throttled(describe(&err, "Scan"))
        }
        _ => StoreError::QueryFailed(describe(&err, "Scan")),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    let err = match service_error(err) {
        Ok(err) => err,
        Err(transport) => return transport,
    };
    match &err {
        PutItemError::ProvisionedThroughputExceededException(_)
        | PutItemError::RequestLimitExceeded(_) => StoreError::Throttled(describe(&err, "PutItem")),
        _ => StoreError::QueryFailed(describe(&err, "PutItem")),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> StoreError {
    let err = match service_error(err) {
        Ok(err) => err,
        Err(transport) => return transport,
    };
    match &err {
        UpdateItemError::ProvisionedThroughputExceededException(_)
        | UpdateItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled(describe(&err, "UpdateItem"))
        }
        _ => StoreError::QueryFailed(describe(&err, "UpdateItem")),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> StoreError {
    let err = match service_error(err) {
        Ok(err) => err,
        Err(transport) => return transport,
    };
    match &err {
        DeleteItemError::ProvisionedThroughputExceededException(_)
        | DeleteItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled(describe(&err, "DeleteItem"))
        }
        _ => StoreError::QueryFailed(describe(&err, "DeleteItem")),
    }
}

/// Split a service error from transport-level failures.
///
/// Timeouts and dispatch failures never reached DynamoDB and are reported
/// as connection failures.
fn service_error<E, R>(err: SdkError<E, R>) -> Result<E, StoreError>
where
    E: Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(context) => Ok(context.into_err()),
        SdkError::TimeoutError(_) => Err(StoreError::ConnectionFailed(
            "Request to DynamoDB timed out".to_string(),
        )),
        SdkError::DispatchFailure(failure) => Err(StoreError::ConnectionFailed(format!(
            "Dispatch failure: {:?}",
            failure
        ))),
        other => Err(StoreError::QueryFailed(
            DisplayErrorContext(&other).to_string(),
        )),
    }
}

/// Describe a service error using its code and message.
fn describe<E: ProvideErrorMetadata + Display>(err: &E, operation: &str) -> String {
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{operation} failed: {code}: {message}"),
        _ => format!("{operation} failed: {err}"),
    }
}
