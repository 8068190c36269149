//! Reconstruction of typed local errors from remote error responses.
//!
//! An error response carries the remote cause chain as a flat list of
//! holders, outermost error first. Reconstruction walks that list from
//! the innermost end backward so each rebuilt error owns its cause, and
//! maps numeric codes to [`RemoteErrorKind`] through a process-wide
//! registry. Codes the registry does not know degrade to
//! [`RemoteErrorKind::Undefined`] while keeping the remote class name
//! and message, so version skew never aborts reconstruction.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::codec::error_holder::{self, ErrorHolder, StackTraceElement};
use crate::error::{GridlinkError, Result};
use crate::protocol::error_codes;
use crate::protocol::ClientMessage;

/// Locally known categories of remote errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RemoteErrorKind {
    /// Code unknown to this client version.
    Undefined,
    /// Authentication against the cluster failed.
    Authentication,
    /// The addressed member is not part of the cluster.
    CallerNotMember,
    /// The remote operation was cancelled.
    Cancellation,
    /// An illegal or unsupported argument reached the server.
    IllegalArgument,
    /// The server hit an illegal internal state.
    IllegalState,
    /// A class required by the operation is missing on the server.
    ClassNotFound,
    /// A collection was modified during iteration.
    ConcurrentModification,
    /// Client and server configuration disagree.
    ConfigMismatch,
    /// The target distributed object was destroyed.
    DistributedObjectDestroyed,
    /// Server-side I/O failure.
    Io,
    /// Generic grid failure.
    Grid,
    /// The grid instance is shutting down or not yet started.
    InstanceNotActive,
    /// The server shed load for this operation.
    Overload,
    /// Server-side serialization failure.
    Serialization,
    /// The remote operation thread was interrupted.
    Interrupted,
    /// The addressed member left the cluster mid-operation.
    MemberLeft,
    /// A requested element does not exist.
    NoSuchElement,
    /// A null reference was hit on the server.
    NullPointer,
    /// The remote operation timed out on the server side.
    OperationTimeout,
    /// The target partition is migrating between members.
    PartitionMigrating,
    /// A predicate or projection query failed.
    Query,
    /// Too few members to satisfy the split-brain protection quorum.
    SplitBrainProtection,
    /// Grid failure explicitly marked safe to retry.
    RetryableGrid,
    /// I/O failure explicitly marked safe to retry.
    RetryableIo,
    /// A ringbuffer read fell behind the retained sequence range.
    StaleSequence,
    /// The connection to the target dropped mid-operation.
    TargetDisconnected,
    /// The operation target is not a cluster member.
    TargetNotMember,
    /// A topic publisher overran its backpressure budget.
    TopicOverload,
    /// A transactional operation failed.
    Transaction,
    /// A transactional operation ran outside an active transaction.
    TransactionNotActive,
    /// The transaction exceeded its configured timeout.
    TransactionTimedOut,
    /// The server does not support the requested operation.
    UnsupportedOperation,
    /// The operation was routed to a member that does not own its data.
    WrongTarget,
    /// No data members are available to own the operation's data.
    NoDataMember,
    /// A scheduled task handle refers to a task that no longer exists.
    StaleTaskId,
}

impl RemoteErrorKind {
    /// Returns true if the server classifies this kind as safe to retry
    /// on another member without risking duplicated effects.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            RemoteErrorKind::CallerNotMember
                | RemoteErrorKind::MemberLeft
                | RemoteErrorKind::PartitionMigrating
                | RemoteErrorKind::RetryableGrid
                | RemoteErrorKind::RetryableIo
                | RemoteErrorKind::TargetNotMember
                | RemoteErrorKind::WrongTarget
        )
    }
}

fn registry() -> &'static HashMap<i32, RemoteErrorKind> {
    static REGISTRY: OnceLock<HashMap<i32, RemoteErrorKind>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        use error_codes as codes;
        use RemoteErrorKind::*;

        HashMap::from([
            (codes::AUTHENTICATION, Authentication),
            (codes::CALLER_NOT_MEMBER, CallerNotMember),
            (codes::CANCELLATION, Cancellation),
            (codes::ARRAY_INDEX_OUT_OF_BOUNDS, IllegalArgument),
            (codes::ARRAY_STORE, IllegalArgument),
            (codes::CLASS_CAST, IllegalArgument),
            (codes::CLASS_NOT_FOUND, ClassNotFound),
            (codes::CONCURRENT_MODIFICATION, ConcurrentModification),
            (codes::CONFIG_MISMATCH, ConfigMismatch),
            (codes::DISTRIBUTED_OBJECT_DESTROYED, DistributedObjectDestroyed),
            (codes::EOF, Io),
            (codes::IO, Io),
            (codes::NOT_SERIALIZABLE, Io),
            (codes::SOCKET, Io),
            (codes::GRID, Grid),
            (codes::GRID_INSTANCE_NOT_ACTIVE, InstanceNotActive),
            (codes::GRID_OVERLOAD, Overload),
            (codes::GRID_SERIALIZATION, Serialization),
            (codes::ILLEGAL_ARGUMENT, IllegalArgument),
            (codes::INVALID_ADDRESS, IllegalArgument),
            (codes::INVALID_CONFIGURATION, IllegalArgument),
            (codes::NEGATIVE_ARRAY_SIZE, IllegalArgument),
            (codes::INDEX_OUT_OF_BOUNDS, IllegalArgument),
            (codes::ILLEGAL_STATE, IllegalState),
            (codes::INTERRUPTED, Interrupted),
            (codes::MEMBER_LEFT, MemberLeft),
            (codes::NO_SUCH_ELEMENT, NoSuchElement),
            (codes::NULL_POINTER, NullPointer),
            (codes::OPERATION_TIMEOUT, OperationTimeout),
            (codes::PARTITION_MIGRATING, PartitionMigrating),
            (codes::QUERY, Query),
            (codes::QUERY_RESULT_SIZE_EXCEEDED, Query),
            (codes::SPLIT_BRAIN_PROTECTION, SplitBrainProtection),
            (codes::RETRYABLE_GRID, RetryableGrid),
            (codes::RETRYABLE_IO, RetryableIo),
            (codes::STALE_SEQUENCE, StaleSequence),
            (codes::TARGET_DISCONNECTED, TargetDisconnected),
            (codes::TARGET_NOT_MEMBER, TargetNotMember),
            (codes::TOPIC_OVERLOAD, TopicOverload),
            (codes::TRANSACTION, Transaction),
            (codes::TRANSACTION_NOT_ACTIVE, TransactionNotActive),
            (codes::TRANSACTION_TIMED_OUT, TransactionTimedOut),
            (codes::UNSUPPORTED_OPERATION, UnsupportedOperation),
            (codes::WRONG_TARGET, WrongTarget),
            (codes::NO_DATA_MEMBER, NoDataMember),
            (codes::STALE_TASK_ID, StaleTaskId),
        ])
    })
}

/// A typed local view of a remote error, with its remote cause chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Local category mapped from the numeric code.
    pub kind: RemoteErrorKind,
    /// The numeric code as received, kept even when the kind is
    /// [`RemoteErrorKind::Undefined`].
    pub error_code: i32,
    /// The remote exception's class name.
    pub class_name: String,
    /// The remote exception's message.
    pub message: Option<String>,
    /// The remote stack trace.
    pub stack_trace: Vec<StackTraceElement>,
    /// The next inner error of the remote cause chain.
    pub cause: Option<Box<RemoteError>>,
}

impl RemoteError {
    /// Returns true if retrying the operation on another member is safe.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Rebuilds the typed error chain from decoded holders, outermost error
/// first.
pub fn rebuild_error_chain(holders: &[ErrorHolder]) -> Result<RemoteError> {
    let Some((outermost, rest)) = holders.split_first() else {
        return Err(GridlinkError::Protocol(
            "error response carried no error holders".to_string(),
        ));
    };

    let cause = if rest.is_empty() {
        None
    } else {
        Some(Box::new(rebuild_error_chain(rest)?))
    };

    let kind = registry()
        .get(&outermost.error_code)
        .copied()
        .unwrap_or(RemoteErrorKind::Undefined);
    if kind == RemoteErrorKind::Undefined {
        tracing::debug!(
            error_code = outermost.error_code,
            class_name = %outermost.class_name,
            "unrecognized remote error code, surfacing as undefined"
        );
    }

    Ok(RemoteError {
        kind,
        error_code: outermost.error_code,
        class_name: outermost.class_name.clone(),
        message: outermost.message.clone(),
        stack_trace: outermost.stack_trace.clone(),
        cause,
    })
}

/// Decodes an error response message into a typed error chain.
pub fn error_from_message(message: &ClientMessage) -> Result<RemoteError> {
    let holders = error_holder::decode_errors_response(message)?;
    rebuild_error_chain(&holders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn holder(error_code: i32, class_name: &str, message: Option<&str>) -> ErrorHolder {
        ErrorHolder {
            error_code,
            class_name: class_name.to_string(),
            message: message.map(str::to_string),
            stack_trace: Vec::new(),
        }
    }

    #[test]
    fn test_single_error_reconstruction() {
        let holders = vec![holder(
            error_codes::ILLEGAL_STATE,
            "java.lang.IllegalStateException",
            Some("not started"),
        )];

        let error = rebuild_error_chain(&holders).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::IllegalState);
        assert_eq!(error.error_code, error_codes::ILLEGAL_STATE);
        assert!(error.cause.is_none());
        assert_eq!(
            error.to_string(),
            "java.lang.IllegalStateException: not started"
        );
    }

    #[test]
    fn test_cause_chain_order() {
        let holders = vec![
            holder(error_codes::EXECUTION, "ExecutionException", Some("outer")),
            holder(error_codes::ILLEGAL_STATE, "IllegalStateException", Some("middle")),
            holder(error_codes::NULL_POINTER, "NullPointerException", None),
        ];

        let error = rebuild_error_chain(&holders).unwrap();
        let middle = error.cause.as_ref().unwrap();
        let root = middle.cause.as_ref().unwrap();

        assert_eq!(middle.kind, RemoteErrorKind::IllegalState);
        assert_eq!(root.kind, RemoteErrorKind::NullPointer);
        assert!(root.cause.is_none());

        // The std error source chain mirrors the remote cause chain.
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "IllegalStateException: middle");
    }

    #[test]
    fn test_unknown_code_degrades_to_undefined() {
        let holders = vec![holder(9999, "com.example.FutureException", Some("boom"))];

        let error = rebuild_error_chain(&holders).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::Undefined);
        assert_eq!(error.error_code, 9999);
        assert_eq!(error.class_name, "com.example.FutureException");
        assert_eq!(error.message.as_deref(), Some("boom"));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_unregistered_execution_code_is_undefined_but_kept() {
        // EXECUTION has a code in the shared table but no local kind.
        let holders = vec![holder(error_codes::EXECUTION, "ExecutionException", None)];
        let error = rebuild_error_chain(&holders).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::Undefined);
        assert_eq!(error.error_code, error_codes::EXECUTION);
    }

    #[test]
    fn test_empty_holder_list_is_error() {
        assert!(rebuild_error_chain(&[]).is_err());
    }

    #[test]
    fn test_retryable_classification() {
        for code in [
            error_codes::CALLER_NOT_MEMBER,
            error_codes::MEMBER_LEFT,
            error_codes::PARTITION_MIGRATING,
            error_codes::RETRYABLE_GRID,
            error_codes::RETRYABLE_IO,
            error_codes::TARGET_NOT_MEMBER,
            error_codes::WRONG_TARGET,
        ] {
            let error = rebuild_error_chain(&[holder(code, "X", None)]).unwrap();
            assert!(error.is_retryable(), "code {code} should be retryable");
        }

        let error =
            rebuild_error_chain(&[holder(error_codes::AUTHENTICATION, "X", None)]).unwrap();
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_error_from_message_roundtrip() {
        let holders = vec![
            holder(
                error_codes::PARTITION_MIGRATING,
                "com.example.grid.PartitionMigratingException",
                Some("partition 42 moving"),
            ),
            holder(error_codes::IO, "java.io.IOException", Some("pipe broken")),
        ];
        let response = error_holder::encode_errors_response(7, &holders);

        let error = error_from_message(&response).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::PartitionMigrating);
        assert!(error.is_retryable());
        assert_eq!(error.cause.as_ref().unwrap().kind, RemoteErrorKind::Io);
    }
}
