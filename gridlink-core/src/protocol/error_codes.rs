//! Numeric error codes of the client protocol.
//!
//! The table is shared with the server and must match it code for code;
//! codes are appended, never renumbered.

#![allow(missing_docs)]

pub const UNDEFINED: i32 = 0;
pub const ARRAY_INDEX_OUT_OF_BOUNDS: i32 = 1;
pub const ARRAY_STORE: i32 = 2;
pub const AUTHENTICATION: i32 = 3;
pub const CACHE: i32 = 4;
pub const CACHE_LOADER: i32 = 5;
pub const CACHE_NOT_EXISTS: i32 = 6;
pub const CACHE_WRITER: i32 = 7;
pub const CALLER_NOT_MEMBER: i32 = 8;
pub const CANCELLATION: i32 = 9;
pub const CLASS_CAST: i32 = 10;
pub const CLASS_NOT_FOUND: i32 = 11;
pub const CONCURRENT_MODIFICATION: i32 = 12;
pub const CONFIG_MISMATCH: i32 = 13;
pub const DISTRIBUTED_OBJECT_DESTROYED: i32 = 14;
pub const EOF: i32 = 15;
pub const ENTRY_PROCESSOR: i32 = 16;
pub const EXECUTION: i32 = 17;
pub const GRID: i32 = 18;
pub const GRID_INSTANCE_NOT_ACTIVE: i32 = 19;
pub const GRID_OVERLOAD: i32 = 20;
pub const GRID_SERIALIZATION: i32 = 21;
pub const IO: i32 = 22;
pub const ILLEGAL_ARGUMENT: i32 = 23;
pub const ILLEGAL_ACCESS_EXCEPTION: i32 = 24;
pub const ILLEGAL_ACCESS_ERROR: i32 = 25;
pub const ILLEGAL_MONITOR_STATE: i32 = 26;
pub const ILLEGAL_STATE: i32 = 27;
pub const ILLEGAL_THREAD_STATE: i32 = 28;
pub const INDEX_OUT_OF_BOUNDS: i32 = 29;
pub const INTERRUPTED: i32 = 30;
pub const INVALID_ADDRESS: i32 = 31;
pub const INVALID_CONFIGURATION: i32 = 32;
pub const MEMBER_LEFT: i32 = 33;
pub const NEGATIVE_ARRAY_SIZE: i32 = 34;
pub const NO_SUCH_ELEMENT: i32 = 35;
pub const NOT_SERIALIZABLE: i32 = 36;
pub const NULL_POINTER: i32 = 37;
pub const OPERATION_TIMEOUT: i32 = 38;
pub const PARTITION_MIGRATING: i32 = 39;
pub const QUERY: i32 = 40;
pub const QUERY_RESULT_SIZE_EXCEEDED: i32 = 41;
pub const SPLIT_BRAIN_PROTECTION: i32 = 42;
pub const REACHED_MAX_SIZE: i32 = 43;
pub const REJECTED_EXECUTION: i32 = 44;
pub const RESPONSE_ALREADY_SENT: i32 = 45;
pub const RETRYABLE_GRID: i32 = 46;
pub const RETRYABLE_IO: i32 = 47;
pub const RUNTIME: i32 = 48;
pub const SECURITY: i32 = 49;
pub const SOCKET: i32 = 50;
pub const STALE_SEQUENCE: i32 = 51;
pub const TARGET_DISCONNECTED: i32 = 52;
pub const TARGET_NOT_MEMBER: i32 = 53;
pub const TIMEOUT: i32 = 54;
pub const TOPIC_OVERLOAD: i32 = 55;
pub const TRANSACTION: i32 = 56;
pub const TRANSACTION_NOT_ACTIVE: i32 = 57;
pub const TRANSACTION_TIMED_OUT: i32 = 58;
pub const URI_SYNTAX: i32 = 59;
pub const UTF_DATA_FORMAT: i32 = 60;
pub const UNSUPPORTED_OPERATION: i32 = 61;
pub const WRONG_TARGET: i32 = 62;
pub const XA: i32 = 63;
pub const ACCESS_CONTROL: i32 = 64;
pub const LOGIN: i32 = 65;
pub const UNSUPPORTED_CALLBACK: i32 = 66;
pub const NO_DATA_MEMBER: i32 = 67;
pub const REPLICATED_MAP_CANT_BE_CREATED: i32 = 68;
pub const MAX_MESSAGE_SIZE_EXCEEDED: i32 = 69;
pub const WAN_REPLICATION_QUEUE_FULL: i32 = 70;
pub const ASSERTION_ERROR: i32 = 71;
pub const OUT_OF_MEMORY_ERROR: i32 = 72;
pub const STACK_OVERFLOW_ERROR: i32 = 73;
pub const NATIVE_OUT_OF_MEMORY_ERROR: i32 = 74;
pub const SERVICE_NOT_FOUND: i32 = 75;
pub const STALE_TASK_ID: i32 = 76;
pub const DUPLICATE_TASK: i32 = 77;
pub const STALE_TASK: i32 = 78;
pub const LOCAL_MEMBER_RESET: i32 = 79;
pub const INDETERMINATE_OPERATION_STATE: i32 = 80;
pub const FLAKE_ID_NODE_ID_OUT_OF_RANGE_EXCEPTION: i32 = 81;
pub const TARGET_NOT_REPLICA_EXCEPTION: i32 = 82;
pub const MUTATION_DISALLOWED_EXCEPTION: i32 = 83;
pub const CONSISTENCY_LOST_EXCEPTION: i32 = 84;
pub const SESSION_EXPIRED_EXCEPTION: i32 = 85;
pub const WAIT_KEY_CANCELLED_EXCEPTION: i32 = 86;
pub const LOCK_ACQUIRE_LIMIT_REACHED_EXCEPTION: i32 = 87;
pub const LOCK_OWNERSHIP_LOST_EXCEPTION: i32 = 88;
pub const CP_GROUP_DESTROYED_EXCEPTION: i32 = 89;
pub const CANNOT_REPLICATE_EXCEPTION: i32 = 90;
pub const LEADER_DEMOTED_EXCEPTION: i32 = 91;
pub const STALE_APPEND_REQUEST_EXCEPTION: i32 = 92;
pub const NOT_LEADER_EXCEPTION: i32 = 93;
pub const VERSION_MISMATCH_EXCEPTION: i32 = 94;
