// call.rs — Immutable records of individual invocations.
//
// Every call that reaches a callable produces exactly one FunctionCall,
// success or failure, appended to the trace. The record is what the
// policy engine inspects when deciding whether the plan's later sink
// operations may proceed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::function::{Args, Value};

/// A failure produced by a registered callable.
///
/// Failures are data: the trace records them and the interpreter
/// reports them to the model or aborts, per its own policy. They carry
/// a stable message and serialize as part of the trace entry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CallError {
    pub message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One invocation, recorded at call time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Unique identifier for this trace entry.
    pub call_id: Uuid,

    /// When the call was made (UTC).
    pub timestamp: DateTime<Utc>,

    /// The name of the function that was called.
    pub function: String,

    /// The receiver type name if the function is a method, else `None`.
    pub object_type: Option<String>,

    /// The arguments passed, exactly as validated against the schema.
    pub args: Args,

    /// What the callable produced: a value, or a recorded failure.
    pub output: Result<Value, CallError>,

    /// Whether the function runs inside the trust boundary.
    pub is_builtin: bool,
}

impl FunctionCall {
    /// Create a record with a fresh id and the current timestamp.
    pub fn new(
        function: impl Into<String>,
        object_type: Option<String>,
        args: Args,
        output: Result<Value, CallError>,
        is_builtin: bool,
    ) -> Self {
        Self {
            call_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            function: function.into(),
            object_type,
            args,
            output,
            is_builtin,
        }
    }

    /// Whether the callable completed without failure.
    pub fn succeeded(&self) -> bool {
        self.output.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_and_err_outputs_are_distinct() {
        let ok: Result<Value, CallError> = Ok(json!(5));
        let err: Result<Value, CallError> = Err(CallError::new("5"));
        assert_ne!(ok, err);
        assert_eq!(ok.unwrap(), json!(5));
        assert_eq!(err.unwrap_err().message, "5");
    }

    #[test]
    fn record_serialization_round_trip() {
        let record = FunctionCall::new(
            "fetch",
            None,
            Args::from([("url".to_string(), json!("https://example.com"))]),
            Ok(json!({"status": 200})),
            false,
        );
        let json = serde_json::to_string(&record).unwrap();
        let restored: FunctionCall = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }

    #[test]
    fn failed_call_round_trips_the_error() {
        let record = FunctionCall::new(
            "fetch",
            None,
            Args::new(),
            Err(CallError::new("connection refused")),
            false,
        );
        let json = serde_json::to_string(&record).unwrap();
        let restored: FunctionCall = serde_json::from_str(&json).unwrap();
        assert!(!restored.succeeded());
        assert_eq!(restored.output.unwrap_err().message, "connection refused");
    }

    #[test]
    fn call_ids_are_unique() {
        let a = FunctionCall::new("f", None, Args::new(), Ok(Value::Null), true);
        let b = FunctionCall::new("f", None, Args::new(), Ok(Value::Null), true);
        assert_ne!(a.call_id, b.call_id);
    }

    #[test]
    fn method_records_carry_the_receiver_type() {
        let record = FunctionCall::new(
            "append",
            Some("list".to_string()),
            Args::new(),
            Ok(Value::Null),
            true,
        );
        assert_eq!(record.object_type.as_deref(), Some("list"));
    }
}
