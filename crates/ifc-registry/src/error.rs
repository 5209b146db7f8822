// error.rs — Error types for the registry subsystem.
//
// These cover registration and invocation plumbing only. A failure
// inside a registered callable is not a RegistryError — it is recorded
// as the `Err` output of the FunctionCall and returned as data.

use thiserror::Error;

/// Errors that can occur during registration or invocation plumbing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A function with this name is already registered.
    #[error("function '{name}' is already registered")]
    DuplicateRegistration { name: String },

    /// No function with this name is registered.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// A required argument was not supplied.
    #[error("call to '{function}' is missing required argument '{argument}'")]
    MissingArgument { function: String, argument: String },

    /// An argument was supplied that the schema does not declare.
    #[error("call to '{function}' passed undeclared argument '{argument}'")]
    UnknownArgument { function: String, argument: String },

    /// An argument value does not match its declared type.
    #[error("argument '{argument}' of '{function}' expects {expected}, got {actual}")]
    ArgumentType {
        function: String,
        argument: String,
        expected: String,
        actual: String,
    },

    /// A writer panicked while holding the trace lock.
    #[error("call trace lock poisoned by a panicking writer")]
    TracePoisoned,
}
