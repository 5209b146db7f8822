//! # ifc-registry
//!
//! The operation catalog and call trace for a sandboxed interpreter.
//!
//! Builtin and tool operations are registered once at setup as
//! [`Function`] descriptors (name, type-erased callable, docstring,
//! runtime-checked parameter schema). The [`Registry`] is the single
//! place a call can happen: [`Registry::invoke`] validates arguments
//! against the schema, executes the callable, and records the outcome —
//! success or failure — as an immutable [`FunctionCall`] appended to an
//! injected [`CallTrace`].
//!
//! A failing callable is data, not an error: the trace records it and
//! the interpreter decides whether to report it to the model or abort.
//! Nothing in this crate ever translates a call failure into a label
//! downgrade; label propagation for result values is the caller's job
//! via `ifc_label::propagate`.

pub mod call;
pub mod error;
pub mod function;
pub mod registry;
pub mod trace;

pub use call::{CallError, FunctionCall};
pub use error::RegistryError;
pub use function::{Args, Function, FunctionKind, ParamSpec, ParamType, Value};
pub use registry::Registry;
pub use trace::CallTrace;
