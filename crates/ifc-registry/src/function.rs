// function.rs — Registered operation descriptors.
//
// A Function is the immutable registration record for one operation the
// interpreter may call: a name, a type-erased callable, a docstring,
// and a runtime-checked parameter schema. The schema stands in for
// compile-time arbitrary-arity generics: arity and argument types are
// validated by the registry at call time, before the callable runs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::call::CallError;

/// The runtime value representation exchanged with callables.
pub type Value = serde_json::Value;

/// Named arguments to a call.
pub type Args = BTreeMap<String, Value>;

/// A type-erased operation body.
///
/// `Send + Sync` so a populated catalog can be shared across evaluator
/// threads; the registry guarantees the schema was validated before the
/// callable runs.
pub type Callable = Arc<dyn Fn(&Args) -> Result<Value, CallError> + Send + Sync>;

/// Whether an operation runs inside or outside the trust boundary.
///
/// The distinction drives label propagation (tool outputs get wrapped
/// in a composite source; builtin outputs do not) and is recorded on
/// every trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// Internal, trusted, deterministic operation.
    Builtin,
    /// Externally-sourced, potentially untrusted functionality.
    Tool,
}

/// The JSON type an argument must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Bool,
    Integer,
    Number,
    String,
    List,
    Object,
    /// Accepts any value, including null.
    Any,
}

impl ParamType {
    /// Whether a concrete value satisfies this type tag.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::Bool => value.is_boolean(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::String => value.is_string(),
            ParamType::List => value.is_array(),
            ParamType::Object => value.is_object(),
            ParamType::Any => true,
        }
    }

    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::List => "list",
            ParamType::Object => "object",
            ParamType::Any => "any",
        }
    }
}

/// One typed slot in a function's parameter schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// The argument name callers must use.
    pub name: String,
    /// The JSON type the argument must carry.
    pub param_type: ParamType,
    /// Whether the argument must be present on every call.
    pub required: bool,
}

impl ParamSpec {
    /// A parameter that must be supplied on every call.
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
        }
    }

    /// A parameter that may be omitted.
    pub fn optional(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
        }
    }
}

/// An operation registered with the interpreter.
///
/// Created once at setup time and read-only afterward. The name,
/// docstring, schema, and return type are exposed for catalog
/// introspection; only the registry calls the callable.
#[derive(Clone)]
pub struct Function {
    pub name: String,
    pub kind: FunctionKind,
    pub docstring: String,
    pub parameters: Vec<ParamSpec>,
    pub return_type: Option<String>,
    pub(crate) call: Callable,
}

impl Function {
    /// Register record for an internal, trusted operation.
    pub fn builtin(
        name: impl Into<String>,
        docstring: impl Into<String>,
        call: impl Fn(&Args) -> Result<Value, CallError> + Send + Sync + 'static,
    ) -> Self {
        Self::with_kind(FunctionKind::Builtin, name, docstring, call)
    }

    /// Register record for an external tool.
    pub fn tool(
        name: impl Into<String>,
        docstring: impl Into<String>,
        call: impl Fn(&Args) -> Result<Value, CallError> + Send + Sync + 'static,
    ) -> Self {
        Self::with_kind(FunctionKind::Tool, name, docstring, call)
    }

    fn with_kind(
        kind: FunctionKind,
        name: impl Into<String>,
        docstring: impl Into<String>,
        call: impl Fn(&Args) -> Result<Value, CallError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            docstring: docstring.into(),
            parameters: Vec::new(),
            return_type: None,
            call: Arc::new(call),
        }
    }

    /// Add a parameter slot to the schema and return self (builder pattern).
    pub fn with_param(mut self, spec: ParamSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Declare the return type name and return self.
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Whether this operation runs inside the trust boundary.
    pub fn is_builtin(&self) -> bool {
        self.kind == FunctionKind::Builtin
    }
}

// The callable is opaque; show everything else.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}
