// registry.rs — The name-keyed operation catalog and invoke chokepoint.
//
// The registry is populated once at interpreter setup and treated as
// read-only afterward. Every call flows through `invoke`:
//
//   1. Look up the Function by name → UnknownFunction if absent
//   2. Validate args against the parameter schema (arity, names, types)
//   3. Execute the callable
//   4. Record the outcome — Ok or Err — as a FunctionCall on the trace
//
// A failing callable never becomes a RegistryError: the failure is
// recorded and returned as data for the interpreter to report or act
// on. Label propagation for the result value is performed by the
// caller with `ifc_label::propagate`, not here.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::call::FunctionCall;
use crate::error::RegistryError;
use crate::function::{Args, Function};
use crate::trace::CallTrace;

/// The catalog of registered operations.
#[derive(Debug, Default)]
pub struct Registry {
    functions: BTreeMap<String, Arc<Function>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function to the catalog.
    ///
    /// Duplicate names are rejected — silently replacing a registered
    /// operation would let a later registration hijack calls routed to
    /// an earlier one.
    pub fn register(&mut self, function: Function) -> Result<(), RegistryError> {
        if self.functions.contains_key(&function.name) {
            return Err(RegistryError::DuplicateRegistration {
                name: function.name,
            });
        }
        debug!(name = %function.name, kind = ?function.kind, "registered function");
        self.functions
            .insert(function.name.clone(), Arc::new(function));
        Ok(())
    }

    /// Look up a function's metadata by name.
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name).map(Arc::as_ref)
    }

    /// All registered names, in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Read-only iteration over the catalog — this is what the layer
    /// exposing the tool catalog to the model consumes.
    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.values().map(Arc::as_ref)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Invoke a registered function and record the call on the trace.
    ///
    /// Returns the recorded [`FunctionCall`]; its `output` field carries
    /// the callable's success value or failure. Registry-level problems
    /// (unknown name, schema violations, poisoned trace) are the only
    /// `Err` cases here.
    pub fn invoke(
        &self,
        name: &str,
        args: Args,
        trace: &CallTrace,
    ) -> Result<FunctionCall, RegistryError> {
        self.invoke_inner(name, None, args, trace)
    }

    /// Invoke a method: like [`Registry::invoke`] but records the
    /// receiver's type name on the trace entry.
    pub fn invoke_method(
        &self,
        name: &str,
        object_type: impl Into<String>,
        args: Args,
        trace: &CallTrace,
    ) -> Result<FunctionCall, RegistryError> {
        self.invoke_inner(name, Some(object_type.into()), args, trace)
    }

    fn invoke_inner(
        &self,
        name: &str,
        object_type: Option<String>,
        args: Args,
        trace: &CallTrace,
    ) -> Result<FunctionCall, RegistryError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| RegistryError::UnknownFunction {
                name: name.to_string(),
            })?;

        validate_args(function, &args)?;

        let output = (function.call)(&args);
        match &output {
            Ok(_) => debug!(name, builtin = function.is_builtin(), "call succeeded"),
            Err(err) => warn!(name, error = %err, "call failed; recording on trace"),
        }

        let record = FunctionCall::new(
            name,
            object_type,
            args,
            output,
            function.is_builtin(),
        );
        trace.append(record.clone())?;
        Ok(record)
    }
}

/// Check supplied arguments against the function's parameter schema.
fn validate_args(function: &Function, args: &Args) -> Result<(), RegistryError> {
    let schema: BTreeMap<&str, _> = function
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    for param in &function.parameters {
        if param.required && !args.contains_key(&param.name) {
            return Err(RegistryError::MissingArgument {
                function: function.name.clone(),
                argument: param.name.clone(),
            });
        }
    }

    for (arg_name, value) in args {
        let Some(param) = schema.get(arg_name.as_str()) else {
            return Err(RegistryError::UnknownArgument {
                function: function.name.clone(),
                argument: arg_name.clone(),
            });
        };
        if !param.param_type.matches(value) {
            return Err(RegistryError::ArgumentType {
                function: function.name.clone(),
                argument: arg_name.clone(),
                expected: param.param_type.name().to_string(),
                actual: json_type_name(value).to_string(),
            });
        }
    }

    Ok(())
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}
