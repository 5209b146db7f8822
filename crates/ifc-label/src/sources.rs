// sources.rs — Provenance tags for tracked values.
//
// A Source records where a value's data originated. Atomic sources are
// the fixed trust levels (kernel, user, assistant, trusted tool). The
// composite Tool variant records data returned by a named tool together
// with the provenance of everything the tool consumed — composites nest
// without flattening, so a full chain like "returned by tool A, which
// consumed output of tool B" stays visible to the policy engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// A set of provenance tags.
///
/// `BTreeSet` keeps elements in canonical order, so equality and hashing
/// of source sets are independent of construction order by construction.
pub type SourceSet = BTreeSet<Source>;

/// Where a value's data originated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Data synthesized by trusted internal logic (highest trust).
    Kernel,
    /// Data typed by a human user.
    User,
    /// Data produced by the assistant model.
    Assistant,
    /// Output of a tool explicitly marked trustworthy.
    TrustedTool,
    /// Data returned by a named tool, carrying the provenance of
    /// everything the tool consumed to produce it.
    Tool {
        name: String,
        inner: BTreeSet<Source>,
    },
}

impl Source {
    /// Construct a composite tool source.
    ///
    /// `inner` may itself contain `Tool` sources; nesting is preserved.
    /// Rejects an empty tool name — an unnamed tool would be invisible
    /// to policy rules keyed on tool identity.
    pub fn tool(
        name: impl Into<String>,
        inner: impl IntoIterator<Item = Source>,
    ) -> Result<Self, LabelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(LabelError::EmptyToolName);
        }
        Ok(Source::Tool {
            name,
            inner: inner.into_iter().collect(),
        })
    }

    /// Return the tool name if this is a composite source.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Source::Tool { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_equality_is_order_independent() {
        let a = Source::tool("t", [Source::User, Source::Assistant]).unwrap();
        let b = Source::tool("t", [Source::Assistant, Source::User]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tool_sources_nest_without_flattening() {
        let inner = Source::tool("fetch", [Source::Assistant]).unwrap();
        let outer = Source::tool("summarize", [inner.clone(), Source::User]).unwrap();
        match &outer {
            Source::Tool { name, inner: set } => {
                assert_eq!(name, "summarize");
                assert!(set.contains(&inner));
                assert!(set.contains(&Source::User));
            }
            _ => panic!("expected composite source"),
        }
    }

    #[test]
    fn empty_tool_name_is_rejected() {
        assert_eq!(Source::tool("", [Source::User]), Err(LabelError::EmptyToolName));
    }

    #[test]
    fn duplicate_inner_sources_collapse() {
        let s = Source::tool("t", [Source::User, Source::User]).unwrap();
        match s {
            Source::Tool { inner, .. } => assert_eq!(inner.len(), 1),
            _ => panic!("expected composite source"),
        }
    }

    #[test]
    fn source_serialization_round_trip() {
        let s = Source::tool("send", [Source::User, Source::TrustedTool]).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let restored: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn atomic_serializes_as_snake_case() {
        let json = serde_json::to_string(&Source::TrustedTool).unwrap();
        assert_eq!(json, "\"trusted_tool\"");
    }
}
