// propagate.rs — Label propagation for function and tool calls.
//
// The interpreter applies exactly one of these rules after each call to
// compute the label of the result value:
//
//   builtin: sources = union of operand sources, readers = meet.
//            Builtins are pure transforms inside the trust boundary and
//            contribute no source of their own.
//   tool:    sources = { Tool { name, union of operand sources } },
//            readers = meet. Wrapping is mandatory — the tool's own
//            logic is an additional trust boundary, so its output must
//            never inherit only the raw argument sources.
//
// Neither rule can widen readers beyond the meet of the inputs. That is
// the invariant the whole kernel exists to enforce.

use tracing::trace;

use crate::capabilities::Capabilities;
use crate::error::LabelError;
use crate::readers::Readers;
use crate::sources::{Source, SourceSet};

/// Label for the result of a builtin call consuming the given operands.
///
/// A builtin with no labeled operands produces kernel-internal data, so
/// the zero-operand case yields [`Capabilities::kernel`]. Metadata is
/// merged left-to-right, right-biased, as in
/// [`Capabilities::combine_all`].
pub fn builtin(operands: &[&Capabilities]) -> Capabilities {
    let derived = match Capabilities::combine_all(operands.iter().copied()) {
        Some(combined) => combined,
        None => Capabilities::kernel(),
    };
    trace!(
        sources = operands.len(),
        public = derived.readers().is_public(),
        "propagated builtin label"
    );
    derived
}

/// Label for the result of a tool call consuming the given operands.
///
/// The operand sources are folded into a single composite
/// [`Source::Tool`] tagged with the tool's name; readers take the meet
/// of all operands (`Public` for the zero-operand case). Fails only on
/// an empty tool name.
pub fn tool(name: impl Into<String>, operands: &[&Capabilities]) -> Result<Capabilities, LabelError> {
    let name = name.into();

    let mut inner = SourceSet::new();
    let mut readers = Readers::Public;
    let mut metadata = std::collections::BTreeMap::new();
    for cap in operands {
        inner.extend(cap.sources().iter().cloned());
        readers = readers.meet(cap.readers());
        metadata.extend(cap.metadata().iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let wrapped = Source::tool(name.clone(), inner)?;
    trace!(tool = %name, public = readers.is_public(), "propagated tool label");

    Ok(Capabilities {
        sources: SourceSet::from([wrapped]),
        readers,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetaValue;

    #[test]
    fn tool_output_is_tagged_and_never_widens_readers() {
        // A user-sourced argument readable only by alice flows through
        // a tool named "send".
        let arg = Capabilities::new([Source::User], Readers::only(["alice"])).unwrap();
        let derived = tool("send", &[&arg]).unwrap();

        assert_eq!(derived.readers(), &Readers::only(["alice"]));
        assert_eq!(
            derived.sources(),
            &SourceSet::from([Source::tool("send", [Source::User]).unwrap()])
        );
    }

    #[test]
    fn builtin_unions_sources_and_meets_readers() {
        let a = Capabilities::new([Source::User], Readers::only(["alice", "bob"])).unwrap();
        let b = Capabilities::new([Source::Assistant], Readers::only(["bob", "carol"])).unwrap();
        let derived = builtin(&[&a, &b]);

        assert_eq!(derived.readers(), &Readers::only(["bob"]));
        assert_eq!(
            derived.sources(),
            &SourceSet::from([Source::User, Source::Assistant])
        );
    }

    #[test]
    fn builtin_adds_no_source_of_its_own() {
        let a = Capabilities::default_user();
        let derived = builtin(&[&a]);
        assert_eq!(derived.sources(), &SourceSet::from([Source::User]));
    }

    #[test]
    fn zero_operand_builtin_is_kernel_data() {
        assert_eq!(builtin(&[]), Capabilities::kernel());
    }

    #[test]
    fn zero_operand_tool_is_tagged_and_public() {
        let derived = tool("clock", &[]).unwrap();
        assert_eq!(
            derived.sources(),
            &SourceSet::from([Source::tool("clock", []).unwrap()])
        );
        assert!(derived.readers().is_public());
    }

    #[test]
    fn nested_tool_calls_preserve_the_provenance_chain() {
        let fetched = tool("fetch", &[&Capabilities::default_user()]).unwrap();
        let summarized = tool("summarize", &[&fetched]).unwrap();

        let expected_inner = Source::tool("fetch", [Source::User]).unwrap();
        assert_eq!(
            summarized.sources(),
            &SourceSet::from([Source::tool("summarize", [expected_inner]).unwrap()])
        );
    }

    #[test]
    fn tool_metadata_merge_is_right_biased() {
        let a = Capabilities::default_user().with_metadata("origin", "inbox");
        let b = Capabilities::kernel().with_metadata("origin", "cache");
        let derived = tool("merge", &[&a, &b]).unwrap();
        assert_eq!(
            derived.metadata().get("origin"),
            Some(&MetaValue::from("cache"))
        );
    }

    #[test]
    fn tool_rejects_empty_name() {
        assert_eq!(
            tool("", &[&Capabilities::default_user()]).unwrap_err(),
            LabelError::EmptyToolName
        );
    }
}
