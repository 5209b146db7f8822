// capabilities.rs — The per-value label.
//
// A Capabilities value is the frozen combination of a source set, a
// readers lattice element, and free-form metadata. It is attached to a
// runtime value when the value enters the system (user input, literal,
// tool return) and combined — never mutated — whenever a call consumes
// multiple labeled operands. The policy engine reads it at every
// attempted sink operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::metadata::MetaValue;
use crate::readers::Readers;
use crate::sources::{Source, SourceSet};

/// The provenance + confidentiality label attached to a tracked value.
///
/// Immutable once constructed; all fields participate in equality and
/// hashing, and the BTree-backed collections keep both independent of
/// construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub(crate) sources: SourceSet,
    pub(crate) readers: Readers,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) metadata: BTreeMap<String, MetaValue>,
}

impl Capabilities {
    /// Construct a label from explicit sources and readers.
    ///
    /// Rejects an empty source set: a value with provenance must say
    /// where it came from. Values that genuinely have none (pure
    /// literals) use [`Capabilities::unsourced`] so the empty set is
    /// always a declared choice.
    pub fn new(
        sources: impl IntoIterator<Item = Source>,
        readers: Readers,
    ) -> Result<Self, LabelError> {
        let sources: SourceSet = sources.into_iter().collect();
        if sources.is_empty() {
            return Err(LabelError::EmptySources);
        }
        Ok(Self {
            sources,
            readers,
            metadata: BTreeMap::new(),
        })
    }

    /// The label for a value with no tracked provenance, e.g. a literal
    /// appearing directly in an interpreted plan.
    pub fn unsourced() -> Self {
        Self {
            sources: SourceSet::new(),
            readers: Readers::Public,
            metadata: BTreeMap::new(),
        }
    }

    /// The label for raw, directly user-supplied input: `{User}`, public.
    pub fn default_user() -> Self {
        Self {
            sources: SourceSet::from([Source::User]),
            readers: Readers::Public,
            metadata: BTreeMap::new(),
        }
    }

    /// The label for values synthesized by trusted internal logic:
    /// `{Kernel}`, public.
    pub fn kernel() -> Self {
        Self {
            sources: SourceSet::from([Source::Kernel]),
            readers: Readers::Public,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry, returning the extended label
    /// (builder pattern).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Combine two labels into the label of a value derived from both.
    ///
    /// Sources take the union, readers the lattice meet. Metadata merges
    /// right-biased: on a key collision, `other`'s entry wins.
    pub fn combine(&self, other: &Capabilities) -> Capabilities {
        let mut sources = self.sources.clone();
        sources.extend(other.sources.iter().cloned());

        let mut metadata = self.metadata.clone();
        metadata.extend(other.metadata.iter().map(|(k, v)| (k.clone(), v.clone())));

        Capabilities {
            sources,
            readers: self.readers.meet(&other.readers),
            metadata,
        }
    }

    /// Combine any number of labels with a deterministic left fold.
    ///
    /// Returns `None` for an empty iterator. Associativity of union and
    /// meet makes the fold order irrelevant for sources and readers; for
    /// metadata the left fold pins down the merge: later operands win.
    pub fn combine_all<'a>(
        labels: impl IntoIterator<Item = &'a Capabilities>,
    ) -> Option<Capabilities> {
        let mut iter = labels.into_iter();
        let first = iter.next()?.clone();
        Some(iter.fold(first, |acc, next| acc.combine(next)))
    }

    /// The provenance tags of this label.
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Who may observe the labeled value.
    pub fn readers(&self) -> &Readers {
        &self.readers
    }

    /// Free-form metadata entries.
    pub fn metadata(&self) -> &BTreeMap<String, MetaValue> {
        &self.metadata
    }
}
