// readers.rs — The confidentiality lattice.
//
// A Readers value says who is authorized to observe a value: either the
// universal top element Public, or an explicit finite set of reader
// principals. Combining data narrows the audience, so the combination
// operator is the lattice meet (intersection), never union.
//
// Readers is a two-variant tagged enum with exhaustive matching in
// `meet`, rather than a type hierarchy with operator overloading —
// commutativity holds by symmetric pattern matching, not by dispatch
// order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Who may observe a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readers {
    /// Readable by any principal — the unique top element of the lattice.
    Public,
    /// Readable only by the listed principals. An empty set is a legal,
    /// meaningful value: no one may read the data (fully confidential,
    /// undeliverable to any sink). It is not an error.
    Only(BTreeSet<String>),
}

impl Readers {
    /// Construct an explicit reader set from principal identifiers.
    pub fn only<I, S>(principals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Readers::Only(principals.into_iter().map(Into::into).collect())
    }

    /// The lattice meet: the authorized audience of a value derived from
    /// two inputs.
    ///
    /// `Public` is the identity: `Public ∧ x = x`. Two explicit sets meet
    /// by intersection. Commutative and associative; inputs are never
    /// modified.
    pub fn meet(&self, other: &Readers) -> Readers {
        match (self, other) {
            (Readers::Public, x) | (x, Readers::Public) => x.clone(),
            (Readers::Only(s), Readers::Only(t)) => {
                Readers::Only(s.intersection(t).cloned().collect())
            }
        }
    }

    /// Whether the given principal may read a value with this label.
    pub fn allows(&self, principal: &str) -> bool {
        match self {
            Readers::Public => true,
            Readers::Only(set) => set.contains(principal),
        }
    }

    /// Whether this is the public top element.
    pub fn is_public(&self) -> bool {
        matches!(self, Readers::Public)
    }
}
