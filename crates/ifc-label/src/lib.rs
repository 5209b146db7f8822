//! # ifc-label
//!
//! Provenance and confidentiality labels for values flowing through a
//! sandboxed interpreter.
//!
//! Every value the interpreter tracks carries a [`Capabilities`] label:
//! where the data came from ([`Source`]) and who may observe it
//! ([`Readers`]). When a function or tool call consumes labeled values,
//! the label of the result is computed with the combinators in
//! [`propagate`], so an external policy engine can gate sink operations
//! (network send, file write, ...) on the full provenance chain.
//!
//! ## Key invariants
//!
//! - **Readers never widen**: combining labels takes the lattice meet
//!   (intersection) of reader sets. No operation in this crate can grant
//!   a derived value a wider audience than its inputs had.
//! - **Tool outputs are tagged**: [`propagate::tool`] always wraps the
//!   argument sources in a composite [`Source::Tool`], so a tool's own
//!   trust boundary is visible in the provenance chain.
//! - **Labels are immutable values**: every operation returns a new
//!   label; nothing here mutates, blocks, or performs I/O.

pub mod capabilities;
pub mod error;
pub mod metadata;
pub mod propagate;
pub mod readers;
pub mod sources;

pub use capabilities::Capabilities;
pub use error::LabelError;
pub use metadata::MetaValue;
pub use readers::Readers;
pub use sources::{Source, SourceSet};
