//! The persistent parameter chain and its read-only projections.
//!
//! ```text
//! ParameterClassifier::append ──▶ ParameterNode::extend   (node.rs)
//!        (classifier.rs)                 │
//!                                        v
//!                             Arc<ParameterNode> chain
//!                                        │
//!                 sequence / effective_parameters          (walker.rs)
//! ```
//!
//! - `node.rs`: the immutable node, its constructors and the per-node hash
//!   memo cells.
//! - `classifier.rs`: the name → classification table that decides how an
//!   appended parameter is classified and validated.
//! - `walker.rs`: traversal helpers shared by the comparer and the filter.

#[path = "line/classifier.rs"]
mod classifier;
#[path = "line/node.rs"]
mod node;
#[path = "line/walker.rs"]
mod walker;

pub use classifier::{ParameterClassifier, ParameterInfo};
pub use node::{Ancestors, NodeRef, ParameterNode};
pub use walker::{
    EffectiveParameter, canonical_sequence, effective_parameters, find, non_canonical_sequence, sequence,
};
