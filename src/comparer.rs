//! Line identity: equality and hashing.
//!
//! Identity combines two kinds of pluggable comparers:
//!
//! ```text
//!                  ┌─ ChainComparer (non-canonical)  applied once to whole lines
//! IdentityComparer ┤
//!                  └─ CanonicalComparer             applied per node pair while
//!                                                   walking the positional
//!                                                   sequences in lock-step
//! ```
//!
//! - `fnv.rs`: 32-bit FNV-1a constants and string hashing. Hashes are
//!   deterministic across processes.
//! - `parameter.rs`: `ParameterValueComparer`, the per-node name/value
//!   comparer.
//! - `aggregate.rs`: `AggregateNonCanonicalComparer`, the order-insensitive
//!   comparer over effective non-canonical parameters.
//! - `identity.rs`: `IdentityComparer`, policies and the per-node hash memo.

#[path = "comparer/aggregate.rs"]
mod aggregate;
#[path = "comparer/fnv.rs"]
mod fnv;
#[path = "comparer/identity.rs"]
mod identity;
#[path = "comparer/parameter.rs"]
mod parameter;
#[cfg(test)]
#[path = "comparer/tests.rs"]
mod tests;

pub use aggregate::AggregateNonCanonicalComparer;
pub use identity::IdentityComparer;
pub use parameter::ParameterValueComparer;

use crate::ClassificationSet;
use crate::line::ParameterNode;
use std::fmt;

/// Per-node comparer applied positionally.
pub trait CanonicalComparer: fmt::Debug + Send + Sync {
    fn equals(&self, a: &ParameterNode, b: &ParameterNode) -> bool;
    fn hash(&self, node: &ParameterNode) -> i32;
}

/// Whole-line comparer. Implementations aggregate whatever part of the line
/// they care about and must hash order-independently where they compare
/// order-independently.
pub trait ChainComparer: fmt::Debug + Send + Sync {
    fn equals(&self, a: &ParameterNode, b: &ParameterNode) -> bool;
    fn hash(&self, line: &ParameterNode) -> i32;
}

/// Which per-node memo cell a policy reads and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashSlot {
    /// Canonical positional + non-canonical aggregate.
    Default,
    /// As `Default`, plus named unclassified parameters walked positionally.
    Full,
}

impl HashSlot {
    /// Classifications that can change the hash under this slot's policy.
    /// Nodes outside the set (and anonymous nodes) inherit their
    /// predecessor's cached value.
    pub fn relevant(self) -> ClassificationSet {
        match self {
            HashSlot::Default => ClassificationSet::IDENTITY,
            HashSlot::Full => ClassificationSet::IDENTITY | ClassificationSet::UNCLASSIFIED,
        }
    }
}
