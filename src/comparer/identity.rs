//! Composite identity comparer.
//!
//! ## Equality
//!
//! ```text
//! equals(a, b)
//!   ├─ both null / same node                  -> true
//!   ├─ memoized hash mismatch (cached policy) -> false
//!   ├─ every ChainComparer(a, b)              -> all must hold
//!   └─ positional sequences in lock-step
//!        same node reached on both sides      -> true (shared suffix)
//!        every CanonicalComparer(x, y)        -> all must hold
//!        lengths differ                       -> false
//! ```
//!
//! ## Hashing
//!
//! FNV-1a style: start from the basis, XOR in every chain comparer's hash,
//! then for each positional node XOR in every canonical comparer's hash and
//! multiply by the prime. The multiply makes the hash order-sensitive for
//! positional parameters only.
//!
//! ## Memo
//!
//! `default_policy()` and `full_policy()` read and fill a write-once cell on
//! each node (see [`HashSlot`]). A node whose classification cannot affect the
//! policy reuses its predecessor's value instead of walking the chain again.

use super::aggregate::AggregateNonCanonicalComparer;
use super::fnv::{FNV_BASIS, FNV_PRIME};
use super::parameter::ParameterValueComparer;
use super::{CanonicalComparer, ChainComparer, HashSlot};
use crate::ClassificationSet;
use crate::line::{ParameterNode, sequence};
use once_cell::sync::Lazy;
use std::ptr;

static DEFAULT_POLICY: Lazy<IdentityComparer> = Lazy::new(IdentityComparer::default_policy);
static FULL_POLICY: Lazy<IdentityComparer> = Lazy::new(IdentityComparer::full_policy);

/// Equality and hashing of lines under a configurable policy.
#[derive(Debug)]
pub struct IdentityComparer {
    canonical: Vec<Box<dyn CanonicalComparer>>,
    non_canonical: Vec<Box<dyn ChainComparer>>,
    /// Classifications walked in lock-step by the canonical comparers.
    positional: ClassificationSet,
    /// Names skipped by the positional walk.
    excluded: Vec<String>,
    /// Memo slot; only set for the built-in policies.
    slot: Option<HashSlot>,
}

impl Default for IdentityComparer {
    fn default() -> Self {
        Self::default_policy()
    }
}

impl IdentityComparer {
    /// An empty policy: positional walk over canonical nodes, no comparers.
    /// Add comparers with [`with_canonical`](Self::with_canonical) and
    /// [`with_non_canonical`](Self::with_non_canonical).
    pub fn new() -> Self {
        IdentityComparer {
            canonical: Vec::new(),
            non_canonical: Vec::new(),
            positional: ClassificationSet::CANONICAL,
            excluded: Vec::new(),
            slot: None,
        }
    }

    /// Canonical parameters compared per occurrence, non-canonical parameters
    /// compared as a set of effective values.
    pub fn default_policy() -> Self {
        IdentityComparer {
            slot: Some(HashSlot::Default),
            ..Self::new().with_canonical(ParameterValueComparer).with_non_canonical(AggregateNonCanonicalComparer::new())
        }
    }

    /// The default policy plus named unclassified parameters (format
    /// arguments and similar decorators) compared positionally.
    pub fn full_policy() -> Self {
        IdentityComparer {
            positional: ClassificationSet::CANONICAL | ClassificationSet::UNCLASSIFIED,
            slot: Some(HashSlot::Full),
            ..Self::default_policy()
        }
    }

    /// The default policy with `name` ignored everywhere, e.g.
    /// `excluding("Culture")` for a culture-insensitive comparison.
    pub fn excluding(name: &str) -> Self {
        IdentityComparer {
            excluded: vec![name.to_string()],
            ..Self::new().with_canonical(ParameterValueComparer).with_non_canonical(
                AggregateNonCanonicalComparer::excluding([name]),
            )
        }
    }

    /// Shared instance of [`default_policy`](Self::default_policy).
    pub fn shared_default() -> &'static IdentityComparer {
        &DEFAULT_POLICY
    }

    /// Shared instance of [`full_policy`](Self::full_policy).
    pub fn shared_full() -> &'static IdentityComparer {
        &FULL_POLICY
    }

    pub fn with_canonical(mut self, comparer: impl CanonicalComparer + 'static) -> Self {
        self.canonical.push(Box::new(comparer));
        self.slot = None;
        self
    }

    pub fn with_non_canonical(mut self, comparer: impl ChainComparer + 'static) -> Self {
        self.non_canonical.push(Box::new(comparer));
        self.slot = None;
        self
    }

    /// Change which classifications the canonical comparers walk.
    pub fn with_positional(mut self, positional: ClassificationSet) -> Self {
        self.positional = positional;
        self.slot = None;
        self
    }

    /// Returns the memo slot used by this policy, if any.
    pub fn hash_slot(&self) -> Option<HashSlot> {
        self.slot
    }

    fn positional_sequence<'a>(&'a self, line: &'a ParameterNode) -> impl Iterator<Item = &'a ParameterNode> + 'a {
        sequence(Some(line), self.positional)
            .filter(move |n| !n.name().is_some_and(|name| self.excluded.iter().any(|e| e == name)))
    }

    // --- Equality ------------------------------------------------------------

    /// Compare two possibly-null lines.
    pub fn equals(&self, a: Option<&ParameterNode>, b: Option<&ParameterNode>) -> bool {
        let (a, b) = match (a, b) {
            (None, None) => return true,
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        if ptr::eq(a, b) {
            return true;
        }

        if let Some(slot) = self.slot {
            if self.memo_hash(slot, a) != self.memo_hash(slot, b) {
                tracing::trace!(%a, %b, "hash mismatch");
                return false;
            }
        }

        if !self.non_canonical.iter().all(|c| c.equals(a, b)) {
            return false;
        }

        let mut xs = self.positional_sequence(a);
        let mut ys = self.positional_sequence(b);
        loop {
            match (xs.next(), ys.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    // Same node: the rest of both sequences is the same suffix.
                    if ptr::eq(x, y) {
                        return true;
                    }
                    if !self.canonical.iter().all(|c| c.equals(x, y)) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    /// [`equals`](Self::equals) for two non-null lines.
    pub fn eq_lines(&self, a: &ParameterNode, b: &ParameterNode) -> bool {
        self.equals(Some(a), Some(b))
    }

    // --- Hashing -------------------------------------------------------------

    /// Hash a possibly-null line; null hashes to 0.
    ///
    /// Built-in policies return the memoized value.
    pub fn hash_code(&self, line: Option<&ParameterNode>) -> i32 {
        match (line, self.slot) {
            (None, _) => 0,
            (Some(line), Some(slot)) => self.memo_hash(slot, line),
            (Some(line), None) => self.calculate_hash_code(line),
        }
    }

    /// [`hash_code`](Self::hash_code) for a non-null line.
    pub fn hash_line(&self, line: &ParameterNode) -> i32 {
        self.hash_code(Some(line))
    }

    /// Compute the hash from scratch, bypassing the memo.
    pub fn calculate_hash_code(&self, line: &ParameterNode) -> i32 {
        let mut hash = FNV_BASIS;
        for comparer in &self.non_canonical {
            hash ^= comparer.hash(line);
        }
        for node in self.positional_sequence(line) {
            for comparer in &self.canonical {
                hash ^= comparer.hash(node);
            }
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    fn memo_hash(&self, slot: HashSlot, node: &ParameterNode) -> i32 {
        *node.hash_cell(slot).get_or_init(|| match node.previous() {
            Some(previous) if node.is_anonymous() || !slot.relevant().includes(node.classification()) => {
                self.memo_hash(slot, previous)
            }
            _ => self.calculate_hash_code(node),
        })
    }
}
