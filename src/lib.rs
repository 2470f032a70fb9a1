//! Persistent parameter chains ("lines") that identify localized strings.
//!
//! A line is built by prepending named parameters onto an immutable,
//! structurally-shared linked list:
//!
//! ```text
//! root ── Type:Foo ── Section:Greeting ── Culture:fi   (head)
//!                 └── Section:Farewell                 (another head, shared suffix)
//! ```
//!
//! Each parameter carries a [`Classification`]:
//!
//! - **Canonical** parameters are positional. Every occurrence counts and the
//!   order of occurrences matters (`Section`, `Key`).
//! - **Non-canonical** parameters are leftmost-wins. Only the occurrence
//!   closest to the head is effective, and an empty value erases the
//!   parameter (`Culture`, `Type`).
//! - **Hints** never take part in identity (`StringFormat`, `Logger`).
//!
//! On top of the chain the crate provides:
//!
//! - [`ParameterClassifier`]: the name → classification table used when
//!   appending parameters.
//! - [`effective_parameters`] and friends: read-only projections of a chain.
//! - [`IdentityComparer`]: composite equality and hashing with per-node hash
//!   memoization.
//! - [`RuleFilter`]: occurrence-indexed rule sets for selecting lines.
//!
//! # Example
//!
//! ```
//! use linekey::{IdentityComparer, ParameterClassifier, ParameterRule, RuleFilter, chain};
//!
//! let classifier = ParameterClassifier::standard();
//! let a = chain!(classifier; "Type" => "Foo", "Section" => "Greeting", "Culture" => "fi").unwrap();
//! let b = chain!(classifier; "Culture" => "en", "Type" => "Foo", "Section" => "Greeting", "Culture" => "fi").unwrap();
//!
//! let comparer = IdentityComparer::default();
//! assert!(comparer.eq_lines(&a, &b));
//! assert_eq!(comparer.hash_line(&a), comparer.hash_line(&b));
//!
//! let mut filter = RuleFilter::new();
//! filter.add_rule("Culture", 0, ParameterRule::Exact("fi".into())).unwrap();
//! assert!(filter.filter(&a));
//! ```

#[macro_use]
mod macros;
mod api;
mod comparer;
mod error;
mod filter;
mod line;

pub use api::{LineKey, LineTable, distinct};
pub use comparer::{
    AggregateNonCanonicalComparer, CanonicalComparer, ChainComparer, HashSlot, IdentityComparer,
    ParameterValueComparer,
};
pub use error::{Error, Result};
pub use filter::{LinePattern, LinePredicate, ParameterRule, PatternMatch, RuleFilter, key_rules};
pub use line::{
    Ancestors, EffectiveParameter, NodeRef, ParameterClassifier, ParameterInfo, ParameterNode, canonical_sequence,
    effective_parameters, find, non_canonical_sequence, sequence,
};

// --- Classification ---------------------------------------------------------

/// How a parameter participates in line identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Positional: every occurrence counts, in order.
    Canonical,
    /// Leftmost-wins: only the occurrence closest to the head is effective.
    NonCanonical,
    /// Metadata that never takes part in identity.
    Hint,
    /// Not registered in the classifier table (decorators, format arguments).
    Unclassified,
}

impl Classification {
    /// The single-bit [`ClassificationSet`] for this classification.
    pub const fn flag(self) -> ClassificationSet {
        match self {
            Classification::Canonical => ClassificationSet::CANONICAL,
            Classification::NonCanonical => ClassificationSet::NON_CANONICAL,
            Classification::Hint => ClassificationSet::HINT,
            Classification::Unclassified => ClassificationSet::UNCLASSIFIED,
        }
    }
}

bitflags::bitflags! {
    /// A set of classifications, used to project chains.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassificationSet: u8 {
        const CANONICAL     = 1 << 0;
        const NON_CANONICAL = 1 << 1;
        const HINT          = 1 << 2;
        const UNCLASSIFIED  = 1 << 3;

        /// Everything the default identity policy looks at.
        const IDENTITY = Self::CANONICAL.bits() | Self::NON_CANONICAL.bits();
    }
}

impl ClassificationSet {
    /// Returns true when `classification` is a member of this set.
    pub fn includes(self, classification: Classification) -> bool {
        self.contains(classification.flag())
    }
}
