//! Read-only chain projections.
//!
//! All helpers here are pure functions of an immutable chain; the returned
//! iterators can be cloned and restarted freely.
//!
//! ## Effective parameters
//!
//! `effective_parameters` resolves a chain into one value per
//! `(name, occurrence)`:
//!
//! ```text
//! chain (head first):  Culture:fi  Section:B  Culture:en  Section:A  Type:Foo
//!
//! non-canonical        Culture#0=fi                       Type#0=Foo   (first seen wins)
//! canonical            Section#0=B  Section#1=A                        (closest to head = 0)
//! ```
//!
//! Occurrence indices are counted per distinct name, never as a global
//! position counter.

use super::node::{Ancestors, ParameterNode};
use crate::{Classification, ClassificationSet};
use std::collections::{HashMap, HashSet};

/// Named nodes from `node` toward the root whose classification is in `set`.
pub fn sequence(
    node: Option<&ParameterNode>,
    set: ClassificationSet,
) -> impl Iterator<Item = &ParameterNode> + Clone {
    Ancestors::new(node).filter(move |n| !n.is_anonymous() && set.includes(n.classification()))
}

/// Canonical nodes from `node` toward the root.
pub fn canonical_sequence(node: Option<&ParameterNode>) -> impl Iterator<Item = &ParameterNode> + Clone {
    sequence(node, ClassificationSet::CANONICAL)
}

/// Non-canonical nodes from `node` toward the root.
pub fn non_canonical_sequence(node: Option<&ParameterNode>) -> impl Iterator<Item = &ParameterNode> + Clone {
    sequence(node, ClassificationSet::NON_CANONICAL)
}

/// One resolved parameter of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectiveParameter<'a> {
    pub name: &'a str,
    /// Occurrence index. Always 0 for non-canonical parameters.
    pub occurrence: usize,
    pub value: &'a str,
    pub classification: Classification,
}

/// Resolve `node` into its effective `(name, occurrence, value)` entries.
///
/// Hints, anonymous nodes and nodes without a value are dropped. Named
/// `Unclassified` parameters are numbered like canonical ones.
///
/// Output order: positional entries root → head, then non-canonical entries
/// root → head.
pub fn effective_parameters(node: Option<&ParameterNode>) -> Vec<EffectiveParameter<'_>> {
    let mut positional: Vec<(&str, &str, Classification)> = Vec::new();
    let mut non_canonical: Vec<(&str, &str)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for n in Ancestors::new(node) {
        let (Some(name), Some(value)) = (n.name(), n.value()) else {
            continue;
        };
        match n.classification() {
            Classification::Hint => {}
            Classification::NonCanonical => {
                if seen.insert(name) {
                    non_canonical.push((name, value));
                }
            }
            c @ (Classification::Canonical | Classification::Unclassified) => positional.push((name, value, c)),
        }
    }

    // Number only after the walk: index 0 belongs to the occurrence closest
    // to the head, which is the first one buffered.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<EffectiveParameter<'_>> = positional
        .into_iter()
        .map(|(name, value, classification)| {
            let counter = counts.entry(name).or_insert(0);
            let occurrence = *counter;
            *counter += 1;
            EffectiveParameter { name, occurrence, value, classification }
        })
        .collect();
    out.reverse();

    out.extend(non_canonical.into_iter().rev().map(|(name, value)| EffectiveParameter {
        name,
        occurrence: 0,
        value,
        classification: Classification::NonCanonical,
    }));
    out
}

/// Look up the value resolved for `(name, occurrence)`, if it occurred.
pub fn find<'a>(params: &[EffectiveParameter<'a>], name: &str, occurrence: usize) -> Option<&'a str> {
    params.iter().find(|p| p.name == name && p.occurrence == occurrence).map(|p| p.value)
}
