use super::CanonicalComparer;
use super::fnv::{opt_hash, str_hash};
use crate::line::ParameterNode;

/// Compares a node pair by name and value (exact, case-sensitive).
///
/// Two anonymous nodes are equal; an anonymous node hashes to 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterValueComparer;

impl CanonicalComparer for ParameterValueComparer {
    fn equals(&self, a: &ParameterNode, b: &ParameterNode) -> bool {
        match (a.name(), b.name()) {
            (None, None) => true,
            (Some(x), Some(y)) => x == y && a.value() == b.value(),
            _ => false,
        }
    }

    fn hash(&self, node: &ParameterNode) -> i32 {
        match node.name() {
            Some(name) => str_hash(name) ^ opt_hash(node.value()),
            None => 0,
        }
    }
}
