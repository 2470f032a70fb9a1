use super::ChainComparer;
use super::fnv::{FNV_PRIME, str_hash};
use crate::Classification;
use crate::line::{ParameterNode, effective_parameters};

/// Compares the effective non-canonical parameters of two lines as a set.
///
/// Only the occurrence closest to the head counts, empty values count as
/// absent, and order is irrelevant:
///
/// ```text
/// Culture:en ─ Type:Foo ─ Culture:fi   ≡   Type:Foo ─ Culture:fi
/// Culture:""                           ≡   (nothing)
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregateNonCanonicalComparer {
    excluded: Vec<String>,
}

impl AggregateNonCanonicalComparer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore the given parameter names entirely (e.g. `Culture` for a
    /// culture-insensitive comparison).
    pub fn excluding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AggregateNonCanonicalComparer { excluded: names.into_iter().map(Into::into).collect() }
    }

    fn collect<'a>(&self, line: &'a ParameterNode) -> Vec<(&'a str, &'a str)> {
        effective_parameters(Some(line))
            .into_iter()
            .filter(|p| p.classification == Classification::NonCanonical)
            .filter(|p| !p.value.is_empty() && !self.excluded.iter().any(|e| e == p.name))
            .map(|p| (p.name, p.value))
            .collect()
    }
}

impl ChainComparer for AggregateNonCanonicalComparer {
    fn equals(&self, a: &ParameterNode, b: &ParameterNode) -> bool {
        let mut x = self.collect(a);
        let mut y = self.collect(b);
        if x.len() != y.len() {
            return false;
        }
        x.sort_unstable();
        y.sort_unstable();
        x == y
    }

    fn hash(&self, line: &ParameterNode) -> i32 {
        self.collect(line)
            .into_iter()
            .fold(0, |hash, (name, value)| hash ^ (str_hash(name).wrapping_mul(FNV_PRIME) ^ str_hash(value)))
    }
}
