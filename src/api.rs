use crate::comparer::IdentityComparer;
use crate::line::NodeRef;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A line paired with the comparer that defines its identity, so it can be
/// used as a `HashMap`/`HashSet` key.
///
/// Keys built with different comparers should not be mixed in one map.
#[derive(Debug, Clone)]
pub struct LineKey {
    line: NodeRef,
    comparer: Arc<IdentityComparer>,
}

impl LineKey {
    pub fn new(line: NodeRef, comparer: Arc<IdentityComparer>) -> Self {
        LineKey { line, comparer }
    }

    pub fn line(&self) -> &NodeRef {
        &self.line
    }
}

impl PartialEq for LineKey {
    fn eq(&self, other: &Self) -> bool {
        self.comparer.eq_lines(&self.line, &other.line)
    }
}

impl Eq for LineKey {}

impl Hash for LineKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.comparer.hash_line(&self.line));
    }
}

/// Values keyed by line identity, e.g. inline string overrides.
///
/// ```
/// use linekey::{LineTable, ParameterClassifier, chain};
///
/// let classifier = ParameterClassifier::standard();
/// let mut inlines = LineTable::default();
/// inlines.insert(chain!(classifier; "Key" => "hello", "Culture" => "fi").unwrap(), "Hei");
///
/// let lookup = chain!(classifier; "Culture" => "en", "Key" => "hello", "Culture" => "fi").unwrap();
/// assert_eq!(inlines.get(&lookup), Some(&"Hei"));
/// ```
#[derive(Debug, Clone)]
pub struct LineTable<V> {
    comparer: Arc<IdentityComparer>,
    entries: HashMap<LineKey, V>,
}

impl<V> Default for LineTable<V> {
    fn default() -> Self {
        Self::new(Arc::new(IdentityComparer::default_policy()))
    }
}

impl<V> LineTable<V> {
    pub fn new(comparer: Arc<IdentityComparer>) -> Self {
        LineTable { comparer, entries: HashMap::new() }
    }

    fn key(&self, line: &NodeRef) -> LineKey {
        LineKey::new(Arc::clone(line), Arc::clone(&self.comparer))
    }

    /// Insert `value` for `line`, returning the value previously stored for
    /// an equal line. The originally inserted line is kept as the key.
    pub fn insert(&mut self, line: NodeRef, value: V) -> Option<V> {
        let key = self.key(&line);
        match self.entries.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(key, value);
                None
            }
        }
    }

    pub fn get(&self, line: &NodeRef) -> Option<&V> {
        self.entries.get(&self.key(line))
    }

    pub fn contains(&self, line: &NodeRef) -> bool {
        self.entries.contains_key(&self.key(line))
    }

    pub fn remove(&mut self, line: &NodeRef) -> Option<V> {
        let key = self.key(line);
        self.entries.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeRef, &V)> {
        self.entries.iter().map(|(k, v)| (k.line(), v))
    }
}

/// Drop lines equal (under `comparer`) to an earlier line, keeping order.
pub fn distinct<I>(lines: I, comparer: Arc<IdentityComparer>) -> Vec<NodeRef>
where
    I: IntoIterator<Item = NodeRef>,
{
    let mut seen: HashSet<LineKey> = HashSet::new();
    lines.into_iter().filter(|line| seen.insert(LineKey::new(Arc::clone(line), Arc::clone(&comparer)))).collect()
}
