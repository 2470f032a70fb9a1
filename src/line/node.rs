//! Immutable chain nodes.
//!
//! A `ParameterNode` holds one `(name, value, classification)` triple and a
//! shared reference to its predecessor. Nodes are never mutated after
//! construction: extending a chain allocates a new head that points at the
//! existing tail, so any number of chains can share a common suffix.
//!
//! ```text
//! root ── Type:Foo ── Section:A ── Culture:fi
//!                 ^
//!                 └── Section:B             (shares root + Type:Foo)
//! ```
//!
//! ## Hash memo
//!
//! The only interior mutability is the pair of write-once hash cells
//! (`HashSlot::Default`, `HashSlot::Full`). They are filled lazily by
//! `IdentityComparer` and never change afterwards; concurrent first use is
//! serialized by `OnceCell`, so readers never observe a partial value.

use crate::Classification;
use crate::comparer::HashSlot;
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Shared handle to a chain head.
pub type NodeRef = Arc<ParameterNode>;

/// One link of a line.
pub struct ParameterNode {
    name: Option<Box<str>>,
    value: Option<Box<str>>,
    classification: Classification,
    previous: Option<NodeRef>,
    hashes: HashCache,
}

#[derive(Default)]
struct HashCache {
    default: OnceCell<i32>,
    full: OnceCell<i32>,
}

impl ParameterNode {
    fn new(
        name: Option<Box<str>>,
        value: Option<Box<str>>,
        classification: Classification,
        previous: Option<NodeRef>,
    ) -> Self {
        ParameterNode { name, value, classification, previous, hashes: HashCache::default() }
    }

    /// Create the anonymous root node, i.e. the empty line `[]`.
    pub fn root() -> NodeRef {
        Arc::new(Self::new(None, None, Classification::Unclassified, None))
    }

    /// Append a named parameter to `previous`, returning the new head.
    ///
    /// `previous` is shared, not copied. Fails with
    /// [`Error::InvalidArgument`] when `name` is empty.
    pub fn extend(
        previous: Option<&NodeRef>,
        name: &str,
        value: Option<&str>,
        classification: Classification,
    ) -> Result<NodeRef> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("parameter name must not be empty".to_string()));
        }
        Ok(Arc::new(Self::new(Some(name.into()), value.map(Into::into), classification, previous.cloned())))
    }

    /// Append an anonymous decorator node (format arguments, attachments).
    ///
    /// Anonymous nodes carry no identity and are skipped by every projection.
    pub fn decorate(previous: Option<&NodeRef>, value: Option<&str>) -> NodeRef {
        Arc::new(Self::new(None, value.map(Into::into), Classification::Unclassified, previous.cloned()))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn previous(&self) -> Option<&NodeRef> {
        self.previous.as_ref()
    }

    /// Returns true for nodes created by [`root`](Self::root) or
    /// [`decorate`](Self::decorate).
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Walk from this node toward the root (head first).
    pub fn iter(&self) -> Ancestors<'_> {
        Ancestors::new(Some(self))
    }

    /// Number of nodes from this head to the root, inclusive.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn hash_cell(&self, slot: HashSlot) -> &OnceCell<i32> {
        match slot {
            HashSlot::Default => &self.hashes.default,
            HashSlot::Full => &self.hashes.full,
        }
    }
}

impl fmt::Display for ParameterNode {
    /// Renders named parameters root → head as `Name:Value` segments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: Vec<&ParameterNode> = self.iter().filter(|n| !n.is_anonymous()).collect();
        named.reverse();
        for (idx, node) in named.iter().enumerate() {
            if idx > 0 {
                f.write_str(":")?;
            }
            write!(f, "{}:{}", node.name().unwrap_or_default(), node.value().unwrap_or_default())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ParameterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|n| (n.name(), n.value(), n.classification()))).finish()
    }
}

// --- Traversal ---------------------------------------------------------------

/// Iterator from a node toward the root. Cheap to copy, so every projection
/// built on it is restartable.
#[derive(Debug, Clone, Copy)]
pub struct Ancestors<'a> {
    next: Option<&'a ParameterNode>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(start: Option<&'a ParameterNode>) -> Self {
        Ancestors { next: start }
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ParameterNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.previous.as_deref();
        Some(node)
    }
}

impl FusedIterator for Ancestors<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_rejects_empty_name() {
        let root = ParameterNode::root();
        let err = ParameterNode::extend(Some(&root), "", Some("fi"), Classification::NonCanonical).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn extend_shares_the_existing_tail() {
        let root = ParameterNode::root();
        let ty = ParameterNode::extend(Some(&root), "Type", Some("Foo"), Classification::NonCanonical).unwrap();
        let a = ParameterNode::extend(Some(&ty), "Section", Some("A"), Classification::Canonical).unwrap();
        let b = ParameterNode::extend(Some(&ty), "Section", Some("B"), Classification::Canonical).unwrap();

        assert!(Arc::ptr_eq(a.previous().unwrap(), b.previous().unwrap()));
        assert_eq!(ty.value(), Some("Foo"));
        assert_eq!(Arc::strong_count(&ty), 3);
    }

    #[test]
    fn iter_walks_head_to_root() {
        let root = ParameterNode::root();
        let ty = ParameterNode::extend(Some(&root), "Type", Some("Foo"), Classification::NonCanonical).unwrap();
        let key = ParameterNode::extend(Some(&ty), "Key", Some("hello"), Classification::Canonical).unwrap();

        let names: Vec<Option<&str>> = key.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec![Some("Key"), Some("Type"), None]);
        assert_eq!(key.depth(), 3);
    }

    #[test]
    fn display_renders_root_to_head_and_skips_anonymous_nodes() {
        let root = ParameterNode::root();
        let ty = ParameterNode::extend(Some(&root), "Type", Some("Foo"), Classification::NonCanonical).unwrap();
        let args = ParameterNode::decorate(Some(&ty), Some("42"));
        let key = ParameterNode::extend(Some(&args), "Key", Some("hello"), Classification::Canonical).unwrap();

        assert_eq!(key.to_string(), "Type:Foo:Key:hello");
        assert_eq!(root.to_string(), "");
    }
}
