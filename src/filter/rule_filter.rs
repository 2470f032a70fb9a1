//! Rule filter evaluation.
//!
//! ```text
//! filter(line)
//!   1. generic predicates, in registration order   -> first failure rejects
//!   2. effective_parameters(line)
//!   3. for each (name, occurrence) group:
//!        value = effective value or None
//!        any rule in the group matches?           -> otherwise reject
//!   4. accept
//! ```
//!
//! Rules within a group are OR-ed; groups are AND-ed. A filter is built
//! once, sealed, and then shared read-only.

use super::pattern::PatternMatch;
use super::rule::{ParameterRule, key_rules};
use crate::error::{Error, Result};
use crate::line::{NodeRef, ParameterNode, effective_parameters, find};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Whole-line predicate.
pub type LinePredicate = Arc<dyn Fn(&ParameterNode) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct RuleFilter {
    predicates: Vec<LinePredicate>,
    groups: BTreeMap<(String, usize), Vec<ParameterRule>>,
    read_only: bool,
}

impl fmt::Debug for RuleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleFilter")
            .field("predicates", &self.predicates.len())
            .field("groups", &self.groups)
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl RuleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Configuration ---------------------------------------------------------

    fn check_writable(&self) -> Result<()> {
        if self.read_only { Err(Error::ReadOnly) } else { Ok(()) }
    }

    /// Add a generic whole-line predicate.
    pub fn add_predicate<F>(&mut self, predicate: F) -> Result<&mut Self>
    where
        F: Fn(&ParameterNode) -> bool + Send + Sync + 'static,
    {
        self.check_writable()?;
        self.predicates.push(Arc::new(predicate));
        Ok(self)
    }

    /// Add `rule` to the `(name, occurrence)` group.
    pub fn add_rule(&mut self, name: &str, occurrence: usize, rule: ParameterRule) -> Result<&mut Self> {
        self.check_writable()?;
        if name.is_empty() {
            return Err(Error::InvalidArgument("rule parameter name must not be empty".to_string()));
        }
        self.groups.entry((name.to_string(), occurrence)).or_default().push(rule);
        Ok(self)
    }

    /// Add the rules derived from `template` (see [`key_rules`]).
    pub fn add_key_rule(&mut self, template: &ParameterNode) -> Result<&mut Self> {
        self.check_writable()?;
        for (name, occurrence, rule) in key_rules(template) {
            self.groups.entry((name, occurrence)).or_default().push(rule);
        }
        Ok(self)
    }

    /// Make the filter read-only. Further mutations fail with
    /// [`Error::ReadOnly`].
    pub fn seal(&mut self) -> &mut Self {
        if !self.read_only {
            tracing::debug!(predicates = self.predicates.len(), groups = self.groups.len(), "sealing rule filter");
        }
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// A writable copy of this filter.
    pub fn to_mutable(&self) -> RuleFilter {
        RuleFilter { read_only: false, ..self.clone() }
    }

    /// Rules registered for `(name, occurrence)`.
    pub fn rules(&self, name: &str, occurrence: usize) -> &[ParameterRule] {
        self.groups.get(&(name.to_string(), occurrence)).map(Vec::as_slice).unwrap_or_default()
    }

    // --- Evaluation --------------------------------------------------------------

    /// Returns true when `line` passes every predicate and every rule group.
    pub fn filter(&self, line: &ParameterNode) -> bool {
        if let Some(idx) = self.predicates.iter().position(|p| !p(line)) {
            tracing::trace!(%line, predicate = idx, "rejected by predicate");
            return false;
        }
        let params = effective_parameters(Some(line));
        self.check_groups(|name, occurrence| find(&params, name, occurrence), || line.to_string())
    }

    /// Evaluate the rule groups against captured pattern parts. Generic
    /// predicates need a line and do not apply here.
    pub fn filter_match(&self, m: &PatternMatch) -> bool {
        if !m.is_success() {
            return false;
        }
        self.check_groups(|name, occurrence| m.get(name, occurrence), || format!("{:?}", m.parts()))
    }

    /// Lazily keep the lines that pass [`filter`](Self::filter).
    pub fn filter_lines<'a, I>(&'a self, lines: I) -> impl Iterator<Item = NodeRef> + 'a
    where
        I: IntoIterator<Item = NodeRef>,
        I::IntoIter: 'a,
    {
        lines.into_iter().filter(move |line| self.filter(line))
    }

    fn check_groups<'v, F, D>(&self, lookup: F, describe: D) -> bool
    where
        F: Fn(&str, usize) -> Option<&'v str>,
        D: Fn() -> String,
    {
        for ((name, occurrence), rules) in &self.groups {
            if rules.is_empty() {
                continue;
            }
            let value = lookup(name.as_str(), *occurrence);
            if !rules.iter().any(|rule| rule.matches(value)) {
                tracing::trace!(input = %describe(), name = %name, occurrence, ?value, "rejected by rule group");
                return false;
            }
        }
        true
    }
}
