use crate::error::Result;
use crate::line::{ParameterNode, effective_parameters};
use regex::Regex;
use std::collections::BTreeSet;

/// Predicate over one resolved parameter value. `None` means the
/// `(name, occurrence)` did not occur in the line.
#[derive(Debug, Clone)]
pub enum ParameterRule {
    /// Value is absent or empty.
    Empty,
    /// Value equals the string exactly.
    Exact(String),
    /// Value is one of the set.
    OneOf(BTreeSet<String>),
    /// Value is present and the regex finds a match in it.
    Pattern(Regex),
}

impl ParameterRule {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParameterRule::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Compile `pattern` into a [`ParameterRule::Pattern`]. Anchor it to
    /// require a full match.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(ParameterRule::Pattern(Regex::new(pattern)?))
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (ParameterRule::Empty, v) => v.is_none_or(str::is_empty),
            (ParameterRule::Exact(expected), Some(v)) => expected == v,
            (ParameterRule::OneOf(set), Some(v)) => set.contains(v),
            (ParameterRule::Pattern(re), Some(v)) => re.is_match(v),
            (_, None) => false,
        }
    }
}

/// Turn a template line into rules that accept lines with the same
/// effective parameters: `Empty` for empty values, `Exact` otherwise.
pub fn key_rules(template: &ParameterNode) -> Vec<(String, usize, ParameterRule)> {
    effective_parameters(Some(template))
        .into_iter()
        .map(|p| {
            let rule =
                if p.value.is_empty() { ParameterRule::Empty } else { ParameterRule::Exact(p.value.to_string()) };
            (p.name.to_string(), p.occurrence, rule)
        })
        .collect()
}
