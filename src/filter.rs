//! Rule-based line selection.
//!
//! - `rule.rs`: `ParameterRule` predicates and the template → rules
//!   conversion (`key_rules`).
//! - `pattern.rs`: `LinePattern` / `PatternMatch`, the text-side input of a
//!   filter.
//! - `rule_filter.rs`: `RuleFilter`, the sealed, shareable rule set.

#[path = "filter/pattern.rs"]
mod pattern;
#[path = "filter/rule.rs"]
mod rule;
#[path = "filter/rule_filter.rs"]
mod rule_filter;
#[cfg(test)]
#[path = "filter/tests.rs"]
mod tests;

pub use pattern::{LinePattern, PatternMatch};
pub use rule::{ParameterRule, key_rules};
pub use rule_filter::{LinePredicate, RuleFilter};
