//! Line patterns: templates such as `{Culture}/{Type}.{Key}` that map text
//! (typically asset names) to parameter values and back.
//!
//! ```text
//! "{Culture}/{Section_1}.{Section}.{Key}"
//!     │
//!     ├─ matches("fi/App.Menu.Open")  -> Culture#0=fi Section#1=App Section#0=Menu Key#0=Open
//!     └─ build(line)                  -> "fi/App.Menu.Open"
//! ```
//!
//! `{Name_N}` addresses occurrence `N`; `{Name}` is occurrence 0.

use crate::error::{Error, Result};
use crate::line::{ParameterNode, effective_parameters, find};
use regex::Regex;

/// Parameter values captured from text, or a failed match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    success: bool,
    parts: Vec<(String, usize, String)>,
}

impl PatternMatch {
    pub fn failed() -> Self {
        PatternMatch::default()
    }

    /// A successful match with the given `(name, occurrence, value)` parts.
    pub fn from_parts<I, N, V>(parts: I) -> Self
    where
        I: IntoIterator<Item = (N, usize, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let parts = parts.into_iter().map(|(n, o, v)| (n.into(), o, v.into())).collect();
        PatternMatch { success: true, parts }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Captured value for `(name, occurrence)`. The first capture wins when a
    /// placeholder repeats.
    pub fn get(&self, name: &str, occurrence: usize) -> Option<&str> {
        self.parts.iter().find(|(n, o, _)| n == name && *o == occurrence).map(|(_, _, v)| v.as_str())
    }

    pub fn parts(&self) -> &[(String, usize, String)] {
        &self.parts
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder { name: String, occurrence: usize },
}

#[derive(Debug, Clone)]
pub struct LinePattern {
    source: String,
    segments: Vec<Segment>,
    regex: Regex,
}

impl LinePattern {
    /// Parse and compile a pattern.
    ///
    /// Fails with [`Error::InvalidArgument`] on an unterminated or empty
    /// placeholder.
    pub fn new(pattern: &str) -> Result<Self> {
        let segments = parse_segments(pattern)?;

        let mut re = String::from("^");
        for segment in &segments {
            match segment {
                Segment::Literal(text) => re.push_str(&regex::escape(text)),
                Segment::Placeholder { .. } => re.push_str("(.+?)"),
            }
        }
        re.push('$');

        tracing::debug!(pattern, regex = %re, "compiled line pattern");
        Ok(LinePattern { source: pattern.to_string(), segments, regex: Regex::new(&re)? })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match `text` against the whole pattern.
    pub fn matches(&self, text: &str) -> PatternMatch {
        let Some(caps) = self.regex.captures(text) else {
            return PatternMatch::failed();
        };
        let placeholders = self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { name, occurrence } => Some((name.as_str(), *occurrence)),
            Segment::Literal(_) => None,
        });
        let parts = placeholders
            .enumerate()
            .filter_map(|(idx, (name, occurrence))| caps.get(idx + 1).map(|m| (name, occurrence, m.as_str())));
        PatternMatch::from_parts(parts)
    }

    /// Fill the placeholders from `line`'s effective parameters. Returns
    /// `None` when a placeholder has no value.
    pub fn build(&self, line: &ParameterNode) -> Option<String> {
        let params = effective_parameters(Some(line));
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, occurrence } => out.push_str(find(&params, name, *occurrence)?),
            }
        }
        Some(out)
    }
}

fn parse_segments(pattern: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| Error::InvalidArgument(format!("unterminated placeholder in {pattern:?}")))?;
        segments.push(parse_placeholder(&after[..close], pattern)?);
        rest = &after[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}

fn parse_placeholder(body: &str, pattern: &str) -> Result<Segment> {
    let (name, occurrence) = match body.rsplit_once('_') {
        Some((name, index)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            let occurrence = index
                .parse()
                .map_err(|_| Error::InvalidArgument(format!("occurrence index out of range in {pattern:?}")))?;
            (name, occurrence)
        }
        _ => (body, 0),
    };
    if name.is_empty() {
        return Err(Error::InvalidArgument(format!("empty placeholder in {pattern:?}")));
    }
    Ok(Segment::Placeholder { name: name.to_string(), occurrence })
}
