//! Parameter classification table.
//!
//! Maps a parameter name to its [`Classification`], an optional validation
//! pattern and a sort order. The table is plain configuration: build it once
//! (usually from [`ParameterClassifier::standard`]) and pass it to whoever
//! appends parameters.

use super::node::{NodeRef, ParameterNode};
use super::walker::EffectiveParameter;
use crate::Classification;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;

/// Sort order given to names missing from the table.
const UNREGISTERED_ORDER: i32 = i32::MAX;

/// Registration for one parameter name.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    pub name: String,
    pub classification: Classification,
    /// Values must match this pattern when present.
    pub pattern: Option<Regex>,
    /// Presentation order; lower sorts first.
    pub sort_order: i32,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, classification: Classification, sort_order: i32) -> Self {
        ParameterInfo { name: name.into(), classification, pattern: None, sort_order }
    }

    /// Attach a validation pattern, compiling it.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    fn with_regex(mut self, regex: &Regex) -> Self {
        self.pattern = Some(regex.clone());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ParameterClassifier {
    infos: HashMap<String, ParameterInfo>,
    fallback: Classification,
}

impl Default for ParameterClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl ParameterClassifier {
    /// An empty table; every name resolves to the fallback.
    pub fn empty() -> Self {
        ParameterClassifier { infos: HashMap::new(), fallback: Classification::Unclassified }
    }

    /// The well-known localization parameters.
    ///
    /// ```text
    /// Culture        non-canonical  (validated: language tag or empty)
    /// Location       canonical
    /// Assembly       non-canonical
    /// BaseName       canonical
    /// Resource       canonical
    /// Type           non-canonical
    /// Section        canonical
    /// Key            canonical
    /// StringFormat, PluralRules, FormatProvider, Logger, CulturePolicy   hints
    /// ```
    pub fn standard() -> Self {
        let culture = regex!(r"^([A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*)?$");

        let mut table = Self::empty();
        table
            .register(ParameterInfo::new("Culture", Classification::NonCanonical, 0).with_regex(culture))
            .register(ParameterInfo::new("Location", Classification::Canonical, 10))
            .register(ParameterInfo::new("Assembly", Classification::NonCanonical, 20))
            .register(ParameterInfo::new("BaseName", Classification::Canonical, 30))
            .register(ParameterInfo::new("Resource", Classification::Canonical, 40))
            .register(ParameterInfo::new("Type", Classification::NonCanonical, 50))
            .register(ParameterInfo::new("Section", Classification::Canonical, 60))
            .register(ParameterInfo::new("Key", Classification::Canonical, 70))
            .register(ParameterInfo::new("StringFormat", Classification::Hint, 100))
            .register(ParameterInfo::new("PluralRules", Classification::Hint, 110))
            .register(ParameterInfo::new("FormatProvider", Classification::Hint, 120))
            .register(ParameterInfo::new("Logger", Classification::Hint, 130))
            .register(ParameterInfo::new("CulturePolicy", Classification::Hint, 140));
        table
    }

    /// Classification used for names missing from the table.
    pub fn with_fallback(mut self, fallback: Classification) -> Self {
        self.fallback = fallback;
        self
    }

    /// Add or replace the registration for `info.name`.
    pub fn register(&mut self, info: ParameterInfo) -> &mut Self {
        tracing::debug!(name = %info.name, classification = ?info.classification, "registering parameter");
        self.infos.insert(info.name.clone(), info);
        self
    }

    pub fn info(&self, name: &str) -> Option<&ParameterInfo> {
        self.infos.get(name)
    }

    pub fn classify(&self, name: &str) -> Classification {
        self.info(name).map_or(self.fallback, |info| info.classification)
    }

    pub fn sort_order(&self, name: &str) -> i32 {
        self.info(name).map_or(UNREGISTERED_ORDER, |info| info.sort_order)
    }

    /// Check `value` against the validation pattern registered for `name`.
    pub fn validate(&self, name: &str, value: &str) -> Result<()> {
        match self.info(name).and_then(|info| info.pattern.as_ref()) {
            Some(pattern) if !pattern.is_match(value) => {
                Err(Error::InvalidValue { name: name.to_string(), value: value.to_string() })
            }
            _ => Ok(()),
        }
    }

    /// Classify, validate and append a parameter to `previous`.
    pub fn append<'v>(
        &self,
        previous: Option<&NodeRef>,
        name: &str,
        value: impl Into<Option<&'v str>>,
    ) -> Result<NodeRef> {
        let value = value.into();
        if let Some(value) = value {
            self.validate(name, value)?;
        }
        let classification = self.classify(name);
        tracing::trace!(name, ?value, ?classification, "append");
        ParameterNode::extend(previous, name, value, classification)
    }

    /// Order parameters for presentation: sort order, then name, then
    /// occurrence.
    pub fn sort_parameters(&self, params: &mut [EffectiveParameter<'_>]) {
        params.sort_by(|a, b| {
            self.sort_order(a.name)
                .cmp(&self.sort_order(b.name))
                .then_with(|| a.name.cmp(b.name))
                .then_with(|| a.occurrence.cmp(&b.occurrence))
        });
    }
}
