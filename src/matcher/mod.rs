//! Matching concrete strings against templates
//!
//! Matching is a single greedy pass. Each literal must appear exactly where
//! the previous part ended, and a parameter extends up to the first
//! occurrence of the literal that follows it. Earlier decisions are never
//! revisited, so a separator that also occurs inside a parameter value
//! splits the value at its first occurrence.
//!
//! Text after the final literal is not checked: once every part has been
//! consumed the match succeeds, so `a/{Id}/end` accepts `a/1/endXYZ`. A
//! template without parameters is the exception and must equal the candidate.

mod config;

use std::collections::BTreeMap;

pub use config::{ConfigError, MatchOptions};

use crate::template::{Part, Template};

/// Parameter names bound to the substrings they matched
pub type Bindings = BTreeMap<String, String>;

impl Template {
    /// Check whether `candidate` matches this template
    pub fn matches(&self, candidate: &str) -> bool {
        self.unformat(candidate).is_some()
    }

    /// Extract parameter values from `candidate` with default options
    ///
    /// Returns `None` when the string does not match, and an empty map when
    /// it matches a template without parameters.
    pub fn unformat(&self, candidate: &str) -> Option<Bindings> {
        self.unformat_with(candidate, &MatchOptions::default())
    }

    /// Extract parameter values from `candidate`
    pub fn unformat_with(&self, candidate: &str, options: &MatchOptions) -> Option<Bindings> {
        let result = unformat(self, candidate, options);
        if result.is_none() {
            tracing::trace!(template = self.source(), candidate, "no match");
        }
        result
    }
}

fn unformat(template: &Template, candidate: &str, options: &MatchOptions) -> Option<Bindings> {
    let mut bindings = Bindings::new();

    if !template.has_parameters() {
        return (candidate == template.source()).then_some(bindings);
    }

    let parts = template.parts();
    let mut pos = 0;

    for (i, part) in parts.iter().enumerate() {
        match part {
            Part::Literal(literal) => {
                if !candidate[pos..].starts_with(literal.text()) {
                    return None;
                }
                pos += literal.text().len();
            }
            Part::Parameter(parameter) => {
                let value = match parts.get(i + 1) {
                    Some(next) => {
                        let end = pos + candidate[pos..].find(next.value())?;
                        let value = &candidate[pos..end];
                        if value.trim().is_empty() {
                            return None;
                        }
                        pos = end;
                        value
                    }
                    None => {
                        let value = &candidate[pos..];
                        if value.trim().is_empty() && !options.allow_blank_tail {
                            return None;
                        }
                        pos = candidate.len();
                        value
                    }
                };

                let value = if options.trim_values {
                    value.trim()
                } else {
                    value
                };

                bind(&mut bindings, parameter.name(), value)?;
            }
        }
    }

    Some(bindings)
}

/// Record a binding; a repeated name must bind the same value
fn bind(bindings: &mut Bindings, name: &str, value: &str) -> Option<()> {
    match bindings.get(name) {
        Some(existing) if existing != value => None,
        Some(_) => Some(()),
        None => {
            bindings.insert(name.to_string(), value.to_string());
            Some(())
        }
    }
}
