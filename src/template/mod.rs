//! Parsed, immutable templates
//!
//! A [`Template`] is built once, by [`Template::parse`] or
//! [`Template::from_parts`], and never changes afterwards. It can be shared
//! between threads and matched or formatted concurrently.
//!
//! # Example
//!
//! ```rust
//! use unformat::Template;
//!
//! let template = Template::parse("category/delete/{Id}/{Value}").unwrap();
//! let bindings = template.unformat("category/delete/00-000/test").unwrap();
//! assert_eq!(bindings["Id"], "00-000");
//! assert_eq!(bindings["Value"], "test");
//! ```

mod part;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub use part::{Literal, Parameter, Part};

use crate::error::TemplateError;

/// A parsed template definition
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
    parameter_count: usize,
}

impl Template {
    pub(crate) fn new(source: String, parts: Vec<Part>, parameter_count: usize) -> Self {
        Self {
            source,
            parts,
            parameter_count,
        }
    }

    /// Parse a template from its source string
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        crate::parser::parse(source)
    }

    /// Build a template from already constructed parts
    ///
    /// The source string is the parts joined back together, with parameter
    /// bodies wrapped in braces and literal text written verbatim. An empty
    /// list and adjacent parameters are rejected.
    pub fn from_parts(parts: Vec<Part>) -> Result<Self, TemplateError> {
        if parts.is_empty() {
            return Err(TemplateError::NoParts);
        }

        if parts
            .windows(2)
            .any(|pair| pair[0].is_parameter() && pair[1].is_parameter())
        {
            return Err(TemplateError::ConsecutiveParameters { span: None });
        }

        let mut source = String::new();
        for part in &parts {
            part.write_source(&mut source);
        }
        let parameter_count = parts.iter().filter(|p| p.is_parameter()).count();

        Ok(Self::new(source, parts, parameter_count))
    }

    /// The template definition as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parts in source order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    pub fn has_parameters(&self) -> bool {
        self.parameter_count > 0
    }

    /// Parameter names in source order; repeated names appear once per use
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Parameter(parameter) => Some(parameter.name()),
            Part::Literal(_) => None,
        })
    }

    /// Part-by-part comparison
    ///
    /// `==` only compares the source string and arity; use this when the
    /// parts themselves must agree.
    pub fn structurally_eq(&self, other: &Template) -> bool {
        self.source == other.source && self.parts == other.parts
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.has_parameters() == other.has_parameters()
            && self.parts.len() == other.parts.len()
            && self.source == other.source
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.has_parameters().hash(state);
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Template", 3)?;
        state.serialize_field("template", &self.source)?;
        state.serialize_field("parts", &self.parts)?;
        state.serialize_field("parameter_count", &self.parameter_count)?;
        state.end()
    }
}
