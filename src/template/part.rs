//! Literal and parameter segments of a template

use std::fmt;

use serde::Serialize;

use crate::error::TemplateError;

/// One segment of a template, in source order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Part {
    /// Text rendered verbatim
    Literal(Literal),
    /// Named placeholder
    Parameter(Parameter),
}

/// Verbatim text between parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Literal {
    text: String,
}

/// Named placeholder with an optional format specifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    raw: String,
    name: String,
    format_spec: Option<String>,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TemplateError::BlankPart { span: None });
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Parameter {
    /// Build a parameter from its body (the text between the braces)
    ///
    /// The body is split on its last `:` into a name and a format specifier.
    /// A colon in the first or last position leaves one side empty and is
    /// rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TemplateError::BlankPart { span: None });
        }

        let (name, format_spec) = match raw.rfind(':') {
            None => (raw.clone(), None),
            Some(colon) if colon == 0 || colon == raw.len() - 1 => {
                return Err(TemplateError::MalformedFormatSpec { raw, span: None });
            }
            Some(colon) => (raw[..colon].to_string(), Some(raw[colon + 1..].to_string())),
        };

        if name.trim().is_empty() {
            return Err(TemplateError::MalformedFormatSpec { raw, span: None });
        }

        Ok(Self {
            raw,
            name,
            format_spec,
        })
    }

    /// Body as written in the template, including any format specifier
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format_spec(&self) -> Option<&str> {
        self.format_spec.as_deref()
    }
}

impl Part {
    /// Create a literal part
    pub fn literal(text: impl Into<String>) -> Result<Self, TemplateError> {
        Literal::new(text).map(Part::Literal)
    }

    /// Create a parameter part from its body
    pub fn parameter(raw: impl Into<String>) -> Result<Self, TemplateError> {
        Parameter::new(raw).map(Part::Parameter)
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Part::Parameter(_))
    }

    /// The part's text: literal text, or the parameter body without braces
    pub fn value(&self) -> &str {
        match self {
            Part::Literal(literal) => literal.text(),
            Part::Parameter(parameter) => parameter.raw(),
        }
    }

    /// Append the part as it would appear in template source
    pub(crate) fn write_source(&self, out: &mut String) {
        match self {
            Part::Literal(literal) => out.push_str(literal.text()),
            Part::Parameter(parameter) => {
                out.push('{');
                out.push_str(parameter.raw());
                out.push('}');
            }
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Literal(literal) => write!(f, "VALUE: \"{}\"", literal.text()),
            Part::Parameter(parameter) => write!(f, "PARAM: \"{{{}}}\"", parameter.raw()),
        }
    }
}
