//! Error types for template construction and rendering

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in template source
pub type Span = std::ops::Range<usize>;

/// Which side of a parameter was left without a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceMismatch {
    /// `{` with no closing `}`
    OpenedNeverClosed,
    /// `}` with no opening `{`
    ClosedNeverOpened,
}

impl fmt::Display for BraceMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BraceMismatch::OpenedNeverClosed => write!(f, "opened but was never closed"),
            BraceMismatch::ClosedNeverOpened => write!(f, "closed but was never opened"),
        }
    }
}

/// Errors raised while building a [`Template`](crate::Template) or one of its parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template source is empty or whitespace-only
    #[error("template cannot be empty or whitespace")]
    BlankTemplate,

    /// A brace without its partner, or a `{` inside an open parameter
    #[error("parameter {mismatch}")]
    UnbalancedBrace { mismatch: BraceMismatch, span: Span },

    /// Two parameters with nothing to separate them
    #[error("template cannot contain two or more subsequent parameters")]
    ConsecutiveParameters { span: Option<Span> },

    /// `{}` or a parameter whose body is whitespace
    #[error("template cannot contain empty parameters")]
    EmptyParameter { span: Span },

    /// Colon at the start or end of a parameter body
    #[error("parameter '{raw}' has a malformed format specifier")]
    MalformedFormatSpec { raw: String, span: Option<Span> },

    /// Literal or parameter text that is empty or whitespace-only
    #[error("template part cannot be empty or whitespace")]
    BlankPart { span: Option<Span> },

    /// `from_parts` called with no parts
    #[error("template must contain at least one part")]
    NoParts,
}

impl TemplateError {
    pub(crate) fn unbalanced(mismatch: BraceMismatch, span: Span) -> Self {
        Self::UnbalancedBrace { mismatch, span }
    }

    /// Attach a source span to errors raised by part constructors
    pub(crate) fn at(self, span: Span) -> Self {
        match self {
            Self::ConsecutiveParameters { .. } => Self::ConsecutiveParameters { span: Some(span) },
            Self::MalformedFormatSpec { raw, .. } => Self::MalformedFormatSpec {
                raw,
                span: Some(span),
            },
            Self::BlankPart { .. } => Self::BlankPart { span: Some(span) },
            other => other,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UnbalancedBrace { span, .. } | Self::EmptyParameter { span } => Some(span),
            Self::ConsecutiveParameters { span }
            | Self::MalformedFormatSpec { span, .. }
            | Self::BlankPart { span } => span.as_ref(),
            Self::BlankTemplate | Self::NoParts => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn report(&self, source: &str, filename: &str) -> String {
        let span = self.span().cloned().unwrap_or(0..source.len());
        let message = self.to_string();

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("error: {}", message),
        }
    }
}

/// Errors raised while rendering a template with bound values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A parameter name absent from the value mapping
    #[error("no value supplied for parameter '{name}'")]
    MissingValue { name: String },

    /// A format specifier the value kind cannot render
    #[error("format specifier '{spec}' is not supported for {kind} parameter '{name}'")]
    UnsupportedSpec {
        name: String,
        spec: String,
        kind: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbalanced_display() {
        let err = TemplateError::unbalanced(BraceMismatch::ClosedNeverOpened, 3..4);
        assert_eq!(err.to_string(), "parameter closed but was never opened");
        assert_eq!(err.span(), Some(&(3..4)));
    }

    #[test]
    fn test_at_attaches_span() {
        let err = TemplateError::BlankPart { span: None }.at(2..5);
        assert_eq!(err.span(), Some(&(2..5)));

        let err = TemplateError::NoParts.at(0..1);
        assert_eq!(err.span(), None);
    }

    #[test]
    fn test_report_mentions_message() {
        let source = "{A/x";
        let err = TemplateError::unbalanced(BraceMismatch::OpenedNeverClosed, 0..1);
        let report = err.report(source, "template");
        assert!(report.contains("opened but was never closed"));
    }

    #[test]
    fn test_missing_value_display() {
        let err = FormatError::MissingValue {
            name: "Id".to_string(),
        };
        assert!(err.to_string().contains("'Id'"));
    }
}
