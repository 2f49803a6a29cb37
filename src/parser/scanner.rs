//! Brace-run automaton that turns template tokens into parts
//!
//! The scanner is either idle (collecting literal text) or inside a
//! parameter. Outside a parameter, a run of `k` braces stands for `k / 2`
//! literal braces; an odd `{` run additionally opens a parameter, and an odd
//! `}` run is an error. Inside a parameter the first `}` closes it and the
//! rest of that run is read as if idle.

use crate::error::{BraceMismatch, Span, TemplateError};
use crate::template::{Literal, Parameter, Part, Template};

use super::lexer::{lex, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Byte offset of the opening brace
    InParameter(usize),
}

struct Scanner<'a> {
    source: &'a str,
    state: State,
    parts: Vec<Part>,
    parameter_count: usize,
    /// Literal text with escapes already collapsed
    pending: String,
    /// Where the pending literal started in the source
    pending_start: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            state: State::Idle,
            parts: Vec::new(),
            parameter_count: 0,
            pending: String::new(),
            pending_start: 0,
        }
    }

    fn run(mut self) -> Result<Template, TemplateError> {
        for (token, span) in lex(self.source) {
            match token {
                Token::OpenRun => self.open_run(span)?,
                Token::CloseRun => self.close_run(span)?,
                Token::Text => {
                    // Parameter bodies are sliced from the source on close
                    if self.state == State::Idle {
                        self.pending.push_str(&self.source[span]);
                    }
                }
            }
        }

        if let State::InParameter(open) = self.state {
            return Err(TemplateError::unbalanced(
                BraceMismatch::OpenedNeverClosed,
                open..open + 1,
            ));
        }

        let end = self.source.len();
        self.flush_literal(end)?;

        Ok(Template::new(
            self.source.to_string(),
            self.parts,
            self.parameter_count,
        ))
    }

    fn open_run(&mut self, span: Span) -> Result<(), TemplateError> {
        if let State::InParameter(open) = self.state {
            return Err(TemplateError::unbalanced(
                BraceMismatch::OpenedNeverClosed,
                open..span.start + 1,
            ));
        }

        let count = span.len();
        push_braces(&mut self.pending, '{', count / 2);

        if count % 2 == 1 {
            let open = span.end - 1;
            self.flush_literal(open)?;
            self.state = State::InParameter(open);
        }
        Ok(())
    }

    fn close_run(&mut self, span: Span) -> Result<(), TemplateError> {
        match self.state {
            State::Idle => self.idle_close_run(span),
            State::InParameter(open) => {
                let close = span.start;
                self.close_parameter(open, close)?;

                if span.len() > 1 {
                    self.idle_close_run(close + 1..span.end)?;
                }
                Ok(())
            }
        }
    }

    fn idle_close_run(&mut self, span: Span) -> Result<(), TemplateError> {
        let count = span.len();
        if count % 2 == 1 {
            return Err(TemplateError::unbalanced(
                BraceMismatch::ClosedNeverOpened,
                span,
            ));
        }
        push_braces(&mut self.pending, '}', count / 2);
        Ok(())
    }

    fn close_parameter(&mut self, open: usize, close: usize) -> Result<(), TemplateError> {
        let span = open..close + 1;

        if matches!(self.parts.last(), Some(Part::Parameter(_))) {
            return Err(TemplateError::ConsecutiveParameters { span: Some(span) });
        }

        let body = &self.source[open + 1..close];
        if body.trim().is_empty() {
            return Err(TemplateError::EmptyParameter { span });
        }

        let parameter = Parameter::new(body).map_err(|e| e.at(span))?;
        self.parts.push(Part::Parameter(parameter));
        self.parameter_count += 1;

        self.state = State::Idle;
        self.pending_start = close + 1;
        Ok(())
    }

    fn flush_literal(&mut self, end: usize) -> Result<(), TemplateError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let text = std::mem::take(&mut self.pending);
        let literal = Literal::new(text).map_err(|e| e.at(self.pending_start..end))?;
        self.parts.push(Part::Literal(literal));
        Ok(())
    }
}

fn push_braces(out: &mut String, brace: char, count: usize) {
    out.extend(std::iter::repeat(brace).take(count));
}

/// Parse a template source into a [`Template`]
pub fn parse(source: &str) -> Result<Template, TemplateError> {
    if source.trim().is_empty() {
        return Err(TemplateError::BlankTemplate);
    }

    let result = Scanner::new(source).run();
    match &result {
        Ok(template) => tracing::trace!(
            template = source,
            parts = template.parts().len(),
            parameters = template.parameter_count(),
            "parsed template"
        ),
        Err(err) => tracing::debug!(template = source, error = %err, "rejected template"),
    }
    result
}
