//! Lexer for template sources using logos
//!
//! A template is cut into maximal runs of `{`, maximal runs of `}` and the
//! text between them. The length of a brace run decides whether it is an
//! escape or structural, so runs are never split here.

use logos::Logos;

use crate::error::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[regex(r"\{+")]
    OpenRun,

    #[regex(r"\}+")]
    CloseRun,

    #[regex(r"[^{}]+")]
    Text,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    // Every character belongs to one of the three patterns, so the error arm
    // is never taken; it degrades to text if it ever is.
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Text), span))
}
