//! Parser for template definitions

pub mod lexer;
mod scanner;

pub use scanner::parse;
