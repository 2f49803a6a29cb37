//! Unformat - parse, match and render placeholder templates
//!
//! A template is a string with named placeholders, such as
//! `category/delete/{Id}/{Value}`. This library parses such definitions,
//! extracts placeholder values from concrete strings, and renders templates
//! back into strings from bound values.
//!
//! Braces are escaped by doubling them: `{{` and `}}` stand for literal `{`
//! and `}`. A placeholder may carry a format specifier after its last colon,
//! as in `{amount:F2}`.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use unformat::{parse, Value};
//!
//! let template = parse("users/{Id}/posts/{Slug}").unwrap();
//!
//! assert!(template.matches("users/42/posts/hello-world"));
//! let bindings = template.unformat("users/42/posts/hello-world").unwrap();
//! assert_eq!(bindings["Slug"], "hello-world");
//!
//! let values = HashMap::from([
//!     ("Id".to_string(), Value::from(7)),
//!     ("Slug".to_string(), Value::from("intro")),
//! ]);
//! assert_eq!(template.format(&values).unwrap(), "users/7/posts/intro");
//! ```

pub mod error;
pub mod formatter;
pub mod matcher;
pub mod parser;
pub mod template;

pub use error::{BraceMismatch, FormatError, Span, TemplateError};
pub use formatter::{Value, ValueLookup};
pub use matcher::{Bindings, ConfigError, MatchOptions};
pub use parser::parse;
pub use template::{Literal, Parameter, Part, Template};
