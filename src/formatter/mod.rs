//! Rendering templates with bound values

mod value;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

pub use value::Value;

use crate::error::FormatError;
use crate::template::{Part, Template};

/// A name → value mapping the formatter can read from
pub trait ValueLookup {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> ValueLookup for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl ValueLookup for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Template {
    /// Render the template, substituting each parameter with its value
    ///
    /// A template without parameters is returned as written and `values` is
    /// not read. A parameter whose name is missing from `values` is an
    /// error; a [`Value::Null`] renders as nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use unformat::{Template, Value};
    ///
    /// let template = Template::parse("order/{id:D6}/total/{amount:F2}").unwrap();
    /// let values = HashMap::from([
    ///     ("id".to_string(), Value::from(42)),
    ///     ("amount".to_string(), Value::from(9.5)),
    /// ]);
    ///
    /// assert_eq!(template.format(&values).unwrap(), "order/000042/total/9.50");
    /// ```
    pub fn format<V: ValueLookup + ?Sized>(&self, values: &V) -> Result<String, FormatError> {
        if !self.has_parameters() {
            return Ok(self.source().to_string());
        }

        let mut out = String::with_capacity(self.source().len());
        for part in self.parts() {
            match part {
                Part::Literal(literal) => out.push_str(literal.text()),
                Part::Parameter(parameter) => {
                    let value = values.lookup(parameter.name()).ok_or_else(|| {
                        FormatError::MissingValue {
                            name: parameter.name().to_string(),
                        }
                    })?;

                    let rendered = value.render(parameter.format_spec()).ok_or_else(|| {
                        FormatError::UnsupportedSpec {
                            name: parameter.name().to_string(),
                            spec: parameter.format_spec().unwrap_or_default().to_string(),
                            kind: value.kind(),
                        }
                    })?;
                    out.push_str(&rendered);
                }
            }
        }
        Ok(out)
    }
}
