//! Values bound to parameters at format time
//!
//! Format specifiers follow the invariant-culture conventions commonly used
//! for composite formatting: a letter, optionally followed by a precision
//! (`D8`, `X4`, `F2`, `N0`, `E3`, `P1`, `C2`). Dates take a strftime pattern
//! and UUIDs one of `N`, `D`, `B`, `P`, `X`. Strings and booleans ignore any
//! specifier.
//!
//! Every signed integer is held as `i64`, so hex output of a negative value
//! is the 64-bit two's complement whatever type it was converted from:
//! `X` on `-1i32` gives sixteen `F`s. Currency uses the invariant symbol `¤`.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// A value that can be substituted for a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Renders as an empty string
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Guess a value from text: integer, then float, else string
    pub fn infer(text: &str) -> Self {
        if let Ok(int) = text.parse::<i64>() {
            return Value::Int(int);
        }
        if let Ok(uint) = text.parse::<u64>() {
            return Value::UInt(uint);
        }
        match text.parse::<f64>() {
            Ok(float) if float.is_finite() => Value::Float(float),
            _ => Value::Str(text.to_string()),
        }
    }

    /// Human-readable name of the value's kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Uuid(_) => "uuid",
            Value::Date(_) => "date",
            Value::DateTime(_) => "date-time",
        }
    }

    /// Render the value, optionally through a format specifier
    ///
    /// Returns `None` when the specifier does not apply to this kind of value.
    pub fn render(&self, spec: Option<&str>) -> Option<String> {
        let Some(spec) = spec else {
            return Some(self.default_text());
        };

        match self {
            Value::Null => Some(String::new()),
            Value::Bool(_) | Value::Str(_) => Some(self.default_text()),
            Value::Int(v) => format_integer(i128::from(*v), *v as u64, spec),
            Value::UInt(v) => format_integer(i128::from(*v), *v, spec),
            Value::Float(v) => {
                let (kind, precision) = numeric_spec(spec)?;
                format_real(*v, kind, precision)
            }
            Value::Uuid(v) => format_uuid(v, spec),
            Value::Date(v) => strftime(v.format(spec)),
            Value::DateTime(v) => strftime(v.format(spec)),
        }
    }

    fn default_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::UInt(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Str(v) => v.clone(),
            Value::Uuid(v) => v.hyphenated().to_string(),
            Value::Date(v) => v.to_string(),
            Value::DateTime(v) => v.to_string(),
        }
    }
}

/// Split `X4` into `('X', Some(4))`
fn numeric_spec(spec: &str) -> Option<(char, Option<usize>)> {
    let mut chars = spec.chars();
    let kind = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let digits = chars.as_str();

    if digits.is_empty() {
        return Some((kind, None));
    }
    if digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|precision| (kind, Some(precision)))
}

/// `bits` is the two's complement pattern used for hex output
fn format_integer(value: i128, bits: u64, spec: &str) -> Option<String> {
    let (kind, precision) = numeric_spec(spec)?;
    let width = precision.unwrap_or(0);

    match kind {
        'D' | 'd' => {
            let sign = if value < 0 { "-" } else { "" };
            Some(format!("{}{:0>width$}", sign, value.unsigned_abs(), width = width))
        }
        'X' => Some(format!("{:0>width$X}", bits, width = width)),
        'x' => Some(format!("{:0>width$x}", bits, width = width)),
        'G' | 'g' => Some(value.to_string()),
        'F' | 'f' => Some(fixed_integer(value, precision.unwrap_or(2), false)),
        'N' | 'n' => Some(fixed_integer(value, precision.unwrap_or(2), true)),
        'P' | 'p' => Some(format!(
            "{} %",
            fixed_integer(value * 100, precision.unwrap_or(2), true)
        )),
        'C' | 'c' => Some(currency(
            value < 0,
            &fixed_integer(value.abs(), precision.unwrap_or(2), true),
        )),
        _ => format_real(value as f64, kind, precision),
    }
}

/// Integer digits with `precision` zeros as the fraction, without going
/// through `f64`
fn fixed_integer(value: i128, precision: usize, group: bool) -> String {
    let digits = value.unsigned_abs().to_string();
    let zeros = "0".repeat(precision);
    let fraction = (precision > 0).then_some(zeros.as_str());
    join_number(value < 0, &digits, fraction, group)
}

fn format_real(value: f64, kind: char, precision: Option<usize>) -> Option<String> {
    if !value.is_finite() {
        return Some(value.to_string());
    }

    match kind {
        'F' | 'f' => Some(format!("{:.*}", precision.unwrap_or(2), value)),
        'N' | 'n' => Some(grouped(value, precision.unwrap_or(2))),
        'E' | 'e' => exponent(value, precision.unwrap_or(6), kind == 'E'),
        'P' | 'p' => Some(format!("{} %", grouped(value * 100.0, precision.unwrap_or(2)))),
        'C' | 'c' => Some(currency(value < 0.0, &grouped(value.abs(), precision.unwrap_or(2)))),
        'G' | 'g' => Some(value.to_string()),
        _ => None,
    }
}

/// Fixed-point with `,` between groups of three integer digits
fn grouped(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    join_number(value < 0.0, integer, fraction, true)
}

fn join_number(negative: bool, integer: &str, fraction: Option<&str>, group: bool) -> String {
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if group && i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// `amount` is already rendered without its sign
fn currency(negative: bool, amount: &str) -> String {
    format!("{}¤{}", if negative { "-" } else { "" }, amount)
}

/// `1.234568E+003` style: signed exponent padded to three digits
fn exponent(value: f64, precision: usize, upper: bool) -> Option<String> {
    let rendered = format!("{:.*e}", precision, value);
    let (mantissa, exp) = rendered.split_once('e')?;
    let exp: i32 = exp.parse().ok()?;

    Some(format!(
        "{}{}{}{:03}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exp < 0 { '-' } else { '+' },
        exp.unsigned_abs()
    ))
}

fn format_uuid(value: &Uuid, spec: &str) -> Option<String> {
    match spec {
        "N" | "n" => Some(value.simple().to_string()),
        "D" | "d" => Some(value.hyphenated().to_string()),
        "B" | "b" => Some(value.braced().to_string()),
        "P" | "p" => Some(format!("({})", value.hyphenated())),
        "X" | "x" => {
            let (a, b, c, d) = value.as_fields();
            let mut out = format!("{{0x{:08x},0x{:04x},0x{:04x},{{", a, b, c);
            for (i, byte) in d.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "0x{:02x}", byte);
            }
            out.push_str("}}");
            Some(out)
        }
        _ => None,
    }
}

/// Chrono reports bad patterns, or fields the value lacks, as a formatting error
fn strftime(formatted: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

macro_rules! value_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )+
    };
}

value_from!(Bool: bool);
value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(Str: String, &str);
value_from!(Uuid: Uuid);
value_from!(Date: NaiveDate);
value_from!(DateTime: NaiveDateTime);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
