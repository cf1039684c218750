//! Typed operand values
//!
//! A `TypedValue` is a raw operand after coercion to its column's declared
//! type. `Display` renders it as an inline SQL literal.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::coerce::{format_duration, format_timestamp, Period};
use crate::relation::FieldType;

/// An operand coerced to a column type
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Decimal(Decimal),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Duration(Duration),
    Period(Period),
    Json(String),
}

impl TypedValue {
    /// The column type this value belongs to
    pub fn field_type(&self) -> FieldType {
        match self {
            TypedValue::Text(_) => FieldType::Text,
            TypedValue::Integer(_) => FieldType::Integer,
            TypedValue::Real(_) => FieldType::Real,
            TypedValue::Decimal(_) => FieldType::Decimal,
            TypedValue::Boolean(_) => FieldType::Boolean,
            TypedValue::Timestamp(_) => FieldType::Timestamp,
            TypedValue::Date(_) => FieldType::Date,
            TypedValue::Duration(_) => FieldType::Duration,
            TypedValue::Period(_) => FieldType::Period,
            TypedValue::Json(_) => FieldType::Json,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) | TypedValue::Json(s) => Some(s),
            _ => None,
        }
    }
}

/// Write a single-quoted string literal, doubling embedded quotes
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    f.write_str(&s.replace('\'', "''"))?;
    f.write_str("'")
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Text(s) | TypedValue::Json(s) => write_quoted(f, s),
            TypedValue::Integer(i) => write!(f, "{}", i),
            // Debug keeps a fractional part on whole values ("5.0")
            TypedValue::Real(r) => write!(f, "{:?}", r),
            TypedValue::Decimal(d) => write!(f, "{}", d),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::Timestamp(ts) => write!(f, "timestamp '{}'", format_timestamp(ts)),
            TypedValue::Date(d) => write!(f, "date '{}'", d.format("%Y-%m-%d")),
            TypedValue::Duration(d) => write_quoted(f, &format_duration(d)),
            TypedValue::Period(p) => write_quoted(f, &p.to_string()),
        }
    }
}
