//! Operand coercion
//!
//! Converts a raw operand string into the declared type of its column.
//! Parsing is locale independent. Decimal columns keep every digit of the
//! operand; no value passes through a float on its way there.

mod temporal;

pub use temporal::{
    format_duration, format_timestamp, parse_date, parse_duration, parse_period,
    parse_timestamp, Period,
};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::condition::TypedValue;
use crate::relation::FieldType;

/// Most significant digits a decimal operand may carry
const DECIMAL_MAX_DIGITS: usize = 28;

/// Operand did not match the grammar of its column type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' is not a valid {expected} literal: {reason}")]
pub struct CoercionError {
    pub expected: FieldType,
    pub raw: String,
    pub reason: String,
}

impl CoercionError {
    fn new(expected: FieldType, raw: &str, reason: impl Into<String>) -> Self {
        Self {
            expected,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Coerce one raw operand to `field_type`
pub fn coerce(field_type: FieldType, raw: &str) -> Result<TypedValue, CoercionError> {
    let fail = |reason: String| CoercionError::new(field_type, raw, reason);

    match field_type {
        FieldType::Text => Ok(TypedValue::Text(raw.to_string())),
        FieldType::Json => Ok(TypedValue::Json(raw.to_string())),
        FieldType::Integer => raw
            .parse::<i64>()
            .map(TypedValue::Integer)
            .map_err(|e| fail(e.to_string())),
        FieldType::Real => parse_real(raw).map(TypedValue::Real).map_err(fail),
        FieldType::Decimal => parse_decimal(raw).map(TypedValue::Decimal).map_err(fail),
        FieldType::Boolean => parse_boolean(raw).map(TypedValue::Boolean).map_err(fail),
        FieldType::Timestamp => parse_timestamp(raw).map(TypedValue::Timestamp).map_err(fail),
        FieldType::Date => parse_date(raw).map(TypedValue::Date).map_err(fail),
        FieldType::Duration => parse_duration(raw).map(TypedValue::Duration).map_err(fail),
        FieldType::Period => parse_period(raw).map(TypedValue::Period).map_err(fail),
    }
}

/// Coerce every operand in order, stopping at the first failure
pub fn coerce_all(field_type: FieldType, raws: &[String]) -> Result<Vec<TypedValue>, CoercionError> {
    raws.iter().map(|raw| coerce(field_type, raw)).collect()
}

fn parse_real(raw: &str) -> Result<f64, String> {
    let value = raw.parse::<f64>().map_err(|e| e.to_string())?;
    if !value.is_finite() {
        return Err("value must be finite".to_string());
    }
    Ok(value)
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    if raw.contains('_') {
        return Err("digit separators are not allowed".to_string());
    }

    let mantissa = raw.split(['e', 'E']).next().unwrap_or(raw);
    let digits = mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|c| *c == '0')
        .count();
    if digits > DECIMAL_MAX_DIGITS {
        return Err(format!(
            "more than {} significant digits",
            DECIMAL_MAX_DIGITS
        ));
    }

    let parsed = if raw.contains(['e', 'E']) {
        Decimal::from_scientific(raw)
    } else {
        Decimal::from_str_exact(raw)
    };
    parsed.map_err(|e| e.to_string())
}

fn parse_boolean(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Ok(false),
        _ => Err("expected one of true/false, t/f, 1/0, yes/no, y/n, on/off".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passes_verbatim() {
        assert_eq!(coerce(FieldType::Text, "").unwrap(), TypedValue::Text(String::new()));
        assert_eq!(
            coerce(FieldType::Text, " 5% ").unwrap(),
            TypedValue::Text(" 5% ".into())
        );
    }

    #[test]
    fn test_integer() {
        assert_eq!(coerce(FieldType::Integer, "+42").unwrap(), TypedValue::Integer(42));
        assert_eq!(coerce(FieldType::Integer, "-7").unwrap(), TypedValue::Integer(-7));
        assert!(coerce(FieldType::Integer, "5.5").is_err());
        assert!(coerce(FieldType::Integer, "1,000").is_err());
        assert!(coerce(FieldType::Integer, "99999999999999999999").is_err());
    }

    #[test]
    fn test_real() {
        assert_eq!(coerce(FieldType::Real, "5.5").unwrap(), TypedValue::Real(5.5));
        assert_eq!(coerce(FieldType::Real, "1e3").unwrap(), TypedValue::Real(1000.0));
        assert!(coerce(FieldType::Real, "NaN").is_err());
        assert!(coerce(FieldType::Real, "inf").is_err());
        assert!(coerce(FieldType::Real, "5,5").is_err());
    }

    #[test]
    fn test_decimal_keeps_digits() {
        for raw in ["55.24681579", "0.10", "-1234567890.0987654321", "7"] {
            let value = coerce(FieldType::Decimal, raw).unwrap();
            assert_eq!(value.to_string(), raw);
        }
    }

    #[test]
    fn test_decimal_scientific() {
        let value = coerce(FieldType::Decimal, "1.5e2").unwrap();
        assert_eq!(value, TypedValue::Decimal(Decimal::from(150)));
        assert!(coerce(FieldType::Decimal, "12abc").is_err());
    }

    #[test]
    fn test_decimal_rejects_lossy_operands() {
        // 29 significant digits would be rounded
        let err = coerce(FieldType::Decimal, "0.12345678901234567890123456789").unwrap_err();
        assert!(err.reason.contains("significant digits"));

        // Scale beyond 28 underflows
        assert!(coerce(FieldType::Decimal, "0.00000000000000000000000000001").is_err());
        assert!(coerce(FieldType::Decimal, "1.2345678901234567890123456789e2").is_err());

        let max = "0.1234567890123456789012345678";
        assert_eq!(coerce(FieldType::Decimal, max).unwrap().to_string(), max);
    }

    #[test]
    fn test_decimal_rejects_digit_separators() {
        for raw in ["1_000", "1_000.5", "1.000_5"] {
            assert!(coerce(FieldType::Decimal, raw).is_err(), "accepted {}", raw);
        }
    }

    #[test]
    fn test_boolean() {
        assert_eq!(coerce(FieldType::Boolean, "T").unwrap(), TypedValue::Boolean(true));
        assert_eq!(coerce(FieldType::Boolean, "off").unwrap(), TypedValue::Boolean(false));
        assert!(coerce(FieldType::Boolean, "maybe").is_err());
    }

    #[test]
    fn test_temporal_types() {
        assert!(matches!(
            coerce(FieldType::Timestamp, "2020-04-05T08:00:00").unwrap(),
            TypedValue::Timestamp(_)
        ));
        assert!(matches!(
            coerce(FieldType::Date, "2020-04-05").unwrap(),
            TypedValue::Date(_)
        ));
        assert_eq!(
            coerce(FieldType::Period, "P1Y2M3D").unwrap(),
            TypedValue::Period(Period::new(1, 2, 3))
        );
        assert!(matches!(
            coerce(FieldType::Duration, "PT15M").unwrap(),
            TypedValue::Duration(_)
        ));
    }

    #[test]
    fn test_json_passes_verbatim() {
        assert_eq!(
            coerce(FieldType::Json, "{\"a\":1}").unwrap(),
            TypedValue::Json("{\"a\":1}".into())
        );
    }

    #[test]
    fn test_error_carries_context() {
        let err = coerce(FieldType::Timestamp, "yesterday").unwrap_err();
        assert_eq!(err.expected, FieldType::Timestamp);
        assert_eq!(err.raw, "yesterday");
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn test_coerce_all_preserves_order() {
        let raws = vec!["5".to_string(), "7".to_string(), "10".to_string()];
        let values = coerce_all(FieldType::Integer, &raws).unwrap();
        assert_eq!(
            values,
            vec![
                TypedValue::Integer(5),
                TypedValue::Integer(7),
                TypedValue::Integer(10)
            ]
        );

        let bad = vec!["5".to_string(), "x".to_string()];
        assert_eq!(coerce_all(FieldType::Integer, &bad).unwrap_err().raw, "x");
    }
}
