//! ISO-8601 temporal literals
//!
//! Grammars accepted:
//! - timestamp: `YYYY-MM-DDThh:mm:ss[.fffffffff]`
//! - date: `YYYY-MM-DD` (or a timestamp, whose date part is kept)
//! - duration: `[-]PnDTnHnMn.nS`
//! - period: `[-]PnYnMnWnD`

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use regex::{Captures, Regex};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

static DURATION_PATTERN: OnceLock<Regex> = OnceLock::new();
static PERIOD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn duration_pattern() -> &'static Regex {
    DURATION_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^([-+]?)P(?:([-+]?[0-9]+)D)?(T(?:([-+]?[0-9]+)H)?(?:([-+]?[0-9]+)M)?(?:([-+]?[0-9]+)(?:[.,]([0-9]{0,9}))?S)?)?$",
        )
        .expect("duration pattern compiles")
    })
}

fn period_pattern() -> &'static Regex {
    PERIOD_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^([-+]?)P(?:([-+]?[0-9]+)Y)?(?:([-+]?[0-9]+)M)?(?:([-+]?[0-9]+)W)?(?:([-+]?[0-9]+)D)?$",
        )
        .expect("period pattern compiles")
    })
}

/// A date-based amount of time in years, months and days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}

/// Parse a local date-time literal
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DDThh:mm:ss[.f] ({})", e))
}

/// Parse a date literal, accepting a full timestamp as well
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| parse_timestamp(raw).map(|ts| ts.date()))
        .map_err(|_| "expected YYYY-MM-DD or YYYY-MM-DDThh:mm:ss[.f]".to_string())
}

/// Optional numeric capture, zero when the component is absent
fn int_group<T: FromStr + Default>(caps: &Captures<'_>, idx: usize) -> Result<T, String> {
    match caps.get(idx) {
        Some(m) => m
            .as_str()
            .parse::<T>()
            .map_err(|_| format!("component '{}' out of range", m.as_str())),
        None => Ok(T::default()),
    }
}

/// Parse an ISO-8601 time-based duration
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    const GRAMMAR: &str = "expected ISO-8601 duration [-]PnDTnHnMn.nS";

    let caps = duration_pattern()
        .captures(raw)
        .ok_or_else(|| GRAMMAR.to_string())?;

    let has_day = caps.get(2).is_some();
    let has_time_marker = caps.get(3).is_some();
    let has_time_part = caps.get(4).is_some() || caps.get(5).is_some() || caps.get(6).is_some();
    if (!has_day && !has_time_part) || (has_time_marker && !has_time_part) {
        return Err(GRAMMAR.to_string());
    }

    let days: i64 = int_group(&caps, 2)?;
    let hours: i64 = int_group(&caps, 4)?;
    let minutes: i64 = int_group(&caps, 5)?;
    let seconds: i64 = int_group(&caps, 6)?;

    let overflow = || "duration out of range".to_string();
    let total = days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|d| hours.checked_mul(SECONDS_PER_HOUR).and_then(|h| d.checked_add(h)))
        .and_then(|t| minutes.checked_mul(SECONDS_PER_MINUTE).and_then(|m| t.checked_add(m)))
        .and_then(|t| t.checked_add(seconds))
        .ok_or_else(overflow)?;

    let mut nanos: i64 = match caps.get(7) {
        Some(m) if !m.as_str().is_empty() => {
            let digits = format!("{:0<9}", m.as_str());
            digits
                .parse::<i64>()
                .map_err(|_| format!("fraction '{}' out of range", m.as_str()))?
        }
        _ => 0,
    };
    if caps.get(6).is_some_and(|m| m.as_str().starts_with('-')) {
        nanos = -nanos;
    }

    let duration = Duration::try_seconds(total)
        .and_then(|d| d.checked_add(&Duration::nanoseconds(nanos)))
        .ok_or_else(overflow)?;

    if &caps[1] == "-" {
        Ok(-duration)
    } else {
        Ok(duration)
    }
}

/// Parse an ISO-8601 date-based period
pub fn parse_period(raw: &str) -> Result<Period, String> {
    const GRAMMAR: &str = "expected ISO-8601 period [-]PnYnMnWnD";

    let caps = period_pattern()
        .captures(raw)
        .ok_or_else(|| GRAMMAR.to_string())?;

    if (2..=5).all(|idx| caps.get(idx).is_none()) {
        return Err(GRAMMAR.to_string());
    }

    let years: i32 = int_group(&caps, 2)?;
    let months: i32 = int_group(&caps, 3)?;
    let weeks: i32 = int_group(&caps, 4)?;
    let days: i32 = int_group(&caps, 5)?;

    let days = weeks
        .checked_mul(7)
        .and_then(|w| w.checked_add(days))
        .ok_or_else(|| "period out of range".to_string())?;

    if &caps[1] != "-" {
        return Ok(Period::new(years, months, days));
    }
    match (years.checked_neg(), months.checked_neg(), days.checked_neg()) {
        (Some(y), Some(m), Some(d)) => Ok(Period::new(y, m, d)),
        _ => Err("period out of range".to_string()),
    }
}

/// Render a timestamp as `YYYY-MM-DD hh:mm:ss.f`
///
/// The fraction keeps at least one digit and drops trailing zeros.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    let fraction = match ts.nanosecond() {
        0 => "0".to_string(),
        nanos => {
            let digits = format!("{:09}", nanos);
            digits.trim_end_matches('0').to_string()
        }
    };
    format!("{}.{}", ts.format("%Y-%m-%d %H:%M:%S"), fraction)
}

/// Render a duration in ISO-8601 hours, minutes and seconds
pub fn format_duration(duration: &Duration) -> String {
    if duration.is_zero() {
        return "PT0S".to_string();
    }

    let negative = *duration < Duration::zero();
    let abs = if negative { -*duration } else { *duration };

    let total = abs.num_seconds();
    let nanos = abs.subsec_nanos();
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total % SECONDS_PER_MINUTE;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str("PT");
    if hours != 0 {
        out.push_str(&format!("{}H", hours));
    }
    if minutes != 0 {
        out.push_str(&format!("{}M", minutes));
    }
    if seconds != 0 || nanos != 0 {
        out.push_str(&seconds.to_string());
        if nanos != 0 {
            let digits = format!("{:09}", nanos);
            out.push('.');
            out.push_str(digits.trim_end_matches('0'));
        }
        out.push('S');
    }
    out
}
