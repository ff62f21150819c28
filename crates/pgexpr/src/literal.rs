//! Literal quoting service.
//!
//! [`LiteralQuoter`] is the only place in the crate where a scalar [`Value`] is
//! turned into SQL text. Every `Literal` node reaches the output through it.
//!
//! - `NULL` for missing values
//! - `TRUE`/`FALSE` (or `1`/`0`, see [`BooleanStyle`]) for booleans
//! - bare, locale-independent decimal text for numbers
//! - single-quoted text with `'` doubled for strings
//! - `'YYYY-MM-DD HH:MM:SS[.ffffff]'` for timestamps, matching Postgres output

use crate::error::{ExprError, ExprResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;
use std::fmt::Write;
use uuid::Uuid;

/// A scalar value that can appear in a SQL expression as an inline literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    /// Rendered in UTC.
    TimestampTz(DateTime<Utc>),
    /// Rendered as quoted JSON text.
    Json(serde_json::Value),
    Uuid(Uuid),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampTz(_) => "timestamptz",
            Value::Json(_) => "json",
            Value::Uuid(_) => "uuid",
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(_) => "decimal",
        }
    }

    /// Returns `true` for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_value_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::TimestampTz(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// How booleans are spelled by the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanStyle {
    /// `TRUE` / `FALSE`
    #[default]
    Keyword,
    /// `1` / `0`
    Numeric,
}

/// Converts scalar values into dialect-correct SQL literal tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralQuoter {
    boolean_style: BooleanStyle,
}

impl LiteralQuoter {
    /// Create a quoter with the given boolean spelling.
    pub fn new(boolean_style: BooleanStyle) -> Self {
        Self { boolean_style }
    }

    /// The configured boolean spelling.
    pub fn boolean_style(&self) -> BooleanStyle {
        self.boolean_style
    }

    /// Quote a value into a fresh string.
    pub fn quote(&self, value: &Value) -> ExprResult<String> {
        let mut out = String::new();
        self.write_quoted(&mut out, value)?;
        Ok(out)
    }

    /// Append the quoted form of `value` to `out`.
    ///
    /// On error nothing is written.
    pub fn write_quoted(&self, out: &mut String, value: &Value) -> ExprResult<()> {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Bool(b) => out.push_str(match (self.boolean_style, b) {
                (BooleanStyle::Keyword, true) => "TRUE",
                (BooleanStyle::Keyword, false) => "FALSE",
                (BooleanStyle::Numeric, true) => "1",
                (BooleanStyle::Numeric, false) => "0",
            }),
            Value::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(ExprError::unsupported_literal(format!(
                        "non-finite float {f}"
                    )));
                }
                let _ = write!(out, "{f}");
            }
            Value::Text(s) => write_text(out, s)?,
            Value::Date(d) => {
                let _ = write!(out, "'{}'", d.format("%Y-%m-%d"));
            }
            Value::Timestamp(ts) => write_timestamp(out, ts),
            Value::TimestampTz(ts) => write_timestamp(out, &ts.naive_utc()),
            Value::Json(j) => write_text(out, &j.to_string())?,
            Value::Uuid(u) => {
                let _ = write!(out, "'{}'", u.hyphenated());
            }
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(d) => {
                let _ = write!(out, "{d}");
            }
        }
        Ok(())
    }
}

fn write_text(out: &mut String, s: &str) -> ExprResult<()> {
    if s.contains('\0') {
        return Err(ExprError::unsupported_literal(
            "text containing NUL character",
        ));
    }
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    Ok(())
}

fn write_timestamp(out: &mut String, ts: &NaiveDateTime) {
    let _ = write!(out, "'{}", ts.format("%Y-%m-%d %H:%M:%S"));
    // Leap seconds carry nanos >= 1e9.
    let micros = (ts.nanosecond() % 1_000_000_000) / 1_000;
    if micros > 0 {
        let frac = format!("{micros:06}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(v: impl Into<Value>) -> String {
        LiteralQuoter::default().quote(&v.into()).unwrap()
    }

    #[test]
    fn quotes_null_and_none() {
        assert_eq!(quote(Value::Null), "NULL");
        assert_eq!(quote(None::<i32>), "NULL");
    }

    #[test]
    fn quotes_booleans_per_style() {
        assert_eq!(quote(true), "TRUE");
        assert_eq!(quote(false), "FALSE");

        let numeric = LiteralQuoter::new(BooleanStyle::Numeric);
        assert_eq!(numeric.quote(&Value::Bool(true)).unwrap(), "1");
        assert_eq!(numeric.quote(&Value::Bool(false)).unwrap(), "0");
    }

    #[test]
    fn quotes_numbers_bare() {
        assert_eq!(quote(42i32), "42");
        assert_eq!(quote(-1i64), "-1");
        assert_eq!(quote(2.5f64), "2.5");
        assert_eq!(quote(0.1f64), "0.1");
    }

    #[test]
    fn rejects_non_finite_floats() {
        let err = LiteralQuoter::default()
            .quote(&Value::Float(f64::NAN))
            .unwrap_err();
        assert!(err.is_unsupported_literal());
        assert!(
            LiteralQuoter::default()
                .quote(&Value::Float(f64::INFINITY))
                .is_err()
        );
    }

    #[test]
    fn quotes_text_with_doubled_quotes() {
        assert_eq!(quote("foo"), "'foo'");
        assert_eq!(quote("O'Reilly"), "'O''Reilly'");
        assert_eq!(quote("'; DROP TABLE users; --"), "'''; DROP TABLE users; --'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn rejects_nul_in_text() {
        let err = LiteralQuoter::default()
            .quote(&Value::from("a\0b"))
            .unwrap_err();
        assert!(err.is_unsupported_literal());
    }

    #[test]
    fn quotes_dates_and_timestamps() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(quote(d), "'2024-03-09'");

        let ts = d.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(quote(ts), "'2024-03-09 07:05:00'");

        let ts = d.and_hms_micro_opt(7, 5, 0, 120_000).unwrap();
        assert_eq!(quote(ts), "'2024-03-09 07:05:00.12'");

        let ts = d.and_hms_micro_opt(23, 59, 59, 999_999).unwrap();
        assert_eq!(quote(ts), "'2024-03-09 23:59:59.999999'");

        let utc = DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc);
        assert_eq!(quote(utc), "'2024-03-09 23:59:59.999999'");
    }

    #[test]
    fn quotes_json_and_uuid_as_text() {
        assert_eq!(
            quote(serde_json::json!({"a": "it's"})),
            r#"'{"a":"it''s"}'"#
        );
        let id = Uuid::nil();
        assert_eq!(quote(id), "'00000000-0000-0000-0000-000000000000'");
    }
}
