//! Internal helpers for value parsing and positional parameter binding.
//!
//! These utilities are **not** part of the public API. They centralize the
//! conversions so every intent binds its parameters the same way.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::{Amount, ResultStore, StoreError};

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` with or without zero padding (`2024-1-5`) and full
/// RFC 3339 timestamps, whose calendar date is kept.
pub(crate) fn parse_date(value: &str) -> ResultStore<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| StoreError::InvalidDate(format!("{value:?} is not a calendar date")))
}

/// Serde adapter for calendar dates stored as ISO strings.
pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%d";

    pub(crate) fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(FORMAT))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn param(params: &[Value], index: usize) -> ResultStore<&Value> {
    params
        .get(index)
        .ok_or_else(|| StoreError::parameter(index, "missing"))
}

/// A record id: a JSON integer or a numeric string (path segments arrive as text).
pub(crate) fn param_id(params: &[Value], index: usize) -> ResultStore<u64> {
    match param(params, index)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| StoreError::parameter(index, format!("{n} is not a valid id"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| StoreError::parameter(index, format!("{s:?} is not a valid id"))),
        other => Err(StoreError::parameter(
            index,
            format!("expected an id, got {other}"),
        )),
    }
}

pub(crate) fn param_text(params: &[Value], index: usize) -> ResultStore<String> {
    match param(params, index)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(StoreError::parameter(
            index,
            format!("expected text, got {other}"),
        )),
    }
}

/// Optional text: absent, `null` and blank strings all bind to `None`.
pub(crate) fn param_optional_text(params: &[Value], index: usize) -> ResultStore<Option<String>> {
    match params.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(normalize_optional_text(Some(s))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(StoreError::parameter(
            index,
            format!("expected text or null, got {other}"),
        )),
    }
}

/// A non-negative decimal given as a JSON number or a decimal string.
pub(crate) fn param_amount(params: &[Value], index: usize) -> ResultStore<Amount> {
    let amount = match param(params, index)? {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(units), _) => Amount::from_units(units)?,
            (None, Some(value)) => Amount::from_f64(value)?,
            (None, None) => return Err(StoreError::InvalidAmount(format!("{n} is out of range"))),
        },
        Value::String(s) => s.parse()?,
        other => {
            return Err(StoreError::parameter(
                index,
                format!("expected an amount, got {other}"),
            ));
        }
    };
    if amount.is_negative() {
        return Err(StoreError::InvalidAmount(format!(
            "{amount} must not be negative"
        )));
    }
    Ok(amount)
}

pub(crate) fn param_date(params: &[Value], index: usize) -> ResultStore<NaiveDate> {
    match param(params, index)? {
        Value::String(s) => parse_date(s),
        other => Err(StoreError::parameter(
            index,
            format!("expected a date, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dates_parse_padded_unpadded_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05").unwrap(), expected);
        assert_eq!(parse_date("2024-1-5").unwrap(), expected);
        assert_eq!(parse_date("2024-01-05T10:30:00Z").unwrap(), expected);
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn ids_bind_from_numbers_and_numeric_strings() {
        let params = [json!(7), json!("12"), json!("x"), json!(-1)];
        assert_eq!(param_id(&params, 0).unwrap(), 7);
        assert_eq!(param_id(&params, 1).unwrap(), 12);
        assert!(matches!(
            param_id(&params, 2),
            Err(StoreError::InvalidParameter { index: 2, .. })
        ));
        assert!(param_id(&params, 3).is_err());
        assert!(matches!(
            param_id(&params, 4),
            Err(StoreError::InvalidParameter { index: 4, .. })
        ));
    }

    #[test]
    fn optional_text_treats_blank_as_absent() {
        let params = [json!(null), json!("  "), json!(" lunch ")];
        assert_eq!(param_optional_text(&params, 0).unwrap(), None);
        assert_eq!(param_optional_text(&params, 1).unwrap(), None);
        assert_eq!(
            param_optional_text(&params, 2).unwrap(),
            Some("lunch".to_string())
        );
        assert_eq!(param_optional_text(&params, 3).unwrap(), None);
    }

    #[test]
    fn amounts_reject_negative_values() {
        let params = [json!("12.50"), json!(3), json!(-1), json!(true)];
        assert_eq!(param_amount(&params, 0).unwrap().cents(), 1250);
        assert_eq!(param_amount(&params, 1).unwrap().cents(), 300);
        assert!(matches!(
            param_amount(&params, 2),
            Err(StoreError::InvalidAmount(_))
        ));
        assert!(matches!(
            param_amount(&params, 3),
            Err(StoreError::InvalidParameter { index: 3, .. })
        ));
    }

    #[test]
    fn amounts_follow_one_rule_for_numbers_and_strings() {
        let params = [
            json!(12.5),
            json!(12.345),
            json!("12.345"),
            json!("123456789012345.67"),
            json!(90_000_000_000_000_000_i64),
        ];
        assert_eq!(param_amount(&params, 0).unwrap().cents(), 1250);
        for index in 1..params.len() {
            assert!(
                matches!(param_amount(&params, index), Err(StoreError::InvalidAmount(_))),
                "param {index} should be rejected"
            );
        }
    }
}
