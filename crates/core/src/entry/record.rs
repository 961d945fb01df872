//! Lenient decoding of persisted entry and exclusion records.
//!
//! Stored data is not trusted to be well formed. A corrupt amount must not
//! take a whole report down, so decoding follows two rules:
//!
//! - a missing, non-numeric or out-of-range amount is coerced to zero;
//! - a record whose `date`, `end_date` or `excluded_month` cannot be parsed
//!   is dropped, which is the same as never matching any month.
//!
//! Totals computed from coerced records are for display only.

use chrono::NaiveDate;
use pennywise_shared::YearMonth;
use pennywise_shared::types::{CategoryId, EntryId, ExclusionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

use super::types::{Entry, EntryKind, Exclusion, ForkOrigin};
use super::validation::MAX_AMOUNT;

/// An entry as persisted, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Entry id.
    pub id: EntryId,
    /// Expense or income.
    pub kind: EntryKind,
    /// Amount as stored: number, numeric string, or anything else.
    #[serde(default)]
    pub amount: Value,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Category or source.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default)]
    pub date: String,
    /// Optional end date in the same formats; blank means absent.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Recurring flag.
    #[serde(default)]
    pub recurring: bool,
    /// Replacement marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forked_from: Option<ForkOrigin>,
}

impl EntryRecord {
    /// Decodes the record, or `None` if one of its dates is unusable.
    #[must_use]
    pub fn into_entry(self) -> Option<Entry> {
        let Some(date) = parse_record_date(&self.date) else {
            warn!(entry_id = %self.id, date = %self.date, "Skipping entry with unparsable date");
            return None;
        };

        let end_date = match self.end_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                if let Some(end) = parse_record_date(raw) {
                    Some(end)
                } else {
                    warn!(entry_id = %self.id, end_date = %raw, "Skipping entry with unparsable end date");
                    return None;
                }
            }
        };

        let amount = parse_amount(&self.amount).unwrap_or_else(|| {
            warn!(entry_id = %self.id, amount = %self.amount, "Coercing malformed amount to zero");
            Decimal::ZERO
        });

        Some(Entry {
            id: self.id,
            kind: self.kind,
            amount,
            name: self.name,
            category_id: self.category_id,
            date,
            end_date,
            recurring: self.recurring,
            forked_from: self.forked_from,
        })
    }
}

impl From<&Entry> for EntryRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind,
            amount: Value::String(entry.amount.to_string()),
            name: entry.name.clone(),
            category_id: entry.category_id,
            date: entry.date.format("%Y-%m-%d").to_string(),
            end_date: entry.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            recurring: entry.recurring,
            forked_from: entry.forked_from,
        }
    }
}

/// An exclusion as persisted, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRecord {
    /// Exclusion id.
    pub id: ExclusionId,
    /// Owning entry.
    pub entry_id: EntryId,
    /// Any accepted month key (`YYYY-MM-01`, `MM-YYYY`, ...).
    pub excluded_month: String,
}

impl ExclusionRecord {
    /// Decodes the record, or `None` if the month key is unusable.
    #[must_use]
    pub fn into_exclusion(self) -> Option<Exclusion> {
        match YearMonth::parse(&self.excluded_month) {
            Ok(excluded_month) => Some(Exclusion {
                id: self.id,
                entry_id: self.entry_id,
                excluded_month,
            }),
            Err(err) => {
                warn!(exclusion_id = %self.id, error = %err, "Skipping exclusion with unparsable month");
                None
            }
        }
    }
}

impl From<&Exclusion> for ExclusionRecord {
    fn from(exclusion: &Exclusion) -> Self {
        Self {
            id: exclusion.id,
            entry_id: exclusion.entry_id,
            excluded_month: exclusion.excluded_month.to_iso_key(),
        }
    }
}

/// Numeric value of a stored amount, zero when it is not a number or its
/// magnitude exceeds [`MAX_AMOUNT`].
#[must_use]
pub fn coerce_amount(value: &Value) -> Decimal {
    parse_amount(value).unwrap_or(Decimal::ZERO)
}

/// Parses `YYYY-MM-DD`, ignoring any trailing time component.
#[must_use]
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal(text)
            }
        }
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .filter(|amount| amount.abs() <= MAX_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(amount: Value, date: &str, end_date: Option<&str>) -> EntryRecord {
        EntryRecord {
            id: EntryId::new(),
            kind: EntryKind::Expense,
            amount,
            name: "Rent".into(),
            category_id: None,
            date: date.into(),
            end_date: end_date.map(Into::into),
            recurring: true,
            forked_from: None,
        }
    }

    #[rstest]
    #[case(json!(100), dec!(100))]
    #[case(json!(12.5), dec!(12.5))]
    #[case(json!("42.10"), dec!(42.10))]
    #[case(json!(" 7 "), dec!(7))]
    #[case(json!("1e3"), dec!(1000))]
    #[case(json!(""), dec!(0))]
    #[case(json!("abc"), dec!(0))]
    #[case(json!(null), dec!(0))]
    #[case(json!({"value": 3}), dec!(0))]
    #[case(json!("79228162514264337593543950335"), dec!(0))]
    #[case(json!("-1e20"), dec!(0))]
    #[case(json!("1000000000000"), dec!(1000000000000))]
    fn test_coerce_amount(#[case] raw: Value, #[case] expected: Decimal) {
        assert_eq!(coerce_amount(&raw), expected);
    }

    #[test]
    fn test_malformed_amount_decodes_as_zero() {
        let entry = record(json!("twelve"), "2024-01-01", None)
            .into_entry()
            .unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_amount_decodes_as_zero() {
        let entry = record(json!("79228162514264337593543950335"), "2024-01-01", None)
            .into_entry()
            .unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn test_timestamp_dates_are_accepted() {
        let entry = record(json!(5), "2024-01-15T08:00:00.000Z", Some("2024-06-01"))
            .into_entry()
            .unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(entry.end_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn test_blank_end_date_means_unbounded() {
        let entry = record(json!(5), "2024-01-15", Some("  "))
            .into_entry()
            .unwrap();
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn test_unparsable_dates_drop_the_record() {
        assert!(record(json!(5), "yesterday", None).into_entry().is_none());
        assert!(
            record(json!(5), "2024-01-01", Some("never"))
                .into_entry()
                .is_none()
        );
    }

    #[test]
    fn test_entry_record_roundtrip_keeps_decimal_precision() {
        let entry = record(json!("19.990"), "2024-03-09", Some("2024-09-30"))
            .into_entry()
            .unwrap();
        let decoded = EntryRecord::from(&entry).into_entry().unwrap();
        assert_eq!(decoded, entry);
        assert_eq!(decoded.amount.to_string(), "19.990");
    }

    #[test]
    fn test_exclusion_record_accepts_both_month_formats() {
        let entry_id = EntryId::new();
        for key in ["2024-03-01", "03-2024"] {
            let exclusion = ExclusionRecord {
                id: ExclusionId::new(),
                entry_id,
                excluded_month: key.into(),
            }
            .into_exclusion()
            .unwrap();
            assert_eq!(exclusion.excluded_month, YearMonth::new(2024, 3).unwrap());
        }
    }

    #[test]
    fn test_exclusion_record_with_bad_month_is_dropped() {
        let exclusion = ExclusionRecord {
            id: ExclusionId::new(),
            entry_id: EntryId::new(),
            excluded_month: "someday".into(),
        };
        assert!(exclusion.into_exclusion().is_none());
    }

    #[test]
    fn test_exclusion_persists_as_iso_key() {
        let exclusion = Exclusion::new(EntryId::new(), YearMonth::new(2024, 11).unwrap());
        assert_eq!(ExclusionRecord::from(&exclusion).excluded_month, "2024-11-01");
    }
}
