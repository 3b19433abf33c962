//! Transaction model
//!
//! A transaction is a single dated expense booked against one category.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{lenient, CategoryId, TransactionId};
use super::money::Money;

/// Name shown for a transaction whose category no longer exists
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Server-issued identifier
    #[serde(deserialize_with = "lenient::deserialize")]
    pub id: TransactionId,

    /// Local time of the expense; midnight when the server sends a bare date
    #[serde(rename = "date", with = "wire_instant")]
    pub occurred_at: NaiveDateTime,

    /// Amount spent
    pub amount: Money,

    /// Category this expense is booked against
    #[serde(deserialize_with = "lenient::deserialize")]
    pub category_id: CategoryId,

    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a transaction (mainly for tests and fixtures)
    pub fn new(
        id: impl Into<TransactionId>,
        date: NaiveDate,
        amount: Money,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            occurred_at: date.and_time(NaiveTime::MIN),
            amount,
            category_id: category_id.into(),
            note: None,
        }
    }

    /// Set the time of day
    pub fn at(mut self, time: NaiveTime) -> Self {
        self.occurred_at = self.occurred_at.date().and_time(time);
        self
    }

    /// Local calendar date of the expense
    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date()
    }

    /// Milliseconds since 0001-01-01 local time, for ordering by date
    pub fn timestamp_millis(&self) -> i64 {
        let at = self.occurred_at;
        i64::from(at.num_days_from_ce()) * 86_400_000
            + i64::from(at.num_seconds_from_midnight()) * 1_000
            + i64::from(at.nanosecond() / 1_000_000)
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(Some(note.into()));
        self
    }

    /// The note, or an empty string
    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    /// Look up this transaction's category
    pub fn category<'c>(&self, categories: &'c [Category]) -> Option<&'c Category> {
        categories.iter().find(|c| c.id == self.category_id)
    }

    /// Category display name, "Unknown" when the reference dangles
    pub fn category_name<'c>(&self, categories: &'c [Category]) -> &'c str {
        self.category(categories)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// Payload for `POST /transactions`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub amount: Money,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewTransaction {
    /// Create a payload; blank notes are dropped
    pub fn new(
        date: NaiveDate,
        amount: Money,
        category_id: CategoryId,
        note: Option<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category_id,
            note: normalize_note(note),
        }
    }

    /// Validate the payload
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category_id.as_str().trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        Ok(())
    }
}

/// Trim a note, mapping blank notes to `None`
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Validation errors for new transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingCategory,
    NegativeAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "A category is required"),
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// New transactions are sent with a plain `YYYY-MM-DD` date
fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.format("%Y-%m-%d").to_string())
}

/// Wire format for transaction instants
///
/// A bare date reads as local midnight and is written back as `YYYY-MM-DD`;
/// anything with a time of day is written as a local `YYYY-MM-DDTHH:MM:SS`.
pub(crate) mod wire_instant {
    use super::*;

    pub fn serialize<S: serde::Serializer>(at: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        if at.time() == NaiveTime::MIN {
            s.serialize_str(&at.format("%Y-%m-%d").to_string())
        } else {
            s.serialize_str(&at.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_wire_instant(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized transaction date: {}", raw))
        })
    }
}

/// Parse a date or timestamp as the server may send it, in local time
pub fn parse_wire_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Local calendar date of a wire date or timestamp
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    parse_wire_instant(raw).map(|at| at.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_plain_date() {
        let json = r#"{"id": 12, "date": "2025-03-04", "amount": 980, "categoryId": 2, "note": "lunch"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id, TransactionId::new("12"));
        assert_eq!(txn.date(), date(2025, 3, 4));
        assert_eq!(txn.amount, Money::from_major(980));
        assert_eq!(txn.category_id, CategoryId::new("2"));
        assert_eq!(txn.note_text(), "lunch");
    }

    #[test]
    fn test_deserialize_timestamp_uses_local_date() {
        let instant = Local.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap();
        let raw = instant.to_rfc3339();
        assert_eq!(parse_wire_date(&raw), Some(date(2025, 3, 4)));
        assert_eq!(parse_wire_date("2025-03-04T08:30:00"), Some(date(2025, 3, 4)));
        assert_eq!(parse_wire_date("04/03/2025"), None);
    }

    #[test]
    fn test_timestamp_keeps_time_of_day() {
        let json = r#"{"id": 1, "date": "2025-03-04T08:30:15", "amount": 10, "categoryId": 2}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.date(), date(2025, 3, 4));
        assert_eq!(txn.occurred_at.time(), NaiveTime::from_hms_opt(8, 30, 15).unwrap());

        let earlier = txn.clone().at(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert!(earlier.timestamp_millis() < txn.timestamp_millis());

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2025-03-04T08:30:15.000");
        let plain = Transaction::new("t2", date(2025, 3, 4), Money::zero(), "c1");
        assert_eq!(serde_json::to_value(&plain).unwrap()["date"], "2025-03-04");
    }

    #[test]
    fn test_new_transaction_drops_blank_note() {
        let payload = NewTransaction::new(
            date(2025, 1, 2),
            Money::from_major(500),
            CategoryId::new("c1"),
            Some("   ".into()),
        );
        assert_eq!(payload.note, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["date"], "2025-01-02");
        assert_eq!(json["amount"], 500);
        assert_eq!(json["categoryId"], "c1");
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_validation() {
        let mut payload = NewTransaction::new(
            date(2025, 1, 2),
            Money::from_major(5),
            CategoryId::new(""),
            None,
        );
        assert_eq!(
            payload.validate(),
            Err(TransactionValidationError::MissingCategory)
        );

        payload.category_id = CategoryId::new("c1");
        payload.amount = Money::from_major(-5);
        assert_eq!(
            payload.validate(),
            Err(TransactionValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_dangling_category_is_unknown() {
        let categories = vec![Category::new("c1", "Food", Money::zero())];
        let known = Transaction::new("t1", date(2025, 1, 1), Money::from_major(1), "c1");
        let dangling = Transaction::new("t2", date(2025, 1, 1), Money::from_major(1), "gone");
        assert_eq!(known.category_name(&categories), "Food");
        assert_eq!(dangling.category_name(&categories), UNKNOWN_CATEGORY);
    }
}
