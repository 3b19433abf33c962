//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths of the currency unit (i64) so that
//! sums and budget overages are exact. On the wire an amount is a plain JSON
//! number in major units, as the server sends it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currencies that are displayed without a fractional part
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK"];

/// Largest magnitude, in hundredths, that converts exactly into an i64
const MAX_CENTS_F64: f64 = 9_007_199_254_740_992.0;

/// A monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths of a unit
    ///
    /// # Examples
    /// ```
    /// use costbook::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.cents(), 1050);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a floating point major-unit amount, rounding to hundredths
    ///
    /// Returns `None` for non-finite values and amounts outside the i64 range.
    pub fn from_major_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() >= MAX_CENTS_F64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional part (0-99)
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount as a floating point number of major units
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// `self / other` as a ratio, or 0 when `other` is not positive
    pub fn ratio_of(&self, other: Money) -> f64 {
        if other.is_positive() {
            self.0 as f64 / other.0 as f64
        } else {
            0.0
        }
    }

    /// Parse a money amount from user input
    ///
    /// Accepts formats: "1200", "12.50", "-3.5", "$10.50", "¥1,200"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s.trim_start_matches(|c: char| matches!(c, '$' | '¥' | '€' | '£' | '₱'));
        let s: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        // A single leading minus is the only sign accepted
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let cents = match s.split_once('.') {
            Some((units, fraction)) => {
                if fraction.contains('.') {
                    return Err(invalid());
                }
                let units: i64 = if units.is_empty() {
                    0
                } else {
                    units.parse().map_err(|_| invalid())?
                };
                let fraction: i64 = match fraction.len() {
                    0 => 0,
                    1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => fraction.parse().map_err(|_| invalid())?,
                    _ => return Err(MoneyParseError::TooManyDecimals(original.to_string())),
                };
                units
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(fraction))
                    .ok_or_else(invalid)?
            }
            None => s
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format for display in the given currency
    ///
    /// Zero-decimal currencies (JPY, KRW, ...) are rounded to whole units.
    pub fn format_currency(&self, code: &str) -> String {
        let code = code.trim().to_ascii_uppercase();
        let symbol = currency_symbol(&code);
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();

        if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
            let units = (abs + 50) / 100;
            if units == 0 {
                return format!("{}0", symbol);
            }
            format!("{}{}{}", sign, symbol, group_thousands(units))
        } else {
            format!(
                "{}{}{}.{:02}",
                sign,
                symbol,
                group_thousands(abs / 100),
                abs % 100
            )
        }
    }
}

/// Symbol prefix for a currency code
fn currency_symbol(code: &str) -> String {
    match code {
        "USD" | "CAD" | "AUD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "KRW" => "₩".to_string(),
        "PHP" => "₱".to_string(),
        other => format!("{} ", other),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.minor())
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.minor() == 0 {
            serializer.serialize_i64(self.major())
        } else {
            serializer.serialize_f64(self.as_major_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_major_f64(value).ok_or_else(|| {
            serde::de::Error::custom(format!("amount out of range: {}", value))
        })
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooManyDecimals(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::TooManyDecimals(s) => {
                write!(f, "Invalid amount: {} (at most two decimals)", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.5").unwrap().cents(), -1050);
        assert_eq!(Money::parse("1200").unwrap().cents(), 120_000);
        assert_eq!(Money::parse("¥1,200").unwrap().cents(), 120_000);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.x").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("-+5").is_err());
        assert!(Money::parse("+-5").is_err());
        assert!(Money::parse("+5").is_err());
        assert!(Money::parse("5-").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_decimals() {
        assert_eq!(
            Money::parse("1.999"),
            Err(MoneyParseError::TooManyDecimals("1.999".into()))
        );
        assert_eq!(Money::parse("1.99").unwrap().cents(), 199);
    }

    #[test]
    fn test_huge_wire_amount_is_rejected() {
        assert!(serde_json::from_str::<Money>("1e300").is_err());
        assert!(serde_json::from_str::<Money>("-1e300").is_err());
        assert!(Money::from_major_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX);
        let total: Money = vec![big, big].into_iter().sum();
        assert_eq!(total, big);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(Money::from_major(1234567).format_currency("JPY"), "¥1,234,567");
        assert_eq!(Money::from_cents(123456).format_currency("USD"), "$1,234.56");
        assert_eq!(Money::from_cents(-500).format_currency("EUR"), "-€5.00");
        assert_eq!(Money::from_cents(990).format_currency("CHF"), "CHF 9.90");
        assert_eq!(Money::zero().format_currency("jpy"), "¥0");
    }

    #[test]
    fn test_ratio_of() {
        let spent = Money::from_major(150);
        assert!((spent.ratio_of(Money::from_major(100)) - 1.5).abs() < f64::EPSILON);
        assert_eq!(spent.ratio_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Money::from_major(1200)).unwrap(), "1200");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");

        let m: Money = serde_json::from_str("1200").unwrap();
        assert_eq!(m, Money::from_major(1200));
        let m: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(m.cents(), 1999);
    }
}
