//! Column sorting for tables
//!
//! Sorting is generic over a column key type. Rows are never moved; callers
//! get back a stable permutation (or borrowed rows) so equal keys keep their
//! original order in both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Category, Transaction};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to the active column header
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    key: K,
    order: SortOrder,
}

impl<K: Copy + Eq> SortState<K> {
    pub fn new(key: K, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Select a column: the same column flips direction, a new one starts ascending
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.order = self.order.flip();
        } else {
            self.key = key;
            self.order = SortOrder::Ascending;
        }
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Header indicator for `key`, empty unless it is the active column
    pub fn indicator(&self, key: K) -> &'static str {
        if self.key == key {
            self.order.indicator()
        } else {
            ""
        }
    }
}

/// A comparable cell value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(i64),
    Text(String),
}

/// Stable permutation of `rows` ordered by `state`
pub fn sort_indices<T, K, F>(rows: &[T], state: &SortState<K>, value: F) -> Vec<usize>
where
    K: Copy + Eq,
    F: Fn(&T, K) -> SortValue,
{
    let keys: Vec<SortValue> = rows.iter().map(|row| value(row, state.key())).collect();
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    // sort_by is stable
    indices.sort_by(|&a, &b| state.order().apply(keys[a].cmp(&keys[b])));
    indices
}

/// Rows borrowed in sorted order
pub fn sorted<'a, T, K, F>(rows: &'a [T], state: &SortState<K>, value: F) -> Vec<&'a T>
where
    K: Copy + Eq,
    F: Fn(&T, K) -> SortValue,
{
    sort_indices(rows, state, value)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

/// Sortable columns of the transaction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionColumn {
    Date,
    Category,
    Note,
    Amount,
}

impl TransactionColumn {
    pub const ALL: [TransactionColumn; 4] = [Self::Date, Self::Category, Self::Note, Self::Amount];

    pub fn title(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Note => "Note",
            Self::Amount => "Amount",
        }
    }

    /// Sort value of this column for a transaction
    pub fn value(self, txn: &Transaction, categories: &[Category]) -> SortValue {
        match self {
            Self::Date => SortValue::Number(txn.timestamp_millis()),
            Self::Category => SortValue::Text(
                txn.category(categories)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
            ),
            Self::Note => SortValue::Text(txn.note_text().to_string()),
            Self::Amount => SortValue::Number(txn.amount.cents()),
        }
    }
}

impl fmt::Display for TransactionColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for TransactionColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "category" | "cat" => Ok(Self::Category),
            "note" => Ok(Self::Note),
            "amount" => Ok(Self::Amount),
            other => Err(format!(
                "Unknown column '{}' (expected date, category, note or amount)",
                other
            )),
        }
    }
}

/// Sort transactions by a column
pub fn sort_transactions<'a>(
    transactions: &'a [Transaction],
    categories: &[Category],
    state: &SortState<TransactionColumn>,
) -> Vec<&'a Transaction> {
    sorted(transactions, state, |txn, column| column.value(txn, categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn fixtures() -> (Vec<Category>, Vec<Transaction>) {
        let categories = vec![
            Category::new("f", "Food", Money::zero()),
            Category::new("b", "Bills", Money::zero()),
        ];
        let transactions = vec![
            Transaction::new("1", date(3), Money::from_major(10), "f").with_note("lunch"),
            Transaction::new("2", date(1), Money::from_major(50), "b"),
            Transaction::new("3", date(3), Money::from_major(5), "gone").with_note("coffee"),
            Transaction::new("4", date(2), Money::from_major(10), "f"),
        ];
        (categories, transactions)
    }

    fn ids(rows: &[&Transaction]) -> Vec<String> {
        rows.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_toggle_same_key_flips_and_new_key_resets() {
        let mut state = SortState::new(TransactionColumn::Date, SortOrder::Descending);
        state.toggle(TransactionColumn::Date);
        assert_eq!(state.order(), SortOrder::Ascending);
        state.toggle(TransactionColumn::Date);
        assert_eq!(state.order(), SortOrder::Descending);

        state.toggle(TransactionColumn::Amount);
        assert_eq!(state.key(), TransactionColumn::Amount);
        assert_eq!(state.order(), SortOrder::Ascending);
        assert_eq!(state.indicator(TransactionColumn::Amount), "▲");
        assert_eq!(state.indicator(TransactionColumn::Date), "");
    }

    #[test]
    fn test_sort_by_each_column() {
        let (categories, transactions) = fixtures();
        let by = |column| {
            let state = SortState::new(column, SortOrder::Ascending);
            ids(&sort_transactions(&transactions, &categories, &state))
        };

        assert_eq!(by(TransactionColumn::Date), vec!["2", "4", "1", "3"]);
        // Dangling category sorts as an empty name
        assert_eq!(by(TransactionColumn::Category), vec!["3", "2", "1", "4"]);
        assert_eq!(by(TransactionColumn::Note), vec!["2", "4", "3", "1"]);
        assert_eq!(by(TransactionColumn::Amount), vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn test_date_orders_same_day_by_time() {
        use chrono::NaiveTime;
        let time = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let transactions = vec![
            Transaction::new("late", date(7), Money::from_major(1), "f").at(time(12)),
            Transaction::new("early", date(7), Money::from_major(1), "f").at(time(8)),
        ];
        let state = SortState::new(TransactionColumn::Date, SortOrder::Ascending);
        let rows = sort_transactions(&transactions, &[], &state);
        assert_eq!(ids(&rows), vec!["early", "late"]);
    }

    #[test]
    fn test_descending_is_stable_for_equal_keys() {
        let (categories, transactions) = fixtures();
        let state = SortState::new(TransactionColumn::Amount, SortOrder::Descending);
        let rows = sort_transactions(&transactions, &categories, &state);
        // "1" and "4" share an amount and keep their original order
        assert_eq!(ids(&rows), vec!["2", "1", "4", "3"]);
    }

    #[test]
    fn test_toggling_twice_reverses_distinct_keys() {
        let rows = vec![30, 10, 20, 40];
        let mut state = SortState::new((), SortOrder::Ascending);
        let value = |v: &i64, _| SortValue::Number(*v);

        let ascending: Vec<i64> = sorted(&rows, &state, value).into_iter().copied().collect();
        state.toggle(());
        let descending: Vec<i64> = sorted(&rows, &state, value).into_iter().copied().collect();

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
        assert_eq!(ascending, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_text_compares_lexicographically() {
        let rows = vec!["b", "B", "a"];
        let state = SortState::new((), SortOrder::Ascending);
        let order = sort_indices(&rows, &state, |s, _| SortValue::Text(s.to_string()));
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_parse_column() {
        assert_eq!("Amount".parse::<TransactionColumn>(), Ok(TransactionColumn::Amount));
        assert_eq!("cat".parse::<TransactionColumn>(), Ok(TransactionColumn::Category));
        assert!("payee".parse::<TransactionColumn>().is_err());
    }
}
