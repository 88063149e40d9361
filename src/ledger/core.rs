//! Defines the core data models for ledger transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Get the current wall-clock time as a [Timestamp].
pub fn now_millis() -> Timestamp {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as Timestamp
}

/// The opaque, unique identifier of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a new random ID.
    pub fn new_random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "収入",
            TransactionType::Expense => "支出",
        }
    }

    /// The value used in forms and in the persisted blob.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// The closed set of categories a transaction can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "食費")]
    Food,
    #[serde(rename = "日用品")]
    DailyGoods,
    #[serde(rename = "交通費")]
    Transport,
    #[serde(rename = "娯楽")]
    Entertainment,
    #[serde(rename = "医療")]
    Medical,
    #[serde(rename = "家賃")]
    Rent,
    #[serde(rename = "光熱費")]
    Utilities,
    #[serde(rename = "通信費")]
    Communication,
    #[serde(rename = "給料")]
    Salary,
    #[serde(rename = "その他")]
    Other,
}

impl Category {
    /// Every category, in the order they are offered in forms.
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::DailyGoods,
        Category::Transport,
        Category::Entertainment,
        Category::Medical,
        Category::Rent,
        Category::Utilities,
        Category::Communication,
        Category::Salary,
        Category::Other,
    ];

    /// The label shown to the user, which is also the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "食費",
            Category::DailyGoods => "日用品",
            Category::Transport => "交通費",
            Category::Entertainment => "娯楽",
            Category::Medical => "医療",
            Category::Rent => "家賃",
            Category::Utilities => "光熱費",
            Category::Communication => "通信費",
            Category::Salary => "給料",
            Category::Other => "その他",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated amount of money in whole yen, between 1 and [Amount::MAX].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    /// The largest amount, 2^53 - 1, so stored amounts survive a round trip
    /// through a JSON number read as a double.
    pub const MAX: u64 = 9_007_199_254_740_991;

    /// Create an amount.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidAmount] if `amount` is zero
    /// or larger than [Amount::MAX].
    pub fn new(amount: u64) -> Result<Self, Error> {
        if (1..=Self::MAX).contains(&amount) {
            Ok(Self(amount))
        } else {
            Err(Error::InvalidAmount(amount.to_string()))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `amount` is between 1 and [Amount::MAX].
    #[cfg(test)]
    pub fn new_unchecked(amount: u64) -> Self {
        Self(amount)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = Error;

    fn try_from(amount: u64) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse user input as a positive whole number, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map_err(|_| Error::InvalidAmount(s.to_owned()))
            .and_then(|amount| Self::new(amount).map_err(|_| Error::InvalidAmount(s.to_owned())))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never mutated in place: an edit replaces the whole record.
/// Field names follow the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    /// When the transaction happened as an ISO `YYYY-MM-DD` string.
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Amount,
    pub category: Category,
    #[serde(default)]
    pub memo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The user-provided fields of a [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub date: String,
    pub transaction_type: TransactionType,
    pub amount: Amount,
    pub category: Category,
    pub memo: String,
}

/// A partial update to a [Transaction]. Fields set to `None` keep their old value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<Amount>,
    pub category: Option<Category>,
    pub memo: Option<String>,
}

impl From<TransactionInput> for TransactionPatch {
    fn from(input: TransactionInput) -> Self {
        Self {
            date: Some(input.date),
            transaction_type: Some(input.transaction_type),
            amount: Some(input.amount),
            category: Some(input.category),
            memo: Some(input.memo),
        }
    }
}
