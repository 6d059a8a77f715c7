//! Transaction primitives.
//!
//! A `Transaction` is an immutable income or expense record owned by a
//! `Wallet`. It only validates itself (non-negative amount); admission into a
//! wallet is decided by the wallet.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, util::normalize_text};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.write_str("Income"),
            Self::Expense => f.write_str("Expense"),
        }
    }
}

/// A single income or expense.
///
/// Fields are private: once created a transaction never changes. Stored
/// documents go through the same validation as [`Transaction::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: Uuid,
    date: NaiveDate,
    amount_minor: Money,
    kind: TransactionKind,
    description: String,
}

impl Transaction {
    /// Create a transaction with a fresh id.
    ///
    /// Fails with [`EngineError::InvalidAmount`] when `amount` is negative.
    pub fn new(
        kind: TransactionKind,
        date: NaiveDate,
        amount: Money,
        description: &str,
    ) -> ResultEngine<Self> {
        Self::with_id(Uuid::new_v4(), kind, date, amount, description)
    }

    pub fn with_id(
        id: Uuid,
        kind: TransactionKind,
        date: NaiveDate,
        amount: Money,
        description: &str,
    ) -> ResultEngine<Self> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be non-negative, got {amount}"
            )));
        }

        Ok(Self {
            id,
            date,
            amount_minor: amount,
            kind,
            description: normalize_text(description),
        })
    }

    pub fn income(date: NaiveDate, amount: Money, description: &str) -> ResultEngine<Self> {
        Self::new(TransactionKind::Income, date, amount, description)
    }

    pub fn expense(date: NaiveDate, amount: Money, description: &str) -> ResultEngine<Self> {
        Self::new(TransactionKind::Expense, date, amount, description)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Money {
        self.amount_minor
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign it has on the wallet balance.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount_minor,
            TransactionKind::Expense => -self.amount_minor,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        write!(
            f,
            "{} {sign}{} ({})",
            self.date.format("%Y-%m-%d"),
            self.amount_minor,
            self.kind
        )?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// On-disk shape of a transaction, validated into a [`Transaction`].
#[derive(Deserialize)]
struct TransactionRecord {
    id: Uuid,
    date: NaiveDate,
    amount_minor: Money,
    kind: TransactionKind,
    #[serde(default)]
    description: String,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = EngineError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::with_id(
            record.id,
            record.kind,
            record.date,
            record.amount_minor,
            &record.description,
        )
    }
}
