//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::NaiveDate;

use crate::{Money, TransactionKind};

/// Create a wallet.
#[derive(Clone, Debug)]
pub struct NewWalletCmd {
    pub name: String,
    /// Raw currency code, normalized by the engine.
    pub currency: String,
    pub initial_balance: Money,
}

impl NewWalletCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, currency: impl Into<String>, initial_balance: Money) -> Self {
        Self {
            name: name.into(),
            currency: currency.into(),
            initial_balance,
        }
    }
}

/// Record an income or an expense on a wallet.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    /// Wallet id, or its name (case-insensitive).
    pub wallet: String,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl TransactionCmd {
    #[must_use]
    pub fn income(wallet: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(wallet, TransactionKind::Income, amount, date)
    }

    #[must_use]
    pub fn expense(wallet: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(wallet, TransactionKind::Expense, amount, date)
    }

    #[must_use]
    pub fn new(
        wallet: impl Into<String>,
        kind: TransactionKind,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            wallet: wallet.into(),
            kind,
            amount,
            date,
            description: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
