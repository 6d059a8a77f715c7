//! The module contains `Wallet` struct and its implementation.

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError, Money, ResultEngine,
    transactions::{Transaction, TransactionKind},
    util::normalize_text,
};

/// A wallet.
///
/// A wallet is a representation of a real wallet, a bank account or anything
/// else where money are kept, in a single currency. Its balance is never
/// stored on disk: it is derived from the initial balance and the
/// transactions, and kept up to date as transactions are admitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WalletRecord")]
pub struct Wallet {
    /// Stable identifier for this wallet.
    id: Uuid,
    name: String,
    currency: Currency,
    initial_balance_minor: Money,
    transactions: Vec<Transaction>,
    #[serde(skip)]
    balance: Money,
}

/// Income and expense totals of a wallet over one month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonthlySums {
    pub income: Money,
    pub expense: Money,
}

impl Wallet {
    pub fn new(name: &str, currency: Currency, initial_balance: Money) -> ResultEngine<Self> {
        Self::with_id(Uuid::new_v4(), name, currency, initial_balance)
    }

    pub fn with_id(
        id: Uuid,
        name: &str,
        currency: Currency,
        initial_balance: Money,
    ) -> ResultEngine<Self> {
        let name = normalize_text(name);
        if name.is_empty() {
            return Err(EngineError::InvalidName(
                "wallet name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            name,
            currency,
            initial_balance_minor: initial_balance,
            transactions: Vec::new(),
            balance: initial_balance,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn initial_balance(&self) -> Money {
        self.initial_balance_minor
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// `initial balance + Σ income − Σ expense`.
    pub fn current_balance(&self) -> Money {
        self.balance
    }

    /// Append `tx` if the wallet can afford it and return the new balance.
    ///
    /// An expense larger than the current balance is rejected with
    /// [`EngineError::InsufficientFunds`] and the wallet is left untouched.
    pub fn add_transaction(&mut self, tx: Transaction) -> ResultEngine<Money> {
        let new_balance = match tx.kind() {
            TransactionKind::Expense => {
                if tx.amount() > self.balance {
                    return Err(EngineError::InsufficientFunds(format!(
                        "wallet '{}' has {} {}, expense of {} {}",
                        self.name,
                        self.balance,
                        self.currency,
                        tx.amount(),
                        self.currency
                    )));
                }
                self.balance.checked_sub(tx.amount())
            }
            TransactionKind::Income => self.balance.checked_add(tx.amount()),
        }
        .ok_or_else(|| EngineError::InvalidAmount("balance too large".to_string()))?;

        self.balance = new_balance;
        self.transactions.push(tx);
        Ok(new_balance)
    }

    /// Transactions dated in the given calendar month, in insertion order.
    pub fn transactions_in_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .filter(move |tx| tx.date().year() == year && tx.date().month() == month)
    }

    pub fn monthly_sums(&self, year: i32, month: u32) -> ResultEngine<MonthlySums> {
        let income = Money::try_sum(
            self.transactions_in_month(year, month)
                .filter(|tx| tx.kind() == TransactionKind::Income)
                .map(Transaction::amount),
        )?;
        let expense = Money::try_sum(
            self.transactions_in_month(year, month)
                .filter(|tx| tx.is_expense())
                .map(Transaction::amount),
        )?;

        Ok(MonthlySums { income, expense })
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) initial: {}, current: {}",
            self.name, self.currency, self.initial_balance_minor, self.balance
        )
    }
}

/// On-disk shape of a wallet.
///
/// Stored transactions are taken as they are (they were admitted when first
/// recorded); only the derived balance is recomputed.
#[derive(Deserialize)]
struct WalletRecord {
    id: Uuid,
    name: String,
    currency: Currency,
    initial_balance_minor: Money,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl TryFrom<WalletRecord> for Wallet {
    type Error = EngineError;

    fn try_from(record: WalletRecord) -> Result<Self, Self::Error> {
        let mut wallet = Wallet::with_id(
            record.id,
            &record.name,
            record.currency,
            record.initial_balance_minor,
        )?;
        let balance = record
            .transactions
            .iter()
            .try_fold(wallet.initial_balance_minor, |acc, tx| {
                acc.checked_add(tx.signed_amount())
            })
            .ok_or_else(|| EngineError::InvalidAmount("balance too large".to_string()))?;

        wallet.transactions = record.transactions;
        wallet.balance = balance;
        Ok(wallet)
    }
}
