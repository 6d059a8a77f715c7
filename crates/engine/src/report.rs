//! Monthly report over a collection of wallets.
//!
//! Transactions of one calendar month are grouped by `(currency, kind)` and
//! summed; each wallet also gets its three largest expenses of the month.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Currency, EngineError, Money, ResultEngine,
    transactions::{Transaction, TransactionKind},
    wallets::Wallet,
};

/// How many expenses are listed per wallet.
pub const TOP_EXPENSES: usize = 3;

/// A calendar month, e.g. `2025-11`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidDate(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDate(format!("expected YYYY-MM, got '{}'", s.trim()));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month)
    }
}

/// One transaction as it appears in a report group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportItem {
    pub transaction_id: Uuid,
    pub date: NaiveDate,
    pub amount_minor: Money,
    pub wallet_id: Uuid,
    pub wallet_name: String,
    pub currency: Currency,
    pub description: String,
}

/// All transactions of one currency and kind, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    pub currency: Currency,
    pub kind: TransactionKind,
    pub total_minor: Money,
    pub items: Vec<ReportItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopExpense {
    pub transaction_id: Uuid,
    pub date: NaiveDate,
    pub amount_minor: Money,
    pub description: String,
}

/// Largest expenses of the month for one wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WalletTopExpenses {
    pub wallet_id: Uuid,
    pub wallet_name: String,
    pub currency: Currency,
    pub current_balance_minor: Money,
    pub top: Vec<TopExpense>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub month: Month,
    /// Upper-cased currency filter, if one was given.
    pub currency: Option<String>,
    /// Sorted by currency ascending, then total descending.
    pub groups: Vec<ReportGroup>,
    /// One entry per wallet in scope, in collection order.
    pub top_expenses: Vec<WalletTopExpenses>,
}

impl MonthlyReport {
    /// `true` when no transaction of the month matched.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Build the report for `month`, restricted to wallets whose currency matches
/// `currency_filter` (case-insensitive) when it is given and not blank.
pub fn monthly_report(
    wallets: &[Wallet],
    month: Month,
    currency_filter: Option<&str>,
) -> ResultEngine<MonthlyReport> {
    let filter = currency_filter
        .map(str::trim)
        .filter(|code| !code.is_empty());
    let scope: Vec<&Wallet> = wallets
        .iter()
        .filter(|wallet| filter.is_none_or(|code| wallet.currency().matches(code)))
        .collect();

    let mut buckets: BTreeMap<(Currency, TransactionKind), Vec<ReportItem>> = BTreeMap::new();
    for wallet in &scope {
        for tx in wallet.transactions_in_month(month.year(), month.month()) {
            buckets
                .entry((wallet.currency().clone(), tx.kind()))
                .or_default()
                .push(ReportItem {
                    transaction_id: tx.id(),
                    date: tx.date(),
                    amount_minor: tx.amount(),
                    wallet_id: wallet.id(),
                    wallet_name: wallet.name().to_string(),
                    currency: wallet.currency().clone(),
                    description: tx.description().to_string(),
                });
        }
    }

    let mut groups = buckets
        .into_iter()
        .map(|((currency, kind), mut items)| {
            // Stable: same-day items keep collection order.
            items.sort_by_key(|item| item.date);
            let total_minor = Money::try_sum(items.iter().map(|item| item.amount_minor))?;
            Ok(ReportGroup {
                currency,
                kind,
                total_minor,
                items,
            })
        })
        .collect::<ResultEngine<Vec<_>>>()?;
    groups.sort_by(|a, b| {
        a.currency
            .cmp(&b.currency)
            .then_with(|| b.total_minor.cmp(&a.total_minor))
    });

    let top_expenses = scope
        .iter()
        .map(|wallet| WalletTopExpenses {
            wallet_id: wallet.id(),
            wallet_name: wallet.name().to_string(),
            currency: wallet.currency().clone(),
            current_balance_minor: wallet.current_balance(),
            top: top_expenses(wallet, month),
        })
        .collect();

    Ok(MonthlyReport {
        month,
        currency: filter.map(str::to_ascii_uppercase),
        groups,
        top_expenses,
    })
}

fn top_expenses(wallet: &Wallet, month: Month) -> Vec<TopExpense> {
    let mut expenses: Vec<&Transaction> = wallet
        .transactions_in_month(month.year(), month.month())
        .filter(|tx| tx.is_expense())
        .collect();
    // Stable: equal amounts keep insertion order.
    expenses.sort_by(|a, b| b.amount().cmp(&a.amount()));

    expenses
        .into_iter()
        .take(TOP_EXPENSES)
        .map(|tx| TopExpense {
            transaction_id: tx.id(),
            date: tx.date(),
            amount_minor: tx.amount(),
            description: tx.description().to_string(),
        })
        .collect()
}
