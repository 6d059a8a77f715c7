//! Demo data: three wallets with a few months of activity.

use chrono::{Datelike, Months, NaiveDate};

use crate::{
    Currency, EngineError, Money, ResultEngine,
    transactions::{
        Transaction,
        TransactionKind::{self, Expense, Income},
    },
    wallets::Wallet,
};

/// Build the demo collection relative to `today`.
///
/// Most transactions fall in the month of `today`; two older expenses land one
/// and two months earlier so reports for other months are not empty. Every
/// transaction goes through the normal admission rule.
pub fn sample_wallets(today: NaiveDate) -> ResultEngine<Vec<Wallet>> {
    let this_month = first_of_month(today)?;
    let last_month = months_back(this_month, 1)?;
    let two_months_ago = months_back(this_month, 2)?;

    let rub = Currency::try_from("RUB")?;
    let usd = Currency::try_from("USD")?;

    let mut cash = Wallet::new("Cash", rub.clone(), Money::new(5_000_00))?;
    record(
        &mut cash,
        &[
            (Income, day(this_month, 2)?, 1_000_00, "Side job"),
            (Expense, day(this_month, 3)?, 200_00, "Coffee and snacks"),
            (Expense, day(this_month, 10)?, 1_200_00, "Clothes"),
            (Expense, day(last_month, 20)?, 500_00, "Last month purchase"),
        ],
    )?;

    let mut card = Wallet::new("Salary card", rub, Money::new(20_000_00))?;
    record(
        &mut card,
        &[
            (Income, day(this_month, 1)?, 50_000_00, "Salary"),
            (Expense, day(this_month, 5)?, 10_000_00, "Rent"),
            (Expense, day(this_month, 20)?, 8_000_00, "Appliance repair"),
            (Expense, day(two_months_ago, 12)?, 1_500_00, "Old purchase"),
        ],
    )?;

    let mut dollars = Wallet::new("USD account", usd, Money::new(150_00))?;
    record(
        &mut dollars,
        &[
            (Income, day(this_month, 3)?, 50_00, "Freelance"),
            (Expense, day(this_month, 12)?, 75_00, "Store purchase"),
        ],
    )?;

    Ok(vec![cash, card, dollars])
}

fn record(
    wallet: &mut Wallet,
    entries: &[(TransactionKind, NaiveDate, i64, &str)],
) -> ResultEngine<()> {
    for &(kind, date, minor, description) in entries {
        wallet.add_transaction(Transaction::new(kind, date, Money::new(minor), description)?)?;
    }
    Ok(())
}

fn first_of_month(date: NaiveDate) -> ResultEngine<NaiveDate> {
    date.with_day(1)
        .ok_or_else(|| EngineError::InvalidDate(format!("no first day for {date}")))
}

fn months_back(date: NaiveDate, months: u32) -> ResultEngine<NaiveDate> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| EngineError::InvalidDate(format!("{date} minus {months} month(s)")))
}

fn day(month_start: NaiveDate, day: u32) -> ResultEngine<NaiveDate> {
    month_start
        .with_day(day)
        .ok_or_else(|| EngineError::InvalidDate(format!("day {day} of {month_start}")))
}
