//! Plain-text rendering of wallets and reports.

use std::io::{self, Write};

use engine::{MonthlyReport, Transaction, Wallet};

pub fn wallets<W: Write>(out: &mut W, wallets: &[Wallet]) -> io::Result<()> {
    if wallets.is_empty() {
        return writeln!(out, "No wallets.");
    }

    for (n, wallet) in wallets.iter().enumerate() {
        writeln!(out, "{}. {} (id: {})", n + 1, wallet, wallet.id())?;

        let mut txs: Vec<&Transaction> = wallet.transactions().iter().collect();
        if txs.is_empty() {
            continue;
        }
        txs.sort_by_key(|tx| tx.date());

        writeln!(out, "   Transactions ({}):", txs.len())?;
        for tx in txs {
            writeln!(out, "     {tx}")?;
        }
    }
    Ok(())
}

pub fn report<W: Write>(out: &mut W, report: &MonthlyReport) -> io::Result<()> {
    match &report.currency {
        Some(currency) => writeln!(out, "Report for {} | currency: {currency}", report.month)?,
        None => writeln!(out, "Report for {}", report.month)?,
    }
    writeln!(out)?;

    if report.is_empty() {
        writeln!(out, "No transactions in this month.")?;
        return Ok(());
    }

    let mut current = None;
    for group in &report.groups {
        if current != Some(&group.currency) {
            current = Some(&group.currency);
            writeln!(out, "=== {} ===", group.currency)?;
        }
        writeln!(
            out,
            "--- {} | total: {} {}",
            group.kind, group.total_minor, group.currency
        )?;
        for item in &group.items {
            writeln!(
                out,
                "{} {:>12} {}  {}: {}",
                item.date, item.amount_minor, item.currency, item.wallet_name, item.description
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Top expenses per wallet:")?;
    for wallet in &report.top_expenses {
        writeln!(
            out,
            "{} (balance: {} {})",
            wallet.wallet_name, wallet.current_balance_minor, wallet.currency
        )?;
        if wallet.top.is_empty() {
            writeln!(out, "  No expenses this month.")?;
        }
        for (rank, tx) in wallet.top.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} {} {} {}",
                rank + 1,
                tx.date,
                tx.amount_minor,
                wallet.currency,
                tx.description
            )?;
        }
    }
    Ok(())
}
