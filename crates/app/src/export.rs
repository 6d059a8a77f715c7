//! CSV export of report items.

use std::io::Write;

use csv::Writer;
use engine::MonthlyReport;
use serde::Serialize;

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    wallet: &'a str,
    currency: &'a str,
    kind: &'static str,
    amount: String,
    description: &'a str,
    id: String,
}

/// Write one row per report item, in report order.
pub fn report_csv<W: Write>(report: &MonthlyReport, out: W) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(out);
    for group in &report.groups {
        for item in &group.items {
            writer.serialize(ExportRow {
                date: item.date.to_string(),
                wallet: &item.wallet_name,
                currency: item.currency.code(),
                kind: group.kind.as_str(),
                amount: item.amount_minor.to_string(),
                description: &item.description,
                id: item.transaction_id.to_string(),
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}
