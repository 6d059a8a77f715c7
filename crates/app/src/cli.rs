use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Money, Month};

#[derive(Debug, Parser)]
#[command(name = "finance")]
#[command(about = "Personal finance tracker: wallets, transactions and monthly reports")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the JSON data file.
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List wallets with their balances and transactions.
    Wallets,
    /// Create a wallet.
    WalletNew(WalletNewArgs),
    /// Record an income.
    Income(TransactionArgs),
    /// Record an expense (rejected if the wallet cannot afford it).
    Expense(TransactionArgs),
    /// Monthly report grouped by currency and type.
    Report(ReportArgs),
    /// Replace all data with generated sample wallets.
    Sample,
    /// Replace all data with the wallets of a JSON file.
    Import {
        path: PathBuf,
    },
    /// Write all wallets to a JSON file.
    Export {
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct WalletNewArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "RUB")]
    pub currency: String,
    /// Initial balance, e.g. 1500 or 1500,50.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub initial: Money,
}

#[derive(Debug, Args)]
pub struct TransactionArgs {
    /// Wallet id or name.
    #[arg(long)]
    pub wallet: String,
    /// Amount, e.g. 12.50 or 12,50.
    #[arg(long)]
    pub amount: Money,
    /// Date as YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Month as YYYY-MM (default: current month).
    #[arg(long)]
    pub month: Option<Month>,
    /// Only wallets in this currency (case-insensitive).
    #[arg(long)]
    pub currency: Option<String>,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
    /// Also write the report items to a CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_expense_with_comma_amount() {
        let cli = Cli::parse_from([
            "finance",
            "expense",
            "--wallet",
            "Cash",
            "--amount",
            "12,50",
            "--date",
            "2025-11-03",
        ]);
        let Command::Expense(args) = cli.command else {
            panic!("expected expense command");
        };
        assert_eq!(args.amount, Money::new(1_250));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 11, 3));
    }

    #[test]
    fn parses_negative_initial_balance_and_global_flags() {
        let cli = Cli::parse_from([
            "finance",
            "wallet-new",
            "--name",
            "Credit",
            "--initial",
            "-20",
            "--data-file",
            "other.json",
        ]);
        assert_eq!(cli.data_file, Some(PathBuf::from("other.json")));
        let Command::WalletNew(args) = cli.command else {
            panic!("expected wallet-new command");
        };
        assert_eq!(args.initial, Money::new(-2_000));
        assert_eq!(args.currency, "RUB");
    }

    #[test]
    fn rejects_bad_month() {
        assert!(Cli::try_parse_from(["finance", "report", "--month", "2025-13"]).is_err());
        let cli = Cli::parse_from(["finance", "report", "--month", "2025-02", "--json"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.month, Some(Month::new(2025, 2).unwrap()));
        assert!(args.json);
    }
}
