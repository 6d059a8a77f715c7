use std::{io::Write, process::ExitCode};

use chrono::Local;
use clap::Parser;
use engine::{Engine, JsonFileStore, Month, NewWalletCmd, TransactionCmd, TransactionKind};

use crate::{
    cli::{Cli, Command, TransactionArgs},
    error::Result,
};

mod backup;
mod cli;
mod error;
mod export;
mod render;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    match start(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> Result<()> {
    let settings = settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finance={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("using data file {}", settings.data_file.display());
    let engine = Engine::builder()
        .repository(JsonFileStore::new(&settings.data_file))
        .build();

    run(&engine, cli.command).await
}

async fn run(engine: &Engine<JsonFileStore>, command: Command) -> Result<()> {
    let mut out = std::io::stdout().lock();

    match command {
        Command::Wallets => {
            let wallets = engine.wallets().await?;
            render::wallets(&mut out, &wallets)?;
        }
        Command::WalletNew(args) => {
            let wallet = engine
                .create_wallet(NewWalletCmd::new(args.name, args.currency, args.initial))
                .await?;
            writeln!(out, "created wallet: {wallet} ({})", wallet.id())?;
        }
        Command::Income(args) => {
            add_transaction(engine, &mut out, TransactionKind::Income, args).await?;
        }
        Command::Expense(args) => {
            add_transaction(engine, &mut out, TransactionKind::Expense, args).await?;
        }
        Command::Report(args) => {
            let month = args
                .month
                .unwrap_or_else(|| Month::of(Local::now().date_naive()));
            let report = engine
                .monthly_report(month, args.currency.as_deref())
                .await?;

            if args.json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                render::report(&mut out, &report)?;
            }

            if let Some(path) = args.csv {
                let file = std::fs::File::create(&path)?;
                export::report_csv(&report, file)?;
                tracing::info!("report items written to {}", path.display());
            }
        }
        Command::Sample => {
            let count = engine.generate_sample(Local::now().date_naive()).await?;
            writeln!(out, "generated {count} sample wallet(s)")?;
        }
        Command::Import { path } => {
            let count = backup::import_wallets(engine, &path).await?;
            writeln!(out, "imported {count} wallet(s) from {}", path.display())?;
        }
        Command::Export { path } => {
            let count = backup::export_wallets(engine, &path).await?;
            writeln!(out, "exported {count} wallet(s) to {}", path.display())?;
        }
    }

    Ok(())
}

async fn add_transaction<W: Write>(
    engine: &Engine<JsonFileStore>,
    out: &mut W,
    kind: TransactionKind,
    args: TransactionArgs,
) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut cmd = TransactionCmd::new(args.wallet, kind, args.amount, date);
    if let Some(description) = args.description {
        cmd = cmd.description(description);
    }

    let tx = engine.add_transaction(cmd).await?;
    writeln!(out, "recorded: {tx} (id: {})", tx.id())?;
    Ok(())
}
