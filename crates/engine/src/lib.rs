use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

pub use commands::{NewWalletCmd, TransactionCmd};
pub use currency::Currency;
pub use error::EngineError;
pub use money::Money;
pub use report::{
    MonthlyReport, Month, ReportGroup, ReportItem, TopExpense, WalletTopExpenses, monthly_report,
};
pub use sample::sample_wallets;
pub use store::{JsonFileStore, MemoryStore, WalletRepository};
pub use transactions::{Transaction, TransactionKind};
pub use wallets::{MonthlySums, Wallet};

mod commands;
mod currency;
mod error;
mod money;
mod report;
mod sample;
mod store;
mod transactions;
mod util;
mod wallets;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Wallet operations on top of a [`WalletRepository`].
///
/// Every write loads the whole collection, applies one change and saves it
/// back. Writes issued through the same engine never interleave.
#[derive(Debug)]
pub struct Engine<R> {
    repository: R,
    write_lock: Mutex<()>,
}

impl Engine<()> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<R: WalletRepository> Engine<R> {
    /// All wallets, in collection order.
    pub async fn wallets(&self) -> ResultEngine<Vec<Wallet>> {
        self.repository.load().await
    }

    /// Find a wallet by id or by name.
    pub async fn wallet(&self, selector: &str) -> ResultEngine<Wallet> {
        let mut wallets = self.repository.load().await?;
        let index = find_wallet(&wallets, selector)?;
        Ok(wallets.swap_remove(index))
    }

    pub async fn create_wallet(&self, cmd: NewWalletCmd) -> ResultEngine<Wallet> {
        let currency = Currency::try_from(cmd.currency.as_str())?;
        let wallet = Wallet::new(&cmd.name, currency, cmd.initial_balance)?;

        let _guard = self.write_lock.lock().await;
        let mut wallets = self.repository.load().await?;
        wallets.push(wallet.clone());
        self.repository.save(&wallets).await?;

        tracing::info!("created wallet '{}' ({})", wallet.name(), wallet.id());
        Ok(wallet)
    }

    /// Record a transaction on the selected wallet.
    ///
    /// Nothing is saved when the amount is invalid or the wallet cannot
    /// afford the expense.
    pub async fn add_transaction(&self, cmd: TransactionCmd) -> ResultEngine<Transaction> {
        let tx = Transaction::new(
            cmd.kind,
            cmd.date,
            cmd.amount,
            cmd.description.as_deref().unwrap_or_default(),
        )?;

        let _guard = self.write_lock.lock().await;
        let mut wallets = self.repository.load().await?;
        let index = find_wallet(&wallets, &cmd.wallet)?;
        let wallet = &mut wallets[index];
        let balance = wallet.add_transaction(tx.clone())?;
        tracing::debug!("wallet '{}' balance now {balance}", wallet.name());

        self.repository.save(&wallets).await?;

        tracing::info!("recorded {} {} on wallet {}", tx.kind().as_str(), tx.amount(), cmd.wallet);
        Ok(tx)
    }

    /// Overwrite the whole collection, returning how many wallets it holds.
    pub async fn replace_wallets(&self, wallets: Vec<Wallet>) -> ResultEngine<usize> {
        let _guard = self.write_lock.lock().await;
        self.repository.save(&wallets).await?;
        Ok(wallets.len())
    }

    /// Replace the collection with the demo wallets built around `today`.
    pub async fn generate_sample(&self, today: NaiveDate) -> ResultEngine<usize> {
        let wallets = sample_wallets(today)?;
        self.replace_wallets(wallets).await
    }

    pub async fn monthly_report(
        &self,
        month: Month,
        currency: Option<&str>,
    ) -> ResultEngine<MonthlyReport> {
        let wallets = self.repository.load().await?;
        monthly_report(&wallets, month, currency)
    }
}

#[derive(Debug, Default)]
pub struct EngineBuilder<R = ()> {
    repository: R,
}

impl EngineBuilder<()> {
    /// Pass the required repository
    pub fn repository<R: WalletRepository>(self, repository: R) -> EngineBuilder<R> {
        EngineBuilder { repository }
    }
}

impl<R: WalletRepository> EngineBuilder<R> {
    /// Construct `Engine`
    pub fn build(self) -> Engine<R> {
        Engine {
            repository: self.repository,
            write_lock: Mutex::new(()),
        }
    }
}

/// Resolve `selector` as a wallet id first, then as a unique name.
fn find_wallet(wallets: &[Wallet], selector: &str) -> ResultEngine<usize> {
    if let Ok(id) = Uuid::parse_str(selector.trim()) {
        return wallets
            .iter()
            .position(|wallet| wallet.id() == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()));
    }

    let mut matches = wallets
        .iter()
        .enumerate()
        .filter(|(_, wallet)| util::same_name(wallet.name(), selector))
        .map(|(index, _)| index);

    let index = matches
        .next()
        .ok_or_else(|| EngineError::KeyNotFound(selector.trim().to_string()))?;
    if matches.next().is_some() {
        return Err(EngineError::AmbiguousWallet(selector.trim().to_string()));
    }
    Ok(index)
}
