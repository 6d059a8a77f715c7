use chrono::NaiveDate;

use engine::{
    Engine, EngineError, JsonFileStore, MemoryStore, Money, Month, NewWalletCmd, TransactionCmd,
    TransactionKind,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn data_file() -> std::path::PathBuf {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
    std::fs::create_dir_all(&root).unwrap();
    root.join(format!("wallets_{}.json", Uuid::new_v4()))
}

async fn engine_with_wallet() -> (Engine<MemoryStore>, Uuid) {
    let engine = Engine::builder().repository(MemoryStore::default()).build();
    let wallet = engine
        .create_wallet(NewWalletCmd::new("Cash", "rub", Money::new(10_000)))
        .await
        .unwrap();
    (engine, wallet.id())
}

#[tokio::test]
async fn create_wallet_normalizes_and_persists() {
    let (engine, wallet_id) = engine_with_wallet().await;

    let wallets = engine.wallets().await.unwrap();
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].id(), wallet_id);
    assert_eq!(wallets[0].currency().code(), "RUB");
    assert_eq!(wallets[0].current_balance(), Money::new(10_000));
}

#[tokio::test]
async fn create_wallet_rejects_bad_input() {
    let engine = Engine::builder().repository(MemoryStore::default()).build();

    let err = engine
        .create_wallet(NewWalletCmd::new("  ", "RUB", Money::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine
        .create_wallet(NewWalletCmd::new("Cash", "", Money::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCurrency(_)));

    assert!(engine.wallets().await.unwrap().is_empty());
}

#[tokio::test]
async fn income_and_expense_update_balance() {
    let (engine, wallet_id) = engine_with_wallet().await;

    engine
        .add_transaction(
            TransactionCmd::income("cash", Money::new(5_000), date(2025, 11, 1)).description("salary"),
        )
        .await
        .unwrap();
    let tx = engine
        .add_transaction(
            TransactionCmd::expense(wallet_id.to_string(), Money::new(2_500), date(2025, 11, 2))
                .description(" lunch "),
        )
        .await
        .unwrap();

    assert_eq!(tx.kind(), TransactionKind::Expense);
    assert_eq!(tx.description(), "lunch");

    let wallet = engine.wallet("Cash").await.unwrap();
    assert_eq!(wallet.transactions().len(), 2);
    assert_eq!(wallet.current_balance(), Money::new(12_500));
}

#[tokio::test]
async fn over_limit_expense_is_not_saved() {
    let (engine, _) = engine_with_wallet().await;

    let err = engine
        .add_transaction(TransactionCmd::expense("Cash", Money::new(10_001), date(2025, 11, 2)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    let wallet = engine.wallet("Cash").await.unwrap();
    assert!(wallet.transactions().is_empty());
    assert_eq!(wallet.current_balance(), Money::new(10_000));
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let (engine, _) = engine_with_wallet().await;

    let err = engine
        .add_transaction(TransactionCmd::income("Cash", Money::new(-1), date(2025, 11, 2)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(engine.wallet("Cash").await.unwrap().transactions().is_empty());
}

#[tokio::test]
async fn unknown_wallet_is_reported() {
    let (engine, _) = engine_with_wallet().await;

    let err = engine
        .add_transaction(TransactionCmd::income("Savings", Money::new(100), date(2025, 11, 2)))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Savings".to_string()));
}

#[tokio::test]
async fn report_totals_match_inputs() {
    let (engine, _) = engine_with_wallet().await;
    engine
        .create_wallet(NewWalletCmd::new("Dollars", "USD", Money::new(1_000)))
        .await
        .unwrap();

    for (wallet, kind, amount, day) in [
        ("Cash", TransactionKind::Income, 3_000, 1),
        ("Cash", TransactionKind::Expense, 1_250, 4),
        ("Cash", TransactionKind::Expense, 750, 2),
        ("Dollars", TransactionKind::Expense, 999, 9),
    ] {
        engine
            .add_transaction(TransactionCmd::new(
                wallet,
                kind,
                Money::new(amount),
                date(2025, 11, day),
            ))
            .await
            .unwrap();
    }

    let month = Month::new(2025, 11).unwrap();
    let report = engine.monthly_report(month, None).await.unwrap();
    let totals: Vec<_> = report
        .groups
        .iter()
        .map(|g| (g.currency.code().to_string(), g.kind, g.total_minor.minor()))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("RUB".to_string(), TransactionKind::Income, 3_000),
            ("RUB".to_string(), TransactionKind::Expense, 2_000),
            ("USD".to_string(), TransactionKind::Expense, 999),
        ]
    );

    let rub = engine.monthly_report(month, Some("rub")).await.unwrap();
    assert_eq!(rub.groups.len(), 2);
    assert_eq!(rub.top_expenses.len(), 1);
    assert_eq!(rub.top_expenses[0].top[0].amount_minor, Money::new(1_250));
}

#[tokio::test]
async fn sample_replaces_collection() {
    let (engine, _) = engine_with_wallet().await;

    let count = engine.generate_sample(date(2025, 11, 17)).await.unwrap();
    assert_eq!(count, 3);

    let wallets = engine.wallets().await.unwrap();
    assert_eq!(wallets.len(), 3);
    let cash = wallets.iter().find(|w| w.name() == "Cash").unwrap();
    assert_eq!(cash.transactions().len(), 4);
    assert_eq!(cash.current_balance(), Money::new(4_100_00));
}

#[tokio::test]
async fn json_store_round_trip_is_lossless() {
    let path = data_file();
    let engine = Engine::builder()
        .repository(JsonFileStore::new(&path))
        .build();
    engine.generate_sample(date(2025, 11, 17)).await.unwrap();
    let before = engine.wallets().await.unwrap();

    let reopened = Engine::builder()
        .repository(JsonFileStore::new(&path))
        .build();
    let after = reopened.wallets().await.unwrap();

    assert_eq!(before, after);
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.current_balance(), b.current_balance());
        for (ta, tb) in a.transactions().iter().zip(b.transactions()) {
            assert_eq!(ta.id(), tb.id());
            assert_eq!(ta.date(), tb.date());
            assert_eq!(ta.amount(), tb.amount());
            assert_eq!(ta.description(), tb.description());
        }
    }

    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_are_not_lost() {
    let (engine, wallet_id) = engine_with_wallet().await;
    let engine = std::sync::Arc::new(engine);

    let mut tasks = tokio::task::JoinSet::new();
    for n in 1..=50 {
        let engine = engine.clone();
        tasks.spawn(async move {
            engine
                .add_transaction(TransactionCmd::income(
                    wallet_id.to_string(),
                    Money::new(100),
                    date(2025, 11, n % 28 + 1),
                ))
                .await
                .unwrap();
        });
    }
    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }

    let wallet = engine.wallet("Cash").await.unwrap();
    assert_eq!(wallet.transactions().len(), 50);
    assert_eq!(wallet.current_balance(), Money::new(10_000 + 50 * 100));
}
