//! The module contains the error the engine can throw.
//!
//! The domain errors are:
//!
//! - [`InsufficientFunds`] thrown when an expense exceeds the wallet balance.
//! - [`InvalidAmount`] thrown when an amount is negative or cannot be parsed.
//! - [`KeyNotFound`] thrown when a wallet is not found.
//!
//! [`Storage`] and [`Serialization`] wrap failures of the JSON file store.
//!
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Storage`]: EngineError::Storage
//!  [`Serialization`]: EngineError::Serialization
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" matches more than one wallet")]
    AmbiguousWallet(String),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::AmbiguousWallet(a), Self::AmbiguousWallet(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
