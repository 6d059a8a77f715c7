use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code attached to a wallet and to every amount it holds.
///
/// The code is stored trimmed and upper-cased, so `" usd"` and `"USD"` name the
/// same currency. Wallets never convert between currencies; reports group by
/// this code.
///
/// ## Minor units
///
/// The engine stores monetary values as an `i64` number of **minor units** (see
/// `Money`). Every currency is treated as having two fraction digits.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw user-provided code.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.0.eq_ignore_ascii_case(raw.trim())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let code = value.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(EngineError::InvalidCurrency("empty currency".to_string()));
        }
        if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(EngineError::InvalidCurrency(format!(
                "unsupported currency: {code}"
            )));
        }
        Ok(Currency(code))
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::try_from(value.as_str())
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}
