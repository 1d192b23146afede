use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Currencies known to the system.
///
/// The set is closed: rates exist for every variant except `Unspecified`,
/// which only stands for "the caller did not set a currency".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Usd,
    Eur,
    Kzt,
    Unspecified,
}

impl Currency {
    /// Every currency that can take part in a conversion.
    pub const ALL: [Currency; 4] = [Currency::Rub, Currency::Usd, Currency::Eur, Currency::Kzt];

    /// ISO-style code (e.g., "RUB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Kzt => "KZT",
            Currency::Unspecified => "UNSPECIFIED",
        }
    }

    pub fn is_specified(&self) -> bool {
        *self != Currency::Unspecified
    }

    /// Returns the currency itself, or `InvalidArgument` naming `role`
    /// when it is missing or `Unspecified`.
    pub fn require(currency: Option<Currency>, role: &str) -> Result<Currency, CoreError> {
        match currency {
            Some(c) if c.is_specified() => Ok(c),
            Some(_) => Err(CoreError::InvalidArgument(format!(
                "{role} currency must not be UNSPECIFIED"
            ))),
            None => Err(CoreError::InvalidArgument(format!(
                "{role} currency is required"
            ))),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUB" => Ok(Currency::Rub),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "KZT" => Ok(Currency::Kzt),
            "UNSPECIFIED" => Ok(Currency::Unspecified),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown currency code '{other}'"
            ))),
        }
    }
}
