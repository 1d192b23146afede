use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::currency::Currency;
use crate::providers::fixed::default_rates;
use crate::providers::traits::RateProvider;

/// Immutable rate-to-USD table covering every valid currency.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Build a table, rejecting gaps, `UNSPECIFIED` entries and non-positive rates.
    pub fn new(rates: HashMap<Currency, Decimal>) -> Result<Self, CoreError> {
        if rates.contains_key(&Currency::Unspecified) {
            return Err(CoreError::ValidationError(
                "UNSPECIFIED cannot carry an exchange rate".into(),
            ));
        }
        for currency in Currency::ALL {
            match rates.get(&currency) {
                Some(rate) if *rate > Decimal::ZERO => {}
                Some(rate) => {
                    return Err(CoreError::ValidationError(format!(
                        "Rate for {currency} must be positive, got {rate}"
                    )))
                }
                None => return Err(CoreError::RateNotAvailable(currency.to_string())),
            }
        }
        Ok(Self { rates })
    }

    /// Built-in rates with `overrides` applied on top.
    pub fn with_overrides(overrides: &HashMap<Currency, Decimal>) -> Result<Self, CoreError> {
        let mut rates = default_rates();
        rates.extend(overrides.iter().map(|(c, r)| (*c, *r)));
        Self::new(rates)
    }

    /// Load the table once from a provider.
    pub async fn load(provider: &dyn RateProvider) -> Result<Self, CoreError> {
        let rates = provider.fetch_rates().await?;
        debug!("Loaded {} rates from {}", rates.len(), provider.name());
        Self::new(rates)
    }

    /// Rate of `currency` to USD.
    pub fn rate(&self, currency: Currency) -> Result<Decimal, CoreError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| CoreError::RateNotAvailable(currency.to_string()))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            rates: default_rates(),
        }
    }
}

/// A currency together with its rate to USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: Currency,
    pub rate: Decimal,
}

/// Converts amounts between currencies through their USD rates.
///
/// Cross rates come from the common base: `amount * rate(from) / rate(to)`,
/// so no pairwise table is needed. The service only reads its table and can
/// be shared freely.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    rates: Arc<RateTable>,
}

impl CurrencyService {
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    /// Conversion request with every operand optional.
    ///
    /// A missing or zero amount yields zero before the currencies are looked at;
    /// otherwise both currencies must be present and not `UNSPECIFIED`.
    pub fn calculate(
        &self,
        amount: Option<Decimal>,
        from: Option<Currency>,
        to: Option<Currency>,
    ) -> Result<Decimal, CoreError> {
        let amount = match amount {
            Some(a) if !a.is_zero() => a,
            _ => return Ok(Decimal::ZERO),
        };
        let from = Currency::require(from, "Spend").inspect_err(|e| warn!("{e}"))?;
        let to = Currency::require(to, "Desired").inspect_err(|e| warn!("{e}"))?;
        self.convert(amount, from, to)
    }

    /// Convert `amount` from one currency to another. Identity conversions are exact.
    pub fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Result<Decimal, CoreError> {
        let from = Currency::require(Some(from), "Spend")?;
        let to = Currency::require(Some(to), "Desired")?;

        if from == to || amount.is_zero() {
            return Ok(amount);
        }

        let from_rate = self.rates.rate(from)?;
        let to_rate = self.rates.rate(to)?;

        amount
            .checked_mul(from_rate)
            .and_then(|usd| usd.checked_div(to_rate))
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!("amount overflow converting {from} to {to}"))
            })
    }

    /// Every convertible currency with its rate to USD, in declaration order.
    pub fn all_currencies(&self) -> Result<Vec<CurrencyRate>, CoreError> {
        Currency::ALL
            .iter()
            .map(|c| {
                Ok(CurrencyRate {
                    currency: *c,
                    rate: self.rates.rate(*c)?,
                })
            })
            .collect()
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new(Arc::new(RateTable::default()))
    }
}
