use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::currency::Currency;

use super::traits::RateProvider;

/// Built-in rate-to-USD table.
pub fn default_rates() -> HashMap<Currency, Decimal> {
    HashMap::from([
        (Currency::Rub, dec!(0.015)),
        (Currency::Kzt, dec!(0.0021)),
        (Currency::Eur, dec!(1.08)),
        (Currency::Usd, Decimal::ONE),
    ])
}

/// Provider serving the built-in constant rates.
pub struct FixedRateProvider;

impl FixedRateProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FixedRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn fetch_rates(&self) -> Result<HashMap<Currency, Decimal>, CoreError> {
        Ok(default_rates())
    }
}
