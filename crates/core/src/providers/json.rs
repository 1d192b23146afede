use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::currency::Currency;

use super::fixed::default_rates;
use super::traits::RateProvider;

/// Provider reading rates from a JSON object such as `{"EUR": 1.1, "RUB": 0.012}`.
///
/// Currencies absent from the document fall back to the built-in rates,
/// so a partial override file is enough.
pub struct JsonRateProvider {
    overrides: HashMap<Currency, Decimal>,
}

impl JsonRateProvider {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let overrides: HashMap<Currency, Decimal> =
            serde_json::from_str(json).map_err(|e| CoreError::RateProvider {
                provider: "Json".into(),
                message: e.to_string(),
            })?;
        Ok(Self { overrides })
    }

    pub fn from_map(overrides: HashMap<Currency, Decimal>) -> Self {
        Self { overrides }
    }
}

#[async_trait]
impl RateProvider for JsonRateProvider {
    fn name(&self) -> &str {
        "Json"
    }

    async fn fetch_rates(&self) -> Result<HashMap<Currency, Decimal>, CoreError> {
        let mut rates = default_rates();
        rates.extend(self.overrides.iter().map(|(c, r)| (*c, *r)));
        Ok(rates)
    }
}
