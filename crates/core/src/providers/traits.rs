use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::currency::Currency;

/// Source of exchange rates (rate to USD per currency).
///
/// The rate table is loaded from a provider once, when the tracker is built,
/// and never refreshed afterwards. Swapping the source means swapping the
/// provider; nothing else changes.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the rate-to-USD for as many currencies as the source knows.
    async fn fetch_rates(&self) -> Result<HashMap<Currency, Decimal>, CoreError>;
}
