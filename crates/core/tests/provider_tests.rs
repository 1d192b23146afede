// ═══════════════════════════════════════════════════════════════════
// Provider Tests — FixedRateProvider, JsonRateProvider, RateTable
// loading and validation, custom providers through the facade
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use spending_stats_core::errors::CoreError;
use spending_stats_core::models::currency::Currency;
use spending_stats_core::models::settings::Settings;
use spending_stats_core::providers::fixed::{default_rates, FixedRateProvider};
use spending_stats_core::providers::json::JsonRateProvider;
use spending_stats_core::providers::traits::RateProvider;
use spending_stats_core::services::currency_service::RateTable;
use spending_stats_core::SpendingTracker;

// ═══════════════════════════════════════════════════════════════════
// Mock Provider
// ═══════════════════════════════════════════════════════════════════

struct MockRateProvider {
    rates: HashMap<Currency, Decimal>,
}

#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        "MockProvider"
    }

    async fn fetch_rates(&self) -> Result<HashMap<Currency, Decimal>, CoreError> {
        Ok(self.rates.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl RateProvider for FailingProvider {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn fetch_rates(&self) -> Result<HashMap<Currency, Decimal>, CoreError> {
        Err(CoreError::RateProvider {
            provider: self.name().into(),
            message: "offline".into(),
        })
    }
}

// ── Fixed ───────────────────────────────────────────────────────────

mod fixed {
    use super::*;

    #[tokio::test]
    async fn serves_built_in_rates() {
        let rates = FixedRateProvider::new().fetch_rates().await.unwrap();
        assert_eq!(rates.get(&Currency::Rub), Some(&dec!(0.015)));
        assert_eq!(rates.get(&Currency::Kzt), Some(&dec!(0.0021)));
        assert_eq!(rates.get(&Currency::Eur), Some(&dec!(1.08)));
        assert_eq!(rates.get(&Currency::Usd), Some(&Decimal::ONE));
        assert!(!rates.contains_key(&Currency::Unspecified));
    }

    #[tokio::test]
    async fn loads_into_default_table() {
        let table = RateTable::load(&FixedRateProvider::new()).await.unwrap();
        assert_eq!(table, RateTable::default());
    }
}

// ── Json ────────────────────────────────────────────────────────────

mod json {
    use super::*;

    #[tokio::test]
    async fn overrides_merge_over_defaults() {
        let provider = JsonRateProvider::from_json(r#"{"EUR": 1.1}"#).unwrap();
        let rates = provider.fetch_rates().await.unwrap();
        assert_eq!(rates.get(&Currency::Eur), Some(&dec!(1.1)));
        assert_eq!(rates.get(&Currency::Rub), Some(&dec!(0.015)));
    }

    #[test]
    fn malformed_document_is_a_provider_error() {
        let result = JsonRateProvider::from_json("[1, 2]");
        assert!(matches!(result, Err(CoreError::RateProvider { .. })));
    }
}

// ── RateTable validation ────────────────────────────────────────────

mod rate_table {
    use super::*;

    #[test]
    fn missing_currency_is_rejected() {
        let mut rates = default_rates();
        rates.remove(&Currency::Kzt);
        assert!(matches!(
            RateTable::new(rates),
            Err(CoreError::RateNotAvailable(ref c)) if c == "KZT"
        ));
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        let mut rates = default_rates();
        rates.insert(Currency::Eur, Decimal::ZERO);
        assert!(matches!(RateTable::new(rates), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn unspecified_rate_is_rejected() {
        let mut rates = default_rates();
        rates.insert(Currency::Unspecified, Decimal::ONE);
        assert!(RateTable::new(rates).is_err());
    }

    #[test]
    fn lookup_of_unspecified_fails() {
        let table = RateTable::default();
        assert!(table.rate(Currency::Unspecified).is_err());
    }
}

// ── Through the facade ──────────────────────────────────────────────

mod facade {
    use super::*;

    #[tokio::test]
    async fn custom_rates_drive_conversion() {
        let mut rates = default_rates();
        rates.insert(Currency::Eur, dec!(2));
        let provider = MockRateProvider { rates };

        let tracker = SpendingTracker::with_rate_provider(Settings::default(), &provider)
            .await
            .unwrap();
        let result = tracker
            .calculate_rate(Some(dec!(10)), Some(Currency::Eur), Some(Currency::Usd))
            .unwrap();
        assert_eq!(result, dec!(20));
    }

    #[tokio::test]
    async fn incomplete_provider_fails_construction() {
        let provider = MockRateProvider {
            rates: HashMap::from([(Currency::Usd, Decimal::ONE)]),
        };
        let result = SpendingTracker::with_rate_provider(Settings::default(), &provider).await;
        assert!(matches!(result, Err(CoreError::RateNotAvailable(_))));
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let result = SpendingTracker::with_rate_provider(Settings::default(), &FailingProvider).await;
        assert!(matches!(result, Err(CoreError::RateProvider { .. })));
    }

    #[tokio::test]
    async fn settings_overrides_are_applied() {
        let settings = Settings::from_json(r#"{"rates":{"RUB":0.01}}"#).unwrap();
        let tracker = SpendingTracker::from_settings(settings).await.unwrap();
        let result = tracker
            .calculate_rate(Some(dec!(100)), Some(Currency::Rub), Some(Currency::Usd))
            .unwrap();
        assert_eq!(result, dec!(1));
    }
}

// ── Synchronous overrides ───────────────────────────────────────────

mod overrides {
    use super::*;

    #[test]
    fn create_new_applies_settings_rates() {
        let mut settings = Settings::default();
        settings.rates.insert(Currency::Kzt, dec!(0.002));
        let tracker = SpendingTracker::create_new(settings).unwrap();
        let result = tracker
            .calculate_rate(Some(dec!(500)), Some(Currency::Kzt), Some(Currency::Usd))
            .unwrap();
        assert_eq!(result, dec!(1));
    }

    #[test]
    fn invalid_override_fails_construction() {
        let mut settings = Settings::default();
        settings.rates.insert(Currency::Eur, dec!(-1));
        assert!(SpendingTracker::create_new(settings).is_err());
    }
}
