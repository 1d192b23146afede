use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::currency::Currency;
use crate::errors::CoreError;

/// Runtime configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency assigned to newly registered users when none is given.
    pub default_currency: Currency,

    /// Deepest allowed nesting of friends sub-queries.
    pub max_friends_depth: usize,

    /// Maximum number of non-archived categories per user.
    pub max_active_categories: usize,

    /// Optional rate-to-USD overrides (e.g., {"EUR": 1.1}).
    /// Currencies not listed keep their built-in rate.
    pub rates: HashMap<Currency, Decimal>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: Currency::Rub,
            max_friends_depth: 2,
            max_active_categories: 8,
            rates: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.default_currency.is_specified() {
            return Err(CoreError::ValidationError(
                "default_currency must not be UNSPECIFIED".into(),
            ));
        }
        if self.max_active_categories == 0 {
            return Err(CoreError::ValidationError(
                "max_active_categories must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
