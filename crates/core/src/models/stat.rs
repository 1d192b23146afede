use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::period::FilterPeriod;

/// Parameters of a statistics request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatQuery {
    /// Keep only spendings made in this currency
    #[serde(default)]
    pub filter_currency: Option<Currency>,

    /// Currency the sums are reported in
    #[serde(default)]
    pub stat_currency: Option<Currency>,

    /// Time window; `None` means all time
    #[serde(default)]
    pub filter_period: Option<FilterPeriod>,
}

impl StatQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_currency(mut self, currency: Currency) -> Self {
        self.filter_currency = Some(currency);
        self
    }

    pub fn stat_currency(mut self, currency: Currency) -> Self {
        self.stat_currency = Some(currency);
        self
    }

    pub fn filter_period(mut self, period: FilterPeriod) -> Self {
        self.filter_period = Some(period);
        self
    }
}

/// Aggregated spending statistics for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Sum of all category sums, in `currency`
    pub total: Decimal,

    /// Currency every value is reported in
    pub currency: Currency,

    /// Per-category breakdown (zero sums omitted)
    pub stat_by_categories: Vec<StatByCategory>,
}

impl Stat {
    pub fn empty(currency: Currency) -> Self {
        Self {
            total: Decimal::ZERO,
            currency,
            stat_by_categories: Vec::new(),
        }
    }

    /// Look up a bucket by category name.
    pub fn category(&self, name: &str) -> Option<&StatByCategory> {
        self.stat_by_categories
            .iter()
            .find(|c| c.category_name == name)
    }
}

/// Sum of one category (or of the archived bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatByCategory {
    pub category_name: String,

    pub currency: Currency,

    /// Rounded to 2 decimal places
    pub sum: Decimal,

    /// Earliest contributing spending
    pub first_spend_date: NaiveDate,

    /// Latest contributing spending
    pub last_spend_date: NaiveDate,
}
