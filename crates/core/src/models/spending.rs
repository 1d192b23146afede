use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;

/// A single spending record.
///
/// Immutable once stored in the ledger. The amount is kept in the
/// spending's own currency; conversion happens only when statistics are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spending {
    /// Unique identifier
    pub id: Uuid,

    /// Owner of the spending
    pub username: String,

    /// Name of the category this spending belongs to
    pub category: String,

    /// Free-text description
    pub description: String,

    /// Amount in `currency` (never negative)
    pub amount: Decimal,

    /// Original currency of the spending
    pub currency: Currency,

    /// Date of the spending (daily granularity)
    pub spend_date: NaiveDate,
}

impl Spending {
    pub fn new(
        username: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        currency: Currency,
        spend_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            category: category.into().trim().to_string(),
            description: description.into(),
            amount,
            currency,
            spend_date,
        }
    }

    /// Create a spending dated `days_minus` days before `today`.
    pub fn days_ago(
        username: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        currency: Currency,
        days_minus: u32,
        today: NaiveDate,
    ) -> Self {
        let spend_date = today - Duration::days(i64::from(days_minus));
        Self::new(username, category, description, amount, currency, spend_date)
    }
}
