use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::errors::CoreError;
use crate::models::category::{Category, ARCHIVED_BUCKET};
use crate::models::currency::Currency;
use crate::models::spending::Spending;
use crate::models::stat::{Stat, StatByCategory, StatQuery};
use crate::services::currency_service::CurrencyService;

/// Decimal places of every reported sum.
pub const STAT_PRECISION: u32 = 2;

/// Builds per-category spending statistics.
///
/// Pipeline: period filter → currency filter → conversion → grouping
/// (archived categories folded into one bucket) → rounding per bucket.
pub struct StatService {
    currency_service: CurrencyService,
}

/// Running totals of one bucket, unrounded.
struct Bucket {
    sum: Decimal,
    first: NaiveDate,
    last: NaiveDate,
}

impl StatService {
    pub fn new(currency_service: CurrencyService) -> Self {
        Self { currency_service }
    }

    /// Compute statistics over one user's spendings.
    ///
    /// `user_currency` is the reporting currency when the query sets neither
    /// a stat currency nor a filter currency. `today` anchors the period filter.
    pub fn compute_stats<'a>(
        &self,
        spendings: impl IntoIterator<Item = &'a Spending>,
        categories: impl IntoIterator<Item = &'a Category>,
        query: &StatQuery,
        user_currency: Currency,
        today: NaiveDate,
    ) -> Result<Stat, CoreError> {
        if let Some(filter) = query.filter_currency {
            Currency::require(Some(filter), "Filter")?;
        }
        let display = Self::resolve_display_currency(query, user_currency)?;

        let keys: HashMap<&str, &str> = categories
            .into_iter()
            .map(|c| (c.name.as_str(), c.stat_key()))
            .collect();

        let mut buckets: BTreeMap<&str, Bucket> = BTreeMap::new();
        let mut matched = 0usize;

        for spending in spendings {
            if let Some(period) = query.filter_period {
                if !period.contains(spending.spend_date, today) {
                    continue;
                }
            }
            if let Some(filter) = query.filter_currency {
                if spending.currency != filter {
                    continue;
                }
            }

            let converted =
                self.currency_service
                    .convert(spending.amount, spending.currency, display)?;
            matched += 1;

            let key = keys
                .get(spending.category.as_str())
                .copied()
                .unwrap_or(spending.category.as_str());

            match buckets.entry(key) {
                Entry::Occupied(mut slot) => {
                    let b = slot.get_mut();
                    b.sum = checked_sum(b.sum, converted, display)?;
                    b.first = b.first.min(spending.spend_date);
                    b.last = b.last.max(spending.spend_date);
                }
                Entry::Vacant(slot) => {
                    slot.insert(Bucket {
                        sum: converted,
                        first: spending.spend_date,
                        last: spending.spend_date,
                    });
                }
            }
        }

        let mut stat_by_categories: Vec<StatByCategory> = buckets
            .into_iter()
            .map(|(name, bucket)| StatByCategory {
                category_name: name.to_string(),
                currency: display,
                sum: round(bucket.sum),
                first_spend_date: bucket.first,
                last_spend_date: bucket.last,
            })
            .filter(|c| !c.sum.is_zero())
            .collect();

        // Alphabetical, with the archived bucket last
        stat_by_categories.sort_by(|a, b| {
            (a.category_name == ARCHIVED_BUCKET, &a.category_name)
                .cmp(&(b.category_name == ARCHIVED_BUCKET, &b.category_name))
        });

        let mut stat = Stat::empty(display);
        stat.total = round(
            stat_by_categories
                .iter()
                .try_fold(Decimal::ZERO, |acc, c| checked_sum(acc, c.sum, display))?,
        );
        stat.stat_by_categories = stat_by_categories;

        debug!(
            "Stat in {display}: {matched} spendings matched, {} buckets, total {}",
            stat.stat_by_categories.len(),
            stat.total
        );

        Ok(stat)
    }

    /// Stat currency, else filter currency, else the user's own currency.
    pub fn resolve_display_currency(
        query: &StatQuery,
        user_currency: Currency,
    ) -> Result<Currency, CoreError> {
        let resolved = query
            .stat_currency
            .or(query.filter_currency)
            .unwrap_or(user_currency);
        Currency::require(Some(resolved), "Stat")
    }
}

fn checked_sum(a: Decimal, b: Decimal, currency: Currency) -> Result<Decimal, CoreError> {
    a.checked_add(b)
        .ok_or_else(|| CoreError::InvalidArgument(format!("amount overflow summing {currency}")))
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STAT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
