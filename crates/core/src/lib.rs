pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::debug;
use models::{
    category::Category,
    currency::Currency,
    ledger::Ledger,
    settings::Settings,
    spending::Spending,
    stat::{Stat, StatQuery},
    user::User,
};
use providers::{json::JsonRateProvider, traits::RateProvider};
use rust_decimal::Decimal;
use services::{
    access_service::{AccessService, FriendNode, FriendsQuery},
    currency_service::{CurrencyRate, CurrencyService, RateTable},
    spending_service::SpendingService,
    stat_service::StatService,
};
use std::sync::Arc;
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the spending statistics core library.
/// Holds the ledger and all services needed to operate on it.
///
/// Every read takes the caller's username; that is the authenticated
/// identity supplied by whatever request layer sits in front.
#[must_use]
pub struct SpendingTracker {
    ledger: Ledger,
    settings: Settings,
    currency_service: CurrencyService,
    stat_service: StatService,
    spending_service: SpendingService,
    access_service: AccessService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for SpendingTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpendingTracker")
            .field("users", &self.ledger.users.len())
            .field("categories", &self.ledger.categories.len())
            .field("spendings", &self.ledger.spendings.len())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl SpendingTracker {
    /// Create an empty tracker using the built-in rates plus any overrides in `settings`.
    pub fn create_new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let rates = RateTable::with_overrides(&settings.rates)?;
        Ok(Self::build(Ledger::new(), settings, rates))
    }

    /// Create an empty tracker, loading the rate table once from `provider`.
    pub async fn with_rate_provider(
        settings: Settings,
        provider: &dyn RateProvider,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let rates = RateTable::load(provider).await?;
        Ok(Self::build(Ledger::new(), settings, rates))
    }

    /// Create an empty tracker from settings, applying their rate overrides.
    pub async fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        let provider = JsonRateProvider::from_map(settings.rates.clone());
        Self::with_rate_provider(settings, &provider).await
    }

    /// Load a saved ledger from snapshot bytes.
    pub fn load_from_bytes(data: &[u8], settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let ledger = StorageManager::load_from_bytes(data)?;
        let rates = RateTable::with_overrides(&settings.rates)?;
        Ok(Self::build(ledger, settings, rates))
    }

    /// Save the ledger to snapshot bytes. Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.ledger)?;
        self.dirty = false;
        Ok(bytes)
    }

    pub fn load_from_file(path: &str, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let ledger = StorageManager::load_from_file(path)?;
        let rates = RateTable::with_overrides(&settings.rates)?;
        Ok(Self::build(ledger, settings, rates))
    }

    /// Save to a snapshot file on disk. Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.ledger, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Users ───────────────────────────────────────────────────────

    /// Register a user. `None` currency means the configured default.
    pub fn register_user(
        &mut self,
        username: &str,
        currency: Option<Currency>,
    ) -> Result<(), CoreError> {
        let currency = currency.unwrap_or(self.settings.default_currency);
        self.spending_service
            .register_user(&mut self.ledger, User::new(username, currency))?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_friendship(&mut self, a: &str, b: &str) -> Result<(), CoreError> {
        self.spending_service.add_friendship(&mut self.ledger, a, b)?;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn get_user(&self, username: &str) -> Option<&User> {
        self.ledger.user(username)
    }

    /// Friends tree of the caller, `query.depth` levels deep.
    pub fn get_friends(
        &self,
        requester: &str,
        query: &FriendsQuery,
    ) -> Result<FriendNode, CoreError> {
        self.access_service
            .friends_tree(&self.ledger, requester, query)
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn add_category(
        &mut self,
        username: &str,
        name: &str,
        archived: bool,
    ) -> Result<uuid::Uuid, CoreError> {
        let category = if archived {
            Category::archived(username, name)
        } else {
            Category::new(username, name)
        };
        let id = self
            .spending_service
            .add_category(&mut self.ledger, category)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn set_category_archived(
        &mut self,
        username: &str,
        name: &str,
        archived: bool,
    ) -> Result<(), CoreError> {
        self.spending_service
            .set_category_archived(&mut self.ledger, username, name, archived)?;
        self.dirty = true;
        Ok(())
    }

    /// Categories of `owner`, readable only by `owner` themselves.
    pub fn get_categories(
        &self,
        requester: &str,
        owner: &str,
    ) -> Result<Vec<Category>, CoreError> {
        self.access_service
            .categories(&self.ledger, requester, owner)
    }

    /// The caller's categories, optionally without archived ones.
    #[must_use]
    pub fn get_own_categories(&self, username: &str, exclude_archived: bool) -> Vec<&Category> {
        self.spending_service
            .categories_for(&self.ledger, username, exclude_archived)
    }

    // ── Spendings ───────────────────────────────────────────────────

    pub fn add_spending(&mut self, spending: Spending) -> Result<uuid::Uuid, CoreError> {
        let id = self
            .spending_service
            .add_spending(&mut self.ledger, spending)?;
        self.dirty = true;
        Ok(id)
    }

    /// Add a spending dated `days_minus` days before today.
    pub fn add_spending_days_ago(
        &mut self,
        username: &str,
        category: &str,
        description: &str,
        amount: Decimal,
        currency: Currency,
        days_minus: u32,
    ) -> Result<uuid::Uuid, CoreError> {
        let today = chrono::Utc::now().date_naive();
        self.add_spending(Spending::days_ago(
            username,
            category,
            description,
            amount,
            currency,
            days_minus,
            today,
        ))
    }

    /// The caller's spendings, newest first.
    #[must_use]
    pub fn get_spendings(&self, username: &str) -> Vec<&Spending> {
        self.spending_service.spendings_for(&self.ledger, username)
    }

    // ── Statistics ──────────────────────────────────────────────────

    /// Statistics of the caller's spendings as of today.
    pub fn get_stat(&self, username: &str, query: &StatQuery) -> Result<Stat, CoreError> {
        self.get_stat_at(username, query, chrono::Utc::now().date_naive())
    }

    /// Statistics of the caller's spendings with an explicit "today".
    pub fn get_stat_at(
        &self,
        username: &str,
        query: &StatQuery,
        today: NaiveDate,
    ) -> Result<Stat, CoreError> {
        let user = self
            .ledger
            .user(username)
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;

        debug!("Stat for '{username}' with {query:?}");

        self.stat_service.compute_stats(
            self.ledger.user_spendings(username),
            self.ledger.user_categories(username),
            query,
            user.currency,
            today,
        )
    }

    // ── Currencies ──────────────────────────────────────────────────

    /// Convert an amount; see [`CurrencyService::calculate`] for the rules on missing operands.
    pub fn calculate_rate(
        &self,
        amount: Option<Decimal>,
        spend_currency: Option<Currency>,
        desired_currency: Option<Currency>,
    ) -> Result<Decimal, CoreError> {
        self.currency_service
            .calculate(amount, spend_currency, desired_currency)
    }

    pub fn all_currencies(&self) -> Result<Vec<CurrencyRate>, CoreError> {
        self.currency_service.all_currencies()
    }

    // ── Settings & Dirty State ──────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns `true` if the ledger has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Export the full ledger as JSON (unversioned, for debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Rebuild a tracker from the unversioned JSON produced by [`Self::to_json`].
    pub fn from_json(json: &str, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let ledger: Ledger = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse ledger: {e}")))?;
        let rates = RateTable::with_overrides(&settings.rates)?;
        Ok(Self::build(ledger, settings, rates))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger, settings: Settings, rates: RateTable) -> Self {
        let currency_service = CurrencyService::new(Arc::new(rates));
        let stat_service = StatService::new(currency_service.clone());
        let spending_service = SpendingService::new(settings.max_active_categories);
        let access_service = AccessService::new(settings.max_friends_depth);

        Self {
            ledger,
            settings,
            currency_service,
            stat_service,
            spending_service,
            access_service,
            dirty: false,
        }
    }
}
