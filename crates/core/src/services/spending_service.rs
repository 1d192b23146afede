use log::warn;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::ledger::Ledger;
use crate::models::spending::Spending;
use crate::models::user::User;

/// Manages users, categories and spendings stored in the ledger.
///
/// Pure business logic — no I/O. Every mutation is validated first;
/// a rejected request leaves the ledger untouched.
pub struct SpendingService {
    max_active_categories: usize,
}

impl SpendingService {
    pub fn new(max_active_categories: usize) -> Self {
        Self {
            max_active_categories,
        }
    }

    // ── Users ───────────────────────────────────────────────────────

    pub fn register_user(&self, ledger: &mut Ledger, user: User) -> Result<(), CoreError> {
        if user.username.is_empty() {
            return Err(CoreError::ValidationError("username must not be empty".into()));
        }
        if !user.currency.is_specified() {
            return Err(CoreError::ValidationError(format!(
                "user '{}' needs a currency",
                user.username
            )));
        }
        if ledger.user(&user.username).is_some() {
            return Err(CoreError::ValidationError(format!(
                "user '{}' already exists",
                user.username
            )));
        }
        ledger.users.push(user);
        Ok(())
    }

    /// Make two users friends of each other.
    pub fn add_friendship(&self, ledger: &mut Ledger, a: &str, b: &str) -> Result<(), CoreError> {
        if a == b {
            return Err(CoreError::ValidationError("a user can't befriend themselves".into()));
        }
        for (me, other) in [(a, b), (b, a)] {
            let user = ledger
                .user_mut(me)
                .ok_or_else(|| CoreError::UserNotFound(me.to_string()))?;
            if !user.is_friend(other) {
                user.friends.push(other.to_string());
            }
        }
        Ok(())
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn add_category(&self, ledger: &mut Ledger, category: Category) -> Result<Uuid, CoreError> {
        self.require_user(ledger, &category.username)?;
        if category.name.is_empty() {
            return Err(CoreError::ValidationError("category name must not be empty".into()));
        }
        if ledger.category(&category.username, &category.name).is_some() {
            return Err(CoreError::ValidationError(format!(
                "category '{}' already exists",
                category.name
            )));
        }
        if !category.archived {
            self.check_active_limit(ledger, &category.username)?;
        }
        let id = category.id;
        ledger.categories.push(category);
        Ok(id)
    }

    /// Archive or restore a category. Restoring counts against the active limit.
    pub fn set_category_archived(
        &self,
        ledger: &mut Ledger,
        username: &str,
        name: &str,
        archived: bool,
    ) -> Result<(), CoreError> {
        let current = ledger
            .category(username, name)
            .map(|c| c.archived)
            .ok_or_else(|| CoreError::CategoryNotFound(name.to_string()))?;

        if current && !archived {
            self.check_active_limit(ledger, username)?;
        }

        if let Some(category) = ledger
            .categories
            .iter_mut()
            .find(|c| c.username == username && c.name == name)
        {
            category.archived = archived;
        }
        Ok(())
    }

    pub fn categories_for<'a>(
        &self,
        ledger: &'a Ledger,
        username: &str,
        exclude_archived: bool,
    ) -> Vec<&'a Category> {
        let mut categories: Vec<&Category> = ledger
            .categories
            .iter()
            .filter(|c| c.username == username && !(exclude_archived && c.archived))
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    // ── Spendings ───────────────────────────────────────────────────

    pub fn add_spending(&self, ledger: &mut Ledger, spending: Spending) -> Result<Uuid, CoreError> {
        if let Err(e) = self.validate_spending(ledger, &spending) {
            warn!("Rejected spending for '{}': {e}", spending.username);
            return Err(e);
        }
        let id = spending.id;
        // Keep date order (oldest first)
        let pos = ledger
            .spendings
            .partition_point(|s| s.spend_date <= spending.spend_date);
        ledger.spendings.insert(pos, spending);
        Ok(id)
    }

    /// A user's spendings, newest first.
    pub fn spendings_for<'a>(&self, ledger: &'a Ledger, username: &str) -> Vec<&'a Spending> {
        let mut spendings: Vec<&Spending> = ledger
            .spendings
            .iter()
            .filter(|s| s.username == username)
            .collect();
        spendings.reverse();
        spendings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn validate_spending(&self, ledger: &Ledger, spending: &Spending) -> Result<(), CoreError> {
        self.require_user(ledger, &spending.username)?;
        if ledger.category(&spending.username, &spending.category).is_none() {
            return Err(CoreError::CategoryNotFound(spending.category.clone()));
        }
        if spending.amount < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "amount must not be negative, got {}",
                spending.amount
            )));
        }
        if !spending.currency.is_specified() {
            return Err(CoreError::ValidationError(
                "spending currency must not be UNSPECIFIED".into(),
            ));
        }
        if spending.description.trim().is_empty() {
            return Err(CoreError::ValidationError("description must not be empty".into()));
        }
        Ok(())
    }

    fn require_user(&self, ledger: &Ledger, username: &str) -> Result<(), CoreError> {
        ledger
            .user(username)
            .map(|_| ())
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))
    }

    fn check_active_limit(&self, ledger: &Ledger, username: &str) -> Result<(), CoreError> {
        let active = ledger
            .user_categories(username)
            .filter(|c| !c.archived)
            .count();
        if active >= self.max_active_categories {
            return Err(CoreError::ValidationError(format!(
                "Can't have more than {} active categories",
                self.max_active_categories
            )));
        }
        Ok(())
    }
}

impl Default for SpendingService {
    fn default() -> Self {
        Self::new(8)
    }
}
