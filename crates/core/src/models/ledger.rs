use serde::{Deserialize, Serialize};

use super::category::Category;
use super::spending::Spending;
use super::user::User;

/// The main data container: every user with their categories and spendings.
/// Serialized as a whole by the storage layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub users: Vec<User>,

    pub categories: Vec<Category>,

    /// Spendings, oldest first
    pub spendings: Vec<Spending>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    pub fn category(&self, username: &str, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.username == username && c.name == name)
    }

    pub fn user_categories<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a Category> + 'a {
        self.categories.iter().filter(move |c| c.username == username)
    }

    pub fn user_spendings<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a Spending> + 'a {
        self.spendings.iter().filter(move |s| s.username == username)
    }
}
