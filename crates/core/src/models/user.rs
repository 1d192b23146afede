use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    /// Currency statistics fall back to when the caller sets none
    pub currency: Currency,

    /// Usernames of accepted friends
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    pub fn new(username: impl Into<String>, currency: Currency) -> Self {
        Self {
            username: username.into().trim().to_string(),
            currency,
            friends: Vec::new(),
        }
    }

    pub fn is_friend(&self, other: &str) -> bool {
        self.friends.iter().any(|f| f == other)
    }
}
