use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, FOREIGN_CATEGORIES_MESSAGE};
use crate::models::category::Category;
use crate::models::currency::Currency;
use crate::models::ledger::Ledger;

/// Shape of a friends request: how deep to nest and whether to load categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsQuery {
    /// Number of nested `friends` levels (1 = direct friends only)
    pub depth: usize,

    /// Load categories for every returned node
    pub include_categories: bool,
}

/// One user in a friends tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendNode {
    pub username: String,
    pub currency: Currency,
    pub categories: Option<Vec<Category>>,
    pub friends: Vec<FriendNode>,
}

/// Caller-scoped visibility rules.
///
/// A caller may read only their own categories, and friends queries may
/// nest only up to `max_friends_depth` levels.
pub struct AccessService {
    max_friends_depth: usize,
}

impl AccessService {
    pub fn new(max_friends_depth: usize) -> Self {
        Self { max_friends_depth }
    }

    /// Fails unless `requester` and `owner` are the same user.
    pub fn ensure_same_user(&self, requester: &str, owner: &str) -> Result<(), CoreError> {
        if requester != owner {
            warn!("'{requester}' tried to read categories of '{owner}'");
            return Err(CoreError::AccessDenied(FOREIGN_CATEGORIES_MESSAGE.to_string()));
        }
        Ok(())
    }

    pub fn check_friends_depth(&self, depth: usize) -> Result<(), CoreError> {
        if depth > self.max_friends_depth {
            warn!("Friends query depth {depth} over limit {}", self.max_friends_depth);
            return Err(CoreError::DepthLimitExceeded(self.max_friends_depth));
        }
        Ok(())
    }

    /// Categories of `owner` as seen by `requester`.
    pub fn categories(
        &self,
        ledger: &Ledger,
        requester: &str,
        owner: &str,
    ) -> Result<Vec<Category>, CoreError> {
        self.ensure_same_user(requester, owner)?;
        let mut categories: Vec<Category> = ledger.user_categories(owner).cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// Build the requester's friends tree.
    ///
    /// The root node is the requester; `query.depth` levels of friends hang
    /// below it. Asking for categories anywhere below the root fails, since
    /// those belong to other users.
    pub fn friends_tree(
        &self,
        ledger: &Ledger,
        requester: &str,
        query: &FriendsQuery,
    ) -> Result<FriendNode, CoreError> {
        self.check_friends_depth(query.depth)?;
        self.node(ledger, requester, requester, query, query.depth)
    }

    fn node(
        &self,
        ledger: &Ledger,
        requester: &str,
        username: &str,
        query: &FriendsQuery,
        remaining: usize,
    ) -> Result<FriendNode, CoreError> {
        let user = ledger
            .user(username)
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;

        let categories = if query.include_categories {
            Some(self.categories(ledger, requester, username)?)
        } else {
            None
        };

        let friends = if remaining == 0 {
            Vec::new()
        } else {
            user.friends
                .iter()
                .map(|f| self.node(ledger, requester, f, query, remaining - 1))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(FriendNode {
            username: user.username.clone(),
            currency: user.currency,
            categories,
            friends,
        })
    }
}

impl Default for AccessService {
    fn default() -> Self {
        Self::new(2)
    }
}
