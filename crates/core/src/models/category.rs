use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bucket name that replaces every archived category in statistics.
pub const ARCHIVED_BUCKET: &str = "Archived";

/// A user's spending category.
///
/// Names are unique per user; spendings reference categories by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,

    /// Owner of the category
    pub username: String,

    /// Display name (trimmed)
    pub name: String,

    /// Archived categories lose their identity in statistics
    #[serde(default)]
    pub archived: bool,
}

impl Category {
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            name: name.into().trim().to_string(),
            archived: false,
        }
    }

    pub fn archived(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            archived: true,
            ..Self::new(username, name)
        }
    }

    /// Key this category's spendings are grouped under in statistics.
    pub fn stat_key(&self) -> &str {
        if self.archived {
            ARCHIVED_BUCKET
        } else {
            &self.name
        }
    }
}
