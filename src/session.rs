//! Acting-user context
//!
//! Every operation that acts on behalf of a user takes a `Session`. It only
//! identifies the user; there is no authentication behind it.

use serde::{Deserialize, Serialize};

use crate::models::{User, UserId};
use crate::store::UserStore;
use crate::{Result, WanderLensError};

/// Header the HTTP layer reads the acting user id from
pub const SESSION_HEADER: &str = "x-wanderlens-user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
}

impl Session {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Parse a header value into a session
    pub fn from_header_value(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<UserId>()
            .map(Self::new)
            .map_err(|_| WanderLensError::validation(format!("Invalid user id in session: {value}")))
    }

    /// Load the acting user; unknown ids are rejected
    pub async fn current_user(&self, users: &dyn UserStore) -> Result<User> {
        users
            .find_user(self.user_id)
            .await?
            .ok_or_else(|| WanderLensError::not_found(format!("User {} does not exist.", self.user_id)))
    }
}
