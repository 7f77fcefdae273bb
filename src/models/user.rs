//! Traveller accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, WanderLensError};

pub type UserId = u64;

/// A registered traveller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    /// Free-text home town shown on the profile
    pub home_base: Option<String>,
    pub joined_at: DateTime<Utc>,
}

/// Sign-up form payload
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub home_base: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WanderLensError::validation("Please enter your name."));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(WanderLensError::validation("Please enter your email address."));
        }
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(WanderLensError::validation(format!(
                "'{email}' is not a valid email address."
            )));
        }

        Ok(())
    }

    /// Build the stored record under the given id
    #[must_use]
    pub fn into_user(self, id: UserId, joined_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            avatar_url: self.avatar_url,
            bio: self.bio,
            home_base: self.home_base,
            joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_requires_name_and_email() {
        assert!(new_user("", "a@b.com").validate().is_err());
        assert!(new_user("Ana", " ").validate().is_err());
        assert!(new_user("Ana", "not-an-email").validate().is_err());
        assert!(new_user("Ana", "ana@").validate().is_err());
        assert!(new_user("Ana", "ana@wander.lens").validate().is_ok());
    }

    #[test]
    fn test_into_user_trims_fields() {
        let user = new_user("  Ana ", " ana@wander.lens ").into_user(7, Utc::now());
        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@wander.lens");
    }
}
