//! Auth models.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroize;

use crate::domain::users::models::{User, UserId};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
}

impl Session {
    /// Session for `user`.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// The signed-in user's profile.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The signed-in user's id.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// Whether the user may use the admin dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Give up the session, keeping the profile.
    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Plain-text password, wiped from memory on drop.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Wrap a plain-text password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Whether nothing was typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Body of `POST /api/users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: Password,
}

/// Body of `POST /api/users/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: Password,
}

/// Body of `PATCH /api/users/:id`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New default shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub(crate) user: User,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn password_is_redacted_in_debug_output() {
        let credentials = Credentials {
            email: "asha@example.com".to_owned(),
            password: Password::new("hunter2"),
        };

        let debug = format!("{credentials:?}");

        assert!(!debug.contains("hunter2"), "password leaked: {debug}");
    }

    #[test]
    fn profile_update_sends_only_present_fields() -> TestResult {
        let body = serde_json::to_value(ProfileUpdate {
            phone: Some("9876543210".to_owned()),
            ..ProfileUpdate::default()
        })?;

        assert_eq!(body, serde_json::json!({"phone": "9876543210"}));

        Ok(())
    }
}
