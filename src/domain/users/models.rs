//! User Models

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<User>;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store administrator.
    Admin,

    /// Regular customer.
    User,
}

/// User Model
///
/// Any `password` field the backend echoes back is dropped on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Default shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl User {
    /// Whether the user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Overlay the fields present in `patch`.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            email,
            name,
            role,
            avatar,
            phone,
            address,
        } = patch;

        if let Some(email) = email {
            self.email = email;
        }

        if let Some(name) = name {
            self.name = name;
        }

        if let Some(role) = role {
            self.role = role;
        }

        if avatar.is_some() {
            self.avatar = avatar;
        }

        if phone.is_some() {
            self.phone = phone;
        }

        if address.is_some() {
            self.address = address;
        }
    }
}

/// Partial user returned by a profile update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPatch {
    /// Changed email.
    pub email: Option<String>,
    /// Changed display name.
    pub name: Option<String>,
    /// Changed role.
    pub role: Option<Role>,
    /// Changed avatar URL.
    pub avatar: Option<String>,
    /// Changed phone number.
    pub phone: Option<String>,
    /// Changed shipping address.
    pub address: Option<String>,
}

/// User summary the backend populates in place of a bare user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// A user reference that is either a bare id or a populated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    /// Unpopulated reference.
    Id(UserId),
    /// Populated reference.
    Summary(UserSummary),
}

impl UserRef {
    /// Referenced user's id, in either form.
    #[must_use]
    pub fn id(&self) -> &UserId {
        match self {
            Self::Id(id) => id,
            Self::Summary(summary) => &summary.id,
        }
    }

    /// Display name when populated.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Summary(summary) => Some(summary.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn password_is_dropped_on_decode() -> TestResult {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","email":"a@b.c","name":"Asha","role":"user","password":"hash"}"#,
        )?;

        let encoded = serde_json::to_string(&user)?;

        assert!(!encoded.contains("password"), "password leaked: {encoded}");

        Ok(())
    }

    #[test]
    fn apply_only_overwrites_present_fields() {
        let mut user = User {
            id: UserId::new("u1"),
            email: "a@b.c".to_owned(),
            name: "Asha".to_owned(),
            role: Role::User,
            avatar: None,
            phone: Some("999".to_owned()),
            address: None,
        };

        user.apply(UserPatch {
            address: Some("12 MG Road".to_owned()),
            ..UserPatch::default()
        });

        assert_eq!(user.address.as_deref(), Some("12 MG Road"));
        assert_eq!(user.phone.as_deref(), Some("999"));
        assert_eq!(user.name, "Asha");
    }
}
