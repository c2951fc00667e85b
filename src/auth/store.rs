//! Session persistence.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{auth::SessionStoreError, domain::users::models::User};

/// Where the signed-in user is cached between runs.
#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the cached user, if any.
    async fn load(&self) -> Result<Option<User>, SessionStoreError>;

    /// Replace the cached user.
    async fn save(&self, user: &User) -> Result<(), SessionStoreError>;

    /// Forget the cached user.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

/// On-disk layout; the user lives under the `user` key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// JSON file holding `{"user": {...}}`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the file at `path`; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<User>, SessionStoreError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let file: SessionFile = serde_json::from_slice(&contents)?;

        Ok(file.user)
    }

    async fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_vec_pretty(&SessionFile {
            user: Some(user.clone()),
        })?;

        tokio::fs::write(&self.path, contents).await?;

        debug!(path = %self.path.display(), "session saved");

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::users::models::{Role, UserId};

    use super::*;

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            email: "asha@example.com".to_owned(),
            name: "Asha".to_owned(),
            role: Role::User,
            avatar: None,
            phone: None,
            address: Some("12 MG Road".to_owned()),
        }
    }

    #[tokio::test]
    async fn missing_file_is_no_session() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn saved_user_is_stored_under_user_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        store.save(&user()).await?;

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(store.path()).await?)?;

        assert_eq!(raw["user"]["_id"], "u1");
        assert_eq!(store.load().await?, Some(user()));

        store.clear().await?;

        assert_eq!(store.load().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        tokio::fs::write(&path, b"{not json").await?;

        let result = FileSessionStore::new(path).load().await;

        assert!(
            matches!(result, Err(SessionStoreError::Corrupt(_))),
            "got {result:?}"
        );

        Ok(())
    }
}
