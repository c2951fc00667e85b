//! Messages service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use tracing::instrument;

use crate::{
    domain::messages::{
        errors::MessagesServiceError,
        models::{Message, MessageId, NewMessage},
    },
    http::{ApiClient, NO_QUERY},
};

const MESSAGES_PATH: &str = "/api/messages";

/// [`MessagesService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpMessagesService {
    api: ApiClient,
}

impl HttpMessagesService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MessagesService for HttpMessagesService {
    #[instrument(skip(self))]
    async fn list_messages(&self) -> Result<Vec<Message>, MessagesServiceError> {
        Ok(self.api.get(MESSAGES_PATH, NO_QUERY).await?)
    }

    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn submit_message(&self, message: NewMessage) -> Result<(), MessagesServiceError> {
        validate(&message)?;

        Ok(self.api.send_unit(Method::POST, MESSAGES_PATH, &message).await?)
    }

    #[instrument(skip(self))]
    async fn resolve_message(&self, message: &MessageId) -> Result<(), MessagesServiceError> {
        let path = format!("{MESSAGES_PATH}/{message}/resolve");

        Ok(self.api.send_query(Method::POST, &path, NO_QUERY).await?)
    }
}

fn validate(message: &NewMessage) -> Result<(), MessagesServiceError> {
    let required = [
        (message.name.as_str(), "name is required"),
        (message.email.as_str(), "email is required"),
        (message.subject.as_str(), "subject is required"),
        (message.message.as_str(), "message is required"),
    ];

    if let Some((_, reason)) = required.iter().find(|(value, _)| value.trim().is_empty()) {
        return Err(MessagesServiceError::InvalidData(*reason));
    }

    if !message.email.contains('@') {
        return Err(MessagesServiceError::InvalidData("email is not valid"));
    }

    Ok(())
}

/// Contact form submissions and the admin inbox.
#[automock]
#[async_trait]
pub trait MessagesService: Send + Sync {
    /// Retrieve every contact message.
    async fn list_messages(&self) -> Result<Vec<Message>, MessagesServiceError>;

    /// Sends a contact-form message.
    async fn submit_message(&self, message: NewMessage) -> Result<(), MessagesServiceError>;

    /// Marks a message as handled.
    async fn resolve_message(&self, message: &MessageId) -> Result<(), MessagesServiceError>;
}
