//! Message Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::users::models::{UserId, UserRef},
    ids::TypedId,
};

/// Message Id
pub type MessageId = TypedId<Message>;

/// Contact-form message as listed in the admin inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: MessageId,
    /// Sender name.
    pub name: String,
    /// Reply-to address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// When it was received.
    pub created_at: Timestamp,

    /// The account the message was sent from, if the sender was signed in.
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Body of `POST /api/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    /// Sender name.
    pub name: String,
    /// Reply-to address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,

    /// Serialized as `null` for anonymous visitors.
    pub user_id: Option<UserId>,
}
