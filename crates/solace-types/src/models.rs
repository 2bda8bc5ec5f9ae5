use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as seen outside the credential store.
/// There is deliberately no password field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One message of a conversation. Turns live on the client and are posted
/// back with every chat request.
///
/// Clients may label the speaker with `sender`, `role` or both; `sender`
/// wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTurn")]
pub struct ConversationTurn {
    pub id: Option<String>,
    pub content: String,
    pub sender: Sender,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawTurn {
    #[serde(default)]
    id: Option<String>,
    content: String,
    #[serde(default)]
    sender: Option<Sender>,
    #[serde(default)]
    role: Option<Sender>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<RawTurn> for ConversationTurn {
    type Error = String;

    fn try_from(raw: RawTurn) -> Result<Self, Self::Error> {
        let sender = raw
            .sender
            .or(raw.role)
            .ok_or_else(|| "missing field `sender`".to_string())?;
        Ok(Self {
            id: raw.id,
            content: raw.content,
            sender,
            timestamp: raw.timestamp,
        })
    }
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content)
    }

    fn new(sender: Sender, content: impl Into<String>) -> Self {
        let prefix = match sender {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        };
        Self {
            id: Some(format!("{}-{}", prefix, uuid::Uuid::new_v4())),
            content: content.into(),
            sender,
            timestamp: Some(Utc::now()),
        }
    }
}
