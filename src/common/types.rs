use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Domain model for one entry of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// User message stamped with the send time, which doubles as its id.
    pub fn user(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: sent_at.timestamp_millis().to_string(),
            text: text.into(),
            sender: Sender::User,
            timestamp: sent_at,
        }
    }

    /// Bot message with a locally generated id, used when the endpoint gave us none.
    pub fn local_bot(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Reply object returned by the `sendMessage` mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageEnvelope {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SendMessageEnvelope {
    /// Server-reported time of the reply, falling back to the local clock.
    pub fn reported_at(&self) -> DateTime<Utc> {
        match self.timestamp.as_deref() {
            Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
                log::warn!("Unparsable reply timestamp `{raw}`; using local clock");
                Utc::now()
            }),
            None => Utc::now(),
        }
    }
}

/// Parses the RFC 3339 timestamps the endpoint reports.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
