// ABOUTME: Remote service boundary — error taxonomy, reply types, and the RemoteStore trait.
// ABOUTME: The REST implementation lives in rest.rs; tests substitute scripted stores.

pub mod rest;

pub use rest::RestClient;

use async_trait::async_trait;

use crate::session::directory::{ConversationId, ConversationSummary};
use crate::session::transcript::Message;

/// Errors crossing the remote service boundary.
///
/// None of these are fatal: every caller maps them into a defined local
/// state (a sentinel message, a status notice, or an untouched directory).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No access token in the store. Normally caught by the auth gate
    /// before the session starts; appears mid-session only after a logout.
    #[error("not logged in — run `parlor login` first")]
    AuthMissing,
    /// Transport-level failure reaching the service.
    #[error("could not reach server: {0}")]
    Network(String),
    /// Non-success HTTP status. Carries the server's `detail` message
    /// when the body had one, otherwise a generic description.
    #[error("{0}")]
    Rejected(String),
}

/// Server reply to a send: the assistant's response plus the conversation
/// id it was filed under (newly assigned when the request carried none).
#[derive(Debug, Clone)]
pub struct AskReply {
    pub response: String,
    pub conversation_id: ConversationId,
}

/// The remote conversation store: one method per REST operation.
///
/// Implementations must not retry or cache; every call is a fresh round
/// trip with a fresh token snapshot.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `GET /conversations` — the authoritative summary list, in server order.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError>;

    /// `GET /history/{id}` — the full transcript of one conversation.
    async fn fetch_history(&self, id: ConversationId) -> Result<Vec<Message>, ApiError>;

    /// `POST /ask` — send one user message, receive the assistant reply.
    /// `conversation` is None for a not-yet-persisted new chat.
    async fn ask(
        &self,
        text: &str,
        conversation: Option<ConversationId>,
    ) -> Result<AskReply, ApiError>;

    /// `DELETE /conversation/{id}` — remove a conversation remotely.
    async fn delete_conversation(&self, id: ConversationId) -> Result<(), ApiError>;
}
