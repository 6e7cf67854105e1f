// ABOUTME: RestClient — reqwest implementation of RemoteStore.
// ABOUTME: Bearer token is snapshot-read from the store per request; server
// ABOUTME: rejections surface the body's `detail` field when present.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ApiError, AskReply, RemoteStore};
use crate::auth::TokenStore;
use crate::session::directory::{ConversationId, ConversationSummary};
use crate::session::transcript::{Message, Role};

/// REST client for the remote conversation store.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

/// History item as the wire carries it; the timestamp may be absent.
#[derive(Debug, Deserialize)]
struct HistoryItem {
    role: Role,
    content: String,
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct AskBody<'a> {
    message: &'a str,
    conversation_id: Option<ConversationId>,
}

#[derive(Deserialize)]
struct AskResponse {
    response: String,
    conversation_id: ConversationId,
}

#[derive(Deserialize)]
struct RejectionBody {
    detail: String,
}

impl RestClient {
    pub fn new(base_url: &str, tokens: TokenStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Build a request with a fresh bearer-token snapshot. Fails fast as
    /// unauthenticated when the store holds no token anymore.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let tokens = self.tokens.snapshot().ok_or(ApiError::AuthMissing)?;
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(tokens.access_token))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(rejection(status, response).await)
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("malformed response: {e}")))
    }
}

/// Turn a non-success response into a Rejected error, preferring the
/// server's own `detail` message.
async fn rejection(status: StatusCode, response: Response) -> ApiError {
    match response.json::<RejectionBody>().await {
        Ok(body) => ApiError::Rejected(body.detail),
        Err(_) => ApiError::Rejected(format!("server returned status {status}")),
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        let builder = self.request(Method::GET, "/conversations")?;
        self.json(builder).await
    }

    async fn fetch_history(&self, id: ConversationId) -> Result<Vec<Message>, ApiError> {
        let builder = self.request(Method::GET, &format!("/history/{id}"))?;
        let items: Vec<HistoryItem> = self.json(builder).await?;
        debug!(%id, count = items.len(), "history fetched");
        let received_at = Utc::now();
        Ok(items
            .into_iter()
            .map(|item| Message {
                role: item.role,
                content: item.content,
                timestamp: item.timestamp.unwrap_or(received_at),
            })
            .collect())
    }

    async fn ask(
        &self,
        text: &str,
        conversation: Option<ConversationId>,
    ) -> Result<AskReply, ApiError> {
        let builder = self.request(Method::POST, "/ask")?.json(&AskBody {
            message: text,
            conversation_id: conversation,
        });
        let reply: AskResponse = self.json(builder).await?;
        Ok(AskReply {
            response: reply.response,
            conversation_id: reply.conversation_id,
        })
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/conversation/{id}"))?;
        self.send(builder).await?;
        Ok(())
    }
}
