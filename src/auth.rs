// ABOUTME: Token store and login/logout flow.
// ABOUTME: Tokens live in ~/.parlor/tokens.json; gated requests take a fresh
// ABOUTME: snapshot per call so a logout takes effect mid-session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// The credential triple handed out by `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// File-backed key/value store for the session tokens.
///
/// Reads go back to disk on every call rather than caching, so a
/// `parlor logout` in another terminal makes the next request fail as
/// unauthenticated instead of riding a stale credential.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current tokens, if logged in. Absence of a readable access token
    /// is the sole "not logged in" signal; a corrupt file counts as absent.
    pub fn snapshot(&self) -> Option<TokenSet> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let tokens: TokenSet = serde_json::from_str(&content).ok()?;
        if tokens.access_token.is_empty() {
            return None;
        }
        Some(tokens)
    }

    /// Persist a fresh token set (successful login).
    pub fn save(&self, tokens: &TokenSet) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(tokens)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the stored tokens (logout). Idempotent.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RejectionBody {
    detail: String,
}

/// Exchange credentials for a token set via `POST /login`.
///
/// The server's `detail` message is surfaced on rejection ("Invalid email
/// or password"); transport failures become a could-not-connect error.
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<TokenSet, ApiError> {
    let url = format!("{}/login", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .json(&LoginBody { email, password })
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<TokenSet>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    } else {
        let detail = response
            .json::<RejectionBody>()
            .await
            .map(|b| b.detail)
            .unwrap_or_else(|_| format!("login rejected with status {status}"));
        Err(ApiError::Rejected(detail))
    }
}
