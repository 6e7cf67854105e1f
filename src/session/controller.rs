// ABOUTME: SessionController — the state machine binding the active conversation id,
// ABOUTME: the transcript, and the directory. All mutations are synchronous; async
// ABOUTME: completions come back through tagged apply calls that discard stale results.

use tracing::debug;

use crate::api::ApiError;
use crate::session::directory::{ConversationDirectory, ConversationId};
use crate::session::transcript::{Message, TranscriptStore};

/// Transcript shown when a history fetch fails.
pub const HISTORY_ERROR_SENTINEL: &str = "⚠ Could not load this conversation's history.";

/// Lifecycle of the active conversation's transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No conversation selected; transcript is empty.
    Empty,
    /// A history fetch is in flight for the active id.
    Loading,
    /// Transcript loaded and usable for the active id.
    Ready,
    /// The history fetch for the active id errored.
    Failed,
}

/// Descriptor for a history round trip the driver must execute.
/// Carries the id captured at issue time; `apply_history` compares it
/// against the active id at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFetch {
    pub target: ConversationId,
}

/// Orchestrator for one chat session: owns the active conversation
/// identity, the transcript it refers to, and the directory.
#[derive(Debug)]
pub struct SessionController {
    directory: ConversationDirectory,
    transcript: TranscriptStore,
    active: Option<ConversationId>,
    state: SessionState,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            directory: ConversationDirectory::new(),
            transcript: TranscriptStore::new(),
            active: None,
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The conversation id the transcript currently refers to.
    /// None means no selection or a not-yet-persisted new chat.
    pub fn active_id(&self) -> Option<ConversationId> {
        self.active
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn directory(&self) -> &ConversationDirectory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut ConversationDirectory {
        &mut self.directory
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut TranscriptStore {
        &mut self.transcript
    }

    /// Sending is accepted while Empty or Ready only; never while a
    /// history load is in flight, to avoid racing the replace.
    pub fn can_send(&self) -> bool {
        matches!(self.state, SessionState::Empty | SessionState::Ready)
    }

    /// Start a fresh, anonymous chat: active id cleared, transcript
    /// emptied. No network call.
    pub fn start_new_chat(&mut self) {
        self.active = None;
        self.state = SessionState::Empty;
        self.transcript.clear();
    }

    /// Switch to a conversation. The transcript keeps its old content
    /// only until the tagged fetch resolves; consumers see Loading in
    /// the meantime and never a half-written transcript.
    pub fn select_conversation(&mut self, id: ConversationId) -> HistoryFetch {
        self.active = Some(id);
        self.state = SessionState::Loading;
        HistoryFetch { target: id }
    }

    /// Apply a resolved history fetch.
    ///
    /// If the captured target no longer matches the active id the user
    /// has navigated away; the result is discarded without touching any
    /// state. Otherwise the transcript is replaced wholesale — with the
    /// fetched messages on success, or a single error sentinel on failure.
    pub fn apply_history(
        &mut self,
        target: ConversationId,
        result: Result<Vec<Message>, ApiError>,
    ) {
        if self.active != Some(target) {
            debug!(%target, "discarding stale history fetch");
            return;
        }
        match result {
            Ok(messages) => {
                self.transcript.replace(messages);
                self.state = SessionState::Ready;
            }
            Err(err) => {
                debug!(%target, error = %err, "history fetch failed");
                self.transcript
                    .replace(vec![Message::assistant(HISTORY_ERROR_SENTINEL)]);
                self.state = SessionState::Failed;
            }
        }
    }

    /// Adopt a server-assigned id for a chat that started anonymously.
    /// Callers must have verified the active id is still None.
    pub(crate) fn adopt_conversation(&mut self, id: ConversationId) {
        debug_assert!(self.active.is_none());
        self.active = Some(id);
        self.state = SessionState::Ready;
    }
}
