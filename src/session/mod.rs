// ABOUTME: Session module — the conversation session manager.
// ABOUTME: Directory, transcript, controller state machine, message exchange,
// ABOUTME: deletion reconciliation, and the tagged completion-event dispatch.

pub mod controller;
pub mod directory;
pub mod exchange;
pub mod reconcile;
pub mod transcript;

pub use controller::{HistoryFetch, SessionController, SessionState, HISTORY_ERROR_SENTINEL};
pub use directory::{ConversationDirectory, ConversationId, ConversationSummary};
pub use exchange::{begin_send, ReplyOutcome, SendRequest, SEND_ERROR_SENTINEL};
pub use reconcile::reconcile_deletion;
pub use transcript::{Message, Role, TranscriptStore};

use crate::api::{ApiError, AskReply};

/// A completed remote round trip, tagged with whatever identity was
/// captured when the request was issued. Produced by the driver's spawned
/// request tasks and applied on the single state-owning task.
#[derive(Debug)]
pub enum SessionEvent {
    DirectoryLoaded(Result<Vec<ConversationSummary>, ApiError>),
    HistoryLoaded {
        target: ConversationId,
        result: Result<Vec<Message>, ApiError>,
    },
    ReplyArrived {
        tag: Option<ConversationId>,
        result: Result<AskReply, ApiError>,
    },
    DeleteResolved {
        id: ConversationId,
        result: Result<(), ApiError>,
    },
}

/// What the driver should do after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    None,
    /// A new conversation was adopted; re-fetch the directory so it shows up.
    RefreshDirectory,
    /// A failure worth a status-line notice (the session state itself is
    /// already consistent).
    Notice(String),
}

/// Apply one completion event to the session, enforcing the identity
/// guards. Every failure path lands in a defined state; nothing here
/// returns an error to the driver.
pub fn apply_event(session: &mut SessionController, event: SessionEvent) -> EventOutcome {
    match event {
        SessionEvent::DirectoryLoaded(result) => {
            match session.directory_mut().apply_refresh(result) {
                Ok(()) => EventOutcome::None,
                Err(err) => EventOutcome::Notice(format!("conversation list: {err}")),
            }
        }
        SessionEvent::HistoryLoaded { target, result } => {
            session.apply_history(target, result);
            EventOutcome::None
        }
        SessionEvent::ReplyArrived { tag, result } => {
            match exchange::apply_reply(session, tag, result) {
                ReplyOutcome::Applied {
                    adopted_new_conversation: true,
                } => EventOutcome::RefreshDirectory,
                _ => EventOutcome::None,
            }
        }
        SessionEvent::DeleteResolved { id, result } => {
            match reconcile_deletion(session, id, result) {
                Ok(()) => EventOutcome::None,
                Err(err) => EventOutcome::Notice(format!("delete failed: {err}")),
            }
        }
    }
}
