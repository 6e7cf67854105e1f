// ABOUTME: MessageExchange — one send/receive round trip with optimistic local updates.
// ABOUTME: The user's message appears immediately; the reply is applied only if the
// ABOUTME: conversation it was sent under is still the active one.

use tracing::debug;

use crate::api::{ApiError, AskReply};
use crate::session::controller::SessionController;
use crate::session::directory::ConversationId;
use crate::session::transcript::Message;

/// Assistant message substituted for a failed exchange.
pub const SEND_ERROR_SENTINEL: &str = "⚠ No reply — the message could not be delivered.";

/// Descriptor for a send round trip the driver must execute. The
/// conversation id is captured at call time and travels with the request
/// so the reply can be validated on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub text: String,
    pub conversation_id: Option<ConversationId>,
}

/// What happened when a reply was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Reply (or error sentinel) appended to the transcript.
    Applied {
        /// True when an anonymous chat adopted a server-assigned id;
        /// the driver should refresh the directory so it becomes visible.
        adopted_new_conversation: bool,
    },
    /// The active conversation changed in flight; nothing was mutated.
    Discarded,
}

/// Begin a send: validate, apply the optimistic update, and hand back the
/// request for the driver to execute.
///
/// Whitespace-only input is a silent no-op, not an error. Sends are
/// refused while a history load is in flight. The optimistic user message
/// is appended unconditionally otherwise and is never rolled back.
pub fn begin_send(session: &mut SessionController, text: &str) -> Option<SendRequest> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !session.can_send() {
        debug!("send refused: session not in a sendable state");
        return None;
    }

    session.transcript_mut().append(Message::user(trimmed));
    Some(SendRequest {
        text: trimmed.to_string(),
        conversation_id: session.active_id(),
    })
}

/// Apply a resolved send round trip.
///
/// The reply — success or failure — is appended only when the id captured
/// at call time still equals the active id; otherwise the transcript now
/// belongs to a different conversation and the reply is discarded rather
/// than misapplied. Exactly one assistant message is appended per applied
/// reply, and the user's own message is never removed.
pub fn apply_reply(
    session: &mut SessionController,
    tag: Option<ConversationId>,
    result: Result<AskReply, ApiError>,
) -> ReplyOutcome {
    if session.active_id() != tag {
        debug!(?tag, "discarding reply for a conversation no longer active");
        return ReplyOutcome::Discarded;
    }

    match result {
        Ok(reply) => {
            session.transcript_mut().append(Message::assistant(reply.response));
            // First exchange of an anonymous chat: the server assigned an
            // id. The guard above already ensured the active id is still
            // None, so adoption cannot clobber a later selection.
            let adopted = tag.is_none();
            if adopted {
                session.adopt_conversation(reply.conversation_id);
            }
            ReplyOutcome::Applied {
                adopted_new_conversation: adopted,
            }
        }
        Err(err) => {
            debug!(error = %err, "send failed; appending sentinel");
            session.transcript_mut().append(Message::assistant(SEND_ERROR_SENTINEL));
            ReplyOutcome::Applied {
                adopted_new_conversation: false,
            }
        }
    }
}
