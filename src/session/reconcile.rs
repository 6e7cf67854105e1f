// ABOUTME: DeletionReconciler — applies a confirmed remote delete to local state.
// ABOUTME: Removes the directory entry and resets the session when the victim was active.

use tracing::debug;

use crate::api::ApiError;
use crate::session::controller::SessionController;
use crate::session::directory::ConversationId;

/// Apply the outcome of a remote delete round trip.
///
/// On success the entry leaves the directory and, when it was the active
/// conversation, the session resets to an empty new chat. On failure
/// nothing is mutated locally — the conversation stays listed and, if
/// active, stays active — and the error is returned for display.
pub fn reconcile_deletion(
    session: &mut SessionController,
    id: ConversationId,
    result: Result<(), ApiError>,
) -> Result<(), ApiError> {
    if let Err(err) = result {
        debug!(%id, error = %err, "remote delete failed; keeping local state");
        return Err(err);
    }

    session.directory_mut().remove(id);
    if session.active_id() == Some(id) {
        session.start_new_chat();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::controller::SessionState;
    use crate::session::directory::ConversationSummary;
    use crate::session::transcript::Message;

    fn session_with_directory(ids: &[i64]) -> SessionController {
        let mut session = SessionController::new();
        let entries = ids
            .iter()
            .map(|&id| ConversationSummary {
                id: ConversationId(id),
                title: format!("chat {id}"),
            })
            .collect();
        session.directory_mut().apply_refresh(Ok(entries)).unwrap();
        session
    }

    #[test]
    fn deleting_the_active_conversation_resets_to_empty() {
        let mut session = session_with_directory(&[1, 2]);
        let fetch = session.select_conversation(ConversationId(1));
        session.apply_history(fetch.target, Ok(vec![Message::user("hi")]));

        reconcile_deletion(&mut session, ConversationId(1), Ok(())).unwrap();

        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.active_id(), None);
        assert!(session.transcript().is_empty());
        let ids: Vec<i64> = session.directory().entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn deleting_a_non_active_conversation_changes_only_the_directory() {
        let mut session = session_with_directory(&[1, 2, 3]);
        let fetch = session.select_conversation(ConversationId(2));
        session.apply_history(fetch.target, Ok(vec![Message::user("keep me")]));

        reconcile_deletion(&mut session, ConversationId(3), Ok(())).unwrap();

        assert_eq!(session.active_id(), Some(ConversationId(2)));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.transcript().len(), 1);
        let ids: Vec<i64> = session.directory().entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn failed_delete_mutates_nothing_locally() {
        let mut session = session_with_directory(&[1, 2]);
        let fetch = session.select_conversation(ConversationId(1));
        session.apply_history(fetch.target, Ok(vec![Message::user("still here")]));

        let err = reconcile_deletion(
            &mut session,
            ConversationId(1),
            Err(ApiError::Rejected("forbidden".into())),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));

        assert_eq!(session.active_id(), Some(ConversationId(1)));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.directory().len(), 2);
    }
}
