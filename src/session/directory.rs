// ABOUTME: ConversationDirectory — the local cache of conversation summaries.
// ABOUTME: Wholesale replacement on refresh; order comes from the server, never merged.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Opaque conversation identifier assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub i64);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the conversation list. Identity is the id; the title is
/// display-only and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(default)]
    pub title: String,
}

impl ConversationSummary {
    /// The title to show in the sidebar, with a placeholder for untitled
    /// conversations.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }
}

/// Ordered list of conversation summaries mirroring the remote store.
///
/// The server's order is authoritative. Refresh replaces the whole list;
/// the only local mutation is removal after a confirmed remote delete.
#[derive(Debug, Default)]
pub struct ConversationDirectory {
    entries: Vec<ConversationSummary>,
}

impl ConversationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the outcome of a refresh round trip.
    ///
    /// On success the entire list is replaced in server order; entries with
    /// a duplicate id keep the first occurrence. On failure the previous
    /// list is left untouched and the error is handed back for display.
    pub fn apply_refresh(
        &mut self,
        result: Result<Vec<ConversationSummary>, ApiError>,
    ) -> Result<(), ApiError> {
        let entries = result?;
        let mut seen = std::collections::HashSet::new();
        self.entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.id))
            .collect();
        Ok(())
    }

    /// Remove one entry by id, preserving the order of the remainder.
    /// Only called after the remote delete succeeded.
    pub fn remove(&mut self, id: ConversationId) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn entries(&self) -> &[ConversationSummary] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ConversationSummary> {
        self.entries.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, title: &str) -> ConversationSummary {
        ConversationSummary {
            id: ConversationId(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn refresh_replaces_wholesale_in_server_order() {
        let mut dir = ConversationDirectory::new();
        dir.apply_refresh(Ok(vec![summary(1, "A"), summary(2, "B")]))
            .unwrap();

        // A second refresh with a different set fully replaces the first.
        dir.apply_refresh(Ok(vec![summary(3, "C"), summary(1, "A2")]))
            .unwrap();
        let ids: Vec<i64> = dir.entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(dir.entries()[1].title, "A2");
    }

    #[test]
    fn failed_refresh_leaves_previous_list_untouched() {
        let mut dir = ConversationDirectory::new();
        dir.apply_refresh(Ok(vec![summary(1, "A"), summary(2, "B")]))
            .unwrap();

        let err = dir
            .apply_refresh(Err(ApiError::Network("connection refused".into())))
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));

        let ids: Vec<i64> = dir.entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2], "failed refresh must not change the list");
        assert_eq!(dir.entries()[0].title, "A");
        assert_eq!(dir.entries()[1].title, "B");
    }

    #[test]
    fn refresh_drops_duplicate_ids_keeping_first() {
        let mut dir = ConversationDirectory::new();
        dir.apply_refresh(Ok(vec![summary(1, "first"), summary(2, "B"), summary(1, "dup")]))
            .unwrap();
        let ids: Vec<i64> = dir.entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(dir.entries()[0].title, "first");
    }

    #[test]
    fn remove_preserves_order_of_remainder() {
        let mut dir = ConversationDirectory::new();
        dir.apply_refresh(Ok(vec![summary(1, "A"), summary(2, "B"), summary(3, "C")]))
            .unwrap();
        dir.remove(ConversationId(2));
        let ids: Vec<i64> = dir.entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut dir = ConversationDirectory::new();
        dir.apply_refresh(Ok(vec![summary(1, "A")])).unwrap();
        dir.remove(ConversationId(99));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn display_title_falls_back_for_empty_titles() {
        assert_eq!(summary(1, "Budget plan").display_title(), "Budget plan");
        assert_eq!(summary(2, "").display_title(), "(untitled)");
        assert_eq!(summary(3, "   ").display_title(), "(untitled)");
    }
}
