// ABOUTME: Sidebar widget — renders the conversation directory as a selectable list.
// ABOUTME: Marks the active conversation and highlights the sidebar cursor.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::session::directory::{ConversationDirectory, ConversationId};

/// Render the conversation list. `selected` is the sidebar cursor,
/// highlighted only while the sidebar has focus; `active` is the
/// conversation bound to the visible transcript, marked with a bullet.
pub fn sidebar_lines(
    directory: &ConversationDirectory,
    selected: usize,
    active: Option<ConversationId>,
    focused: bool,
) -> Vec<Line<'static>> {
    if directory.is_empty() {
        return vec![Line::from(Span::styled(
            " no conversations",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    directory
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let marker = if active == Some(entry.id) { "● " } else { "  " };
            let mut style = Style::default();
            if active == Some(entry.id) {
                style = style.fg(Color::Cyan);
            }
            if focused && idx == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(
                format!("{}{}", marker, entry.display_title()),
                style,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::directory::ConversationSummary;

    fn directory(entries: &[(i64, &str)]) -> ConversationDirectory {
        let mut dir = ConversationDirectory::new();
        dir.apply_refresh(Ok(entries
            .iter()
            .map(|&(id, title)| ConversationSummary {
                id: ConversationId(id),
                title: title.to_string(),
            })
            .collect()))
            .unwrap();
        dir
    }

    #[test]
    fn empty_directory_shows_placeholder() {
        let dir = ConversationDirectory::new();
        let lines = sidebar_lines(&dir, 0, None, true);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans[0].content.contains("no conversations"));
    }

    #[test]
    fn entries_render_in_directory_order() {
        let dir = directory(&[(1, "First"), (2, "Second")]);
        let lines = sidebar_lines(&dir, 0, None, false);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].spans[0].content.contains("First"));
        assert!(lines[1].spans[0].content.contains("Second"));
    }

    #[test]
    fn active_conversation_is_marked() {
        let dir = directory(&[(1, "A"), (2, "B")]);
        let lines = sidebar_lines(&dir, 0, Some(ConversationId(2)), false);
        assert!(!lines[0].spans[0].content.contains('●'));
        assert!(lines[1].spans[0].content.contains('●'));
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn selection_highlight_only_when_focused() {
        let dir = directory(&[(1, "A"), (2, "B")]);

        let focused = sidebar_lines(&dir, 1, None, true);
        assert!(focused[1].spans[0].style.add_modifier.contains(Modifier::REVERSED));

        let unfocused = sidebar_lines(&dir, 1, None, false);
        assert!(!unfocused[1].spans[0]
            .style
            .add_modifier
            .contains(Modifier::REVERSED));
    }

    #[test]
    fn untitled_conversations_use_the_placeholder_title() {
        let dir = directory(&[(1, "")]);
        let lines = sidebar_lines(&dir, 0, None, false);
        assert!(lines[0].spans[0].content.contains("(untitled)"));
    }
}
