// ABOUTME: Chat widget — renders the transcript into styled ratatui Lines.
// ABOUTME: User and assistant messages have distinct prefixes and colors.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::session::transcript::{Message, Role};

/// Render the transcript into styled Lines for display.
pub fn render_chat_lines(messages: &[Message]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (idx, msg) in messages.iter().enumerate() {
        // Blank separator line between messages.
        if idx > 0 {
            lines.push(Line::from(""));
        }

        match msg.role {
            Role::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "❯ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(msg.content.clone()),
                ]));
            }
            Role::Assistant => {
                // First line gets the prefix, subsequent lines are plain.
                let content_lines: Vec<&str> = msg.content.split('\n').collect();
                for (i, text) in content_lines.iter().enumerate() {
                    if i == 0 {
                        lines.push(Line::from(vec![
                            Span::styled(
                                "⏺ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::raw(text.to_string()),
                        ]));
                    } else {
                        lines.push(Line::from(Span::raw(text.to_string())));
                    }
                }
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_green_prefix() {
        let messages = vec![Message::user("hello")];
        let lines = render_chat_lines(&messages);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert!(spans.len() >= 2);
        assert_eq!(spans[0].content, "❯ ");
        assert_eq!(spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn assistant_message_has_cyan_prefix() {
        let messages = vec![Message::assistant("hi there")];
        let lines = render_chat_lines(&messages);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "⏺ ");
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn multiline_assistant_message() {
        let messages = vec![Message::assistant("line1\nline2\nline3")];
        let lines = render_chat_lines(&messages);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn blank_separator_between_messages() {
        let messages = vec![Message::user("hi"), Message::assistant("hello")];
        let lines = render_chat_lines(&messages);
        // user line, blank separator, assistant line
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].width(), 0);
    }
}
