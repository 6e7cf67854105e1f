// ABOUTME: Status bar widget — server, session state, in-flight sends, and notices.
// ABOUTME: Displayed at the bottom of the TUI as a single-line summary.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::session::controller::SessionState;

/// Inputs for the status bar line.
pub struct StatusBarParams<'a> {
    pub server: &'a str,
    pub state: SessionState,
    pub sends_in_flight: usize,
    pub notice: Option<&'a str>,
}

/// Human label for the session state.
pub fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Empty => "new chat",
        SessionState::Loading => "loading...",
        SessionState::Ready => "ready",
        SessionState::Failed => "load failed",
    }
}

/// Render the status bar line.
pub fn status_line(params: &StatusBarParams) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(format!(" {} ", params.server), Style::default().fg(Color::Cyan)),
        Span::styled("| ", dim),
        Span::styled(
            format!("{} ", state_label(params.state)),
            match params.state {
                SessionState::Failed => Style::default().fg(Color::Red),
                SessionState::Loading => Style::default().fg(Color::Yellow),
                _ => Style::default().fg(Color::White),
            },
        ),
    ];

    if params.sends_in_flight > 0 {
        spans.push(Span::styled("| ", dim));
        spans.push(Span::styled(
            "waiting for reply... ",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(notice) = params.notice {
        spans.push(Span::styled("| ", dim));
        spans.push(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn shows_server_and_state() {
        let line = status_line(&StatusBarParams {
            server: "127.0.0.1:8000",
            state: SessionState::Ready,
            sends_in_flight: 0,
            notice: None,
        });
        let text = text_of(&line);
        assert!(text.contains("127.0.0.1:8000"));
        assert!(text.contains("ready"));
        assert!(!text.contains("waiting for reply"));
    }

    #[test]
    fn shows_waiting_indicator_while_sends_are_in_flight() {
        let line = status_line(&StatusBarParams {
            server: "s",
            state: SessionState::Ready,
            sends_in_flight: 2,
            notice: None,
        });
        assert!(text_of(&line).contains("waiting for reply..."));
    }

    #[test]
    fn shows_notices_in_red() {
        let line = status_line(&StatusBarParams {
            server: "s",
            state: SessionState::Empty,
            sends_in_flight: 0,
            notice: Some("conversation list: could not reach server"),
        });
        let text = text_of(&line);
        assert!(text.contains("could not reach server"));
        let notice_span = line.spans.last().unwrap();
        assert_eq!(notice_span.style.fg, Some(Color::Red));
    }

    #[test]
    fn state_labels() {
        assert_eq!(state_label(SessionState::Empty), "new chat");
        assert_eq!(state_label(SessionState::Loading), "loading...");
        assert_eq!(state_label(SessionState::Ready), "ready");
        assert_eq!(state_label(SessionState::Failed), "load failed");
    }
}
