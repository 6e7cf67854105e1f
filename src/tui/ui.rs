// ABOUTME: Main TUI rendering function — assembles header, sidebar, chat, input, and status bar.
// ABOUTME: Splits the terminal frame into layout chunks and delegates to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::session::controller::{SessionController, SessionState};
use crate::tui::state::{Focus, TuiState};
use crate::tui::widgets::chat::render_chat_lines;
use crate::tui::widgets::sidebar::sidebar_lines;
use crate::tui::widgets::status::{status_line, StatusBarParams};

const SIDEBAR_WIDTH: u16 = 28;

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut TuiState, session: &SessionController) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Sidebar + chat
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Header
    let header = Line::from(Span::styled(
        " parlor",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), chunks[0]);

    // Main area: sidebar on the left, chat on the right.
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(chunks[1]);

    state.clamp_selection(session.directory().len());
    let sidebar = Paragraph::new(sidebar_lines(
        session.directory(),
        state.selected,
        session.active_id(),
        state.focus == Focus::Sidebar,
    ))
    .block(Block::default().borders(Borders::RIGHT).title(" chats "));
    frame.render_widget(sidebar, main[0]);

    // Chat area.
    let chat_lines = if session.transcript().is_empty()
        && session.state() == SessionState::Empty
    {
        vec![Line::from(Span::styled(
            "type a message to start a new conversation",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        render_chat_lines(session.transcript().messages())
    };

    let chat_chunk = main[1];
    let visible_height = chat_chunk.height;

    // Use ratatui's own line_count() to get an accurate wrapped line count
    // that exactly matches its internal rendering. This prevents scroll
    // miscalculations that could hide the bottom of chat content.
    let chat_paragraph = Paragraph::new(chat_lines).wrap(Wrap { trim: false });
    let total_lines = chat_paragraph.line_count(chat_chunk.width) as u16;
    let max_scroll = total_lines.saturating_sub(visible_height);

    // Cap scroll_offset so it can't go past the top of the content.
    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom)
    let scroll = max_scroll.saturating_sub(state.scroll_offset);

    frame.render_widget(chat_paragraph.scroll((scroll, 0)), chat_chunk);

    // Input area. A pending delete replaces the input with its prompt.
    let input_chunk = chunks[2];
    if let Some(ref pending) = state.pending_delete {
        let prompt = Paragraph::new(Span::styled(
            format!("delete \"{}\"? (y/n)", pending.title),
            Style::default().fg(Color::Yellow),
        ))
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(prompt, input_chunk);
    } else {
        let input_block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
        let input = Paragraph::new(Span::raw(state.input.clone())).block(input_block);
        frame.render_widget(input, input_chunk);

        // Cursor only while the input pane has focus.
        if state.focus == Focus::Input && input_chunk.width > 0 && input_chunk.height > 1 {
            state.clamp_cursor();
            let prefix: String = state.input.chars().take(state.cursor_pos).collect();
            let visual_col = UnicodeWidthStr::width(prefix.as_str());
            let max_visual_col = input_chunk.width.saturating_sub(1) as usize;
            let cursor_x = input_chunk
                .x
                .saturating_add(visual_col.min(max_visual_col) as u16);
            // +1 for the top border.
            let cursor_y = input_chunk.y.saturating_add(1);
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }

    // Status bar
    let status = status_line(&StatusBarParams {
        server: &state.server,
        state: session.state(),
        sends_in_flight: state.sends_in_flight,
        notice: state.notice.as_deref(),
    });
    frame.render_widget(Paragraph::new(status), chunks[3]);
}
