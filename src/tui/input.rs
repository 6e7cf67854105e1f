// ABOUTME: Keyboard input handling for the TUI — translates key events into actions.
// ABOUTME: Handles typing, sidebar navigation, and the delete-confirmation prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::state::{Focus, TuiState};

/// The result of processing a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// No driver action needed (state may still have changed locally).
    None,
    /// User submitted a chat message.
    Send(String),
    /// User chose the sidebar entry at this index.
    SelectIndex(usize),
    /// User asked for a fresh, empty chat.
    NewChat,
    /// User asked to re-fetch the conversation list.
    RefreshDirectory,
    /// User asked to delete the sidebar entry at this index (starts the
    /// confirmation prompt; nothing is issued yet).
    RequestDelete(usize),
    /// User confirmed the pending delete.
    ConfirmDelete,
    /// User wants to quit.
    Quit,
}

/// Process a key event against the current TUI state and return the
/// resulting action. `directory_len` bounds the sidebar selection.
pub fn handle_key(state: &mut TuiState, key: KeyEvent, directory_len: usize) -> Action {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // A pending delete prompt captures everything until answered.
    if state.has_pending_delete() {
        return handle_delete_prompt_key(state, key);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => return Action::NewChat,
            KeyCode::Char('r') => return Action::RefreshDirectory,
            _ => {}
        }
    }

    // PageUp/PageDown always scroll the chat.
    match key.code {
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
            return Action::None;
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
            return Action::None;
        }
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Sidebar => Focus::Input,
                Focus::Input => Focus::Sidebar,
            };
            return Action::None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Sidebar => handle_sidebar_key(state, key, directory_len),
        Focus::Input => handle_input_key(state, key),
    }
}

fn handle_delete_prompt_key(state: &mut TuiState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.pending_delete = None;
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_sidebar_key(state: &mut TuiState, key: KeyEvent, directory_len: usize) -> Action {
    match key.code {
        KeyCode::Up => {
            state.select_previous();
            Action::None
        }
        KeyCode::Down => {
            state.select_next(directory_len);
            Action::None
        }
        KeyCode::Enter => {
            if directory_len == 0 {
                Action::None
            } else {
                Action::SelectIndex(state.selected)
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if directory_len == 0 {
                Action::None
            } else {
                Action::RequestDelete(state.selected)
            }
        }
        _ => Action::None,
    }
}

fn handle_input_key(state: &mut TuiState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => match state.submit_input() {
            Some(text) => Action::Send(text),
            None => Action::None,
        },
        KeyCode::Char(c) => {
            state.insert_char_at_cursor(c);
            Action::None
        }
        KeyCode::Backspace => {
            state.backspace_char();
            Action::None
        }
        KeyCode::Delete => {
            state.delete_char_at_cursor();
            Action::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            Action::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            Action::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            Action::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            Action::None
        }
        // Up/Down scroll the chat while typing.
        KeyCode::Up => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
            Action::None
        }
        KeyCode::Down => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            Action::None
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::directory::ConversationId;
    use crate::tui::state::PendingDelete;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = TuiState::new("s".to_string());
        assert_eq!(handle_key(&mut state, ctrl('c'), 0), Action::Quit);

        state.pending_delete = Some(PendingDelete {
            id: ConversationId(1),
            title: "x".to_string(),
        });
        assert_eq!(handle_key(&mut state, ctrl('c'), 0), Action::Quit);
    }

    #[test]
    fn typing_and_enter_sends() {
        let mut state = TuiState::new("s".to_string());
        for c in "hi there".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)), 0);
        }
        assert_eq!(state.input, "hi there");

        let action = handle_key(&mut state, key(KeyCode::Enter), 0);
        assert_eq!(action, Action::Send("hi there".to_string()));
        assert_eq!(state.input, "");
    }

    #[test]
    fn enter_on_empty_input_does_nothing() {
        let mut state = TuiState::new("s".to_string());
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter), 0), Action::None);
    }

    #[test]
    fn tab_toggles_focus() {
        let mut state = TuiState::new("s".to_string());
        assert_eq!(state.focus, Focus::Input);
        handle_key(&mut state, key(KeyCode::Tab), 0);
        assert_eq!(state.focus, Focus::Sidebar);
        handle_key(&mut state, key(KeyCode::Tab), 0);
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn sidebar_navigation_and_selection() {
        let mut state = TuiState::new("s".to_string());
        state.focus = Focus::Sidebar;

        handle_key(&mut state, key(KeyCode::Down), 3);
        handle_key(&mut state, key(KeyCode::Down), 3);
        assert_eq!(state.selected, 2);

        let action = handle_key(&mut state, key(KeyCode::Enter), 3);
        assert_eq!(action, Action::SelectIndex(2));
    }

    #[test]
    fn sidebar_enter_on_empty_directory_does_nothing() {
        let mut state = TuiState::new("s".to_string());
        state.focus = Focus::Sidebar;
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter), 0), Action::None);
    }

    #[test]
    fn delete_key_requests_confirmation() {
        let mut state = TuiState::new("s".to_string());
        state.focus = Focus::Sidebar;
        state.selected = 1;
        let action = handle_key(&mut state, key(KeyCode::Char('d')), 2);
        assert_eq!(action, Action::RequestDelete(1));
    }

    #[test]
    fn delete_prompt_consumes_keys_until_answered() {
        let mut state = TuiState::new("s".to_string());
        state.pending_delete = Some(PendingDelete {
            id: ConversationId(1),
            title: "old chat".to_string(),
        });

        // Typing does not reach the input buffer.
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('x')), 1), Action::None);
        assert_eq!(state.input, "");

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('y')), 1),
            Action::ConfirmDelete
        );
    }

    #[test]
    fn delete_prompt_cancels_on_n_or_escape() {
        let mut state = TuiState::new("s".to_string());
        state.pending_delete = Some(PendingDelete {
            id: ConversationId(1),
            title: "old chat".to_string(),
        });
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc), 1), Action::None);
        assert!(!state.has_pending_delete());
    }

    #[test]
    fn ctrl_n_starts_a_new_chat_and_ctrl_r_refreshes() {
        let mut state = TuiState::new("s".to_string());
        assert_eq!(handle_key(&mut state, ctrl('n'), 0), Action::NewChat);
        assert_eq!(handle_key(&mut state, ctrl('r'), 0), Action::RefreshDirectory);
    }
}
