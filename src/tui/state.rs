// ABOUTME: TUI state — input buffer, pane focus, sidebar selection, scroll, and
// ABOUTME: the pending delete-confirmation prompt. Session state lives elsewhere;
// ABOUTME: this is presentation only.

use crate::session::directory::ConversationId;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// A delete awaiting y/n confirmation before the remote call is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: ConversationId,
    pub title: String,
}

/// Presentation state for the TUI.
pub struct TuiState {
    pub input: String,
    pub cursor_pos: usize,
    pub scroll_offset: u16,
    pub focus: Focus,
    /// Sidebar selection index into the directory.
    pub selected: usize,
    pub pending_delete: Option<PendingDelete>,
    /// One-line notice shown in the status bar (refresh/delete failures).
    pub notice: Option<String>,
    /// Number of send round trips currently in flight.
    pub sends_in_flight: usize,
    pub server: String,
}

impl TuiState {
    pub fn new(server: String) -> Self {
        Self {
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            focus: Focus::Input,
            selected: 0,
            pending_delete: None,
            notice: None,
            sends_in_flight: 0,
            server,
        }
    }

    /// Submit the current input buffer. Returns the trimmed text if non-empty.
    pub fn submit_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        self.input.clear();
        self.cursor_pos = 0;
        Some(trimmed)
    }

    /// Clamp the sidebar selection to the directory length.
    pub fn clamp_selection(&mut self, directory_len: usize) {
        if directory_len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(directory_len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, directory_len: usize) {
        if self.selected + 1 < directory_len {
            self.selected += 1;
        }
    }

    pub fn has_pending_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Clamp the cursor position to the valid character range of the input buffer.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.input_char_len());
    }

    /// Return the current cursor byte index in the UTF-8 input buffer.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.input, self.cursor_pos)
    }

    /// Return the total number of characters in the input buffer.
    pub fn input_char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.input.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }

        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.input, self.cursor_pos - 1);
        self.input.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.input_char_len() {
            return;
        }

        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.input, self.cursor_pos + 1);
        self.input.replace_range(start..end, "");
    }

    /// Move cursor one character to the left.
    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    /// Move cursor one character to the right.
    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.input_char_len() {
            self.cursor_pos += 1;
        }
    }

    /// Move cursor to start of input.
    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    /// Move cursor to end of input.
    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_char_len();
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}
