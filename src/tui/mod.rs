// ABOUTME: TUI module — ratatui full-screen interface for parlor.
// ABOUTME: Sidebar, chat display, input handling, status bar, and terminal lifecycle.

pub mod input;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use state::*;
