// ABOUTME: App orchestrator — wires the remote store, session controller, and TUI.
// ABOUTME: One tokio task owns all state; network round trips run in spawned tasks
// ABOUTME: that report back through a tagged SessionEvent channel.

use std::io::Stdout;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::RemoteStore;
use crate::config::Config;
use crate::session::{
    self, apply_event, EventOutcome, HistoryFetch, SendRequest, SessionController, SessionEvent,
};
use crate::session::directory::ConversationId;
use crate::tui::input::{self, Action};
use crate::tui::state::{PendingDelete, TuiState};
use crate::tui::{terminal, ui};

/// Top-level application: owns the session and presentation state and
/// drives the event loop.
pub struct App {
    store: Arc<dyn RemoteStore>,
    session: SessionController,
    tui: TuiState,
    events_tx: mpsc::Sender<SessionEvent>,
    events_rx: mpsc::Receiver<SessionEvent>,
}

impl App {
    pub fn new(config: &Config, store: Arc<dyn RemoteStore>) -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        Self {
            store,
            session: SessionController::new(),
            tui: TuiState::new(config.server.base_url.clone()),
            events_tx,
            events_rx,
        }
    }

    /// Run the application: set up the terminal, drive the event loop,
    /// and restore the terminal on the way out.
    pub async fn run(mut self) -> anyhow::Result<()> {
        terminal::install_panic_hook();
        let mut term = terminal::setup_terminal()?;
        let result = self.event_loop(&mut term).await;
        terminal::restore_terminal()?;
        result
    }

    async fn event_loop(
        &mut self,
        term: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        info!("session started");
        self.spawn_directory_refresh();

        let mut term_events = EventStream::new();
        loop {
            term.draw(|frame| ui::render(frame, &mut self.tui, &self.session))?;

            tokio::select! {
                maybe_event = term_events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if self.handle_key(key) {
                                break;
                            }
                        }
                        // Resizes are handled by the redraw at the top of the loop.
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
                Some(event) = self.events_rx.recv() => {
                    self.handle_session_event(event);
                }
            }
        }

        info!("session ended");
        Ok(())
    }

    /// Translate a key event into session mutations and spawned requests.
    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = input::handle_key(&mut self.tui, key, self.session.directory().len());
        if action != Action::None {
            // Any deliberate action clears a stale failure notice.
            self.tui.notice = None;
        }
        match action {
            Action::Quit => return true,
            Action::Send(text) => {
                match session::begin_send(&mut self.session, &text) {
                    Some(request) => {
                        self.tui.sends_in_flight += 1;
                        self.tui.scroll_offset = 0;
                        self.spawn_send(request);
                    }
                    // Non-empty text refused: a history load is in flight.
                    None => {
                        self.tui.notice =
                            Some("wait for the conversation to finish loading".to_string());
                    }
                }
            }
            Action::SelectIndex(index) => {
                if let Some(entry) = self.session.directory().get(index) {
                    let id = entry.id;
                    let fetch = self.session.select_conversation(id);
                    self.tui.scroll_offset = 0;
                    self.spawn_history_fetch(fetch);
                }
            }
            Action::NewChat => {
                self.session.start_new_chat();
                self.tui.scroll_offset = 0;
            }
            Action::RefreshDirectory => self.spawn_directory_refresh(),
            Action::RequestDelete(index) => {
                if let Some(entry) = self.session.directory().get(index) {
                    self.tui.pending_delete = Some(PendingDelete {
                        id: entry.id,
                        title: entry.display_title().to_string(),
                    });
                }
            }
            Action::ConfirmDelete => {
                if let Some(pending) = self.tui.pending_delete.take() {
                    self.spawn_delete(pending.id);
                }
            }
            Action::None => {}
        }
        false
    }

    /// Apply a completed round trip to the session and act on the outcome.
    fn handle_session_event(&mut self, event: SessionEvent) {
        if matches!(event, SessionEvent::ReplyArrived { .. }) {
            self.tui.sends_in_flight = self.tui.sends_in_flight.saturating_sub(1);
        }
        match apply_event(&mut self.session, event) {
            EventOutcome::None => {}
            EventOutcome::RefreshDirectory => self.spawn_directory_refresh(),
            EventOutcome::Notice(notice) => self.tui.notice = Some(notice),
        }
        // Show the newest content after any applied completion.
        self.tui.scroll_offset = 0;
    }

    fn spawn_directory_refresh(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = store.list_conversations().await;
            let _ = tx.send(SessionEvent::DirectoryLoaded(result)).await;
        });
    }

    fn spawn_history_fetch(&self, fetch: HistoryFetch) {
        debug!(conversation = %fetch.target, "fetching history");
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = store.fetch_history(fetch.target).await;
            let _ = tx
                .send(SessionEvent::HistoryLoaded {
                    target: fetch.target,
                    result,
                })
                .await;
        });
    }

    fn spawn_send(&self, request: SendRequest) {
        debug!(conversation = ?request.conversation_id, "sending message");
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = store.ask(&request.text, request.conversation_id).await;
            let _ = tx
                .send(SessionEvent::ReplyArrived {
                    tag: request.conversation_id,
                    result,
                })
                .await;
        });
    }

    fn spawn_delete(&self, id: ConversationId) {
        debug!(%id, "deleting conversation");
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = store.delete_conversation(id).await;
            let _ = tx.send(SessionEvent::DeleteResolved { id, result }).await;
        });
    }
}
