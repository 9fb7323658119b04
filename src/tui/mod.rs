//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! reducer in `core` never touches a terminal.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (posting overlay spinner): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, terminal resize,
//!   or a completed gateway call.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.
//!
//! ## Background calls
//!
//! Gateway calls run on tokio tasks and report back over an `mpsc` channel
//! as `Action`s. Calls are fire-and-forget: nothing is aborted on quit, and
//! out-of-order list fetches are defused by the reducer's sequence gate
//! rather than by cancellation.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{BoardGateway, JsonApiGateway, PostOutcome};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ComposeBox, ComposeEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate entries with arrow keys; Del removes the selected one.
    /// Typing auto-switches to Compose.
    Cursor,
    /// Text editing in the compose box. Esc switches to Cursor.
    Compose,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub compose_box: ComposeBox,
    // Modal input mode
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            compose_box: ComposeBox::new(),
            input_mode: InputMode::Compose, // User expects to type immediately
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for compose editing
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Strip the scheme off the base URL for display in the title bar.
fn host_label(base_url: &str) -> String {
    base_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway: Arc<dyn BoardGateway> = Arc::new(JsonApiGateway::new(config.base_url.clone()));
    let mut app = App::new(gateway, host_label(&config.base_url));
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background gateway calls
    let (tx, rx) = mpsc::channel();

    // Initial mount: fetch the board before the first frame.
    let effect = update(&mut app, Action::Refresh);
    run_effect(effect, &app, &tx);

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync ComposeBox props with App state
        tui.compose_box.error = app.post_error.clone();
        tui.compose_box.posting = app.is_posting;

        // The posting overlay spinner is the only animation
        let animating = app.is_posting;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Ctrl+R re-fetches the board in either mode
            if matches!(event, TuiEvent::Refresh) {
                let effect = update(&mut app, Action::Refresh);
                run_effect(effect, &app, &tx);
                continue;
            }

            // Scroll events always go to the message list
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            let entry_count = app.messages.as_ref().map_or(0, |m| m.len());

            // Modal event dispatch
            match tui.input_mode {
                InputMode::Compose => {
                    // Esc → switch to Cursor mode, selecting the newest entry
                    if matches!(event, TuiEvent::Escape) {
                        tui.input_mode = InputMode::Cursor;
                        tui.message_list.selected =
                            if entry_count > 0 { Some(0) } else { None };
                        continue;
                    }

                    // ComposeBox handles everything else
                    if let Some(compose_event) = tui.compose_box.handle_event(&event) {
                        match compose_event {
                            ComposeEvent::Submit(_) => {
                                // The reducer reads the synced draft and
                                // refuses re-entrant submits on its own.
                                let effect = update(&mut app, Action::Submit);
                                run_effect(effect, &app, &tx);
                            }
                            ComposeEvent::Changed => {
                                let draft = tui.compose_box.text().to_string();
                                update(&mut app, Action::DraftChanged(draft));
                            }
                        }
                    }
                }
                InputMode::Cursor => {
                    match event {
                        // Esc in Cursor mode is a no-op
                        TuiEvent::Escape => {}
                        // Up/Down navigate entries
                        TuiEvent::CursorUp => {
                            tui.message_list.select_prev(entry_count);
                        }
                        TuiEvent::CursorDown => {
                            tui.message_list.select_next(entry_count);
                        }
                        // Del/Backspace remove the selected entry
                        TuiEvent::Delete | TuiEvent::Backspace => {
                            let selected_id = tui
                                .message_list
                                .selected
                                .and_then(|idx| app.messages.as_ref()?.get(idx))
                                .map(|msg| msg.id);
                            if let Some(id) = selected_id {
                                let effect = update(&mut app, Action::DeleteMessage(id));
                                run_effect(effect, &app, &tx);
                            }
                        }
                        // Typing auto-switches to Compose mode and forwards
                        // the event; regaining focus dismisses the last
                        // submit error.
                        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                            tui.input_mode = InputMode::Compose;
                            tui.message_list.clear_selection();
                            update(&mut app, Action::DraftFocused);
                            if tui.compose_box.handle_event(&event).is_some() {
                                let draft = tui.compose_box.text().to_string();
                                update(&mut app, Action::DraftChanged(draft));
                            }
                        }
                        // Enter switches to Compose mode
                        TuiEvent::Submit => {
                            tui.input_mode = InputMode::Compose;
                            tui.message_list.clear_selection();
                            update(&mut app, Action::DraftFocused);
                        }
                        _ => {}
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background gateway completions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                should_quit = true;
                break;
            }
            run_effect(effect, &app, &tx);
        }

        if should_quit {
            break;
        }

        // Keep the compose box in step with the reducer-owned draft
        // (cleared after an accepted post, untouched after a rejection).
        if tui.compose_box.text() != app.draft {
            tui.compose_box.set_text(&app.draft);
            needs_redraw = true;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Execute a reducer effect. `Effect::Quit` is handled at the call sites.
fn run_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::SpawnFetch(seq) => spawn_fetch(app.gateway.clone(), seq, tx.clone()),
        Effect::SpawnPost(body) => spawn_post(app.gateway.clone(), body, tx.clone()),
        Effect::SpawnDelete(id) => spawn_delete(app.gateway.clone(), id, tx.clone()),
        Effect::None | Effect::Quit => {}
    }
}

fn spawn_fetch(gateway: Arc<dyn BoardGateway>, seq: u64, tx: mpsc::Sender<Action>) {
    info!("Spawning list fetch (seq={})", seq);
    tokio::spawn(async move {
        let action = match gateway.list().await {
            Ok(messages) => Action::MessagesLoaded { seq, messages },
            Err(e) => Action::FetchFailed {
                seq,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send fetch result: receiver dropped");
        }
    });
}

fn spawn_post(gateway: Arc<dyn BoardGateway>, body: String, tx: mpsc::Sender<Action>) {
    info!("Spawning post ({} bytes)", body.len());
    tokio::spawn(async move {
        let action = match gateway.create(&body).await {
            Ok(PostOutcome::Accepted) => Action::PostAccepted,
            Ok(PostOutcome::Rejected(reason)) => Action::PostRejected(reason),
            Err(e) => Action::PostRejected(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send post result: receiver dropped");
        }
    });
}

fn spawn_delete(gateway: Arc<dyn BoardGateway>, id: i64, tx: mpsc::Sender<Action>) {
    info!("Spawning delete for message {}", id);
    tokio::spawn(async move {
        let action = match gateway.delete(id).await {
            Ok(()) => Action::MessageDeleted(id),
            Err(e) => Action::DeleteFailed {
                id,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send delete result: receiver dropped");
        }
    });
}
