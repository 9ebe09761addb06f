//! Event handling for keyboard, mouse, and terminal events.

use std::time::Duration;

use arboard::Clipboard;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEventKind};
use tokio::sync::mpsc;

/// Application events.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Left mouse button released
    Click { row: u16, col: u16 },
    /// Mouse wheel movement; `up` is towards older content
    Scroll { row: u16, col: u16, up: bool },
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for redraws
    Tick,
    /// The simulated reply for an earlier send is ready
    ResponseReady {
        conversation_id: String,
        content: String,
    },
    /// Clipboard paste
    Paste(String),
}

/// Event handler that polls for terminal events.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        // Spawn terminal event polling thread
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        if event_tx.send(AppEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Mouse(mouse)) => {
                        let forwarded = match mouse.kind {
                            MouseEventKind::Up(MouseButton::Left) => Some(AppEvent::Click {
                                row: mouse.row,
                                col: mouse.column,
                            }),
                            MouseEventKind::ScrollUp => Some(AppEvent::Scroll {
                                row: mouse.row,
                                col: mouse.column,
                                up: true,
                            }),
                            MouseEventKind::ScrollDown => Some(AppEvent::Scroll {
                                row: mouse.row,
                                col: mouse.column,
                                up: false,
                            }),
                            _ => None,
                        };
                        if let Some(forwarded) = forwarded {
                            if event_tx.send(forwarded).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Event::Resize(w, h)) => {
                        if event_tx.send(AppEvent::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Paste(text)) => {
                        if event_tx.send(AppEvent::Paste(text)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            } else {
                // Send tick on timeout
                if event_tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Get the sender for external events (the simulated responder).
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Clipboard manager for copy/paste operations.
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self {
            clipboard: Clipboard::new().ok(),
        }
    }

    /// Copy text to clipboard.
    pub fn copy(&mut self, text: &str) -> bool {
        if let Some(ref mut clipboard) = self.clipboard {
            clipboard.set_text(text).is_ok()
        } else {
            false
        }
    }

    /// Paste text from clipboard.
    pub fn paste(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
