//! Main TUI application state and logic.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedSender;
use tui_textarea::{CursorMove, Input, TextArea};

use super::event::{AppEvent, ClipboardManager, EventHandler};
use super::hit_test::{ClickTarget, HitTestRegistry};
use super::responder;
use super::sidebar::{MenuAction, SidebarState};
use super::theme::Theme;
use super::ui;
use super::widgets::MessageListState;
use crate::chat::{filter, prompts, ChatStore};

/// Which pane keyboard input lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// Main TUI application
pub struct TuiApp {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Event handler (optional so we can take it out in the run loop)
    events: Option<EventHandler>,
    /// Sender handed to the simulated responder
    event_tx: UnboundedSender<AppEvent>,
    /// Whether the app should quit
    should_quit: bool,
    /// Color theme
    pub theme: Theme,
    /// Conversations, active pointer, pending-reply marker
    pub store: ChatStore,
    /// Sidebar search/rename/menu state
    pub sidebar: SidebarState,
    /// Where keys go
    pub focus: Focus,
    /// Message input area
    pub input: TextArea<'static>,
    /// Message thread scroll state
    pub message_list_state: MessageListState,
    /// Clipboard manager
    pub clipboard: ClipboardManager,
    /// Hit test registry for mouse interaction
    pub hit_registry: HitTestRegistry,
    /// Last known mouse position
    pub last_mouse_pos: Option<(u16, u16)>,
    /// Show help overlay
    pub show_help: bool,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let events = EventHandler::new(Duration::from_millis(16));
        let event_tx = events.sender();

        Ok(Self {
            terminal,
            events: Some(events),
            event_tx,
            should_quit: false,
            theme: Theme::dark(),
            store: ChatStore::new(),
            sidebar: SidebarState::new(),
            focus: Focus::Input,
            input: Self::build_input(),
            message_list_state: MessageListState::default(),
            clipboard: ClipboardManager::new(),
            hit_registry: HitTestRegistry::new(),
            last_mouse_pos: None,
            show_help: false,
        })
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        // Take events out of self to avoid borrow conflicts in the loop
        let mut events = self.events.take().expect("events not initialized");

        while !self.should_quit {
            self.prepare_for_render();

            let app_ptr: *mut TuiApp = self;
            self.terminal
                .draw(|frame| unsafe { ui::render(frame, &mut *app_ptr) })?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        self.events = Some(events);
        Ok(())
    }

    /// Reconcile UI state with the store before drawing.
    fn prepare_for_render(&mut self) {
        let shown_ids: Vec<String> = filter::visible(self.store.conversations(), &self.sidebar.search)
            .iter()
            .map(|c| c.id.clone())
            .collect();

        self.sidebar.clamp_selection(shown_ids.len());

        // A menu anchored to a row the filter just hid has nowhere to render.
        if let Some(open) = self.sidebar.menu_open_id() {
            if !shown_ids.iter().any(|id| id.as_str() == open) {
                self.sidebar.close_menu();
            }
        }
    }

    /// Handle an application event
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Click { row, col } => self.handle_click(col, row),
            AppEvent::Scroll { row, col, up } => self.handle_scroll(col, row, up),
            AppEvent::Paste(text) => match self.focus {
                Focus::Input => {
                    self.input.insert_str(&text);
                }
                Focus::Sidebar => {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        self.sidebar.search_push(c);
                    }
                }
            },
            AppEvent::ResponseReady {
                conversation_id,
                content,
            } => {
                self.store.complete_response(&conversation_id, &content);
                if self.store.active_id() == Some(conversation_id.as_str()) {
                    self.message_list_state.scroll_to_bottom();
                }
            }
            AppEvent::Resize(..) | AppEvent::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Quit always works, even under a modal.
        if (key.modifiers, key.code) == (KeyModifiers::CONTROL, KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        // The open menu and the rename editor absorb everything else.
        if self.sidebar.menu_open_id().is_some() {
            self.handle_menu_key(key);
            return;
        }
        if self.sidebar.is_renaming() {
            self.handle_rename_key(key);
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => self.new_chat(),
            (KeyModifiers::CONTROL, KeyCode::Char('k')) => self.open_menu_for_selection(),
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
                if let Some(text) = self.clipboard.paste() {
                    self.handle_event(AppEvent::Paste(text));
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => self.copy_last_reply(),
            (_, KeyCode::F(1)) => self.show_help = !self.show_help,
            (KeyModifiers::NONE, KeyCode::Tab) => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Sidebar,
                    Focus::Sidebar => Focus::Input,
                };
            }
            (_, KeyCode::Esc) => {
                if self.show_help {
                    self.show_help = false;
                } else if self.focus == Focus::Sidebar && !self.sidebar.search.is_empty() {
                    self.sidebar.clear_search();
                } else {
                    self.focus = Focus::Input;
                }
            }
            (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='4')) => {
                self.apply_prompt(c as usize - '1' as usize);
            }
            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key),
                Focus::Input => self.handle_input_key(key),
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => self.sidebar.close_menu(),
            (KeyModifiers::NONE, KeyCode::Up) => self.sidebar.menu_up(),
            (KeyModifiers::NONE, KeyCode::Down) => self.sidebar.menu_down(),
            (KeyModifiers::NONE, KeyCode::Enter) => {
                if let Some(id) = self.sidebar.menu_open_id().map(str::to_string) {
                    let action = self.sidebar.menu_action();
                    self.perform_menu_action(&id, action);
                }
            }
            // Any other key counts as an outside interaction.
            _ => self.sidebar.close_menu(),
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Enter) => {
                if let Some((id, title)) = self.sidebar.commit_rename() {
                    self.store.rename(&id, &title);
                }
            }
            (_, KeyCode::Esc) => self.sidebar.cancel_rename(),
            (KeyModifiers::NONE, KeyCode::Backspace) => self.sidebar.rename_pop(),
            (modifiers, KeyCode::Char(c))
                if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT =>
            {
                self.sidebar.rename_push(c);
            }
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Up) => {
                self.sidebar.selected = self.sidebar.selected.saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                let len = self.visible_len();
                if len > 0 && self.sidebar.selected + 1 < len {
                    self.sidebar.selected += 1;
                }
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                if let Some(id) = self.selected_conversation_id() {
                    self.select_conversation(id);
                }
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => self.sidebar.search_pop(),
            (modifiers, KeyCode::Char(c))
                if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT =>
            {
                self.sidebar.search_push(c);
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Enter) => self.submit_message(),
            (KeyModifiers::SHIFT, KeyCode::Enter) | (KeyModifiers::ALT, KeyCode::Enter) => {
                // Alt+Enter works as fallback when the terminal can't report
                // Shift+Enter.
                self.input.insert_newline();
            }
            (KeyModifiers::NONE, KeyCode::Up) => self.message_list_state.scroll_up(1),
            (KeyModifiers::NONE, KeyCode::Down) => self.message_list_state.scroll_down(1),
            _ => {
                self.input.input(Input::from(key));
            }
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        self.last_mouse_pos = Some((x, y));
        let target = self.hit_registry.hit_test(x, y).cloned();

        // An open menu swallows the click unless it lands on one of its rows;
        // anything else is an outside interaction and closes it.
        if self.sidebar.menu_open_id().is_some() {
            match &target {
                Some(ClickTarget::MenuItem(..)) => {}
                _ => {
                    self.sidebar.close_menu();
                    return;
                }
            }
        }

        let Some(target) = target else { return };
        match target {
            ClickTarget::ConversationRow(id) => {
                if self.sidebar.renaming_id() == Some(id.as_str()) {
                    return;
                }
                self.sidebar.cancel_rename();
                self.focus = Focus::Sidebar;
                if let Some(pos) = filter::visible(self.store.conversations(), &self.sidebar.search)
                    .iter()
                    .position(|c| c.id == id)
                {
                    self.sidebar.selected = pos;
                }
                self.select_conversation(id);
            }
            ClickTarget::MenuButton(id) => {
                self.sidebar.cancel_rename();
                self.focus = Focus::Sidebar;
                self.sidebar.toggle_menu(&id);
            }
            ClickTarget::MenuItem(id, action) => self.perform_menu_action(&id, action),
            ClickTarget::NewChat => self.new_chat(),
            ClickTarget::SearchBox => self.focus = Focus::Sidebar,
            ClickTarget::PromptCard(index) => self.apply_prompt(index),
            ClickTarget::InputBox => self.focus = Focus::Input,
        }
    }

    fn handle_scroll(&mut self, col: u16, row: u16, up: bool) {
        self.last_mouse_pos = Some((col, row));
        if col < ui::SIDEBAR_WIDTH {
            if up {
                self.sidebar.offset = self.sidebar.offset.saturating_sub(1);
            } else {
                self.sidebar.offset += 1;
            }
        } else if up {
            self.message_list_state.scroll_up(3);
        } else {
            self.message_list_state.scroll_down(3);
        }
    }

    // ── intents ─────────────────────────────────────────────────────────

    fn new_chat(&mut self) {
        self.sidebar.close_menu();
        self.sidebar.cancel_rename();
        self.store.new_chat();
        self.sidebar.selected = 0;
        self.input = Self::build_input();
        self.focus = Focus::Input;
        self.message_list_state.scroll_to_bottom();
    }

    fn select_conversation(&mut self, id: String) {
        self.store.select(id);
        self.input = Self::build_input();
        self.message_list_state.scroll_to_bottom();
    }

    fn open_menu_for_selection(&mut self) {
        if let Some(id) = self.selected_conversation_id() {
            self.focus = Focus::Sidebar;
            self.sidebar.toggle_menu(&id);
        }
    }

    fn perform_menu_action(&mut self, id: &str, action: MenuAction) {
        self.sidebar.close_menu();
        match action {
            MenuAction::Star => {
                let starred = self.store.get(id).map(|c| c.starred).unwrap_or(false);
                self.store.set_starred(id, !starred);
            }
            MenuAction::Rename => {
                let title = self.store.get(id).map(|c| c.title.clone()).unwrap_or_default();
                self.focus = Focus::Sidebar;
                self.sidebar.start_rename(id, title);
            }
            MenuAction::Delete => self.store.delete(id),
        }
    }

    /// Fill the input with a suggested prompt, without sending it.
    fn apply_prompt(&mut self, index: usize) {
        // The cards only show on an empty conversation.
        let on_welcome = self
            .store
            .active()
            .map(|c| c.messages.is_empty())
            .unwrap_or(false);
        if !on_welcome {
            return;
        }
        if let Some(prompt) = prompts::SUGGESTED_PROMPTS.get(index) {
            self.input = Self::build_input();
            self.input.insert_str(prompt.prompt);
            self.focus = Focus::Input;
        }
    }

    /// Send the current input as a message
    fn submit_message(&mut self) {
        let text = self.input.lines().join("\n");
        if let Some(conversation_id) = self.store.send_message(&text) {
            self.input = Self::build_input();
            self.message_list_state.scroll_to_bottom();
            responder::spawn_response(conversation_id, self.event_tx.clone());
        }
    }

    fn copy_last_reply(&mut self) {
        let reply = self.store.active().and_then(|c| {
            c.messages
                .iter()
                .rev()
                .find(|m| !m.is_user())
                .map(|m| m.content.clone())
        });
        if let Some(reply) = reply {
            self.clipboard.copy(&reply);
        }
    }

    // ── helpers ─────────────────────────────────────────────────────────

    fn visible_len(&self) -> usize {
        filter::visible(self.store.conversations(), &self.sidebar.search).len()
    }

    fn selected_conversation_id(&self) -> Option<String> {
        filter::visible(self.store.conversations(), &self.sidebar.search)
            .get(self.sidebar.selected)
            .map(|c| c.id.clone())
    }

    fn build_input() -> TextArea<'static> {
        let mut input = TextArea::default();
        input.set_cursor_line_style(Style::default());
        input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        input.set_placeholder_text("Ask about recipes, nutrition, meal plans...");
        input.set_placeholder_style(Style::default().fg(Color::DarkGray));
        input.move_cursor(CursorMove::End);
        input
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore terminal - order matters
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
