//! Conversation state for the chat pane and sidebar.
//!
//! `ChatStore` owns the conversation list, the active pointer, and the
//! pending-reply marker. Every operation is total: a transition either
//! applies or is a documented no-op (stale id, blank input, reply already in
//! flight). The TUI event loop serializes all calls on `&mut self`.

use chrono::{DateTime, Local};

/// Title given to a freshly created conversation.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Wall-clock time at creation, already formatted for display.
    pub timestamp: String,
}

impl Message {
    fn new(content: impl Into<String>, role: MessageRole) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::Assistant)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// A named thread of messages with the metadata the sidebar shows.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// Content of the most recent message, cached for the sidebar preview.
    pub last_message: String,
    /// Instant of the most recent activity; the sidebar sorts on this.
    pub last_activity: DateTime<Local>,
    /// Append-only within a session; insertion order is chronological.
    pub messages: Vec<Message>,
    pub starred: bool,
}

impl Conversation {
    fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: DEFAULT_TITLE.to_string(),
            last_message: String::new(),
            last_activity: Local::now(),
            messages: Vec::new(),
            starred: false,
        }
    }

    /// Append a message, keeping the cached preview fields in step.
    fn push(&mut self, message: Message) {
        self.last_message = message.content.clone();
        self.last_activity = Local::now();
        self.messages.push(message);
    }
}

/// The conversation list and its two pointers.
#[derive(Debug)]
pub struct ChatStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    /// Conversation owed a simulated reply, if any.
    pending: Option<String>,
}

impl ChatStore {
    /// An empty store immediately creates and activates one conversation, so
    /// the UI never starts without a thread to type into.
    pub fn new() -> Self {
        let mut store = Self {
            conversations: Vec::new(),
            active_id: None,
            pending: None,
        };
        store.new_chat();
        store
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The conversation the main pane shows, if the active id still exists.
    pub fn active(&self) -> Option<&Conversation> {
        let id = self.active_id.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Whether a reply is in flight. Sends are ignored while this holds.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Create a fresh conversation at the front of the list and activate it.
    pub fn new_chat(&mut self) -> &Conversation {
        let conversation = Conversation::new();
        tracing::debug!(id = %conversation.id, "new conversation");
        self.active_id = Some(conversation.id.clone());
        self.conversations.insert(0, conversation);
        &self.conversations[0]
    }

    /// Point the main pane at `id`. The id is not validated; a stale id
    /// renders as the "no conversation selected" pane.
    pub fn select(&mut self, id: impl Into<String>) {
        self.active_id = Some(id.into());
    }

    /// Replace a conversation's title with the trimmed `new_title`. Stale ids
    /// and whitespace-only titles leave the store untouched.
    pub fn rename(&mut self, id: &str, new_title: &str) {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Some(conversation) = self.get_mut(id) {
            conversation.title = trimmed.to_string();
        }
    }

    /// Remove a conversation. Deleting the active one hands the pointer to
    /// the first remaining conversation in pre-removal order, or clears it.
    pub fn delete(&mut self, id: &str) {
        self.conversations.retain(|c| c.id != id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.conversations.first().map(|c| c.id.clone());
        }
    }

    /// Set the star flag. No-op for stale ids.
    pub fn set_starred(&mut self, id: &str, starred: bool) {
        if let Some(conversation) = self.get_mut(id) {
            conversation.starred = starred;
        }
    }

    /// Append `text` as a user message to the active conversation and mark a
    /// reply as owed. Returns the id the reply belongs to, or `None` when the
    /// send is ignored: blank input, a reply already in flight, or no active
    /// conversation.
    pub fn send_message(&mut self, text: &str) -> Option<String> {
        let content = text.trim();
        if content.is_empty() || self.pending.is_some() {
            return None;
        }
        let id = self.active_id.clone()?;
        let conversation = self.get_mut(&id)?;
        conversation.push(Message::user(content));
        self.pending = Some(id.clone());
        Some(id)
    }

    /// Deliver the reply for an earlier send. If the target conversation was
    /// deleted while the reply was in flight the content is dropped; the
    /// waiting state clears either way.
    pub fn complete_response(&mut self, id: &str, content: &str) {
        if let Some(conversation) = self.get_mut(id) {
            conversation.push(Message::assistant(content));
        } else {
            tracing::debug!(%id, "reply arrived for a deleted conversation");
        }
        self.pending = None;
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_store_starts_with_one_active_conversation() {
        let store = ChatStore::new();
        assert_eq!(store.conversations().len(), 1);

        let active = store.active().expect("a conversation should be active");
        assert_eq!(active.title, DEFAULT_TITLE);
        assert!(active.messages.is_empty());
        assert!(active.last_message.is_empty());
    }

    #[test]
    fn test_new_chat_ids_are_distinct_and_prepended() {
        let mut store = ChatStore::new();
        for _ in 0..10 {
            store.new_chat();
        }
        assert_eq!(store.conversations().len(), 11);

        let ids: HashSet<&str> = store.conversations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 11);

        // The newest conversation sits at the front and is active.
        assert_eq!(
            store.active_id(),
            Some(store.conversations()[0].id.as_str())
        );
    }

    #[test]
    fn test_select_moves_the_active_pointer() {
        let mut store = ChatStore::new();
        let first = store.conversations()[0].id.clone();
        store.new_chat();

        store.select(first.clone());
        assert_eq!(store.active_id(), Some(first.as_str()));
    }

    #[test]
    fn test_select_stale_id_renders_no_active_conversation() {
        let mut store = ChatStore::new();
        store.select("gone");
        assert!(store.active().is_none());
    }

    #[test]
    fn test_rename_targets_exactly_one_conversation() {
        let mut store = ChatStore::new();
        let first = store.conversations()[0].id.clone();
        store.new_chat();

        store.rename(&first, "Dinner Ideas");
        assert_eq!(store.get(&first).unwrap().title, "Dinner Ideas");
        assert_eq!(store.conversations()[0].title, DEFAULT_TITLE);
    }

    #[test]
    fn test_rename_rejects_whitespace_and_stale_ids() {
        let mut store = ChatStore::new();
        let id = store.conversations()[0].id.clone();

        store.rename(&id, "  ");
        assert_eq!(store.get(&id).unwrap().title, DEFAULT_TITLE);

        store.rename("gone", "Lost Title");
        assert_eq!(store.conversations().len(), 1);
    }

    #[test]
    fn test_rename_stores_the_trimmed_title() {
        let mut store = ChatStore::new();
        let id = store.conversations()[0].id.clone();

        store.rename(&id, "  Meal Prep  ");
        assert_eq!(store.get(&id).unwrap().title, "Meal Prep");
    }

    #[test]
    fn test_delete_active_repoints_to_first_remaining() {
        let mut store = ChatStore::new();
        let oldest = store.conversations()[0].id.clone();
        store.new_chat();
        let middle = store.conversations()[0].id.clone();
        store.new_chat();
        let newest = store.conversations()[0].id.clone();

        // List order is [newest, middle, oldest] and newest is active.
        store.delete(&newest);
        assert_eq!(store.active_id(), Some(middle.as_str()));
        assert!(store.get(&newest).is_none());
        assert!(store.get(&oldest).is_some());
    }

    #[test]
    fn test_delete_inactive_leaves_active_alone() {
        let mut store = ChatStore::new();
        let oldest = store.conversations()[0].id.clone();
        store.new_chat();
        let newest = store.conversations()[0].id.clone();

        store.delete(&oldest);
        assert_eq!(store.active_id(), Some(newest.as_str()));
    }

    #[test]
    fn test_delete_last_clears_the_active_pointer() {
        let mut store = ChatStore::new();
        let only = store.conversations()[0].id.clone();

        store.delete(&only);
        assert!(store.conversations().is_empty());
        assert!(store.active_id().is_none());
        assert!(store.active().is_none());
    }

    #[test]
    fn test_star_toggles_one_conversation() {
        let mut store = ChatStore::new();
        let id = store.conversations()[0].id.clone();

        store.set_starred(&id, true);
        assert!(store.get(&id).unwrap().starred);

        store.set_starred(&id, false);
        assert!(!store.get(&id).unwrap().starred);

        // Stale ids are ignored.
        store.set_starred("gone", true);
    }

    #[test]
    fn test_send_appends_user_message_and_updates_preview() {
        let mut store = ChatStore::new();

        let id = store.send_message("  Hello  ").expect("send should apply");
        let conversation = store.get(&id).unwrap();

        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].content, "Hello");
        assert!(conversation.messages[0].is_user());
        assert_eq!(conversation.last_message, "Hello");
        assert!(store.is_pending());
    }

    #[test]
    fn test_send_is_ignored_for_blank_input() {
        let mut store = ChatStore::new();
        assert!(store.send_message("").is_none());
        assert!(store.send_message("   \n ").is_none());
        assert!(store.active().unwrap().messages.is_empty());
        assert!(!store.is_pending());
    }

    #[test]
    fn test_send_is_ignored_while_a_reply_is_in_flight() {
        let mut store = ChatStore::new();
        store.send_message("first").unwrap();

        assert!(store.send_message("second").is_none());
        assert_eq!(store.active().unwrap().messages.len(), 1);
    }

    #[test]
    fn test_send_is_ignored_without_an_active_conversation() {
        let mut store = ChatStore::new();
        let only = store.conversations()[0].id.clone();
        store.delete(&only);

        assert!(store.send_message("anyone there?").is_none());
        assert!(!store.is_pending());
    }

    #[test]
    fn test_reply_lands_in_the_send_time_conversation() {
        let mut store = ChatStore::new();
        let original = store.send_message("What goes with feta?").unwrap();

        // The user moves on before the reply arrives.
        store.new_chat();
        store.send_message("ignored while pending");

        store.complete_response(&original, "Try spinach and chicken.");

        let conversation = store.get(&original).unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert!(!conversation.messages[1].is_user());
        assert_eq!(conversation.messages[1].content, "Try spinach and chicken.");
        assert_eq!(conversation.last_message, "Try spinach and chicken.");
        assert!(!store.is_pending());

        // The interim conversation saw nothing.
        assert!(store.active().unwrap().messages.is_empty());
    }

    #[test]
    fn test_reply_for_a_deleted_conversation_is_dropped() {
        let mut store = ChatStore::new();
        let id = store.send_message("Hello").unwrap();
        store.delete(&id);

        store.complete_response(&id, "too late");

        assert!(store.get(&id).is_none());
        // The waiting state still clears, so the next send goes through.
        assert!(!store.is_pending());
    }

    #[test]
    fn test_send_then_reply_scenario() {
        // Startup: one auto-created "New Chat" with no messages.
        let mut store = ChatStore::new();
        assert_eq!(store.active().unwrap().title, DEFAULT_TITLE);

        let id = store.send_message("Hello").unwrap();
        assert_eq!(store.get(&id).unwrap().messages.len(), 1);

        store.complete_response(&id, "Here to help with recipes.");
        let conversation = store.get(&id).unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.last_message, "Here to help with recipes.");
    }
}
