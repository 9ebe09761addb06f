//! Sidebar interaction state: search text, inline rename, and the per-row
//! action menu.
//!
//! Rename and menu are two independent optional ids; key handling keeps them
//! mutually exclusive in practice (opening one closes the other).

/// Actions offered by a conversation row's menu, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Star,
    Rename,
    Delete,
}

pub const MENU_ACTIONS: [MenuAction; 3] = [MenuAction::Star, MenuAction::Rename, MenuAction::Delete];

/// An in-progress inline rename.
#[derive(Debug)]
struct RenameEdit {
    id: String,
    buffer: String,
}

/// Local UI state of the conversation sidebar.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// Live search text; the visible list derives from it every frame.
    pub search: String,
    /// Row the keyboard points at, as an index into the visible list.
    pub selected: usize,
    /// First visible row, for scrolling long lists.
    pub offset: usize,
    /// Highlighted row inside the open menu.
    pub menu_selected: usize,
    editing: Option<RenameEdit>,
    menu_open: Option<String>,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── search ──────────────────────────────────────────────────────────

    pub fn search_push(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
        self.offset = 0;
    }

    pub fn search_pop(&mut self) {
        self.search.pop();
        self.selected = 0;
        self.offset = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.selected = 0;
        self.offset = 0;
    }

    /// Keep the keyboard cursor inside the currently visible list.
    pub fn clamp_selection(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.selected = 0;
        } else if self.selected >= visible_len {
            self.selected = visible_len - 1;
        }
    }

    // ── inline rename ───────────────────────────────────────────────────

    pub fn is_renaming(&self) -> bool {
        self.editing.is_some()
    }

    pub fn renaming_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.id.as_str())
    }

    /// Current contents of the rename buffer, while editing.
    pub fn rename_buffer(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.buffer.as_str())
    }

    /// Open the editor seeded with the current title. Closes any open menu.
    pub fn start_rename(&mut self, id: impl Into<String>, current_title: impl Into<String>) {
        self.menu_open = None;
        self.editing = Some(RenameEdit {
            id: id.into(),
            buffer: current_title.into(),
        });
    }

    pub fn rename_push(&mut self, c: char) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer.push(c);
        }
    }

    pub fn rename_pop(&mut self) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer.pop();
        }
    }

    /// Close the editor. Returns the `(id, title)` to apply, or `None` when
    /// the edited title trims to nothing (the rename is rejected but edit
    /// mode still ends).
    pub fn commit_rename(&mut self) -> Option<(String, String)> {
        let edit = self.editing.take()?;
        let title = edit.buffer.trim().to_string();
        if title.is_empty() {
            return None;
        }
        Some((edit.id, title))
    }

    /// Close the editor, discarding the buffer.
    pub fn cancel_rename(&mut self) {
        self.editing = None;
    }

    // ── action menu ─────────────────────────────────────────────────────

    pub fn menu_open_id(&self) -> Option<&str> {
        self.menu_open.as_deref()
    }

    /// Open the menu for `id`, closing any other. Reopening the same row's
    /// menu closes it instead.
    pub fn toggle_menu(&mut self, id: &str) {
        if self.menu_open.as_deref() == Some(id) {
            self.menu_open = None;
        } else {
            self.menu_open = Some(id.to_string());
            self.menu_selected = 0;
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = None;
    }

    pub fn menu_up(&mut self) {
        self.menu_selected = self.menu_selected.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.menu_selected + 1 < MENU_ACTIONS.len() {
            self.menu_selected += 1;
        }
    }

    /// The action under the menu cursor.
    pub fn menu_action(&self) -> MenuAction {
        MENU_ACTIONS[self.menu_selected.min(MENU_ACTIONS.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_is_exclusive_per_row() {
        let mut state = SidebarState::new();

        state.toggle_menu("a");
        assert_eq!(state.menu_open_id(), Some("a"));

        // Opening another row's menu closes the first.
        state.toggle_menu("b");
        assert_eq!(state.menu_open_id(), Some("b"));

        // Toggling the same row closes it.
        state.toggle_menu("b");
        assert_eq!(state.menu_open_id(), None);
    }

    #[test]
    fn test_starting_a_rename_closes_the_menu() {
        let mut state = SidebarState::new();
        state.toggle_menu("a");

        state.start_rename("a", "Old Title");
        assert_eq!(state.menu_open_id(), None);
        assert_eq!(state.rename_buffer(), Some("Old Title"));
    }

    #[test]
    fn test_commit_rename_returns_the_trimmed_title() {
        let mut state = SidebarState::new();
        state.start_rename("a", "Pasta");
        state.rename_push(' ');

        assert_eq!(
            state.commit_rename(),
            Some(("a".to_string(), "Pasta".to_string()))
        );
        assert!(!state.is_renaming());
    }

    #[test]
    fn test_commit_rejects_whitespace_but_still_closes_the_editor() {
        let mut state = SidebarState::new();
        state.start_rename("a", "x");
        state.rename_pop();
        state.rename_push(' ');

        assert_eq!(state.commit_rename(), None);
        assert!(!state.is_renaming());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut state = SidebarState::new();
        state.start_rename("a", "Keep Me");
        state.rename_push('!');

        state.cancel_rename();
        assert!(!state.is_renaming());
        assert_eq!(state.rename_buffer(), None);
    }

    #[test]
    fn test_search_edits_reset_the_cursor() {
        let mut state = SidebarState::new();
        state.selected = 3;
        state.offset = 2;

        state.search_push('p');
        assert_eq!(state.search, "p");
        assert_eq!(state.selected, 0);
        assert_eq!(state.offset, 0);

        state.search_pop();
        assert!(state.search.is_empty());
    }

    #[test]
    fn test_clamp_selection_handles_shrinking_lists() {
        let mut state = SidebarState::new();
        state.selected = 5;

        state.clamp_selection(3);
        assert_eq!(state.selected, 2);

        state.clamp_selection(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_menu_cursor_stays_in_bounds() {
        let mut state = SidebarState::new();
        state.toggle_menu("a");

        state.menu_up();
        assert_eq!(state.menu_selected, 0);

        for _ in 0..10 {
            state.menu_down();
        }
        assert_eq!(state.menu_selected, MENU_ACTIONS.len() - 1);
        assert_eq!(state.menu_action(), MenuAction::Delete);
    }
}
