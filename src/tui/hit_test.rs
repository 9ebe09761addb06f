//! Hit testing for clickable TUI elements.
//!
//! Tracks rendered widget bounds and maps mouse coordinates to actions.

use ratatui::layout::Rect;

use super::sidebar::MenuAction;

/// Identifies a clickable element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// A conversation row in the sidebar
    ConversationRow(String),
    /// The "⋯" menu button on a conversation row
    MenuButton(String),
    /// A row inside an open action menu
    MenuItem(String, MenuAction),
    /// The new-chat button next to the search box
    NewChat,
    /// The sidebar search box
    SearchBox,
    /// A suggested prompt card on the welcome pane
    PromptCard(usize),
    /// The message input box
    InputBox,
}

/// Tracks clickable regions for hit testing.
#[derive(Debug, Default)]
pub struct HitTestRegistry {
    /// Regions in render order; hit testing iterates in reverse so the last
    /// rendered (topmost) region wins.
    regions: Vec<(Rect, ClickTarget)>,
}

impl HitTestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, rect: Rect, target: ClickTarget) {
        self.regions.push((rect, target));
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<&ClickTarget> {
        for (rect, target) in self.regions.iter().rev() {
            if x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height {
                return Some(target);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topmost_region_wins() {
        let mut registry = HitTestRegistry::new();
        registry.register(
            Rect::new(0, 0, 10, 10),
            ClickTarget::ConversationRow("under".into()),
        );
        registry.register(Rect::new(2, 2, 3, 1), ClickTarget::MenuButton("over".into()));

        assert_eq!(
            registry.hit_test(3, 2),
            Some(&ClickTarget::MenuButton("over".into()))
        );
        assert_eq!(
            registry.hit_test(0, 0),
            Some(&ClickTarget::ConversationRow("under".into()))
        );
        assert_eq!(registry.hit_test(50, 50), None);
    }
}
