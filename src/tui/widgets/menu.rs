//! Per-conversation action menu popup.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::sidebar::{MenuAction, MENU_ACTIONS};
use crate::tui::theme::Theme;

/// Popup listing the actions for one conversation row.
pub struct ActionMenu<'a> {
    conversation_id: &'a str,
    starred: bool,
    selected: usize,
    mouse_pos: Option<(u16, u16)>,
    theme: &'a Theme,
}

impl<'a> ActionMenu<'a> {
    pub const WIDTH: u16 = 14;
    pub const HEIGHT: u16 = MENU_ACTIONS.len() as u16 + 2;

    pub fn new(conversation_id: &'a str, starred: bool, selected: usize, theme: &'a Theme) -> Self {
        Self {
            conversation_id,
            starred,
            selected,
            mouse_pos: None,
            theme,
        }
    }

    pub fn mouse_pos(mut self, pos: Option<(u16, u16)>) -> Self {
        self.mouse_pos = pos;
        self
    }

    fn label(&self, action: MenuAction) -> &'static str {
        match action {
            MenuAction::Star => {
                if self.starred {
                    "Unstar"
                } else {
                    "Star"
                }
            }
            MenuAction::Rename => "Rename",
            MenuAction::Delete => "Delete",
        }
    }

    pub fn render(self, area: Rect, buf: &mut Buffer, registry: &mut HitTestRegistry) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, action) in MENU_ACTIONS.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }
            let item_rect = Rect {
                x: inner.x,
                y: inner.y + i as u16,
                width: inner.width,
                height: 1,
            };

            let is_hovered = self.mouse_pos.is_some_and(|(mx, my)| {
                mx >= item_rect.x
                    && mx < item_rect.x + item_rect.width
                    && my >= item_rect.y
                    && my < item_rect.y + item_rect.height
            });
            let is_selected = i == self.selected;

            let prefix = if is_hovered || is_selected { "▶ " } else { "  " };
            let mut style = if *action == MenuAction::Delete {
                Style::default().fg(self.theme.danger)
            } else {
                Style::default().fg(self.theme.text)
            };
            if is_hovered || is_selected {
                style = style
                    .bg(self.theme.selection_bg)
                    .add_modifier(Modifier::BOLD);
            }

            buf.set_string(
                item_rect.x,
                item_rect.y,
                format!("{}{}", prefix, self.label(*action)),
                style,
            );

            registry.register(
                item_rect,
                ClickTarget::MenuItem(self.conversation_id.to_string(), *action),
            );
        }
    }
}
