//! Conversation list widget for the sidebar.
//!
//! Each conversation renders as a two-line row: title (with star marker,
//! search-match emphasis, and a menu button) over a preview of the last
//! message and its time. The keyboard cursor and the active conversation are
//! styled separately.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::StatefulWidget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::chat::filter;
use crate::chat::Conversation;
use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::sidebar::SidebarState;
use crate::tui::theme::Theme;

/// Lines per conversation row.
pub const ROW_HEIGHT: u16 = 2;

/// Widget rendering the filtered, sorted conversation list.
pub struct ConversationList<'a> {
    conversations: &'a [&'a Conversation],
    active_id: Option<&'a str>,
    query: &'a str,
    theme: &'a Theme,
    registry: Option<&'a mut HitTestRegistry>,
}

impl<'a> ConversationList<'a> {
    pub fn new(
        conversations: &'a [&'a Conversation],
        active_id: Option<&'a str>,
        query: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            conversations,
            active_id,
            query,
            theme,
            registry: None,
        }
    }

    pub fn registry(mut self, registry: &'a mut HitTestRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    fn title_spans(&self, title: &str, base: Style) -> Vec<Span<'static>> {
        let ranges = filter::match_ranges(title, self.query);
        if ranges.is_empty() {
            return vec![Span::styled(title.to_string(), base)];
        }

        let emphasis = Style::default()
            .fg(self.theme.highlight_fg)
            .bg(self.theme.highlight_bg);
        let mut spans = Vec::new();
        let mut cursor = 0;
        for range in ranges {
            if range.start > cursor {
                spans.push(Span::styled(title[cursor..range.start].to_string(), base));
            }
            spans.push(Span::styled(title[range.clone()].to_string(), emphasis));
            cursor = range.end;
        }
        if cursor < title.len() {
            spans.push(Span::styled(title[cursor..].to_string(), base));
        }
        spans
    }
}

impl StatefulWidget for ConversationList<'_> {
    type State = SidebarState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        if self.conversations.is_empty() {
            let hint = if state.search.is_empty() {
                "No conversations yet"
            } else {
                "No matches"
            };
            buf.set_line(
                area.x + 1,
                area.y,
                &Line::from(Span::styled(
                    hint,
                    Style::default().fg(self.theme.text_muted),
                )),
                area.width.saturating_sub(1),
            );
            return;
        }

        if area.height < ROW_HEIGHT {
            return;
        }
        state.offset = state.offset.min(self.conversations.len() - 1);

        // Keep the keyboard cursor inside the viewport.
        let rows = (area.height / ROW_HEIGHT) as usize;
        if state.selected < state.offset {
            state.offset = state.selected;
        } else if state.selected >= state.offset + rows {
            state.offset = state.selected + 1 - rows;
        }

        let text_width = area.width.saturating_sub(4) as usize;

        for (i, conversation) in self
            .conversations
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(rows)
        {
            let y = area.y + ((i - state.offset) as u16) * ROW_HEIGHT;
            let row_rect = Rect::new(area.x, y, area.width, ROW_HEIGHT);

            let is_active = self.active_id == Some(conversation.id.as_str());
            let is_selected = i == state.selected;

            // First line: marker, star, title (or the rename editor), menu button.
            let mut spans: Vec<Span<'static>> = Vec::new();
            let marker_style = Style::default().fg(self.theme.accent);
            spans.push(if is_active {
                Span::styled("▌", marker_style)
            } else {
                Span::raw(" ")
            });

            if conversation.starred {
                spans.push(Span::styled("★ ", Style::default().fg(self.theme.star)));
            }

            if state.renaming_id() == Some(conversation.id.as_str()) {
                let buffer = state.rename_buffer().unwrap_or_default();
                spans.push(Span::styled(
                    format!("{}█", truncate_to_width(buffer, text_width)),
                    Style::default().fg(self.theme.accent),
                ));
            } else {
                let mut title_style = Style::default().fg(self.theme.text);
                if is_active {
                    title_style = title_style.add_modifier(Modifier::BOLD);
                }
                let star_width = if conversation.starred { 2 } else { 0 };
                let shown = truncate_to_width(&conversation.title, text_width - star_width.min(text_width));
                spans.extend(self.title_spans(&shown, title_style));
            }
            buf.set_line(area.x, y, &Line::from(spans), area.width.saturating_sub(2));

            let button_style = Style::default().fg(self.theme.text_muted);
            buf.set_string(area.x + area.width.saturating_sub(2), y, "⋯", button_style);

            // Second line: last-message preview and activity time.
            let time = conversation.last_activity.format("%b %d %H:%M").to_string();
            let time_width = time.width() as u16;
            let preview_width = area
                .width
                .saturating_sub(time_width + 3)
                .max(1) as usize;
            let preview = truncate_to_width(&conversation.last_message, preview_width);
            buf.set_string(
                area.x + 1,
                y + 1,
                preview,
                Style::default().fg(self.theme.text_muted),
            );
            buf.set_string(
                area.x + area.width.saturating_sub(time_width + 1),
                y + 1,
                time,
                Style::default().fg(self.theme.text_muted),
            );

            if is_selected {
                buf.set_style(row_rect, Style::default().bg(self.theme.selection_bg));
            }

            if let Some(registry) = self.registry.as_deref_mut() {
                registry.register(row_rect, ClickTarget::ConversationRow(conversation.id.clone()));
                registry.register(
                    Rect::new(area.x + area.width.saturating_sub(2), y, 2, 1),
                    ClickTarget::MenuButton(conversation.id.clone()),
                );
            }
        }
    }
}

/// Cut `text` down to at most `max` terminal columns, ellipsized.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_leaves_short_text_alone() {
        assert_eq!(truncate_to_width("Pasta", 10), "Pasta");
    }

    #[test]
    fn test_truncate_ellipsizes_long_text() {
        let out = truncate_to_width("A very long conversation title", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        let out = truncate_to_width("好吃的食物", 6);
        assert!(out.width() <= 6);
    }
}
