//! Message thread widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::StatefulWidget,
};

use crate::chat::{Message, MessageRole};
use crate::tui::theme::Theme;

/// Scroll state for the message thread.
#[derive(Debug, Default)]
pub struct MessageListState {
    /// Current scroll offset (in lines)
    pub offset: usize,
    /// Total content height (in lines)
    pub content_height: usize,
    /// Viewport height
    pub viewport_height: usize,
    /// When set, the next render pins the view to the newest content.
    follow: bool,
}

impl MessageListState {
    pub fn scroll_up(&mut self, amount: usize) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max_offset = self.content_height.saturating_sub(self.viewport_height);
        self.offset = (self.offset + amount).min(max_offset);
    }

    /// Follow the bottom once the next frame knows the content height.
    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }
}

/// Widget rendering one conversation's messages.
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    awaiting_reply: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            awaiting_reply: false,
        }
    }

    pub fn awaiting_reply(mut self, awaiting: bool) -> Self {
        self.awaiting_reply = awaiting;
        self
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for msg in self.messages {
            let (label, color) = match msg.role {
                MessageRole::User => ("You", self.theme.user_label),
                MessageRole::Assistant => ("PlatePal", self.theme.assistant_label),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", msg.timestamp),
                    Style::default().fg(self.theme.text_muted),
                ),
            ]));

            for wrapped in textwrap::wrap(&msg.content, width.max(1)) {
                lines.push(Line::from(Span::styled(
                    wrapped.to_string(),
                    Style::default().fg(self.theme.text),
                )));
            }

            // Spacer
            lines.push(Line::default());
        }

        if self.awaiting_reply {
            lines.push(Line::from(Span::styled(
                "● Thinking...",
                Style::default().fg(self.theme.accent),
            )));
        }

        lines
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let lines = self.lines(area.width as usize);

        state.content_height = lines.len();
        state.viewport_height = area.height as usize;
        let max_offset = state.content_height.saturating_sub(state.viewport_height);
        if state.follow {
            state.offset = max_offset;
            state.follow = false;
        } else {
            state.offset = state.offset.min(max_offset);
        }

        for (i, line) in lines
            .iter()
            .skip(state.offset)
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }
    }
}
