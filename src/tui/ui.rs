//! Main UI rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{Focus, TuiApp};
use crate::chat::{filter, prompts::SUGGESTED_PROMPTS};
use crate::tui::hit_test::ClickTarget;
use crate::tui::widgets::{ActionMenu, ConversationList, MessageList, ROW_HEIGHT};

/// Columns reserved for the conversation sidebar.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    app.hit_registry.clear();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(frame.area());

    render_sidebar(frame, app, columns[0]);
    render_main(frame, app, columns[1]);

    if app.show_help {
        render_help(frame, frame.area());
    }
}

fn render_sidebar(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search(frame, app, chunks[0]);
    render_conversations(frame, app, chunks[1]);
}

fn render_search(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let search_focused = app.focus == Focus::Sidebar
        && !app.sidebar.is_renaming()
        && app.sidebar.menu_open_id().is_none();

    let content = if app.sidebar.search.is_empty() && !search_focused {
        Line::from(Span::styled(
            "Search",
            Style::default().fg(app.theme.text_muted),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.sidebar.search.clone(),
            Style::default().fg(app.theme.text),
        )];
        if search_focused {
            spans.push(Span::styled(
                "█",
                Style::default().fg(app.theme.accent),
            ));
        }
        Line::from(spans)
    };

    let border = if search_focused {
        app.theme.accent
    } else {
        app.theme.border
    };
    let search_box = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search "),
    );
    frame.render_widget(search_box, parts[0]);
    app.hit_registry.register(parts[0], ClickTarget::SearchBox);

    let new_button = Paragraph::new(Span::styled(
        "+",
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(new_button, parts[1]);
    app.hit_registry.register(parts[1], ClickTarget::NewChat);
}

fn render_conversations(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let query = app.sidebar.search.clone();
    let shown = filter::visible(app.store.conversations(), &query);

    let list = ConversationList::new(&shown, app.store.active_id(), &query, &app.theme)
        .registry(&mut app.hit_registry);
    frame.render_stateful_widget(list, inner, &mut app.sidebar);

    // Action menu popup, anchored under its row.
    let Some(menu_id) = app.sidebar.menu_open_id().map(str::to_string) else {
        return;
    };
    let Some(pos) = shown.iter().position(|c| c.id == menu_id) else {
        return;
    };
    if pos < app.sidebar.offset {
        return;
    }
    let row_y = inner.y + ((pos - app.sidebar.offset) as u16) * ROW_HEIGHT;
    if row_y >= inner.y + inner.height {
        return;
    }

    let starred = shown[pos].starred;
    let menu_area = Rect::new(
        inner.x + inner.width.saturating_sub(ActionMenu::WIDTH + 1),
        row_y + 1,
        ActionMenu::WIDTH,
        ActionMenu::HEIGHT,
    )
    .intersection(frame.area());

    frame.render_widget(Clear, menu_area);
    ActionMenu::new(&menu_id, starred, app.sidebar.menu_selected, &app.theme)
        .mouse_pos(app.last_mouse_pos)
        .render(menu_area, frame.buffer_mut(), &mut app.hit_registry);
}

fn render_main(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Thread / welcome / placeholder
            Constraint::Length(4), // Input
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    let has_active = app.store.active().is_some();
    let thread_empty = app
        .store
        .active()
        .map(|c| c.messages.is_empty())
        .unwrap_or(false);
    if !has_active {
        render_no_selection(frame, app, chunks[1]);
    } else if thread_empty {
        render_welcome(frame, app, chunks[1]);
    } else {
        render_thread(frame, app, chunks[1]);
    }

    render_input(frame, app, chunks[2]);
    render_hints(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let mut spans = vec![Span::styled(
        "🥗 PlatePal",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(conversation) = app.store.active() {
        spans.push(Span::raw(" │ "));
        if conversation.starred {
            spans.push(Span::styled("★ ", Style::default().fg(app.theme.star)));
        }
        spans.push(Span::styled(
            conversation.title.clone(),
            Style::default().fg(app.theme.text),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(header, area);
}

fn render_no_selection(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Select a conversation",
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Choose from existing chats or start a new one",
            Style::default().fg(app.theme.text_muted),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(placeholder, area);
}

fn render_welcome(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let headline = Rect::new(area.x, area.y + 1, area.width, 3).intersection(area);
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "PlatePal",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your AI Recipe & Nutrition Assistant",
            Style::default().fg(app.theme.text_muted),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, headline);

    let column_width = area.width.min(56);
    let x = area.x + (area.width.saturating_sub(column_width)) / 2;
    let mut y = area.y + 5;

    let label = Rect::new(x, y, column_width, 1).intersection(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "⚡ Suggested Prompts",
            Style::default().fg(app.theme.text),
        )),
        label,
    );
    y += 2;

    for (i, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        if y + 2 > area.y + area.height {
            break;
        }
        let card = Rect::new(x, y, column_width, 3).intersection(area);
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("Alt+{}  ", i + 1),
                    Style::default().fg(app.theme.accent),
                ),
                Span::styled(
                    prompt.title,
                    Style::default()
                        .fg(app.theme.text)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("       {}", prompt.description),
                Style::default().fg(app.theme.text_muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), card);
        app.hit_registry.register(card, ClickTarget::PromptCard(i));
        y += 3;
    }
}

fn render_thread(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let Some(conversation) = app.store.active() else {
        return;
    };
    let inner = Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    };

    let list = MessageList::new(&conversation.messages, &app.theme)
        .awaiting_reply(app.store.is_pending());
    frame.render_stateful_widget(list, inner, &mut app.message_list_state);
}

fn render_input(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let title = if app.store.is_pending() {
        " Waiting for reply... "
    } else {
        " Message "
    };
    let border_color = if app.store.is_pending() {
        app.theme.border
    } else if app.focus == Focus::Input {
        app.theme.accent
    } else {
        app.theme.border
    };

    app.input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    frame.render_widget(&app.input, area);
    app.hit_registry.register(area, ClickTarget::InputBox);
}

fn render_hints(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " Tab focus · Enter send · Ctrl+N new chat · Ctrl+K menu · F1 help · Ctrl+Q quit",
        Style::default().fg(app.theme.text_muted),
    )));
    frame.render_widget(hints, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help_lines = vec![
        Line::from(vec![Span::styled(
            " Keyboard Shortcuts ",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Ctrl+Q      ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
        Line::from(vec![
            Span::styled(" Ctrl+N      ", Style::default().fg(Color::Cyan)),
            Span::raw("New conversation"),
        ]),
        Line::from(vec![
            Span::styled(" Tab         ", Style::default().fg(Color::Cyan)),
            Span::raw("Switch between sidebar and input"),
        ]),
        Line::from(vec![
            Span::styled(" Enter       ", Style::default().fg(Color::Cyan)),
            Span::raw("Send message / open conversation"),
        ]),
        Line::from(vec![
            Span::styled(" Shift+Enter ", Style::default().fg(Color::Cyan)),
            Span::raw("New line"),
        ]),
        Line::from(vec![
            Span::styled(" Ctrl+K      ", Style::default().fg(Color::Cyan)),
            Span::raw("Conversation menu (star/rename/delete)"),
        ]),
        Line::from(vec![
            Span::styled(" Alt+1..4    ", Style::default().fg(Color::Cyan)),
            Span::raw("Insert a suggested prompt"),
        ]),
        Line::from(vec![
            Span::styled(" Ctrl+V      ", Style::default().fg(Color::Cyan)),
            Span::raw("Paste"),
        ]),
        Line::from(vec![
            Span::styled(" Ctrl+Y      ", Style::default().fg(Color::Cyan)),
            Span::raw("Copy the last reply"),
        ]),
        Line::from(vec![
            Span::styled(" ↑/↓         ", Style::default().fg(Color::Cyan)),
            Span::raw("Scroll messages / move in sidebar"),
        ]),
        Line::from(vec![
            Span::styled(" Esc         ", Style::default().fg(Color::Cyan)),
            Span::raw("Close menu / cancel rename / clear search"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Help ");

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .alignment(Alignment::Left);

    let area = centered_rect(60, 60, area);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
