use crate::application::{App, AppMode, PartnerForm, TextInput, FIELD_LABELS, HELP_TEXT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_search_box(f, app, chunks[1]);
    render_ordering_bar(f, chunks[2]);
    render_partner_list(f, app, chunks[3]);
    render_status_bar(f, app, chunks[4]);

    match app.mode {
        AppMode::Form => {
            if let Some(form) = &app.form {
                render_form_popup(f, form);
            }
        }
        AppMode::Details => render_details_popup(f, app),
        AppMode::ConfirmRemove => render_confirm_popup(f, app),
        AppMode::Alert => render_alert_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal | AppMode::Search => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to the partner program.",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from("Search and filter business and community partners by keyword."),
        Line::from("Press 'a' to add a new partner to the database, '?' for help."),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_search_box(f: &mut Frame, app: &App, area: Rect) {
    let active = matches!(app.mode, AppMode::Search);
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let block = Block::default().borders(Borders::ALL).title("Search (/)");
    let inner = block.inner(area);
    let (offset, column) = input_viewport(&app.search, inner.width);

    let search = Paragraph::new(app.search.value())
        .style(style)
        .scroll((0, offset))
        .block(block);
    f.render_widget(search, area);

    if active {
        f.set_cursor_position((inner.x + column, inner.y));
    }
}

fn render_ordering_bar(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let bar = Line::from(vec![
        Span::raw("Filter Options: "),
        Span::styled("1", key),
        Span::raw(" Alphabetical  "),
        Span::styled("2", key),
        Span::raw(" Reverse Alphabetical  "),
        Span::styled("3", key),
        Span::raw(" Order Added  "),
        Span::styled("4", key),
        Span::raw(" Reverse Order Added"),
    ]);
    f.render_widget(Paragraph::new(bar), area);
}

fn render_partner_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    let title = format!(
        "Partners - {} ({}/{})",
        app.view.title(),
        app.visible.len(),
        app.registry.len()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(app.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            format!(
                "File: {} | a: add | e: edit | d: remove | Enter: view | /: search | ?: help | q: exit",
                app.repository.path().display()
            )
        }),
        AppMode::Search => "Type a keyword (Enter to search, empty shows all, Esc to cancel)".to_string(),
        AppMode::Form => "Tab/↓: next field | Shift+Tab/↑: previous | Enter: save | Esc: cancel".to_string(),
        AppMode::Details => "Press any key to close".to_string(),
        AppMode::ConfirmRemove => "y/Enter: OK | n/Esc: Cancel".to_string(),
        AppMode::Alert => "Enter/Esc: dismiss".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let style = match app.mode {
        AppMode::Normal => Style::default(),
        AppMode::Search => Style::default().fg(Color::Yellow),
        AppMode::Form => Style::default().fg(Color::Green),
        AppMode::Details | AppMode::Help => Style::default().fg(Color::Cyan),
        AppMode::ConfirmRemove => Style::default().fg(Color::Magenta),
        AppMode::Alert => Style::default().fg(Color::Red),
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}

fn render_form_popup(f: &mut Frame, form: &PartnerForm) {
    let popup_area = centered_rect(60, 14, f.area());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.title())
        .style(Style::default().fg(Color::White));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 4])
        .split(inner);

    for (i, (label, input)) in FIELD_LABELS.iter().zip(&form.fields).enumerate() {
        let focused = i == form.focus;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Enter the partner {label}"));
        let field_inner = block.inner(rows[i]);
        let (offset, column) = input_viewport(input, field_inner.width);

        let field = Paragraph::new(input.value())
            .style(style)
            .scroll((0, offset))
            .block(block);
        f.render_widget(field, rows[i]);

        if focused {
            f.set_cursor_position((field_inner.x + column, field_inner.y));
        }
    }
}

fn render_details_popup(f: &mut Frame, app: &App) {
    let Some(partner) = &app.details else {
        return;
    };
    let details = Paragraph::new(partner.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(partner.name.as_str())
                .style(Style::default().fg(Color::Cyan)),
        );

    // Grow with the wrapped text; centered_rect caps it at the screen height.
    let width = centered_rect(60, 0, f.area()).width;
    let height = details.line_count(width.saturating_sub(2));
    let popup_area = centered_rect(60, u16::try_from(height).unwrap_or(u16::MAX), f.area());

    f.render_widget(Clear, popup_area);
    f.render_widget(details, popup_area);
}

fn render_confirm_popup(f: &mut Frame, app: &App) {
    let name = app.pending_removal.as_deref().unwrap_or_default();
    let popup_area = centered_rect(60, 7, f.area());
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from("Are you sure you want to remove this partner from the database?"),
        Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("[y] OK    [n] Cancel"),
    ];
    let confirm = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirmation")
            .style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(confirm, popup_area);
}

fn render_alert_popup(f: &mut Frame, app: &App) {
    let Some(alert) = &app.alert else {
        return;
    };
    let popup_area = centered_rect(60, 6, f.area());
    f.render_widget(Clear, popup_area);

    let message = Paragraph::new(alert.message.as_str())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(alert.title.as_str())
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(message, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "Partner Program Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Horizontal scroll offset and cursor column for a one-line input.
///
/// The offset is the smallest one that keeps the cursor inside `width`
/// columns, so short values are never scrolled.
fn input_viewport(input: &TextInput, width: u16) -> (u16, u16) {
    let cursor = u16::try_from(input.cursor_width()).unwrap_or(u16::MAX);
    let offset = cursor.saturating_sub(width.saturating_sub(1));
    (offset, cursor - offset)
}

/// Rect of `percent_x` width and fixed `height`, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
