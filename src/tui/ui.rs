use crate::tui::app::{App, FormFocus, FormLayout};
use crate::typeahead::{Mode, PanelEntry};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Suggestion rows shown at once; the list scrolls to keep the highlight visible
const MAX_VISIBLE_ROWS: usize = 8;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Company input
            Constraint::Length(1), // Help / error line
            Constraint::Length(3), // Contact input
            Constraint::Length(1), // Submit
            Constraint::Min(0),
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(frame, chunks[0]);
    draw_company_input(frame, app, chunks[1]);
    let back_to_search = draw_help_line(frame, app, chunks[2]);
    draw_text_input(
        frame,
        " Contact name ",
        &app.contact,
        app.focus == FormFocus::Contact,
        chunks[3],
    );
    draw_submit(frame, app, chunks[4]);
    draw_status_bar(frame, app, chunks[6]);

    app.layout = FormLayout {
        company_input: chunks[1],
        panel_rows: Vec::new(),
        back_to_search,
        contact_input: chunks[3],
        submit: chunks[4],
    };

    // Panel last so it overlays the fields below it
    let panel = draw_panel(frame, app, chunks[1], area);
    app.company
        .set_bounds(to_pointer_rect(chunks[1]), panel.map(to_pointer_rect));

    match app.focus {
        FormFocus::Company => {
            let col = app.company_editor.column(app.company.committed_value());
            frame.set_cursor_position(Position::new(chunks[1].x + 1 + col, chunks[1].y + 1));
        }
        FormFocus::Contact => {
            let col = app.contact_editor.column(&app.contact);
            frame.set_cursor_position(Position::new(chunks[3].x + 1 + col, chunks[3].y + 1));
        }
        FormFocus::Submit => {}
    }
}

fn to_pointer_rect(r: Rect) -> crate::pointer::Rect {
    crate::pointer::Rect::new(
        f32::from(r.x),
        f32::from(r.y),
        f32::from(r.width),
        f32::from(r.height),
    )
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " Talent casting diagnosis ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Tab: next field  Ctrl+S: submit  Ctrl+R: reset  Esc: close/quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_company_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == FormFocus::Company;
    let border_style = if app.company.error().is_some() {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let label = app.company.label().unwrap_or("Company");
    let title = match app.company.mode() {
        Mode::Searching => format!(" {} ", label),
        Mode::FreeText => format!(" {} (manual entry) ", label),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let value = app.company.committed_value();
    let paragraph = if value.is_empty() {
        Paragraph::new(app.company.placeholder().unwrap_or_default())
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(value).style(Style::default().fg(Color::White))
    };

    frame.render_widget(paragraph.block(block), area);
}

/// Help or error text, plus the back-to-search control in free-text mode.
/// Returns the control's area when drawn.
fn draw_help_line(frame: &mut Frame, app: &App, area: Rect) -> Option<Rect> {
    let (text_area, control_area) = if app.company.mode() == Mode::FreeText {
        let label = format!(" [F2] {} ", app.company.config().back_to_search_label);
        let width = (label.chars().count() as u16).min(area.width);
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(width)])
            .split(area);
        frame.render_widget(
            Paragraph::new(label).style(Style::default().fg(Color::Black).bg(Color::Yellow)),
            parts[1],
        );
        (parts[0], Some(parts[1]))
    } else {
        (area, None)
    };

    let line = match (app.company.error(), app.company.help()) {
        (Some(err), _) => Span::styled(format!(" {}", err), Style::default().fg(Color::Red)),
        (None, Some(help)) => Span::styled(format!(" {}", help), Style::default().fg(Color::Gray)),
        (None, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(line)), text_area);

    control_area
}

fn draw_text_input(frame: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    frame.render_widget(Paragraph::new(value).block(block), area);
}

fn draw_submit(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.focus == FormFocus::Submit {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    frame.render_widget(Paragraph::new(" [ Submit ] ").style(style), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.company.mode() {
        Mode::Searching => "SEARCH",
        Mode::FreeText => "MANUAL",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.status_message),
            Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 50)),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Rgb(40, 40, 50))),
        area,
    );
}

/// Draw the suggestion panel under `input`. Returns its area when shown.
fn draw_panel(frame: &mut Frame, app: &mut App, input: Rect, screen: Rect) -> Option<Rect> {
    let entries = app.company.panel_entries();
    if entries.is_empty() {
        return None;
    }

    let top = input.y + input.height;
    let room = screen.height.saturating_sub(top).saturating_sub(1);
    let visible = entries.len().min(MAX_VISIBLE_ROWS).min(room.saturating_sub(2) as usize);
    if visible == 0 {
        return None;
    }

    let highlighted = app.company.highlighted();
    let offset = highlighted
        .map(|h| h.saturating_sub(visible - 1))
        .unwrap_or(0);

    let popup_area = Rect::new(input.x, top, input.width, visible as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let title = if entries.len() > visible {
        format!(" {} of {} ", visible, entries.len())
    } else {
        String::new()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    for (row, (index, entry)) in entries.iter().enumerate().skip(offset).take(visible).enumerate() {
        let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        let is_selected = highlighted == Some(index);

        let line = match entry {
            PanelEntry::Company(record) => {
                let region = record.region_label();
                let padding = (inner.width as usize)
                    .saturating_sub(record.name.chars().count() + region.chars().count() + 3);
                Line::from(vec![
                    Span::raw(format!(" {}", record.name)),
                    Span::raw(" ".repeat(padding)),
                    Span::styled(format!("{} ", region), Style::default().fg(Color::DarkGray)),
                ])
            }
            PanelEntry::ManualEntry => Line::from(Span::styled(
                format!(" + {}", app.company.config().manual_entry_label),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
        };

        let style = if is_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        frame.render_widget(Paragraph::new(line).style(style), row_area);
        app.layout.panel_rows.push((index, row_area));
    }

    Some(popup_area)
}
