//! Journal list view
//!
//! Department tabs on top, the entry table below. Vehicle and service
//! columns only appear on the service tab.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::display::{comment_preview, format_timestamp, truncate};
use crate::models::{Department, JournalEntry};
use crate::tui::app::{App, JournalView};

/// Render the department tabs
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Department::ALL
        .iter()
        .enumerate()
        .map(|(i, d)| Line::from(format!(" {} {} ", i + 1, d.title())))
        .collect();
    let selected = Department::ALL
        .iter()
        .position(|d| *d == app.department)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Journal ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Render the entry table for the current tab
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let entries = match &app.journal {
        JournalView::Loading => {
            let text = Paragraph::new("Loading...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(text, area);
            return;
        }
        JournalView::Failed(message) => {
            let text = Paragraph::new(format!("Could not load the journal: {}", message))
                .block(block)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(text, area);
            return;
        }
        JournalView::Loaded(entries) => entries,
    };

    if entries.is_empty() {
        let text = Paragraph::new("No entries. Press 'n' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let service = app.department.requires_vehicle();
    let mut widths = vec![
        Constraint::Length(1),  // Priority
        Constraint::Length(14), // Date
        Constraint::Length(20), // Client
        Constraint::Length(14), // Phone
    ];
    let mut headers = vec!["", "Date", "Client", "Phone"];
    if service {
        widths.push(Constraint::Length(22));
        widths.push(Constraint::Length(16));
        headers.push("Vehicle");
        headers.push("Service");
    }
    widths.push(Constraint::Min(10));
    headers.push("Comment");

    let header = Row::new(
        headers
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let date_format = app.settings.date_format.as_str();
    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| entry_row(entry, service, date_format))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn entry_row<'a>(entry: &JournalEntry, service: bool, date_format: &str) -> Row<'a> {
    let priority = if entry.is_priority {
        Cell::from("!").style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Cell::from("")
    };
    let client = entry
        .client
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    let mut cells = vec![
        priority,
        Cell::from(format_timestamp(entry.date.as_deref(), date_format)),
        Cell::from(truncate(client, 20)),
        Cell::from(entry.display_phone().unwrap_or("-").to_string()),
    ];
    if service {
        let vehicle = entry
            .vehicle
            .as_ref()
            .map(|v| format!("{} {} {}", v.plate_number, v.brand, v.model))
            .unwrap_or_else(|| "-".to_string());
        let service_name = entry
            .service
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("-");
        cells.push(Cell::from(truncate(vehicle.trim(), 22)));
        cells.push(Cell::from(truncate(service_name, 16)));
    }
    cells.push(Cell::from(comment_preview(entry.comment.as_deref(), 60)));

    let style = if entry.is_priority {
        Style::default().fg(Color::White)
    } else {
        Style::default()
    };
    Row::new(cells).style(style)
}
