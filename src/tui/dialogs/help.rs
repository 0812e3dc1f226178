//! Help dialog
//!
//! Shows keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(get_help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn get_help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Journal"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("Tab/1/2", "Switch department"),
        key_line("j/k", "Move selection down/up"),
        key_line("r", "Reload list"),
        key_line("n/a", "New entry"),
        key_line("c", "Append comment to selected entry"),
        key_line("p", "Toggle priority of selected entry"),
        Line::from(""),
        heading("New Entry"),
        Line::from(""),
        key_line("Tab/S-Tab", "Next/previous field"),
        key_line("↑/↓", "Move through suggestions"),
        key_line("Enter", "Pick suggestion, or save"),
        key_line("←/→", "Change service (service field)"),
        key_line("Esc", "Cancel"),
        Line::from(""),
    ];

    lines.push(Line::from(vec![Span::styled(
        format!(
            "Searches start after {} characters",
            app.settings.min_query_len
        ),
        Style::default().fg(Color::White),
    )]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
