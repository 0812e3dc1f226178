//! Append comment dialog
//!
//! The backend appends to the existing comment, so the dialog shows what is
//! already there and only collects the new text.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{JournalEntry, JournalEntryId};
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::remote::Request;
use crate::tui::widgets::input::TextInput;

/// State for the comment dialog
#[derive(Debug, Clone)]
pub struct CommentFormState {
    pub entry_id: JournalEntryId,
    pub existing: Option<String>,
    pub input: TextInput,
    pub error_message: Option<String>,
}

impl CommentFormState {
    pub fn new(entry: &JournalEntry) -> Self {
        let mut input = TextInput::new().label("Add").placeholder("text to append");
        input.focused = true;
        Self {
            entry_id: entry.id,
            existing: entry.comment.clone().filter(|c| !c.trim().is_empty()),
            input,
            error_message: None,
        }
    }

    /// Build the append request, or explain why not
    pub fn build_request(&self) -> Result<Request, String> {
        let text = self.input.value().trim();
        if text.is_empty() {
            return Err("Comment cannot be empty".into());
        }
        Ok(Request::AppendComment {
            id: self.entry_id,
            text: text.to_string(),
        })
    }
}

/// Render the dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(form) = app.comment_form.as_ref() else {
        return;
    };

    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Comment on {} ", form.entry_id))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let existing = match &form.existing {
        Some(text) => Span::styled(text.as_str(), Style::default().fg(Color::White)),
        None => Span::styled("(no comment yet)", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(Line::from(existing)).wrap(Wrap { trim: true }), chunks[0]);
    frame.render_widget(&form.input, chunks[1]);

    if let Some(error) = &form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[2],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Append  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

/// Handle key input for the dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let Some(form) = app.comment_form.as_mut() else {
        return false;
    };

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => match form.build_request() {
            Ok(request) => {
                app.request(request);
                app.close_dialog();
                app.set_status("Saving comment...");
            }
            Err(message) => form.error_message = Some(message),
        },
        KeyCode::Char(c) => {
            form.input.insert(c);
            form.error_message = None;
        }
        KeyCode::Backspace => form.input.backspace(),
        KeyCode::Delete => form.input.delete(),
        KeyCode::Left => form.input.move_left(),
        KeyCode::Right => form.input.move_right(),
        KeyCode::Home => form.input.move_start(),
        KeyCode::End => form.input.move_end(),
        _ => return false,
    }
    true
}
