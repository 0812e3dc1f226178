//! New journal entry dialog
//!
//! Client and plate fields search as you type; picking a suggestion binds the
//! entity, plain text creates one on submit. Vehicle and service fields only
//! exist on the service tab.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::error::{JournalError, JournalResult};
use crate::models::{parse_entry_date, Client, Department, Service, Vehicle};
use crate::services::{
    Autocomplete, ClientSearch, JournalForm, SearchPhase, SearchTicket, SelectionState,
    SubmitGate, VehicleSearch,
};
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::remote::Request;
use crate::tui::widgets::input::{TextInput, LABEL_WIDTH};

/// Rows shown in a suggestion list
const SUGGESTION_ROWS: usize = 5;

/// Which field is currently focused in the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryField {
    #[default]
    Client,
    Phone,
    Plate,
    Brand,
    Model,
    Service,
    Date,
    Comment,
}

impl EntryField {
    const SALES: [EntryField; 4] = [Self::Client, Self::Phone, Self::Date, Self::Comment];
    const SERVICE: [EntryField; 8] = [
        Self::Client,
        Self::Phone,
        Self::Plate,
        Self::Brand,
        Self::Model,
        Self::Service,
        Self::Date,
        Self::Comment,
    ];

    /// Fields of the form for `department`, in tab order
    pub fn order(department: Department) -> &'static [EntryField] {
        if department.requires_vehicle() {
            &Self::SERVICE
        } else {
            &Self::SALES
        }
    }

    fn step(self, department: Department, forward: bool) -> Self {
        let order = Self::order(department);
        let len = order.len();
        let at = order.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward { (at + 1) % len } else { (at + len - 1) % len };
        order[next]
    }
}

/// State for the new entry dialog
#[derive(Debug, Clone)]
pub struct JournalEntryFormState {
    /// Identifies this dialog instance in request outcomes
    pub session: u64,
    pub department: Department,
    pub focused_field: EntryField,

    pub client_input: TextInput,
    pub phone_input: TextInput,
    pub plate_input: TextInput,
    pub brand_input: TextInput,
    pub model_input: TextInput,
    pub date_input: TextInput,
    pub comment_input: TextInput,

    /// Bound IDs; text is copied in from the inputs on submit
    pub selection: SelectionState,

    pub client_search: ClientSearch,
    pub vehicle_search: VehicleSearch,
    /// Highlighted row of the visible suggestion list
    pub suggestion_index: usize,

    /// Active services to choose from
    pub services: Vec<Service>,
    pub service_index: Option<usize>,

    pub gate: SubmitGate,
    pub error_message: Option<String>,
}

impl JournalEntryFormState {
    pub fn new(session: u64, department: Department, settings: &Settings, services: &[Service]) -> Self {
        let mut state = Self {
            session,
            department,
            focused_field: EntryField::Client,
            client_input: TextInput::new().label("Client").placeholder("name, type to search"),
            phone_input: TextInput::new().label("Phone"),
            plate_input: TextInput::new().label("Plate").placeholder("type to search"),
            brand_input: TextInput::new().label("Brand"),
            model_input: TextInput::new().label("Model"),
            date_input: TextInput::new().label("Date").placeholder("now (YYYY-MM-DD HH:MM)"),
            comment_input: TextInput::new().label("Comment"),
            selection: SelectionState::new(),
            client_search: Autocomplete::new(settings.min_query_len, settings.search_ordering),
            vehicle_search: Autocomplete::new(settings.min_query_len, settings.search_ordering),
            suggestion_index: 0,
            services: Vec::new(),
            service_index: None,
            gate: SubmitGate::new(),
            error_message: None,
        };
        state.set_services(services);
        state.update_focus();
        state
    }

    /// Replace the service catalogue, keeping the chosen service if still there
    pub fn set_services(&mut self, services: &[Service]) {
        let chosen = self.selected_service().map(|s| s.id);
        self.services = services.iter().filter(|s| s.is_active).cloned().collect();
        self.service_index = chosen
            .and_then(|id| self.services.iter().position(|s| s.id == id))
            .or(if self.services.is_empty() { None } else { Some(0) });
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.service_index.and_then(|i| self.services.get(i))
    }

    pub fn cycle_service(&mut self, forward: bool) {
        let len = self.services.len();
        if len == 0 {
            return;
        }
        let at = self.service_index.unwrap_or(0);
        self.service_index = Some(if forward { (at + 1) % len } else { (at + len - 1) % len });
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.step(self.department, true);
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.step(self.department, false);
        self.update_focus();
    }

    pub fn set_focus(&mut self, field: EntryField) {
        self.focused_field = field;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        let field = self.focused_field;
        self.client_input.focused = field == EntryField::Client;
        self.phone_input.focused = field == EntryField::Phone;
        self.plate_input.focused = field == EntryField::Plate;
        self.brand_input.focused = field == EntryField::Brand;
        self.model_input.focused = field == EntryField::Model;
        self.date_input.focused = field == EntryField::Date;
        self.comment_input.focused = field == EntryField::Comment;
        self.suggestion_index = 0;
    }

    /// The focused text input; `None` on the service selector
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            EntryField::Client => Some(&mut self.client_input),
            EntryField::Phone => Some(&mut self.phone_input),
            EntryField::Plate => Some(&mut self.plate_input),
            EntryField::Brand => Some(&mut self.brand_input),
            EntryField::Model => Some(&mut self.model_input),
            EntryField::Service => None,
            EntryField::Date => Some(&mut self.date_input),
            EntryField::Comment => Some(&mut self.comment_input),
        }
    }

    /// Number of suggestions visible under the focused field
    pub fn visible_suggestions(&self) -> usize {
        let count = match self.focused_field {
            EntryField::Client => self.client_search.results().len(),
            EntryField::Plate => self.vehicle_search.results().len(),
            _ => 0,
        };
        count.min(SUGGESTION_ROWS)
    }

    /// React to an edit of the focused field
    ///
    /// Clearing the client or plate field drops its binding. Otherwise the
    /// binding is kept; only the text changes.
    pub fn on_text_changed(&mut self) -> Option<Request> {
        self.error_message = None;
        match self.focused_field {
            EntryField::Client => {
                self.suggestion_index = 0;
                let text = self.client_input.value().trim().to_string();
                if text.is_empty() {
                    self.selection.unbind_client();
                    self.client_search.clear();
                    return None;
                }
                self.client_search
                    .on_input(&text)
                    .map(|ticket| Request::SearchClients {
                        session: self.session,
                        ticket,
                    })
            }
            EntryField::Plate => {
                self.suggestion_index = 0;
                let text = self.plate_input.value().trim().to_string();
                if text.is_empty() {
                    self.selection.unbind_vehicle();
                    self.vehicle_search.clear();
                    return None;
                }
                self.vehicle_search
                    .on_input(&text)
                    .map(|ticket| Request::SearchVehicles {
                        session: self.session,
                        ticket,
                    })
            }
            _ => None,
        }
    }

    pub fn apply_clients(&mut self, ticket: &SearchTicket, result: JournalResult<Vec<Client>>) {
        if self.client_search.apply(ticket, result) {
            self.suggestion_index = 0;
        }
    }

    pub fn apply_vehicles(&mut self, ticket: &SearchTicket, result: JournalResult<Vec<Vehicle>>) {
        if self.vehicle_search.apply(ticket, result) {
            self.suggestion_index = 0;
        }
    }

    /// Pick the highlighted suggestion; returns false when none is showing
    pub fn choose_suggestion(&mut self) -> bool {
        let index = self.suggestion_index;
        match self.focused_field {
            EntryField::Client => {
                let Some(client) = self.client_search.choose(index) else {
                    return false;
                };
                self.selection.select_client(&client);
                self.client_input.set_content(client.name.as_str());
                self.phone_input.set_content(client.phone_or_empty());
                self.next_field();
                true
            }
            EntryField::Plate => {
                let Some(vehicle) = self.vehicle_search.choose(index) else {
                    return false;
                };
                self.selection.select_vehicle(&vehicle);
                self.plate_input.set_content(vehicle.plate_number.as_str());
                self.brand_input.set_content(vehicle.brand.as_str());
                self.model_input.set_content(vehicle.model.as_str());
                self.set_focus(EntryField::Service);
                true
            }
            _ => false,
        }
    }

    /// Copy the typed text into the selection
    fn sync_selection(&mut self) {
        self.selection.client.name = self.client_input.value().trim().to_string();
        self.selection.client.phone = self.phone_input.value().trim().to_string();
        self.selection.vehicle.plate_number = self.plate_input.value().trim().to_string();
        self.selection.vehicle.brand = self.brand_input.value().trim().to_string();
        self.selection.vehicle.model = self.model_input.value().trim().to_string();
    }

    fn form(&self) -> JournalResult<JournalForm> {
        let date_text = self.date_input.value().trim();
        let date = if date_text.is_empty() {
            None
        } else {
            Some(parse_entry_date(date_text)?)
        };
        Ok(JournalForm {
            department: self.department,
            date,
            comment: self.comment_input.value().to_string(),
            service_id: if self.department.requires_vehicle() {
                self.selected_service().map(|s| s.id)
            } else {
                None
            },
        })
    }

    /// Enter `Submitting` and produce the submit request
    pub fn begin_submit(&mut self) -> JournalResult<Request> {
        self.gate.begin()?;
        self.sync_selection();
        match self.form() {
            Ok(form) => Ok(Request::Submit {
                session: self.session,
                selection: self.selection.clone(),
                form,
            }),
            Err(err) => {
                self.gate.finish();
                Err(err)
            }
        }
    }

    /// A submit failed: keep what got created, show the error, allow a retry
    pub fn submit_failed(&mut self, returned: &SelectionState, err: &JournalError) {
        self.gate.finish();
        if let Some(id) = returned.selected_client_id() {
            self.selection.bind_client(id);
        }
        if let Some(id) = returned.selected_vehicle_id() {
            self.selection.bind_vehicle(id);
        }
        self.error_message = Some(err.to_string());
    }
}

/// Render the dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(form) = app.entry_form.as_ref() else {
        return;
    };

    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let title = format!(" New {} entry ", form.department.title().to_lowercase());
    let block = Block::default()
        .title(title)
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

    let suggestions = SUGGESTION_ROWS as u16;
    let mut rows: Vec<(Option<EntryField>, Constraint)> = vec![
        (Some(EntryField::Client), Constraint::Length(1)),
        (None, Constraint::Length(suggestions)),
        (Some(EntryField::Phone), Constraint::Length(1)),
    ];
    if form.department.requires_vehicle() {
        rows.push((Some(EntryField::Plate), Constraint::Length(1)));
        rows.push((None, Constraint::Length(suggestions)));
        rows.push((Some(EntryField::Brand), Constraint::Length(1)));
        rows.push((Some(EntryField::Model), Constraint::Length(1)));
        rows.push((Some(EntryField::Service), Constraint::Length(1)));
    }
    rows.push((Some(EntryField::Date), Constraint::Length(1)));
    rows.push((Some(EntryField::Comment), Constraint::Length(1)));
    rows.push((None, Constraint::Length(1))); // spacer
    rows.push((None, Constraint::Length(1))); // error
    rows.push((None, Constraint::Length(1))); // hints
    rows.push((None, Constraint::Min(0)));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows.iter().map(|(_, c)| *c).collect::<Vec<_>>())
        .split(inner);

    for (i, (field, _)) in rows.iter().enumerate() {
        let area = chunks[i];
        match field {
            Some(EntryField::Client) => {
                render_input(frame, &form.client_input, area, form.selection.selected_client_id().is_some());
                render_client_suggestions(frame, form, chunks[i + 1]);
            }
            Some(EntryField::Phone) => frame.render_widget(&form.phone_input, area),
            Some(EntryField::Plate) => {
                render_input(frame, &form.plate_input, area, form.selection.selected_vehicle_id().is_some());
                render_vehicle_suggestions(frame, form, chunks[i + 1]);
            }
            Some(EntryField::Brand) => frame.render_widget(&form.brand_input, area),
            Some(EntryField::Model) => frame.render_widget(&form.model_input, area),
            Some(EntryField::Service) => render_service(frame, form, area),
            Some(EntryField::Date) => frame.render_widget(&form.date_input, area),
            Some(EntryField::Comment) => frame.render_widget(&form.comment_input, area),
            None => {}
        }
    }

    let footer = chunks.len() - 1;
    if let Some(error) = &form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[footer - 2],
        );
    }

    let hints = if form.gate.is_submitting() {
        Line::from(Span::styled(
            "Saving...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw(" Next  "),
            Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
            Span::raw(" Suggestion  "),
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Pick/Save  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel"),
        ])
    };
    frame.render_widget(Paragraph::new(hints), chunks[footer - 1]);
}

/// Text field with a marker when the text is bound to an existing record
fn render_input(frame: &mut Frame, input: &TextInput, area: Rect, bound: bool) {
    let mut line = input.to_line();
    let marker = if bound {
        Span::styled("  ✓ existing", Style::default().fg(Color::Green))
    } else if !input.value().trim().is_empty() {
        Span::styled("  + new", Style::default().fg(Color::Magenta))
    } else {
        Span::raw("")
    };
    line.spans.push(marker);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_service(frame: &mut Frame, form: &JournalEntryFormState, area: Rect) {
    let focused = form.focused_field == EntryField::Service;
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value = match form.selected_service() {
        Some(service) if focused => format!("◀ {} ▶", service.name),
        Some(service) => service.name.clone(),
        None => "(loading services...)".to_string(),
    };
    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let line = Line::from(vec![
        Span::styled(format!("{:>width$}: ", "Service", width = LABEL_WIDTH), label_style),
        Span::styled(value, value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_client_suggestions(frame: &mut Frame, form: &JournalEntryFormState, area: Rect) {
    let labels: Vec<String> = form.client_search.results().iter().map(|c| c.to_string()).collect();
    render_suggestions(
        frame,
        area,
        form.focused_field == EntryField::Client,
        form.client_search.phase(),
        form.client_search.error(),
        &labels,
        form.suggestion_index,
    );
}

fn render_vehicle_suggestions(frame: &mut Frame, form: &JournalEntryFormState, area: Rect) {
    let labels: Vec<String> = form.vehicle_search.results().iter().map(|v| v.to_string()).collect();
    render_suggestions(
        frame,
        area,
        form.focused_field == EntryField::Plate,
        form.vehicle_search.phase(),
        form.vehicle_search.error(),
        &labels,
        form.suggestion_index,
    );
}

fn render_suggestions(
    frame: &mut Frame,
    area: Rect,
    focused: bool,
    phase: SearchPhase,
    error: Option<&str>,
    labels: &[String],
    index: usize,
) {
    let indent = Rect {
        x: area.x + LABEL_WIDTH as u16 + 2,
        width: area.width.saturating_sub(LABEL_WIDTH as u16 + 2),
        ..area
    };

    if let Some(error) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
            indent,
        );
        return;
    }
    if labels.is_empty() {
        if phase == SearchPhase::Searching {
            frame.render_widget(
                Paragraph::new(Span::styled("searching...", Style::default().fg(Color::DarkGray))),
                indent,
            );
        }
        return;
    }

    let items: Vec<ListItem> = labels
        .iter()
        .take(SUGGESTION_ROWS)
        .map(|label| ListItem::new(Line::from(Span::raw(label.clone()))))
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(if focused { Color::White } else { Color::DarkGray }))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(index.min(labels.len().min(SUGGESTION_ROWS) - 1)));
    }
    frame.render_stateful_widget(list, indent, &mut state);
}

/// Handle key input for the dialog
/// Returns true if the key was handled
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let Some(form) = app.entry_form.as_mut() else {
        return false;
    };

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
        }

        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),

        KeyCode::Up if form.visible_suggestions() > 0 => {
            form.suggestion_index = form.suggestion_index.saturating_sub(1);
        }
        KeyCode::Down if form.visible_suggestions() > 0 => {
            if form.suggestion_index + 1 < form.visible_suggestions() {
                form.suggestion_index += 1;
            }
        }
        KeyCode::Up => form.prev_field(),
        KeyCode::Down => form.next_field(),

        KeyCode::Enter => {
            if form.choose_suggestion() {
                return true;
            }
            match form.begin_submit() {
                Ok(request) => app.request(request),
                Err(err) => form.error_message = Some(err.to_string()),
            }
        }

        KeyCode::Left if form.focused_field == EntryField::Service => form.cycle_service(false),
        KeyCode::Right if form.focused_field == EntryField::Service => form.cycle_service(true),

        KeyCode::Left => {
            if let Some(input) = form.focused_input() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = form.focused_input() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.move_start();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.move_end();
            }
        }

        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char(_) => {
            let Some(input) = form.focused_input() else {
                return true;
            };
            match key.code {
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Char(c) => input.insert(c),
                _ => {}
            }
            if let Some(request) = form.on_text_changed() {
                app.request(request);
            }
        }

        _ => return false,
    }

    true
}
