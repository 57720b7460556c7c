//! Central application state for the ledger TUI. The `App` owns the one
//! authoritative `RecordStore`; every view is re-rendered from the store's
//! listing and search results after each mutation instead of caching a
//! parallel copy of the records, so a screen can never drift out of step
//! with what the file actually holds.

use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::codec;
use crate::error::StoreError;
use crate::models::{PaymentStatus, RecordId, ServiceRecord};
use crate::store::RecordStore;

use super::forms::{ConfirmRecordDelete, PaymentForm, RecordForm, RECORD_FIELDS};
use super::helpers::{centered_rect, fixed_width, fixed_width_right};
use super::screens::CustomerScreen;

/// Footer space reserved for the totals line, status messages, and key hints.
const FOOTER_HEIGHT: u16 = 4;

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what the keys should do.
enum Screen {
    Ledger,
    Customers(CustomerScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingRecord(RecordForm),
    CollectingPayment { id: RecordId, form: PaymentForm },
    ConfirmDelete(ConfirmRecordDelete),
    ViewingRecord(RecordId),
    Searching(SearchState),
}

/// State for an active inline search over the ledger.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: RecordStore,
    /// Identifiers of the records currently visible on the ledger screen, in
    /// ledger order, narrowed by the active filter. Views hold ids rather
    /// than copies so a mutation only has to refresh this list.
    visible: Vec<RecordId>,
    filter: Option<String>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        let visible = store.records().iter().map(|record| record.id).collect();
        Self {
            store,
            visible,
            filter: None,
            selected: 0,
            screen: Screen::Ledger,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Rebuild the visible id list from the store, applying the active
    /// filter, and keep both the ledger selection and the customer screen in
    /// bounds. Called after every mutation.
    fn refresh_views(&mut self) {
        let query = self.filter.as_deref().unwrap_or("");
        self.visible = self
            .store
            .search(query)
            .iter()
            .map(|record| record.id)
            .collect();

        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }

        if let Screen::Customers(customers) = &mut self.screen {
            customers.refresh(self.store.unique_customer_names());
        }
    }

    fn current_record(&self) -> Option<&ServiceRecord> {
        self.visible
            .get(self.selected)
            .and_then(|id| self.store.get(*id))
    }

    fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingRecord(form) => self.handle_add_record(code, form),
            Mode::CollectingPayment { id, form } => self.handle_payment(code, id, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::ViewingRecord(id) => Self::handle_view_record(code, id),
            Mode::Searching(state) => self.handle_search(code, state),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Ledger => {
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        // Esc first drops an active filter; a second Esc
                        // leaves the application.
                        if self.filter.is_some() {
                            self.filter = None;
                            self.refresh_views();
                            self.clear_status();
                        } else {
                            *exit = true;
                        }
                    }
                    KeyCode::Up => self.move_selection(-1),
                    KeyCode::Down => self.move_selection(1),
                    KeyCode::PageUp => self.move_selection(-5),
                    KeyCode::PageDown => self.move_selection(5),
                    KeyCode::Home => {
                        if !self.visible.is_empty() {
                            self.selected = 0;
                        }
                    }
                    KeyCode::End => {
                        if !self.visible.is_empty() {
                            self.selected = self.visible.len() - 1;
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(record) = self.current_record() {
                            let id = record.id;
                            self.clear_status();
                            return Ok(Mode::ViewingRecord(id));
                        }
                        self.set_status("No record selected.", StatusKind::Error);
                    }
                    KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                        self.clear_status();
                        return Ok(Mode::AddingRecord(RecordForm::default()));
                    }
                    KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                        if let Some(record) = self.current_record() {
                            let confirm = ConfirmRecordDelete::from(record);
                            self.clear_status();
                            return Ok(Mode::ConfirmDelete(confirm));
                        }
                        self.set_status("No record selected to delete.", StatusKind::Error);
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') => {
                        if let Some(record) = self.current_record() {
                            let id = record.id;
                            let form = PaymentForm::for_record(record);
                            self.clear_status();
                            return Ok(Mode::CollectingPayment { id, form });
                        }
                        self.set_status("No record selected for payment.", StatusKind::Error);
                    }
                    KeyCode::Char('f') | KeyCode::Char('/') => {
                        self.clear_status();
                        return Ok(Mode::Searching(SearchState {
                            query: self.filter.clone().unwrap_or_default(),
                        }));
                    }
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        self.clear_status();
                        self.screen =
                            Screen::Customers(CustomerScreen::new(self.store.unique_customer_names()));
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Customers(ref mut customers) => {
                let mut back_to_ledger = false;
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                        back_to_ledger = true;
                    }
                    KeyCode::Up => customers.move_selection(-1),
                    KeyCode::Down => customers.move_selection(1),
                    KeyCode::PageUp => customers.move_selection(-5),
                    KeyCode::PageDown => customers.move_selection(5),
                    KeyCode::Home => customers.select_first(),
                    KeyCode::End => customers.select_last(),
                    _ => {}
                }

                if back_to_ledger {
                    self.clear_status();
                    self.screen = Screen::Ledger;
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_add_record(&mut self, code: KeyCode, mut form: RecordForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add record cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.store.append(form.draft()) {
                Ok(record) => {
                    let id = record.id;
                    let summary = record.summary();
                    self.refresh_views();
                    if let Some(position) = self.visible.iter().position(|visible| *visible == id) {
                        self.selected = position;
                    }
                    self.set_status(format!("Record added for {summary}."), StatusKind::Info);
                    keep_open = false;
                }
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::AddingRecord(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_payment(&mut self, code: KeyCode, id: RecordId, mut form: PaymentForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Payment cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match codec::parse_amount(&form.amount) {
                Ok(amount) => match self.store.apply_payment(id, amount) {
                    Ok(record) => {
                        let remaining = record.amount_remaining();
                        self.refresh_views();
                        let message = match remaining {
                            Some(remaining) => {
                                format!("Payment recorded. Remaining: {remaining}.")
                            }
                            None => "Payment recorded.".to_string(),
                        };
                        self.set_status(message, StatusKind::Info);
                        keep_open = false;
                    }
                    Err(err @ StoreError::RecordGone { .. }) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        keep_open = false;
                    }
                    Err(err) => {
                        let message = err.to_string();
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                },
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::CollectingPayment { id, form }
        } else {
            Mode::Normal
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmRecordDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.delete(confirm.id) {
                    Ok(()) => {
                        self.refresh_views();
                        self.set_status(
                            format!("Record for {} deleted.", confirm.summary),
                            StatusKind::Info,
                        );
                        Mode::Normal
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        Mode::Normal
                    }
                }
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_view_record(code: KeyCode, id: RecordId) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Mode::Normal,
            _ => Mode::ViewingRecord(id),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.filter = None;
                self.refresh_views();
                self.clear_status();
                return Mode::Normal;
            }
            KeyCode::Enter => {
                let matches = self.visible.len();
                self.set_status(
                    format!("{matches} record(s) match the search."),
                    StatusKind::Info,
                );
                return Mode::Normal;
            }
            KeyCode::Up => {
                self.move_selection(-1);
                return Mode::Searching(state);
            }
            KeyCode::Down => {
                self.move_selection(1);
                return Mode::Searching(state);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
            }
            _ => return Mode::Searching(state),
        }

        self.filter = if state.query.is_empty() {
            None
        } else {
            Some(state.query.clone())
        };
        self.refresh_views();
        Mode::Searching(state)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Ledger => self.draw_ledger(frame, content_area),
            Screen::Customers(customers) => self.draw_customers(frame, content_area, customers),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingRecord(form) => self.draw_record_form(frame, area, form),
            Mode::CollectingPayment { form, .. } => self.draw_payment_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::ViewingRecord(id) => self.draw_record_detail(frame, area, *id),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_ledger(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.filter {
            Some(query) => format!("Service Records (filter: {query})"),
            None => "Service Records".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        if self.store.is_empty() {
            let message = Paragraph::new("Ledger is empty. Press '+' to add the first record.")
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        if self.visible.is_empty() {
            let message = Paragraph::new("No records match the search. Esc clears the filter.")
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let header = Line::from(Span::styled(
            format!(
                "{} {} {} {} {} {} {} {}",
                fixed_width("#", 4),
                fixed_width("Date", 10),
                fixed_width("Customer", 16),
                fixed_width("Vehicle", 14),
                fixed_width("Work", 18),
                fixed_width_right("Due", 8),
                fixed_width_right("Paid", 8),
                fixed_width_right("Left", 8),
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|id| self.store.get(*id))
            .map(|record| ListItem::new(self.ledger_row(record)))
            .collect();

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Header row pinned above the scrolling list.
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    /// Format one ledger row with fixed-width columns. The leading number is
    /// the record's transient position in the full ledger, not an identity.
    fn ledger_row(&self, record: &ServiceRecord) -> Line<'static> {
        let row_number = self
            .store
            .row_number(record.id)
            .map(|number| number.to_string())
            .unwrap_or_default();
        let remaining = record
            .amount_remaining()
            .map(|value| value.to_string())
            .unwrap_or_else(|| "?".to_string());

        let text = format!(
            "{} {} {} {} {} {} {} {}",
            fixed_width(&row_number, 4),
            fixed_width(&record.date, 10),
            fixed_width(&record.customer_name, 16),
            fixed_width(&record.vehicle_info, 14),
            fixed_width(&record.work_done, 18),
            fixed_width_right(&record.amount_due, 8),
            fixed_width_right(&record.amount_paid.to_string(), 8),
            fixed_width_right(&remaining, 8),
        );

        let style = match record.payment_status() {
            PaymentStatus::Paid => Style::default().fg(Color::Green),
            PaymentStatus::Partial => Style::default().fg(Color::Yellow),
            PaymentStatus::Pending => Style::default(),
        };
        Line::from(Span::styled(text, style))
    }

    fn draw_customers(&self, frame: &mut Frame, area: Rect, customers: &CustomerScreen) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        let names_block = Block::default().title("Customers").borders(Borders::ALL);
        if customers.names.is_empty() {
            let message = Paragraph::new("No customers yet.")
                .block(names_block)
                .alignment(Alignment::Center);
            frame.render_widget(message, chunks[0]);
        } else {
            let items: Vec<ListItem> = customers
                .names
                .iter()
                .map(|name| ListItem::new(name.clone()))
                .collect();
            let list = List::new(items)
                .block(names_block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = ListState::default();
            state.select(Some(customers.selected));
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        let (title, lines) = match customers.current_name() {
            Some(name) => (format!("Visits: {name}"), self.visit_lines(name)),
            None => ("Visits".to_string(), Vec::new()),
        };
        let visits_block = Block::default().title(title).borders(Borders::ALL);
        let paragraph = Paragraph::new(lines)
            .block(visits_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[1]);
    }

    /// Render the visit history for one customer, one block of lines per
    /// record, oldest first (ledger order).
    fn visit_lines(&self, name: &str) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for record in self.store.records_for_customer(name) {
            let remaining = record
                .amount_remaining()
                .map(|value| value.to_string())
                .unwrap_or_else(|| "?".to_string());
            lines.push(Line::from(Span::styled(
                format!("{}  {}", record.date, record.vehicle_info),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("  {}", record.work_done)));
            lines.push(Line::from(format!(
                "  due {}  paid {}  left {}  ({})",
                record.amount_due,
                record.amount_paid,
                remaining,
                record.payment_status(),
            )));
            lines.push(Line::from(""));
        }
        lines
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let totals_line = match self.store.total_due() {
            Ok(total) => Line::from(format!(
                "Records: {}   Total due: {}",
                self.store.len(),
                total
            )),
            Err(err) => Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            )),
        };

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph =
            Paragraph::new(vec![totals_line, status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AddingRecord(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::CollectingPayment { .. }) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Record Payment   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ConfirmDelete(_)) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Keep"),
            ]),
            (_, Mode::Searching(_)) => Line::from(vec![
                Span::styled("[Type]", key_style),
                Span::raw(" Filter   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Keep Filter   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Clear"),
            ]),
            (_, Mode::ViewingRecord(_)) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            (Screen::Customers(_), _) => Line::from(vec![
                Span::styled("[Up/Down]", key_style),
                Span::raw(" Customer   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Ledger, _) => Line::from(vec![
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[P]", key_style),
                Span::raw(" Payment   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[/]", key_style),
                Span::raw(" Search   "),
                Span::styled("[C]", key_style),
                Span::raw(" Customers   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Detail   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_record_form(&self, frame: &mut Frame, area: Rect, form: &RecordForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Record").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = RECORD_FIELDS
            .iter()
            .map(|(field, label)| form.build_line(label, *field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save, Tab to switch, Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some(row) = RECORD_FIELDS
            .iter()
            .position(|(field, _)| *field == form.active)
        {
            let label = RECORD_FIELDS[row].1;
            let prefix = label.chars().count() as u16 + 2;
            let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
            let cursor_y = inner.y + row as u16;
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_payment_form(&self, frame: &mut Frame, area: Rect, form: &PaymentForm) {
        let popup_area = centered_rect(60, 35, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Record Payment")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let remaining = form
            .remaining
            .map(|value| value.to_string())
            .unwrap_or_else(|| "?".to_string());

        let mut lines = vec![
            Line::from(format!("Record: {}", form.summary)),
            Line::from(format!("Outstanding: {remaining}")),
            Line::from(vec![
                Span::raw("Payment: "),
                Span::styled(form.amount.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to record, Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Payment: ".len() as u16 + form.amount.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y + 2));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRecordDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete the record for {}?", confirm.summary)),
            Line::from("The row is removed from the ledger file immediately."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_record_detail(&self, frame: &mut Frame, area: Rect, id: RecordId) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let record = match self.store.get(id) {
            Some(record) => record,
            None => return,
        };
        let row_number = self
            .store
            .row_number(id)
            .map(|number| number.to_string())
            .unwrap_or_default();

        let block = Block::default()
            .title(format!("Record {row_number}"))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let remaining = record
            .amount_remaining()
            .map(|value| value.to_string())
            .unwrap_or_else(|| "?".to_string());

        let lines = vec![
            Line::from(format!("Date:      {}", record.date)),
            Line::from(format!("Customer:  {}", record.customer_name)),
            Line::from(format!("Phone:     {}", record.phone_number)),
            Line::from(format!("Vehicle:   {}", record.vehicle_info)),
            Line::from(format!("Work:      {}", record.work_done)),
            Line::from(format!("Due:       {}", record.amount_due)),
            Line::from(format!("Paid:      {}", record.amount_paid)),
            Line::from(format!("Remaining: {remaining}")),
            Line::from(format!("Status:    {}", record.payment_status())),
            Line::from(""),
            Line::from(Span::styled(
                "Esc to close.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
