use crate::pointer::{Point, PointerHub};
use crate::tui::search::{Edit, LineEditor};
use crate::tui::ui;
use crate::typeahead::{Mode, PanelEntry, Typeahead, TypeaheadConfig};
use crate::form::Submission;
use crate::CompanyDirectory;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::prelude::*;
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Which form control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Company,
    Contact,
    Submit,
}

impl FormFocus {
    pub fn next(&self) -> Self {
        match self {
            FormFocus::Company => FormFocus::Contact,
            FormFocus::Contact => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Company,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormFocus::Company => FormFocus::Submit,
            FormFocus::Contact => FormFocus::Company,
            FormFocus::Submit => FormFocus::Contact,
        }
    }
}

/// Screen regions from the last frame, used for mouse hit testing
#[derive(Debug, Default, Clone)]
pub struct FormLayout {
    pub company_input: Rect,
    /// (panel entry index, row area) for every visible row
    pub panel_rows: Vec<(usize, Rect)>,
    pub back_to_search: Option<Rect>,
    pub contact_input: Rect,
    pub submit: Rect,
}

pub struct App {
    hub: PointerHub,
    pub company: Typeahead<String>,
    pub company_editor: LineEditor,
    pub contact: String,
    pub contact_editor: LineEditor,
    pub focus: FormFocus,
    pub layout: FormLayout,
    pub status_message: String,
    pub submitted: Option<Submission>,
    pub should_quit: bool,
}

impl App {
    pub fn new(directory: CompanyDirectory, config: TypeaheadConfig) -> Self {
        let hub = PointerHub::new();
        let company = Typeahead::mount(directory, String::new(), config, &hub);

        Self {
            hub,
            company,
            company_editor: LineEditor::default(),
            contact: String::new(),
            contact_editor: LineEditor::default(),
            focus: FormFocus::Company,
            layout: FormLayout::default(),
            status_message: "Type to search companies".to_string(),
            submitted: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => {
                        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                            self.handle_click(mouse.column, mouse.row);
                        }
                    }
                    _ => {}
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // --- Mouse handling ---

    /// Left click at a terminal cell
    pub fn handle_click(&mut self, column: u16, row: u16) {
        let point = Point::new(f32::from(column), f32::from(row));
        let pos = Position::new(column, row);

        // Outside-click dismissal first, exactly as a document listener would
        self.hub.pointer_down(point);

        let clicked_row = self
            .layout
            .panel_rows
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(i, _)| *i);
        if let Some(i) = clicked_row {
            self.confirm_panel_row(i);
            return;
        }
        if self.layout.back_to_search.is_some_and(|r| r.contains(pos)) {
            self.back_to_search();
            return;
        }
        if self.layout.company_input.contains(pos) {
            self.set_focus(FormFocus::Company);
        } else if self.layout.contact_input.contains(pos) {
            self.set_focus(FormFocus::Contact);
        } else if self.layout.submit.contains(pos) {
            self.set_focus(FormFocus::Submit);
            self.submit();
        }
    }

    fn confirm_panel_row(&mut self, row: usize) {
        let is_manual = matches!(self.company.panel_entries().get(row), Some(PanelEntry::ManualEntry));
        if is_manual {
            if self.company.choose_manual_entry() {
                self.status_message = "Manual entry: type the full company name".to_string();
            }
        } else if self.company.select_match(row) {
            self.company_editor = LineEditor::at_end(self.company.committed_value());
            self.status_message = format!("Selected {}", self.company.committed_value());
        }
        self.set_focus(FormFocus::Company);
    }

    fn back_to_search(&mut self) {
        // The panel may reopen, so the company field has to own focus
        self.set_focus(FormFocus::Company);
        if self.company.return_to_search() {
            self.company_editor.clamp(self.company.committed_value());
            self.status_message = format!("{} matches", self.company.match_count());
        }
    }

    fn set_focus(&mut self, focus: FormFocus) {
        if self.focus == focus {
            return;
        }
        // Keyboard/mouse focus moving away closes the panel like Escape
        if self.focus == FormFocus::Company {
            self.company.dismiss();
        }
        self.focus = focus;
        if focus == FormFocus::Company {
            self.company.handle_focus();
        }
    }

    /// Host-side reset of every field (Ctrl+R)
    pub fn reset_form(&mut self) {
        self.company.field_mut().clear();
        self.company.sync_from_field();
        self.company.set_error(None);
        self.company_editor = LineEditor::default();
        self.contact.clear();
        self.contact_editor = LineEditor::default();
        self.status_message = "Form reset".to_string();
    }

    pub fn submit(&mut self) {
        let company = self.company.committed_value().trim().to_string();
        if company.is_empty() {
            self.company.set_error(Some("Company is required".to_string()));
            self.set_focus(FormFocus::Company);
            return;
        }

        self.company.set_error(None);
        self.submitted = Some(Submission::new(
            &company,
            &self.contact,
            self.company.mode() == Mode::FreeText,
        ));
        tracing::info!("form submitted");
        self.should_quit = true;
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reset_form();
                return;
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
                return;
            }
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.prev());
                return;
            }
            KeyCode::Esc => {
                if !self.company.dismiss() {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        match self.focus {
            FormFocus::Company => self.handle_company_key(key),
            FormFocus::Contact => self.handle_contact_key(key),
            FormFocus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit();
                }
            }
        }
    }

    fn handle_company_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => {
                if self.company.is_panel_open() {
                    self.company.highlight_next();
                } else {
                    self.company.handle_focus();
                }
                return;
            }
            KeyCode::Up => {
                self.company.highlight_prev();
                return;
            }
            KeyCode::Enter => {
                if let Some(row) = self.company.highlighted() {
                    self.confirm_panel_row(row);
                } else {
                    self.set_focus(FormFocus::Contact);
                }
                return;
            }
            KeyCode::F(2) => {
                self.back_to_search();
                return;
            }
            _ => {}
        }

        let text = self.company.committed_value().to_string();
        if let Edit::Changed(next) = edit_line(&mut self.company_editor, &text, key) {
            self.company.handle_input(next);
            self.status_message = match self.company.mode() {
                Mode::Searching => format!("{} matches", self.company.match_count()),
                Mode::FreeText => "Manual entry".to_string(),
            };
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.set_focus(FormFocus::Submit);
            return;
        }
        if let Edit::Changed(next) = edit_line(&mut self.contact_editor, &self.contact, key) {
            self.contact = next;
        }
    }
}

/// Apply a line-editing key to `text`
fn edit_line(editor: &mut LineEditor, text: &str, key: KeyEvent) -> Edit {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => editor.insert(text, c),
        KeyCode::Backspace => editor.backspace(text),
        KeyCode::Delete => editor.delete(text),
        KeyCode::Left => editor.left(text),
        KeyCode::Right => editor.right(text),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(text),
        _ => Edit::Ignored,
    }
}
