//! Company-name typeahead controller
//!
//! A headless input component: it owns the suggestion-panel state machine,
//! filters the [`CompanyDirectory`] on every edit, and reports the committed
//! text to its host through a [`ValueField`]. Rendering is left to the host
//! (see the `tui` and `gui` modules), which feeds events in and reads state
//! back out every frame.
//!
//! Two variants share this one implementation, chosen by
//! [`TypeaheadConfig::allow_free_text`]:
//!
//! - **plain**: the panel only shows while something matches; the user may
//!   still type anything.
//! - **escape hatch**: the panel shows for any non-empty input and ends with a
//!   manual-entry row. Choosing it switches to [`Mode::FreeText`], where
//!   filtering stops until [`Typeahead::return_to_search`].
//!
//! ```text
//! Searching.Closed --non-empty edit, something to show--> Searching.Open
//! Searching.Open   --empty edit / select / outside click--> Searching.Closed
//! Searching.Open   --manual entry--> FreeText
//! FreeText         --edit--> FreeText (panel stays closed)
//! FreeText         --back to search--> Searching.(Closed|Open)
//! ```

mod field;
mod state;

pub use field::{CallbackField, ValueField};
pub use state::{Mode, PanelEntry};

use crate::directory::{CompanyDirectory, CompanyId, CompanyRecord};
use crate::pointer::{ListenerGuard, PointerHub, Rect};
use state::{Boundary, InputState};
use std::fmt;
use std::rc::Rc;

/// Behaviour switch plus pass-through display hints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeaheadConfig {
    /// Escape-hatch variant: offer a manual-entry row and free-text mode
    pub allow_free_text: bool,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub help: Option<String>,
    pub error: Option<String>,
    /// Placeholder shown while in free-text mode
    pub free_text_placeholder: Option<String>,
    /// Help text shown while in free-text mode
    pub free_text_help: Option<String>,
    pub manual_entry_label: String,
    pub back_to_search_label: String,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            allow_free_text: false,
            placeholder: Some("Search company name".to_string()),
            label: None,
            help: None,
            error: None,
            free_text_placeholder: Some("Type the company name".to_string()),
            free_text_help: Some("Manual entry: any company name is accepted".to_string()),
            manual_entry_label: "Not listed? Enter it manually".to_string(),
            back_to_search_label: "Back to search".to_string(),
        }
    }
}

impl TypeaheadConfig {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_free_text() -> Self {
        Self {
            allow_free_text: true,
            ..Self::default()
        }
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    pub fn error(mut self, text: impl Into<String>) -> Self {
        self.error = Some(text.into());
        self
    }
}

/// A mounted typeahead input. Dropping it unmounts it.
pub struct Typeahead<F: ValueField> {
    directory: CompanyDirectory,
    field: F,
    config: TypeaheadConfig,
    state: InputState,
    boundary: Rc<Boundary>,
    _listener: ListenerGuard,
}

impl<F: ValueField> fmt::Debug for Typeahead<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeahead")
            .field("committed_value", &self.state.committed_value)
            .field("mode", &self.state.mode)
            .field("panel_open", &self.is_panel_open())
            .field("matches", &self.state.matches.len())
            .finish()
    }
}

impl<F: ValueField> Typeahead<F> {
    /// Mount against `hub`. Starts in `Searching` with the panel closed and no
    /// matches; the host value is mirrored but `on_change` is not called.
    pub fn mount(
        directory: CompanyDirectory,
        field: F,
        config: TypeaheadConfig,
        hub: &PointerHub,
    ) -> Self {
        let boundary = Rc::new(Boundary::default());
        let listener = hub.register(boundary.clone());
        let state = InputState::new(field.value().to_string());

        tracing::debug!(
            allow_free_text = config.allow_free_text,
            companies = directory.len(),
            "typeahead mounted"
        );

        Self {
            directory,
            field,
            config,
            state,
            boundary,
            _listener: listener,
        }
    }

    /// A user edit: report it, then filter (searching) or keep the panel
    /// closed (free text).
    pub fn handle_input(&mut self, text: impl Into<String>) {
        self.state.committed_value = text.into();
        self.field.on_change(&self.state.committed_value);

        match self.state.mode {
            Mode::Searching => self.run_filter(),
            Mode::FreeText => {
                self.state.matches.clear();
                self.set_panel_open(false);
            }
        }
    }

    /// Input gained focus: re-open from scratch when there is text to search
    pub fn handle_focus(&mut self) {
        if self.state.mode == Mode::Searching && !self.state.committed_value.is_empty() {
            self.run_filter();
        }
    }

    /// Pick the `position`-th current match
    pub fn select_match(&mut self, position: usize) -> bool {
        match self.state.matches.get(position) {
            Some(&index) => {
                self.commit_selection(index);
                true
            }
            None => false,
        }
    }

    /// Pick a company by id (it need not be among the current matches)
    pub fn select_company(&mut self, id: &CompanyId) -> bool {
        match self.directory.position(id) {
            Some(index) => {
                self.commit_selection(index);
                true
            }
            None => false,
        }
    }

    /// Take the manual-entry row. Only meaningful in the escape-hatch variant
    /// while the panel is showing.
    pub fn choose_manual_entry(&mut self) -> bool {
        if !self.config.allow_free_text || !self.is_panel_open() {
            return false;
        }
        self.state.mode = Mode::FreeText;
        self.state.matches.clear();
        self.state.highlighted = None;
        self.set_panel_open(false);
        tracing::debug!("switched to free-text entry");
        true
    }

    /// Leave free-text mode and search again with the current value
    pub fn return_to_search(&mut self) -> bool {
        if self.state.mode != Mode::FreeText {
            return false;
        }
        self.state.mode = Mode::Searching;
        tracing::debug!("returned to search");
        self.run_filter();
        true
    }

    /// Close the panel without touching the value or mode (Escape key)
    pub fn dismiss(&mut self) -> bool {
        if !self.is_panel_open() {
            return false;
        }
        self.set_panel_open(false);
        self.state.highlighted = None;
        true
    }

    /// Pick up a value the host changed on its own (e.g. a form reset).
    /// Matches follow the new value; the panel stays closed.
    pub fn sync_from_field(&mut self) -> bool {
        if self.field.value() == self.state.committed_value {
            return false;
        }
        self.state.committed_value = self.field.value().to_string();
        self.state.matches = match self.state.mode {
            Mode::Searching => self.directory.filter(&self.state.committed_value),
            Mode::FreeText => Vec::new(),
        };
        self.state.highlighted = None;
        self.set_panel_open(false);
        tracing::debug!(value = %self.state.committed_value, "value replaced by host");
        true
    }

    /// Report where the input and (when shown) the panel were drawn
    pub fn set_bounds(&mut self, input: Rect, panel: Option<Rect>) {
        self.boundary.input.set(Some(input));
        self.boundary.panel.set(panel);
    }

    pub fn highlight_next(&mut self) {
        let count = self.panel_len();
        if count == 0 {
            return;
        }
        self.state.highlighted = Some(match self.state.highlighted {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        let count = self.panel_len();
        if count == 0 {
            return;
        }
        self.state.highlighted = Some(match self.state.highlighted {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }

    /// Act on the highlighted panel row (Enter key)
    pub fn confirm_highlighted(&mut self) -> bool {
        let Some(row) = self.state.highlighted.filter(|_| self.is_panel_open()) else {
            return false;
        };
        if row < self.state.matches.len() {
            self.select_match(row)
        } else {
            self.choose_manual_entry()
        }
    }

    pub fn committed_value(&self) -> &str {
        &self.state.committed_value
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn is_panel_open(&self) -> bool {
        self.boundary.panel_open.get()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.state.highlighted.filter(|_| self.is_panel_open())
    }

    /// Current filter result, directory order. Always empty in free-text mode.
    pub fn matches(&self) -> impl Iterator<Item = &CompanyRecord> + '_ {
        self.state
            .matches
            .iter()
            .filter_map(|&index| self.directory.get(index))
    }

    pub fn match_count(&self) -> usize {
        self.state.matches.len()
    }

    /// Rows to render: matches, then the manual-entry row in the escape-hatch
    /// variant. Empty while the panel is closed.
    pub fn panel_entries(&self) -> Vec<PanelEntry<'_>> {
        if !self.is_panel_open() {
            return Vec::new();
        }
        let mut entries: Vec<PanelEntry<'_>> = self.matches().map(PanelEntry::Company).collect();
        if self.config.allow_free_text {
            entries.push(PanelEntry::ManualEntry);
        }
        entries
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self.state.mode {
            Mode::FreeText => self
                .config
                .free_text_placeholder
                .as_deref()
                .or(self.config.placeholder.as_deref()),
            Mode::Searching => self.config.placeholder.as_deref(),
        }
    }

    pub fn help(&self) -> Option<&str> {
        match self.state.mode {
            Mode::FreeText => self
                .config
                .free_text_help
                .as_deref()
                .or(self.config.help.as_deref()),
            Mode::Searching => self.config.help.as_deref(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.config.error.as_deref()
    }

    /// Host-side error hint, e.g. from form validation
    pub fn set_error(&mut self, error: Option<String>) {
        self.config.error = error;
    }

    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    pub fn directory(&self) -> &CompanyDirectory {
        &self.directory
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable host access. Call [`Typeahead::sync_from_field`] after
    /// changing the value through it.
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    /// Unmount and hand the field back to the host
    pub fn into_field(self) -> F {
        self.field
    }

    fn panel_len(&self) -> usize {
        if !self.is_panel_open() {
            return 0;
        }
        self.state.matches.len() + usize::from(self.config.allow_free_text)
    }

    fn commit_selection(&mut self, index: usize) {
        let Some(record) = self.directory.get(index) else {
            return;
        };
        let name = record.name.clone();
        tracing::debug!(id = %record.id, name = %name, "company selected");

        self.state.mode = Mode::Searching;
        self.state.committed_value = name;
        self.field.on_change(&self.state.committed_value);
        self.state.matches = self.directory.filter(&self.state.committed_value);
        self.state.highlighted = None;
        self.set_panel_open(false);
    }

    fn run_filter(&mut self) {
        self.state.matches = self.directory.filter(&self.state.committed_value);
        self.state.highlighted = None;

        let has_text = !self.state.committed_value.trim().is_empty();
        let open = has_text && (self.config.allow_free_text || !self.state.matches.is_empty());
        tracing::trace!(
            query = %self.state.committed_value,
            matches = self.state.matches.len(),
            open,
            "filter recomputed"
        );
        self.set_panel_open(open);
    }

    fn set_panel_open(&self, open: bool) {
        debug_assert!(!open || self.state.mode == Mode::Searching);
        self.boundary.panel_open.set(open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::Point;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn directory() -> CompanyDirectory {
        CompanyDirectory::new(vec![
            CompanyRecord::new("1", "Acme Corp", "Kanto", "Tokyo"),
            CompanyRecord::new("2", "Acme Foods", "Kansai", "Osaka"),
            CompanyRecord::new("3", "Globex", "Kanto", "Yokohama"),
        ])
        .unwrap()
    }

    fn names<F: ValueField>(ta: &Typeahead<F>) -> Vec<&str> {
        ta.matches().map(|r| r.name.as_str()).collect()
    }

    fn mount(config: TypeaheadConfig) -> (Typeahead<String>, PointerHub) {
        let hub = PointerHub::new();
        let ta = Typeahead::mount(directory(), String::new(), config, &hub);
        (ta, hub)
    }

    #[test]
    fn mount_starts_closed_and_silent() {
        let calls = RefCell::new(0);
        let hub = PointerHub::new();
        let field = CallbackField::new("Globex", |_: &str| *calls.borrow_mut() += 1);
        let ta = Typeahead::mount(directory(), field, TypeaheadConfig::plain(), &hub);

        assert_eq!(ta.committed_value(), "Globex");
        assert_eq!(ta.mode(), Mode::Searching);
        assert!(!ta.is_panel_open());
        assert_eq!(ta.match_count(), 0);
        drop(ta);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn typing_filters_and_reports_every_keystroke() {
        let (mut ta, _hub) = mount(TypeaheadConfig::plain());
        ta.handle_input("a");
        ta.handle_input("ac");
        ta.handle_input("acm");

        assert_eq!(ta.field(), "acm");
        assert_eq!(names(&ta), vec!["Acme Corp", "Acme Foods"]);
        assert!(ta.is_panel_open());
    }

    #[test]
    fn plain_variant_hides_panel_without_matches() {
        let (mut ta, _hub) = mount(TypeaheadConfig::plain());
        ta.handle_input("zzz");
        assert!(!ta.is_panel_open());
        assert!(ta.panel_entries().is_empty());
        assert_eq!(ta.committed_value(), "zzz");
    }

    #[test]
    fn escape_hatch_shows_manual_row_without_matches() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("zzz");
        assert!(ta.is_panel_open());
        assert_eq!(ta.panel_entries(), vec![PanelEntry::ManualEntry]);
    }

    #[test]
    fn whitespace_only_input_closes_panel() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("acme");
        assert!(ta.is_panel_open());
        ta.handle_input("   ");
        assert!(!ta.is_panel_open());
        assert_eq!(ta.match_count(), 0);
        assert_eq!(ta.field(), "   ");
    }

    #[test]
    fn selection_commits_name_and_closes() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("acm");
        assert!(ta.select_match(1));

        assert_eq!(ta.committed_value(), "Acme Foods");
        assert_eq!(ta.field(), "Acme Foods");
        assert!(!ta.is_panel_open());
        assert_eq!(ta.mode(), Mode::Searching);
        assert_eq!(names(&ta), vec!["Acme Foods"]);
    }

    #[test]
    fn selection_by_id_works_while_closed() {
        let (mut ta, _hub) = mount(TypeaheadConfig::plain());
        assert!(ta.select_company(&CompanyId::new("3")));
        assert_eq!(ta.committed_value(), "Globex");
        assert!(!ta.is_panel_open());
        assert!(!ta.select_company(&CompanyId::new("missing")));
        assert!(!ta.select_match(5));
    }

    #[test]
    fn focus_recomputes_from_current_value() {
        let (mut ta, _hub) = mount(TypeaheadConfig::plain());
        ta.handle_input("glo");
        ta.dismiss();
        assert!(!ta.is_panel_open());

        ta.handle_focus();
        assert!(ta.is_panel_open());
        assert_eq!(names(&ta), vec!["Globex"]);
    }

    #[test]
    fn focus_with_empty_value_stays_closed() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_focus();
        assert!(!ta.is_panel_open());
    }

    #[test]
    fn manual_entry_only_from_open_escape_hatch() {
        let (mut plain, _h1) = mount(TypeaheadConfig::plain());
        plain.handle_input("acme");
        assert!(!plain.choose_manual_entry());
        assert_eq!(plain.mode(), Mode::Searching);

        let (mut hatch, _h2) = mount(TypeaheadConfig::with_free_text());
        assert!(!hatch.choose_manual_entry());
        hatch.handle_input("zz");
        assert!(hatch.choose_manual_entry());
        assert_eq!(hatch.mode(), Mode::FreeText);
        assert!(!hatch.is_panel_open());
    }

    #[test]
    fn free_text_mode_never_opens_panel() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("z");
        ta.choose_manual_entry();

        for text in ["A", "Ac", "Acme", "Acme Corp"] {
            ta.handle_input(text);
            assert!(!ta.is_panel_open());
            assert_eq!(ta.field(), text);
        }
        ta.handle_focus();
        assert!(!ta.is_panel_open());
        assert_eq!(ta.match_count(), 0);
    }

    #[test]
    fn back_to_search_reruns_filter() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("q");
        ta.choose_manual_entry();
        ta.handle_input("globe");

        assert!(ta.return_to_search());
        assert_eq!(ta.mode(), Mode::Searching);
        assert!(ta.is_panel_open());
        assert_eq!(names(&ta), vec!["Globex"]);
        assert!(!ta.return_to_search());
    }

    #[test]
    fn back_to_search_with_empty_value_stays_closed() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("q");
        ta.choose_manual_entry();
        ta.handle_input("");
        ta.return_to_search();
        assert!(!ta.is_panel_open());
    }

    #[test]
    fn free_text_changes_hints() {
        let config = TypeaheadConfig::with_free_text()
            .placeholder("Company")
            .help("Pick from the list");
        let (mut ta, _hub) = mount(config);
        assert_eq!(ta.placeholder(), Some("Company"));
        assert_eq!(ta.help(), Some("Pick from the list"));

        ta.handle_input("x");
        ta.choose_manual_entry();
        assert_eq!(ta.placeholder(), Some("Type the company name"));
        assert_eq!(ta.help(), Some("Manual entry: any company name is accepted"));
    }

    #[test]
    fn outside_click_closes_without_touching_value() {
        let (mut ta, hub) = mount(TypeaheadConfig::plain());
        ta.set_bounds(Rect::new(0.0, 0.0, 20.0, 1.0), Some(Rect::new(0.0, 1.0, 20.0, 3.0)));
        ta.handle_input("acme");

        assert_eq!(hub.pointer_down(Point::new(5.0, 2.0)), 0);
        assert!(ta.is_panel_open());

        assert_eq!(hub.pointer_down(Point::new(40.0, 10.0)), 1);
        assert!(!ta.is_panel_open());
        assert_eq!(ta.committed_value(), "acme");
        assert_eq!(ta.mode(), Mode::Searching);
    }

    #[test]
    fn unmount_releases_listener() {
        let hub = PointerHub::new();
        let ta = Typeahead::mount(directory(), String::new(), TypeaheadConfig::plain(), &hub);
        assert_eq!(hub.listener_count(), 1);
        let field = ta.into_field();
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(field, "");
    }

    #[test]
    fn keyboard_walks_entries_and_wraps() {
        let (mut ta, _hub) = mount(TypeaheadConfig::with_free_text());
        ta.handle_input("acme");
        assert_eq!(ta.highlighted(), None);

        ta.highlight_next();
        ta.highlight_next();
        ta.highlight_next();
        assert_eq!(ta.highlighted(), Some(2));
        ta.highlight_next();
        assert_eq!(ta.highlighted(), Some(0));
        ta.highlight_prev();
        assert_eq!(ta.highlighted(), Some(2));

        assert!(ta.confirm_highlighted());
        assert_eq!(ta.mode(), Mode::FreeText);
    }

    #[test]
    fn confirm_selects_highlighted_company() {
        let (mut ta, _hub) = mount(TypeaheadConfig::plain());
        ta.handle_input("acme");
        ta.highlight_prev();
        assert!(ta.confirm_highlighted());
        assert_eq!(ta.committed_value(), "Acme Foods");
        assert!(!ta.confirm_highlighted());
    }

    #[test]
    fn host_reset_is_reflected_without_reopening() {
        let (mut ta, _hub) = mount(TypeaheadConfig::plain());
        ta.handle_input("acme");
        assert!(ta.is_panel_open());

        ta.field_mut().on_change("Globex");
        assert!(ta.sync_from_field());
        assert_eq!(ta.committed_value(), "Globex");
        assert!(!ta.is_panel_open());
        assert_eq!(names(&ta), vec!["Globex"]);
        assert!(!ta.sync_from_field());
    }
}
