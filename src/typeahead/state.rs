//! Typeahead state: mode, panel, matches

use crate::directory::CompanyRecord;
use crate::pointer::{Point, PointerListener, Rect};
use std::cell::Cell;

/// Whether directory filtering is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Searching,
    /// Filtering suspended; any text is accepted
    FreeText,
}

/// One row of the suggestion panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEntry<'a> {
    Company(&'a CompanyRecord),
    /// Trailing "enter it manually" row of the escape-hatch variant
    ManualEntry,
}

/// Private per-instance state; reset whenever the component is remounted
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub committed_value: String,
    pub mode: Mode,
    /// Directory indices, directory order
    pub matches: Vec<usize>,
    /// Index into the panel entries
    pub highlighted: Option<usize>,
}

impl InputState {
    pub fn new(committed_value: String) -> Self {
        Self {
            committed_value,
            ..Self::default()
        }
    }
}

/// The rendered region of one typeahead, shared with the pointer hub.
///
/// The panel flag lives here so an outside click can close the panel the
/// moment it is dispatched.
#[derive(Debug, Default)]
pub(crate) struct Boundary {
    pub panel_open: Cell<bool>,
    pub input: Cell<Option<Rect>>,
    pub panel: Cell<Option<Rect>>,
}

impl Boundary {
    fn contains(&self, point: Point) -> bool {
        [self.input.get(), self.panel.get()]
            .into_iter()
            .flatten()
            .any(|rect| rect.contains(point))
    }
}

impl PointerListener for Boundary {
    fn pointer_down(&self, point: Point) -> bool {
        if !self.panel_open.get() || self.contains(point) {
            return false;
        }
        self.panel_open.set(false);
        tracing::debug!(x = point.x, y = point.y, "suggestion panel dismissed by outside click");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_ignores_clicks_while_closed() {
        let b = Boundary::default();
        assert!(!b.pointer_down(Point::new(5.0, 5.0)));
        assert!(!b.panel_open.get());
    }

    #[test]
    fn boundary_covers_input_and_panel() {
        let b = Boundary::default();
        b.input.set(Some(Rect::new(0.0, 0.0, 10.0, 1.0)));
        b.panel.set(Some(Rect::new(0.0, 1.0, 10.0, 5.0)));
        b.panel_open.set(true);

        assert!(!b.pointer_down(Point::new(3.0, 0.0)));
        assert!(!b.pointer_down(Point::new(3.0, 4.0)));
        assert!(b.panel_open.get());

        assert!(b.pointer_down(Point::new(3.0, 6.0)));
        assert!(!b.panel_open.get());
    }

    #[test]
    fn unknown_bounds_count_as_outside() {
        let b = Boundary::default();
        b.panel_open.set(true);
        assert!(b.pointer_down(Point::new(0.0, 0.0)));
    }
}
