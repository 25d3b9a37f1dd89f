//! Desktop host form
//!
//! Shows the plain and escape-hatch company inputs side by side. Both share
//! one [`PointerHub`] fed from egui's pointer presses, so clicking anywhere
//! outside a field's input and panel dismisses that field's suggestions.

use crate::pointer::{Point, PointerHub};
use crate::form::Submission;
use crate::typeahead::{Mode, PanelEntry, Typeahead};
use crate::{CompanyDirectory, Config};
use eframe::egui;

/// Panel height before it scrolls
const PANEL_MAX_HEIGHT: f32 = 240.0;

/// One panel row, detached from the controller so the panel can be drawn
/// while the controller is free to change
enum RowData {
    Company { name: String, region: String },
    Manual(String),
}

/// What the user did to a company field this frame
#[derive(Debug, Default)]
struct FieldOutcome {
    picked: Option<String>,
    manual_entry: bool,
}

pub struct GuiApp {
    hub: PointerHub,
    plain: Typeahead<String>,
    escape_hatch: Typeahead<String>,
    contact: String,
    /// Last submission, pretty JSON
    last_submission: Option<String>,
    status_message: String,
}

impl GuiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, directory: CompanyDirectory, config: &Config) -> Self {
        Self::with_hub(PointerHub::new(), directory, config)
    }

    fn with_hub(hub: PointerHub, directory: CompanyDirectory, config: &Config) -> Self {
        let plain = Typeahead::mount(
            directory.clone(),
            String::new(),
            config.typeahead_config(Some(false)),
            &hub,
        );
        let escape_hatch = Typeahead::mount(
            directory,
            String::new(),
            config.typeahead_config(Some(true)),
            &hub,
        );

        Self {
            hub,
            plain,
            escape_hatch,
            contact: String::new(),
            last_submission: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Feed this frame's pointer press to the hub
    fn dispatch_pointer(&mut self, ctx: &egui::Context) {
        let press = ctx.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = press {
            let dismissed = self.hub.pointer_down(Point::new(pos.x, pos.y));
            if dismissed > 0 {
                tracing::debug!(dismissed, "panel closed by outside click");
            }
        }
    }

    /// Host-side reset of both forms
    fn reset(&mut self) {
        for input in [&mut self.plain, &mut self.escape_hatch] {
            input.field_mut().clear();
            input.sync_from_field();
            input.set_error(None);
        }
        self.contact.clear();
        self.last_submission = None;
        self.status_message = "Form reset".to_string();
    }

    fn submit(&mut self, escape_hatch: bool) {
        let input = if escape_hatch {
            &mut self.escape_hatch
        } else {
            &mut self.plain
        };

        if input.committed_value().trim().is_empty() {
            input.set_error(Some("Company is required".to_string()));
            self.status_message = "Company is required".to_string();
            return;
        }
        input.set_error(None);

        let submission = Submission::new(
            input.committed_value(),
            &self.contact,
            input.mode() == Mode::FreeText,
        );
        match serde_json::to_string_pretty(&submission) {
            Ok(json) => {
                tracing::info!(company = %submission.company, "form submitted");
                self.status_message = format!("Submitted {}", submission.company);
                self.last_submission = Some(json);
            }
            Err(e) => self.status_message = format!("Could not encode submission: {}", e),
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.separator();
                ui.label(format!("{} companies", self.plain.directory().len()));
            });
        });
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dispatch_pointer(ctx);
        self.render_status_bar(ctx);

        let mut submit: Option<bool> = None;
        let mut reset = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Talent casting diagnosis");
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                cols[0].strong("Directory only");
                let outcome = company_field(&mut cols[0], "plain", &mut self.plain);
                note_outcome(&mut self.status_message, outcome);
                if cols[0].button("Submit").clicked() {
                    submit = Some(false);
                }

                cols[1].strong("With manual entry");
                let outcome = company_field(&mut cols[1], "escape_hatch", &mut self.escape_hatch);
                note_outcome(&mut self.status_message, outcome);
                if cols[1].button("Submit").clicked() {
                    submit = Some(true);
                }
            });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.label("Contact name");
                ui.add(egui::TextEdit::singleline(&mut self.contact).desired_width(240.0));
                if ui.button("Reset").clicked() {
                    reset = true;
                }
            });

            if let Some(json) = &self.last_submission {
                ui.add_space(12.0);
                ui.separator();
                ui.monospace(json);
            }
        });

        if let Some(escape_hatch) = submit {
            self.submit(escape_hatch);
        }
        if reset {
            self.reset();
        }
    }
}

fn note_outcome(status: &mut String, outcome: FieldOutcome) {
    if let Some(name) = outcome.picked {
        *status = format!("Selected {}", name);
    } else if outcome.manual_entry {
        *status = "Manual entry: type the full company name".to_string();
    }
}

fn to_pointer_rect(r: egui::Rect) -> crate::pointer::Rect {
    crate::pointer::Rect::new(r.min.x, r.min.y, r.width(), r.height())
}

/// Draw one company input with its help line and suggestion panel
fn company_field(ui: &mut egui::Ui, id: &str, input: &mut Typeahead<String>) -> FieldOutcome {
    let mut outcome = FieldOutcome::default();

    if let Some(label) = input.label() {
        ui.label(label);
    }

    let mut text = input.committed_value().to_string();
    let mut edit = egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY);
    if let Some(hint) = input.placeholder() {
        edit = edit.hint_text(hint);
    }
    let response = ui.add(edit);

    if response.gained_focus() {
        input.handle_focus();
    }
    if response.changed() {
        input.handle_input(text);
    }

    if response.has_focus() {
        let (down, up) = ui.input(|i| (i.key_pressed(egui::Key::ArrowDown), i.key_pressed(egui::Key::ArrowUp)));
        if down {
            input.highlight_next();
        }
        if up {
            input.highlight_prev();
        }
    } else if response.lost_focus() {
        let (enter, by_pointer) = ui.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.pointer.any_pressed() || i.pointer.any_down() || i.pointer.any_released(),
            )
        });
        outcome = focus_lost(input, enter, by_pointer);
    }

    if let Some(err) = input.error() {
        ui.colored_label(ui.visuals().error_fg_color, err);
    } else if let Some(help) = input.help() {
        ui.weak(help);
    }

    if input.mode() == Mode::FreeText {
        let label = input.config().back_to_search_label.clone();
        if ui.small_button(label).clicked() {
            input.return_to_search();
        }
    }

    let panel = draw_panel(ui, id, input, response.rect, &mut outcome);
    input.set_bounds(to_pointer_rect(response.rect), panel.map(to_pointer_rect));

    outcome
}

/// Keyboard focus left the input. Enter confirms the highlighted row; any
/// other keyboard exit (Tab, Escape) closes the panel. Pointer exits are
/// judged by the hub against the input and panel bounds instead.
fn focus_lost(input: &mut Typeahead<String>, enter: bool, by_pointer: bool) -> FieldOutcome {
    let mut outcome = FieldOutcome::default();

    if enter && input.highlighted().is_some() {
        let manual = matches!(
            input.highlighted().and_then(|h| input.panel_entries().get(h).copied()),
            Some(PanelEntry::ManualEntry)
        );
        if input.confirm_highlighted() {
            if manual {
                outcome.manual_entry = true;
            } else {
                outcome.picked = Some(input.committed_value().to_string());
            }
            return outcome;
        }
    }

    if !by_pointer {
        input.dismiss();
    }
    outcome
}

/// Suggestion panel floating under the input. Returns its area when shown.
fn draw_panel(
    ui: &mut egui::Ui,
    id: &str,
    input: &mut Typeahead<String>,
    anchor: egui::Rect,
    outcome: &mut FieldOutcome,
) -> Option<egui::Rect> {
    let rows: Vec<RowData> = input
        .panel_entries()
        .into_iter()
        .map(|entry| match entry {
            PanelEntry::Company(record) => RowData::Company {
                name: record.name.clone(),
                region: record.region_label(),
            },
            PanelEntry::ManualEntry => RowData::Manual(input.config().manual_entry_label.clone()),
        })
        .collect();
    if rows.is_empty() {
        return None;
    }

    let highlighted = input.highlighted();
    let mut clicked: Option<usize> = None;

    let area = egui::Area::new(egui::Id::new(id).with("panel"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor.left_bottom())
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(anchor.width());
                egui::ScrollArea::vertical()
                    .max_height(PANEL_MAX_HEIGHT)
                    .show(ui, |ui| {
                        for (i, row) in rows.iter().enumerate() {
                            let text = match row {
                                RowData::Company { name, region } if region.is_empty() => {
                                    egui::RichText::new(name)
                                }
                                RowData::Company { name, region } => {
                                    egui::RichText::new(format!("{}   {}", name, region))
                                }
                                RowData::Manual(label) => egui::RichText::new(label).italics(),
                            };
                            let response = ui.selectable_label(highlighted == Some(i), text);
                            if highlighted == Some(i) {
                                response.scroll_to_me(None);
                            }
                            if response.clicked() {
                                clicked = Some(i);
                            }
                        }
                    });
            });
        });

    if let Some(i) = clicked {
        match rows.get(i) {
            Some(RowData::Manual(_)) => outcome.manual_entry = input.choose_manual_entry(),
            Some(RowData::Company { .. }) => {
                if input.select_match(i) {
                    outcome.picked = Some(input.committed_value().to_string());
                }
            }
            None => {}
        }
        // The panel is gone; report no area so the next press is judged
        // against the input alone
        return None;
    }

    Some(area.response.rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompanyRecord;
    use pretty_assertions::assert_eq;

    fn app() -> GuiApp {
        let directory = CompanyDirectory::new(vec![
            CompanyRecord::new("1", "Acme Corp", "Kanto", "Tokyo"),
            CompanyRecord::new("2", "Globex", "Kanto", "Yokohama"),
        ])
        .unwrap();
        GuiApp::with_hub(PointerHub::new(), directory, &Config::default())
    }

    #[test]
    fn both_variants_share_one_hub() {
        let app = app();
        assert_eq!(app.hub.listener_count(), 2);
        assert!(!app.plain.config().allow_free_text);
        assert!(app.escape_hatch.config().allow_free_text);
    }

    #[test]
    fn submit_without_company_sets_error() {
        let mut app = app();
        app.submit(false);
        assert_eq!(app.plain.error(), Some("Company is required"));
        assert!(app.last_submission.is_none());
    }

    #[test]
    fn submit_reports_manual_entry() {
        let mut app = app();
        app.escape_hatch.handle_input("zzz");
        assert!(app.escape_hatch.choose_manual_entry());
        app.escape_hatch.handle_input("Zanzibar Inc");
        app.contact = "Ann".to_string();
        app.submit(true);

        let json = app.last_submission.clone().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["company"], "Zanzibar Inc");
        assert_eq!(value["manual_entry"], true);
        assert_eq!(value["contact"], "Ann");
    }

    #[test]
    fn tabbing_out_closes_the_panel() {
        let mut app = app();
        app.plain.handle_input("acme");
        assert!(app.plain.is_panel_open());

        let outcome = focus_lost(&mut app.plain, false, false);
        assert!(outcome.picked.is_none());
        assert!(!app.plain.is_panel_open());
        assert_eq!(app.plain.committed_value(), "acme");
    }

    #[test]
    fn pointer_exit_leaves_panel_to_the_hub() {
        let mut app = app();
        app.plain.handle_input("acme");

        focus_lost(&mut app.plain, false, true);
        assert!(app.plain.is_panel_open());
    }

    #[test]
    fn enter_confirms_highlighted_row() {
        let mut app = app();
        app.escape_hatch.handle_input("glo");
        app.escape_hatch.highlight_next();

        let outcome = focus_lost(&mut app.escape_hatch, true, false);
        assert_eq!(outcome.picked.as_deref(), Some("Globex"));
        assert_eq!(app.escape_hatch.field(), "Globex");
        assert!(!app.escape_hatch.is_panel_open());

        app.escape_hatch.handle_input("zz");
        app.escape_hatch.highlight_next();
        let outcome = focus_lost(&mut app.escape_hatch, true, false);
        assert!(outcome.manual_entry);
        assert_eq!(app.escape_hatch.mode(), Mode::FreeText);
    }

    #[test]
    fn reset_clears_both_fields_and_keeps_panels_closed() {
        let mut app = app();
        app.plain.handle_input("acme");
        app.escape_hatch.handle_input("glo");
        app.reset();
        assert_eq!(app.plain.field(), "");
        assert_eq!(app.escape_hatch.field(), "");
        assert!(!app.plain.is_panel_open());
        assert!(!app.escape_hatch.is_panel_open());
    }
}
