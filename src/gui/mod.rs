pub mod app;

pub use crate::form::Submission;
pub use app::GuiApp;

use crate::{CompanyDirectory, Config};

/// Entry point: launch the native GUI window
pub fn run(directory: CompanyDirectory, config: Config) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Company typeahead")
            .with_inner_size([900.0, 560.0])
            .with_min_inner_size([560.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "company-typeahead",
        native_options,
        Box::new(move |cc| Ok(Box::new(GuiApp::new(cc, directory, &config)))),
    )
    .map_err(|e| crate::TypeaheadError::GuiError(e.to_string()))
}
