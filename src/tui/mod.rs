pub mod app;
pub mod search;
pub mod ui;

pub use crate::form::Submission;
pub use app::App;

use crate::typeahead::TypeaheadConfig;
use crate::CompanyDirectory;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

/// Entry point: run the terminal form until it is submitted or abandoned
pub fn run(directory: CompanyDirectory, config: TypeaheadConfig) -> crate::Result<Option<Submission>> {
    let mut terminal = ratatui::init();
    if let Err(e) = execute!(std::io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(e.into());
    }

    let mut app = App::new(directory, config);
    let result = app.run(&mut terminal);

    // Restore the terminal on every path before reporting errors
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result.map(|()| app.submitted.take())
}
