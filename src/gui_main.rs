//! company-typeahead desktop form
//!
//! Launches the egui form with both input variants side by side.

#![cfg_attr(windows, windows_subsystem = "windows")]

use company_typeahead::{gui, logging, CompanyDirectory, Config};
use console::style;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> company_typeahead::Result<()> {
    let config = Config::load(None)?;
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("{} logging disabled: {}", style("Warning:").yellow().bold(), e);
    }

    let directory = CompanyDirectory::load(config.directory.path.as_deref())?;
    gui::run(directory, config)
}
