//! company-typeahead - company-name typeahead input
//!
//! Incremental, case-insensitive substring search over a fixed company
//! directory, with an optional escape hatch into free-text entry when the
//! company is not listed.
//!
//! # Features
//!
//! - **Headless controller**: state machine and filtering, no rendering
//! - **Controlled value**: the host owns the text, edits flow back through
//!   [`ValueField`]
//! - **Two variants, one component**: plain or escape hatch via
//!   [`TypeaheadConfig::allow_free_text`]
//! - **Scoped outside-click detection**: [`PointerHub`] registrations are
//!   released when the component is dropped
//! - **Terminal and desktop hosts**: ratatui form and egui form
//!
//! # Example
//!
//! ```
//! use company_typeahead::{CompanyDirectory, CompanyRecord, PointerHub, Typeahead, TypeaheadConfig};
//!
//! fn main() -> company_typeahead::Result<()> {
//!     let directory = CompanyDirectory::new(vec![
//!         CompanyRecord::new("1", "Acme Corp", "Kanto", "Tokyo"),
//!         CompanyRecord::new("2", "Globex", "Kansai", "Osaka"),
//!     ])?;
//!     let hub = PointerHub::new();
//!     let mut input = Typeahead::mount(directory, String::new(), TypeaheadConfig::plain(), &hub);
//!
//!     input.handle_input("acm");
//!     assert!(input.is_panel_open());
//!     input.select_match(0);
//!     assert_eq!(input.field(), "Acme Corp");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod form;
#[cfg(feature = "gui")]
pub mod gui;
pub mod logging;
pub mod pointer;
pub mod tui;
pub mod typeahead;

// Re-export main types
pub use config::Config;
pub use directory::{CompanyDirectory, CompanyId, CompanyRecord, Region};
pub use error::{Result, TypeaheadError};
pub use form::Submission;
pub use pointer::{ListenerGuard, Point, PointerHub, Rect};
pub use typeahead::{CallbackField, Mode, PanelEntry, Typeahead, TypeaheadConfig, ValueField};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
