//! Host form output shared by the terminal and desktop forms

use serde::Serialize;

/// What the form hands back when submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub company: String,
    pub contact: String,
    /// Entered through the free-text escape hatch rather than picked
    pub manual_entry: bool,
    pub submitted_at: String,
}

impl Submission {
    pub fn new(company: &str, contact: &str, manual_entry: bool) -> Self {
        Self {
            company: company.trim().to_string(),
            contact: contact.trim().to_string(),
            manual_entry,
            submitted_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
