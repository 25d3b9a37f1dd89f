//! Company directory
//!
//! The read-only, ordered list of companies the typeahead searches. Loaded
//! once (from JSON or the embedded dataset) and shared by every input that
//! needs it; cloning a directory only bumps reference counts.

use crate::error::{Result, TypeaheadError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Dataset compiled into the binary, used when no directory file is configured
const BUILTIN_DIRECTORY: &str = include_str!("../data/companies.json");

/// Opaque, stable company identifier
///
/// Directory files may use either strings or integers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct CompanyId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for CompanyId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => CompanyId(s),
            RawId::Number(n) => CompanyId(n.to_string()),
        }
    }
}

impl From<CompanyId> for String {
    fn from(id: CompanyId) -> Self {
        id.0
    }
}

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        CompanyId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a company is located
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub primary: String,
    pub secondary: String,
}

/// A single company in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: CompanyId,
    /// Display text and match key
    pub name: String,
    #[serde(default)]
    pub region: Region,
}

impl CompanyRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        Self {
            id: CompanyId::new(id),
            name: name.into(),
            region: Region {
                primary: primary.into(),
                secondary: secondary.into(),
            },
        }
    }

    /// "primary / secondary", or whichever half is present
    pub fn region_label(&self) -> String {
        match (self.region.primary.is_empty(), self.region.secondary.is_empty()) {
            (false, false) => format!("{} / {}", self.region.primary, self.region.secondary),
            (false, true) => self.region.primary.clone(),
            (true, false) => self.region.secondary.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Immutable, ordered company list with a cached lowercase match key per entry
#[derive(Debug, Clone)]
pub struct CompanyDirectory {
    records: Arc<[CompanyRecord]>,
    // Pre-lowercased names, same order as `records`
    names_lower: Arc<[String]>,
}

impl CompanyDirectory {
    /// Build a directory, rejecting duplicate ids and blank names
    pub fn new(records: Vec<CompanyRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.name.trim().is_empty() {
                return Err(TypeaheadError::BlankName(record.id.to_string()));
            }
            if !seen.insert(&record.id) {
                return Err(TypeaheadError::DuplicateId(record.id.to_string()));
            }
        }

        let names_lower = records.iter().map(|r| r.name.to_lowercase()).collect();

        Ok(Self {
            records: records.into(),
            names_lower,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<CompanyRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TypeaheadError::ReadError(path.to_path_buf(), e))?;
        let directory = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), companies = directory.len(), "loaded company directory");
        Ok(directory)
    }

    /// The dataset shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_DIRECTORY)
    }

    /// Load from `path` when given, otherwise fall back to the builtin dataset
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompanyRecord> {
        self.records.get(index)
    }

    /// Position of the record with this id
    pub fn position(&self, id: &CompanyId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub fn find(&self, id: &CompanyId) -> Option<&CompanyRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompanyRecord> {
        self.records.iter()
    }

    /// Indices of every record whose name contains `query` (trimmed),
    /// ignoring case. Directory order, no cap. A blank query matches nothing.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.names_lower
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains(&needle))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl<'a> IntoIterator for &'a CompanyDirectory {
    type Item = &'a CompanyRecord;
    type IntoIter = std::slice::Iter<'a, CompanyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample() -> CompanyDirectory {
        CompanyDirectory::new(vec![
            CompanyRecord::new("1", "Acme Corp", "Kanto", "Tokyo"),
            CompanyRecord::new("2", "Acme Foods", "Kansai", "Osaka"),
            CompanyRecord::new("3", "Globex", "Kanto", "Yokohama"),
        ])
        .unwrap()
    }

    #[rstest]
    #[case("acm", vec![0, 1])]
    #[case("ACME", vec![0, 1])]
    #[case("  foods ", vec![1])]
    #[case("corp", vec![0])]
    #[case("ex", vec![2])]
    #[case("me", vec![0, 1])]
    #[case("zzz", vec![])]
    #[case("", vec![])]
    #[case("   ", vec![])]
    fn filter_is_trimmed_case_insensitive_substring(#[case] query: &str, #[case] expected: Vec<usize>) {
        assert_eq!(sample().filter(query), expected);
    }

    #[test]
    fn inner_whitespace_is_part_of_the_needle() {
        let dir = sample();
        assert_eq!(dir.filter("acme f"), vec![1]);
        assert_eq!(dir.filter("acmef"), Vec::<usize>::new());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CompanyDirectory::new(vec![
            CompanyRecord::new("1", "One", "", ""),
            CompanyRecord::new("1", "Uno", "", ""),
        ])
        .unwrap_err();
        assert!(matches!(err, TypeaheadError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = CompanyDirectory::new(vec![CompanyRecord::new("7", "  ", "", "")]).unwrap_err();
        assert!(matches!(err, TypeaheadError::BlankName(_)));
    }

    #[test]
    fn json_accepts_numeric_and_string_ids() {
        let json = r#"[
            {"id": 10, "name": "Initech", "region": {"primary": "Chubu", "secondary": "Nagoya"}},
            {"id": "x-2", "name": "Hooli"}
        ]"#;
        let dir = CompanyDirectory::from_json_str(json).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.get(0).unwrap().id.as_str(), "10");
        assert_eq!(dir.find(&CompanyId::new("x-2")).unwrap().name, "Hooli");
        assert_eq!(dir.get(1).unwrap().region, Region::default());
    }

    #[test]
    fn malformed_json_is_a_data_error() {
        let err = CompanyDirectory::from_json_str("{ not json").unwrap_err();
        assert!(err.is_data_error());
    }

    #[test]
    fn builtin_dataset_loads() {
        let dir = CompanyDirectory::builtin().unwrap();
        assert!(!dir.is_empty());
    }

    #[test]
    fn region_label_joins_present_halves() {
        let rec = CompanyRecord::new("1", "A", "Kanto", "Tokyo");
        assert_eq!(rec.region_label(), "Kanto / Tokyo");
        let rec = CompanyRecord::new("2", "B", "Kanto", "");
        assert_eq!(rec.region_label(), "Kanto");
    }
}
