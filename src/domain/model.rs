use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fragment name to its rendered text.
pub type FragmentMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    BeginFragment(String),
    EndFragment,
    BeginEscape,
    EndEscape,
}

/// Zero-based line indices of a fragment's BEGIN and END markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSection {
    pub name: String,
    pub begin_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub name: String,
    pub text: String,
    pub section: FragmentSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFile {
    pub path: PathBuf,
    pub fragments: Vec<Fragment>,
}

impl ExtractedFile {
    pub fn fragment_map(&self) -> FragmentMap {
        self.fragments
            .iter()
            .map(|f| (f.name.clone(), f.text.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<ExtractedFile>,
    /// Files skipped because of marker syntax errors.
    pub skipped: Vec<PathBuf>,
}

impl ExtractionResult {
    pub fn fragment_count(&self) -> usize {
        self.files.iter().map(|f| f.fragments.len()).sum()
    }
}
