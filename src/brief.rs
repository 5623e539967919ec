//! Client brief — the creative intent a gallery is judged against.
//!
//! The brief is a single TOML file supplied by whoever is running the
//! report. The core only reads it: project metadata, a desired orientation,
//! an ordered list of mood keywords, free-text notes, and a set of priority
//! subject categories.
//!
//! Keywords are normalized on load (lowercased, trimmed, duplicates dropped
//! with first occurrence winning) so insight matching never depends on how
//! the file was typed. `proofsheet gen-brief` prints [`stock_brief_toml`],
//! a fully documented template.

use crate::analyze::Orientation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BriefError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Orientation the client asked for; `Any` matches every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredOrientation {
    #[default]
    Any,
    Landscape,
    Portrait,
    Square,
}

impl DesiredOrientation {
    pub fn matches(self, orientation: Orientation) -> bool {
        match self {
            DesiredOrientation::Any => true,
            DesiredOrientation::Landscape => orientation == Orientation::Landscape,
            DesiredOrientation::Portrait => orientation == Orientation::Portrait,
            DesiredOrientation::Square => orientation == Orientation::Square,
        }
    }
}

impl std::fmt::Display for DesiredOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesiredOrientation::Any => write!(f, "any"),
            DesiredOrientation::Landscape => write!(f, "landscape"),
            DesiredOrientation::Portrait => write!(f, "portrait"),
            DesiredOrientation::Square => write!(f, "square"),
        }
    }
}

/// Fixed enumeration of subject categories a brief can prioritize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectCategory {
    People,
    Details,
    #[serde(rename = "Wide Establishing")]
    WideEstablishing,
    Action,
    Emotion,
    Product,
}

/// The creative brief. Read-only to the analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientBrief {
    pub project: String,
    pub client: String,
    pub delivery_date: String,
    /// Ordered, duplicate-free, lowercase mood keywords (normalized on load).
    pub mood_keywords: Vec<String>,
    pub must_include: String,
    pub notes: String,
    pub orientation: DesiredOrientation,
    pub subject_priority: Vec<SubjectCategory>,
}

impl Default for ClientBrief {
    fn default() -> Self {
        Self {
            project: "Untitled Shoot".to_string(),
            client: String::new(),
            delivery_date: String::new(),
            mood_keywords: Vec::new(),
            must_include: String::new(),
            notes: String::new(),
            orientation: DesiredOrientation::Any,
            subject_priority: Vec::new(),
        }
    }
}

impl ClientBrief {
    /// Lowercase and trim keywords, drop empties and duplicates (first
    /// occurrence wins, order preserved). Duplicate subject categories
    /// collapse the same way.
    fn normalize(&mut self) {
        let mut seen = Vec::new();
        for keyword in &self.mood_keywords {
            let cleaned = keyword.trim().to_lowercase();
            if !cleaned.is_empty() && !seen.contains(&cleaned) {
                seen.push(cleaned);
            }
        }
        self.mood_keywords = seen;

        let mut subjects = Vec::new();
        for &subject in &self.subject_priority {
            if !subjects.contains(&subject) {
                subjects.push(subject);
            }
        }
        self.subject_priority = subjects;
    }
}

/// Load and normalize a brief from a TOML file.
pub fn load_brief(path: &Path) -> Result<ClientBrief, BriefError> {
    let content = std::fs::read_to_string(path)?;
    parse_brief(&content)
}

/// Parse and normalize a brief from TOML text.
pub fn parse_brief(content: &str) -> Result<ClientBrief, BriefError> {
    let mut brief: ClientBrief = toml::from_str(content)?;
    brief.normalize();
    Ok(brief)
}

/// A documented stock brief, printed by `proofsheet gen-brief`.
pub fn stock_brief_toml() -> String {
    r#"# Proofsheet client brief.
# Every field is optional; omitted fields fall back to these defaults.

# Project metadata — carried into the report, not used for matching.
project = "Untitled Shoot"
client = ""
delivery_date = ""

# Desired frame orientation: "any", "landscape", "portrait", or "square".
# Anything other than "any" is checked against the gallery's coverage.
orientation = "any"

# Mood keywords, matched against per-photo tags. Normalized to lowercase
# and de-duplicated on load. Tags the analyzer can produce: tack-sharp,
# vibrant, moody, airy, dynamic-range, soft.
mood_keywords = []

# Free-text curation notes.
must_include = ""
notes = ""

# Priority subjects, from: "People", "Details", "Wide Establishing",
# "Action", "Emotion", "Product".
subject_priority = []
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_brief_parses_to_defaults() {
        let brief = parse_brief(&stock_brief_toml()).unwrap();
        assert_eq!(brief, ClientBrief::default());
    }

    #[test]
    fn empty_toml_is_the_default_brief() {
        let brief = parse_brief("").unwrap();
        assert_eq!(brief.project, "Untitled Shoot");
        assert_eq!(brief.orientation, DesiredOrientation::Any);
        assert!(brief.mood_keywords.is_empty());
    }

    #[test]
    fn keywords_normalize_on_load() {
        let brief = parse_brief(
            r#"mood_keywords = [" Moody", "vibrant", "moody", "", "  "]"#,
        )
        .unwrap();
        assert_eq!(brief.mood_keywords, vec!["moody", "vibrant"]);
    }

    #[test]
    fn subject_categories_parse_and_dedupe() {
        let brief = parse_brief(
            r#"subject_priority = ["People", "Wide Establishing", "People", "Product"]"#,
        )
        .unwrap();
        assert_eq!(
            brief.subject_priority,
            vec![
                SubjectCategory::People,
                SubjectCategory::WideEstablishing,
                SubjectCategory::Product
            ]
        );
    }

    #[test]
    fn unknown_subject_category_errors() {
        let result = parse_brief(r#"subject_priority = ["Landscapes"]"#);
        assert!(matches!(result, Err(BriefError::Parse(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = parse_brief(r#"shoot_title = "typo'd field""#);
        assert!(matches!(result, Err(BriefError::Parse(_))));
    }

    #[test]
    fn orientation_matching() {
        assert!(DesiredOrientation::Any.matches(Orientation::Portrait));
        assert!(DesiredOrientation::Portrait.matches(Orientation::Portrait));
        assert!(!DesiredOrientation::Portrait.matches(Orientation::Landscape));
        assert!(DesiredOrientation::Square.matches(Orientation::Square));
    }
}
