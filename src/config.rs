//! Parser configuration
//!
//! The log layout is fixed, but the markers that identify sections and event
//! types are kept here so a study with renamed sections only needs a JSON
//! override instead of a code change.

use crate::error::ParseError;
use crate::schema::columns;
use serde::{Deserialize, Serialize};

/// Settings for one parse run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter of the raw log
    pub delimiter: char,
    /// Prefix of comment lines
    pub comment_marker: String,
    /// 0-based column holding the section label
    pub section_label_column: usize,
    /// Sections that never contain trials or comprehension questions
    pub administrative_sections: Vec<String>,
    /// Section holding the demographic questionnaire
    pub demographics_section: String,
    /// Item type of controller bookkeeping lines (ignored in demographics)
    pub controller_marker: String,
    /// Item type of self-paced reading events
    pub reading_event_marker: String,
    /// Item type of comprehension question answers
    pub selector_marker: String,
    /// Suffix of the sentence-part label for the second sentence half
    pub second_part_suffix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment_marker: "#".to_string(),
            section_label_column: columns::SECTION_LABEL.index,
            administrative_sections: [
                "consent",
                "demographics",
                "instructions",
                "practice-trial",
                "practice-end",
                "break",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            demographics_section: "demographics".to_string(),
            controller_marker: "PennController".to_string(),
            reading_event_marker: "Controller-DashedSentence".to_string(),
            selector_marker: "Selector".to_string(),
            second_part_suffix: "pt2".to_string(),
        }
    }
}

impl ParserConfig {
    /// Load a configuration from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let config: ParserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would make every line unparseable
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.comment_marker.is_empty() {
            return Err(ParseError::Config(
                "comment_marker must not be empty".to_string(),
            ));
        }
        if self.comment_marker.starts_with(self.delimiter) {
            return Err(ParseError::Config(
                "comment_marker must not start with the delimiter".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a section label names an administrative section
    pub fn is_administrative(&self, label: &str) -> bool {
        self.administrative_sections.iter().any(|s| s == label)
    }
}
