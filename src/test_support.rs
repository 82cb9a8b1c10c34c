//! Builders for synthetic result lines used across unit tests

use crate::schema::{columns, Column};

const FIELD_COUNT: usize = 28;

/// Builds one comma-separated result line field by field
#[derive(Debug, Clone)]
pub struct LineBuilder {
    fields: Vec<String>,
}

impl LineBuilder {
    pub fn new(section: &str, item_type: &str) -> Self {
        let mut fields = vec![String::new(); FIELD_COUNT];
        fields[columns::RECEIVED_AT.index] = "1700000000".to_string();
        fields[columns::PARTICIPANT_HASH.index] = "0123456789abcdef".to_string();
        fields[columns::SECTION_LABEL.index] = section.to_string();
        fields[columns::ITEM_TYPE.index] = item_type.to_string();
        Self { fields }
    }

    /// A demographics questionnaire answer
    pub fn demographic(label: &str, value: &str) -> Self {
        Self::new("demographics", "Form")
            .set(columns::ELEMENT_NAME, label)
            .set(columns::VALUE, value)
    }

    /// A self-paced reading event
    pub fn reading(section: &str, item: &str, anaphor_type: &str) -> Self {
        Self::new(section, "Controller-DashedSentence")
            .set(columns::ITEM_NUMBER, item)
            .set(columns::ANAPHOR_TYPE, anaphor_type)
            .set(columns::CRITICAL_REGION, "2")
            .set(columns::READING_TIME, "300")
    }

    /// A comprehension question answer
    pub fn selector(section: &str, item: &str, anaphor_type: &str) -> Self {
        Self::new(section, "Selector")
            .set(columns::ITEM_NUMBER, item)
            .set(columns::ANAPHOR_TYPE, anaphor_type)
    }

    pub fn set(mut self, column: Column, value: &str) -> Self {
        self.fields[column.index] = value.to_string();
        self
    }

    /// Sentence part, word index, word and event time of a reading event
    pub fn word(self, part: &str, index: i64, word: &str, time: &str) -> Self {
        self.set(columns::ELEMENT_NAME, part)
            .set(columns::PARAMETER, &index.to_string())
            .set(columns::VALUE, word)
            .set(columns::EVENT_TIME, time)
    }

    pub fn build(&self) -> String {
        self.fields.join(",")
    }
}
