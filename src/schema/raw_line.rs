//! Positional record decoder for PCIbex result lines
//!
//! PCIbex writes every event as one delimited line whose meaning depends on
//! column position. All positions live in [`columns`]; the rest of the crate
//! reads fields through [`RawLine`] accessors only, so a layout change touches
//! this file and nothing else.

use crate::error::ParseError;

/// Current result layout version
pub const SCHEMA_VERSION: &str = "pcibex.results.v1";

/// A named field position in a result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub index: usize,
}

/// Column positions of the result layout (0-based)
pub mod columns {
    use super::Column;

    pub const RECEIVED_AT: Column = Column { name: "received_at", index: 0 };
    pub const PARTICIPANT_HASH: Column = Column { name: "participant_hash", index: 1 };
    /// Default position of the section label, overridable in the parser config
    pub const SECTION_LABEL: Column = Column { name: "section_label", index: 5 };
    pub const ITEM_TYPE: Column = Column { name: "item_type", index: 7 };
    /// Sentence part for reading events, question label in demographics
    pub const ELEMENT_NAME: Column = Column { name: "element_name", index: 8 };
    /// Word index within the dashed sentence
    pub const PARAMETER: Column = Column { name: "parameter", index: 9 };
    /// Word for reading events, answer for selectors and questionnaires
    pub const VALUE: Column = Column { name: "value", index: 10 };
    pub const EVENT_TIME: Column = Column { name: "event_time", index: 11 };
    pub const ITEM_NUMBER: Column = Column { name: "item_number", index: 13 };
    pub const BLOCK: Column = Column { name: "block", index: 14 };
    pub const CONTEXT: Column = Column { name: "context", index: 15 };
    pub const CONDITION: Column = Column { name: "condition", index: 16 };
    pub const ANAPHOR_TYPE: Column = Column { name: "anaphor_type", index: 17 };
    pub const SUBCATEGORY: Column = Column { name: "subcategory", index: 18 };
    pub const SPECIFICATION: Column = Column { name: "specification", index: 19 };
    pub const ANCHOR: Column = Column { name: "anchor", index: 20 };
    pub const ANAPHOR: Column = Column { name: "anaphor", index: 21 };
    pub const CRITICAL_REGION: Column = Column { name: "critical_region", index: 22 };
    pub const QUESTION: Column = Column { name: "question", index: 23 };
    pub const EXPECTED_ANSWER: Column = Column { name: "expected_answer", index: 24 };
    pub const READING_TIME: Column = Column { name: "reading_time", index: 25 };
    pub const STIMULUS_TEXT: Column = Column { name: "stimulus_text", index: 27 };
}

/// One data line of a results log, split once into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine<'a> {
    text: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Split a line by the delimiter
    pub fn parse(text: &'a str, delimiter: char) -> Self {
        Self {
            text,
            fields: text.split(delimiter).collect(),
        }
    }

    /// Original line text
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at a named column
    pub fn get(&self, column: Column) -> Result<&'a str, ParseError> {
        self.fields
            .get(column.index)
            .copied()
            .ok_or_else(|| ParseError::Structural {
                line: self.text.to_string(),
                field: column.name,
                required: column.index + 1,
                found: self.fields.len(),
            })
    }

    /// Field at a named column, parsed as an integer
    pub fn get_int(&self, column: Column) -> Result<i64, ParseError> {
        let raw = self.get(column)?;
        raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
            field: column.name,
            value: raw.to_string(),
        })
    }

    /// Section label at a configurable position
    pub fn section_label(&self, index: usize) -> Result<&'a str, ParseError> {
        self.get(Column {
            index,
            ..columns::SECTION_LABEL
        })
    }

    pub fn received_at(&self) -> Result<&'a str, ParseError> {
        self.get(columns::RECEIVED_AT)
    }

    pub fn participant_hash(&self) -> Result<&'a str, ParseError> {
        self.get(columns::PARTICIPANT_HASH)
    }

    pub fn item_type(&self) -> Result<&'a str, ParseError> {
        self.get(columns::ITEM_TYPE)
    }

    pub fn sentence_part(&self) -> Result<&'a str, ParseError> {
        self.get(columns::ELEMENT_NAME)
    }

    pub fn question_label(&self) -> Result<&'a str, ParseError> {
        self.get(columns::ELEMENT_NAME)
    }

    pub fn word_index(&self) -> Result<&'a str, ParseError> {
        self.get(columns::PARAMETER)
    }

    pub fn chunk_index(&self) -> Result<i64, ParseError> {
        self.get_int(columns::PARAMETER)
    }

    pub fn value(&self) -> Result<&'a str, ParseError> {
        self.get(columns::VALUE)
    }

    pub fn event_time(&self) -> Result<&'a str, ParseError> {
        self.get(columns::EVENT_TIME)
    }

    pub fn item_number(&self) -> Result<&'a str, ParseError> {
        self.get(columns::ITEM_NUMBER)
    }

    pub fn anaphor_type(&self) -> Result<&'a str, ParseError> {
        self.get(columns::ANAPHOR_TYPE)
    }

    pub fn critical_region(&self) -> Result<i64, ParseError> {
        self.get_int(columns::CRITICAL_REGION)
    }

    pub fn question(&self) -> Result<&'a str, ParseError> {
        self.get(columns::QUESTION)
    }

    pub fn expected_answer(&self) -> Result<&'a str, ParseError> {
        self.get(columns::EXPECTED_ANSWER)
    }

    pub fn reading_time(&self) -> Result<&'a str, ParseError> {
        self.get(columns::READING_TIME)
    }

    pub fn stimulus_text(&self) -> Result<&'a str, ParseError> {
        self.get(columns::STIMULUS_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_fields() {
        let line = RawLine::parse("1700000000,abc123,,,,block-1,,Selector", ',');
        assert_eq!(line.len(), 8);
        assert_eq!(line.received_at().unwrap(), "1700000000");
        assert_eq!(line.participant_hash().unwrap(), "abc123");
        assert_eq!(line.section_label(5).unwrap(), "block-1");
        assert_eq!(line.item_type().unwrap(), "Selector");
    }

    #[test]
    fn test_missing_field_is_structural_error() {
        let line = RawLine::parse("a,b,c", ',');
        match line.item_type() {
            Err(ParseError::Structural {
                field,
                required,
                found,
                ..
            }) => {
                assert_eq!(field, "item_type");
                assert_eq!(required, 8);
                assert_eq!(found, 3);
            }
            other => panic!("expected structural error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_int() {
        let line = RawLine::parse("0;1;2;3;4;5;6;7;8; 12 ", ';');
        assert_eq!(line.chunk_index().unwrap(), 12);

        let line = RawLine::parse("0,1,2,3,4,5,6,7,8,x", ',');
        assert!(matches!(
            line.chunk_index(),
            Err(ParseError::InvalidNumber { field: "parameter", .. })
        ));
    }

    #[test]
    fn test_section_label_at_custom_position() {
        let line = RawLine::parse("0,1,2,block-2", ',');
        assert_eq!(line.section_label(3).unwrap(), "block-2");
        assert!(matches!(
            line.section_label(columns::SECTION_LABEL.index),
            Err(ParseError::Structural { field: "section_label", required: 6, .. })
        ));
        assert!(SCHEMA_VERSION.starts_with("pcibex.results."));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let line = RawLine::parse(",,", ',');
        assert_eq!(line.len(), 3);
        assert_eq!(line.get(columns::RECEIVED_AT).unwrap(), "");
    }
}
