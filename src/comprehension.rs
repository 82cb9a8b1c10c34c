//! Comprehension question evaluation
//!
//! Collects the answers participants selected for the intermittent
//! comprehension questions and compares them with the expected answer.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::schema::RawLine;
use crate::types::{ComprehensionResponse, StimulusKey};
use std::collections::HashMap;

/// Answers keyed by stimulus
pub type ComprehensionResponses = HashMap<StimulusKey, ComprehensionResponse>;

/// Parse every selector event in the given lines.
///
/// Answers are compared case-insensitively. When a stimulus is answered more
/// than once the later line replaces the earlier one.
pub fn evaluate_responses<'l, 'a: 'l>(
    lines: impl IntoIterator<Item = &'l RawLine<'a>>,
    config: &ParserConfig,
) -> Result<ComprehensionResponses, ParseError> {
    let mut responses = ComprehensionResponses::new();

    for line in lines {
        if line.item_type()? != config.selector_marker {
            continue;
        }

        let answer = line.value()?.to_lowercase();
        let expected_answer = line.expected_answer()?.to_lowercase();
        let item_number = line.item_number()?.to_string();
        let anaphor_type = line.anaphor_type()?.to_string();

        let response = ComprehensionResponse {
            question: line.question()?.to_string(),
            correct: answer == expected_answer,
            answer,
            expected_answer,
            item_number: item_number.clone(),
            anaphor_type: anaphor_type.clone(),
        };
        responses.insert(StimulusKey::new(item_number, anaphor_type), response);
    }

    Ok(responses)
}
