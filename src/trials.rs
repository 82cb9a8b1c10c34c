//! Trial record building
//!
//! Reconstructs the reading-time rows of one participant. Stimuli are shown
//! as two dashed sentences whose word indices both start at 1; rows are
//! renumbered here so chunk indices run continuously across both halves.
//!
//! Building happens in two passes. The first pass walks the sorted reading
//! events of every section and produces partial rows while indexing the
//! sentence text of each stimulus. The second pass fills in the full stimulus
//! sentence and the comprehension result once everything has been seen.

use crate::comprehension::ComprehensionResponses;
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::schema::{columns, RawLine};
use crate::types::{StimulusKey, TrialRow};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Text of both halves of one stimulus sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SentenceParts {
    first: Option<String>,
    second: Option<String>,
}

impl SentenceParts {
    fn joined(&self) -> String {
        match (&self.first, &self.second) {
            (Some(first), Some(second)) => format!("{} {}", first, second),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Reading event with its sort key fields pulled out
struct ReadingEvent<'l, 'a> {
    line: &'l RawLine<'a>,
    event_time: &'a str,
    sentence_part: &'a str,
    word_index: &'a str,
}

/// Accumulates trial rows across the experimental sections of one participant
#[derive(Debug)]
pub struct TrialRecordBuilder<'c> {
    config: &'c ParserConfig,
    /// Running stimulus position, never reset between sections
    stimulus_counter: u32,
    last_stimulus: Option<StimulusKey>,
    /// Highest first-part chunk index seen per stimulus
    first_part_max: HashMap<StimulusKey, i64>,
    sentences: HashMap<StimulusKey, SentenceParts>,
    rows: Vec<TrialRow>,
}

impl<'c> TrialRecordBuilder<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            stimulus_counter: 0,
            last_stimulus: None,
            first_part_max: HashMap::new(),
            sentences: HashMap::new(),
            rows: Vec::new(),
        }
    }

    /// First pass over one section: add a partial row per reading event
    pub fn add_section(&mut self, lines: &[RawLine<'_>]) -> Result<(), ParseError> {
        let mut events = Vec::new();
        for line in lines {
            if line.item_type()? != self.config.reading_event_marker {
                continue;
            }
            events.push(ReadingEvent {
                line,
                event_time: line.event_time()?,
                sentence_part: line.sentence_part()?,
                word_index: line.word_index()?,
            });
        }

        // Timestamps are compared as strings; all three keys are.
        events.sort_by(|a, b| {
            (a.event_time, a.sentence_part, a.word_index).cmp(&(
                b.event_time,
                b.sentence_part,
                b.word_index,
            ))
        });

        for event in &events {
            let row = self.push_event(event)?;
            self.rows.push(row);
        }
        Ok(())
    }

    fn push_event(&mut self, event: &ReadingEvent<'_, '_>) -> Result<TrialRow, ParseError> {
        let line = event.line;
        let item_number = line.item_number()?;
        let anaphor_type = line.anaphor_type()?;
        let key = StimulusKey::new(item_number, anaphor_type);

        if self.last_stimulus.as_ref() != Some(&key) {
            self.stimulus_counter += 1;
            self.last_stimulus = Some(key.clone());
        }

        let mut chunk_idx = line.chunk_index()?;
        let text = line.stimulus_text()?.trim().to_string();
        let parts = self.sentences.entry(key.clone()).or_default();

        if event.sentence_part.ends_with(self.config.second_part_suffix.as_str()) {
            match self.first_part_max.get(&key) {
                Some(offset) => {
                    chunk_idx = chunk_idx.checked_add(*offset).ok_or_else(|| {
                        ParseError::InvalidNumber {
                            field: columns::PARAMETER.name,
                            value: chunk_idx.to_string(),
                        }
                    })?;
                }
                None => warn!(stimulus = %key, "second sentence part without first part"),
            }
            parts.second = Some(text);
        } else {
            let max = self.first_part_max.entry(key).or_insert(chunk_idx);
            *max = (*max).max(chunk_idx);
            parts.first = Some(text);
        }

        let critical_region = line.critical_region()?;
        let pos_wrt_anaphor = chunk_idx
            .checked_sub(1)
            .and_then(|c| c.checked_sub(critical_region))
            .ok_or_else(|| ParseError::InvalidNumber {
                field: columns::CRITICAL_REGION.name,
                value: critical_region.to_string(),
            })?;
        let question = line.question()?;
        let expected_answer = line.expected_answer()?;

        Ok(TrialRow {
            stimulus_idx: self.stimulus_counter,
            stimulus_sentence: String::new(),
            word: line.value()?.to_string(),
            chunk_idx,
            pos_wrt_anaphor,
            reading_time: line.reading_time()?.to_string(),
            item_number: item_number.to_string(),
            block: line.get(columns::BLOCK)?.to_string(),
            context: line.get(columns::CONTEXT)?.to_string(),
            condition: line.get(columns::CONDITION)?.to_string(),
            anaphor_type: anaphor_type.to_string(),
            subcategory: line.get(columns::SUBCATEGORY)?.to_string(),
            specification: line.get(columns::SPECIFICATION)?.to_string(),
            anchor: line.get(columns::ANCHOR)?.to_string(),
            anaphor: line.get(columns::ANAPHOR)?.to_string(),
            question: non_empty(question),
            expected_answer: non_empty(expected_answer),
            answer_correct: None,
        })
    }

    /// Second pass: fill stimulus sentences and comprehension results
    pub fn finish(self, responses: &ComprehensionResponses) -> Vec<TrialRow> {
        let mut rows = self.rows;

        for row in &mut rows {
            let key = row.stimulus_key();
            if let Some(parts) = self.sentences.get(&key) {
                row.stimulus_sentence = parts.joined();
            }
            row.answer_correct = responses.get(&key).map(|r| r.correct);
        }

        debug!(
            rows = rows.len(),
            stimuli = self.stimulus_counter,
            "built trial rows"
        );
        rows
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Build all trial rows of one participant from its experimental sections
pub fn build_trial_rows<'s, 'a: 's>(
    sections: impl IntoIterator<Item = &'s [RawLine<'a>]>,
    responses: &ComprehensionResponses,
    config: &ParserConfig,
) -> Result<Vec<TrialRow>, ParseError> {
    let mut builder = TrialRecordBuilder::new(config);
    for lines in sections {
        builder.add_section(lines)?;
    }
    Ok(builder.finish(responses))
}
