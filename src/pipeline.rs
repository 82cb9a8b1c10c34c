//! Pipeline orchestration
//!
//! This module provides the public API of the crate. It runs the full
//! pipeline from a raw PCIbex results log to the merged corpus.

use crate::assembler::{assemble_participant, merge_participants};
use crate::comprehension::evaluate_responses;
use crate::config::ParserConfig;
use crate::demographics::{extract_demographics, ParticipantIdSequence};
use crate::encoder::CorpusEncoder;
use crate::error::ParseError;
use crate::sections::classify;
use crate::segmenter::split_participants;
use crate::trials::build_trial_rows;
use crate::types::{Corpus, ParticipantId, ParticipantSegment, ParticipantTable};
use tracing::{debug, info};

/// Parse a raw results log into a corpus (stateless, one-shot).
///
/// Participant identifiers start at 001 for the first segment in the log.
///
/// # Example
/// ```ignore
/// let corpus = parse_results(&raw_log, &ParserConfig::default())?;
/// ```
pub fn parse_results(raw: &str, config: &ParserConfig) -> Result<Corpus, ParseError> {
    let mut processor = ResultsProcessor::with_config(config.clone());
    processor.process(raw)
}

/// Parse a raw results log and encode the corpus as CSV.
pub fn results_to_csv(raw: &str, config: &ParserConfig) -> Result<String, ParseError> {
    let corpus = parse_results(raw, config)?;
    CorpusEncoder::new().encode_to_csv(&corpus)
}

/// Parse one participant segment into its table.
///
/// Pipeline stages:
/// 1. classify - Split comments and group lines into sections
/// 2. extract_demographics - Build the demographic record
/// 3. evaluate_responses - Score comprehension answers
/// 4. build_trial_rows - Reconstruct reading-time rows
/// 5. assemble_participant - Broadcast demographics over the rows
pub fn process_participant(
    segment: &ParticipantSegment<'_>,
    participant_id: ParticipantId,
    config: &ParserConfig,
) -> Result<ParticipantTable, ParseError> {
    // Stage 1: Classify lines into sections
    let classified = classify(segment, config)?;

    // Stage 2: Demographics
    let demographics = extract_demographics(
        classified.lines_of(&config.demographics_section),
        participant_id,
        config,
    )?;

    // Stage 3: Comprehension answers across all experimental sections
    let responses = evaluate_responses(
        classified
            .experimental_sections(config)
            .flat_map(|s| s.lines.iter()),
        config,
    )?;

    // Stage 4: Trial rows
    let rows = build_trial_rows(
        classified
            .experimental_sections(config)
            .map(|s| s.lines.as_slice()),
        &responses,
        config,
    )?;

    debug!(
        participant = %participant_id,
        segment = segment.index,
        rows = rows.len(),
        answered = responses.len(),
        "parsed participant"
    );

    // Stage 5: Assemble
    assemble_participant(segment.index, classified.header, demographics, rows)
}

/// Stateful processor for parsing several logs with continuous participant numbering.
///
/// Use this when one study is split over multiple results files.
pub struct ResultsProcessor {
    config: ParserConfig,
    sequence: ParticipantIdSequence,
}

impl Default for ResultsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsProcessor {
    /// Create a processor with default settings
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a processor with a specific configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            sequence: ParticipantIdSequence::new(),
        }
    }

    /// Continue numbering from an existing sequence
    pub fn with_sequence(config: ParserConfig, sequence: ParticipantIdSequence) -> Self {
        Self { config, sequence }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Number of participant identifiers issued so far
    pub fn participants_seen(&self) -> u32 {
        self.sequence.issued()
    }

    /// Parse one raw log into a corpus.
    ///
    /// Identifiers are assigned in segment order before any participant is
    /// parsed. On error nothing is returned and the sequence is left as it was.
    pub fn process(&mut self, raw: &str) -> Result<Corpus, ParseError> {
        let segments = split_participants(raw);

        let mut sequence = self.sequence.clone();
        let assigned: Vec<ParticipantId> = segments.iter().map(|_| sequence.next_id()).collect();

        let tables = segments
            .iter()
            .zip(assigned)
            .map(|(segment, id)| process_participant(segment, id, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        self.sequence = sequence;
        let corpus = merge_participants(tables);

        info!(
            participants = corpus.tables.len(),
            rows = corpus.len(),
            "parsed results log"
        );
        Ok(corpus)
    }
}
