//! Demographics extraction
//!
//! Turns the questionnaire section of one participant into a flat
//! label → value record and stamps it with the next participant identifier.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::schema::RawLine;
use crate::types::{DemographicRecord, ParticipantId};
use serde::{Deserialize, Serialize};

/// Hands out participant identifiers in the order participants are parsed.
///
/// Identifiers start at 1 and never repeat within one sequence. A fresh
/// sequence starts over at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantIdSequence {
    issued: u32,
}

impl ParticipantIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `issued` identifiers
    pub fn starting_after(issued: u32) -> Self {
        Self { issued }
    }

    /// Issue the next identifier
    pub fn next_id(&mut self) -> ParticipantId {
        self.issued += 1;
        ParticipantId(self.issued)
    }

    /// Number of identifiers issued so far
    pub fn issued(&self) -> u32 {
        self.issued
    }
}

/// Build the demographic record of one participant.
///
/// Controller bookkeeping lines are skipped. Values are trimmed; a blank value
/// is stored as missing. A label answered twice keeps the later answer.
pub fn extract_demographics(
    lines: &[RawLine<'_>],
    participant_id: ParticipantId,
    config: &ParserConfig,
) -> Result<DemographicRecord, ParseError> {
    let mut record = DemographicRecord::new(participant_id);

    for line in lines {
        if line.item_type()? == config.controller_marker {
            continue;
        }
        let label = line.question_label()?;
        let value = line.value()?.trim();
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        record.insert(label, value);
    }

    Ok(record)
}
