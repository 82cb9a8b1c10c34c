//! Participant assembly and corpus merging

use crate::error::ParseError;
use crate::types::{
    Corpus, DemographicRecord, ParticipantTable, SegmentHeader, TrialRow, TRIAL_COLUMNS,
};

/// Combine one participant's trial rows with their demographics.
///
/// Every demographic field becomes a constant column over the participant's
/// rows, so no demographic label may reuse a trial column name.
pub fn assemble_participant(
    index: usize,
    header: Option<SegmentHeader>,
    demographics: DemographicRecord,
    rows: Vec<TrialRow>,
) -> Result<ParticipantTable, ParseError> {
    if let Some(label) = demographics
        .labels()
        .find(|label| TRIAL_COLUMNS.contains(label))
    {
        return Err(ParseError::SchemaCollision(label.to_string()));
    }

    Ok(ParticipantTable {
        index,
        header,
        demographics,
        rows,
    })
}

/// Concatenate participant tables in ascending participant index.
///
/// Rows keep their order within each participant; nothing is deduplicated.
pub fn merge_participants(mut tables: Vec<ParticipantTable>) -> Corpus {
    tables.sort_by_key(|t| t.index);
    Corpus { tables }
}
