//! Core types for the results pipeline
//!
//! This module defines the records that flow through each stage: participant
//! segments, demographic records, comprehension responses, trial rows, and the
//! per-participant tables that make up the final corpus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column name of the synthetic participant identifier
pub const PARTICIPANT_ID_COLUMN: &str = "versuchspersonenID";

/// Output columns contributed by trial rows, in output order
pub const TRIAL_COLUMNS: [&str; 18] = [
    "stimulusIdx",
    "stimulusSatz",
    "wort",
    "chunkIdx",
    "posWrtAnapher",
    "leseZeit",
    "itemNummer",
    "block",
    "kontext",
    "bedingung",
    "anapherArt",
    "unterkategorie",
    "spezifikation",
    "anker",
    "anapher",
    "verstaendnisfrage",
    "erwarteteAntwort",
    "antwortRichtig",
];

/// A single cell of the output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Integer(i64::from(v))
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Boolean(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Identity of one stimulus: item number plus anaphor type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StimulusKey {
    pub item_number: String,
    pub anaphor_type: String,
}

impl StimulusKey {
    pub fn new(item_number: impl Into<String>, anaphor_type: impl Into<String>) -> Self {
        Self {
            item_number: item_number.into(),
            anaphor_type: anaphor_type.into(),
        }
    }
}

impl fmt::Display for StimulusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.item_number, self.anaphor_type)
    }
}

/// Synthetic participant identifier, rendered zero-padded to three digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Lines belonging to one participant, header comment included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSegment<'a> {
    /// 1-based position of the segment in the log
    pub index: usize,
    pub lines: Vec<&'a str>,
}

/// Reception metadata taken from a segment's first data line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentHeader {
    /// Reception timestamp exactly as logged
    pub received_at: String,
    /// Hash identifying the participant's connection
    pub participant_hash: String,
    /// Date from the `# Results on ... GMT` comment, when it parses
    pub received_on: Option<DateTime<Utc>>,
}

/// Demographic answers of one participant
///
/// Fields keep first-insertion order. Inserting a label that already exists
/// overwrites its value in place; there is no merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicRecord {
    participant_id: ParticipantId,
    fields: Vec<(String, Option<String>)>,
}

impl DemographicRecord {
    /// Create a record holding only the participant identifier field
    pub fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            fields: vec![(
                PARTICIPANT_ID_COLUMN.to_string(),
                Some(participant_id.to_string()),
            )],
        }
    }

    pub fn participant_id(&self) -> ParticipantId {
        self.participant_id
    }

    /// Set a field; a repeated label overwrites the earlier value
    pub fn insert(&mut self, label: impl Into<String>, value: Option<String>) {
        let label = label.into();
        match self.fields.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((label, value)),
        }
    }

    /// Value of a field; `None` if the label was never seen
    pub fn get(&self, label: &str) -> Option<&Option<String>> {
        self.fields.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Answer to one comprehension question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensionResponse {
    pub question: String,
    /// Selected answer, lowercased
    pub answer: String,
    /// Expected answer, lowercased
    pub expected_answer: String,
    pub correct: bool,
    pub item_number: String,
    pub anaphor_type: String,
}

/// One reading-time measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRow {
    /// Position of the stimulus in the participant's trial sequence (1-based)
    #[serde(rename = "stimulusIdx")]
    pub stimulus_idx: u32,
    /// Both sentence parts joined
    #[serde(rename = "stimulusSatz")]
    pub stimulus_sentence: String,
    #[serde(rename = "wort")]
    pub word: String,
    /// Chunk index, continuous across both sentence parts
    #[serde(rename = "chunkIdx")]
    pub chunk_idx: i64,
    /// Signed distance to the critical region
    #[serde(rename = "posWrtAnapher")]
    pub pos_wrt_anaphor: i64,
    #[serde(rename = "leseZeit")]
    pub reading_time: String,
    #[serde(rename = "itemNummer")]
    pub item_number: String,
    pub block: String,
    #[serde(rename = "kontext")]
    pub context: String,
    #[serde(rename = "bedingung")]
    pub condition: String,
    #[serde(rename = "anapherArt")]
    pub anaphor_type: String,
    #[serde(rename = "unterkategorie")]
    pub subcategory: String,
    #[serde(rename = "spezifikation")]
    pub specification: String,
    #[serde(rename = "anker")]
    pub anchor: String,
    #[serde(rename = "anapher")]
    pub anaphor: String,
    #[serde(rename = "verstaendnisfrage")]
    pub question: Option<String>,
    #[serde(rename = "erwarteteAntwort")]
    pub expected_answer: Option<String>,
    #[serde(rename = "antwortRichtig")]
    pub answer_correct: Option<bool>,
}

impl TrialRow {
    pub fn stimulus_key(&self) -> StimulusKey {
        StimulusKey::new(self.item_number.clone(), self.anaphor_type.clone())
    }

    /// Cells in [`TRIAL_COLUMNS`] order
    pub fn cells(&self) -> Vec<CellValue> {
        vec![
            self.stimulus_idx.into(),
            self.stimulus_sentence.as_str().into(),
            self.word.as_str().into(),
            self.chunk_idx.into(),
            self.pos_wrt_anaphor.into(),
            self.reading_time.as_str().into(),
            self.item_number.as_str().into(),
            self.block.as_str().into(),
            self.context.as_str().into(),
            self.condition.as_str().into(),
            self.anaphor_type.as_str().into(),
            self.subcategory.as_str().into(),
            self.specification.as_str().into(),
            self.anchor.as_str().into(),
            self.anaphor.as_str().into(),
            self.question.as_deref().into(),
            self.expected_answer.as_deref().into(),
            self.answer_correct.into(),
        ]
    }
}

/// Trial rows of one participant with demographics broadcast as constant columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantTable {
    /// 1-based segment index in the log
    pub index: usize,
    pub header: Option<SegmentHeader>,
    pub demographics: DemographicRecord,
    pub rows: Vec<TrialRow>,
}

impl ParticipantTable {
    /// Trial columns followed by this participant's demographic columns
    pub fn columns(&self) -> Vec<&str> {
        TRIAL_COLUMNS
            .iter()
            .copied()
            .chain(self.demographics.labels())
            .collect()
    }

    /// Value of a column in one row, `None` if the column is not in this table
    pub fn cell(&self, row: usize, column: &str) -> Option<CellValue> {
        let trial = self.rows.get(row)?;
        if let Some(pos) = TRIAL_COLUMNS.iter().position(|c| *c == column) {
            return trial.cells().into_iter().nth(pos);
        }
        self.demographics
            .get(column)
            .map(|v| v.clone().into())
    }
}

/// All participant tables in log order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub tables: Vec<ParticipantTable>,
}

impl Corpus {
    /// Union of all columns: trial columns, then demographic columns in first-seen order
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = TRIAL_COLUMNS.iter().map(|c| c.to_string()).collect();
        for table in &self.tables {
            for label in table.demographics.labels() {
                if !columns.iter().any(|c| c == label) {
                    columns.push(label.to_string());
                }
            }
        }
        columns
    }

    /// Total number of trial rows
    pub fn len(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows aligned to [`Corpus::columns`]; columns a participant lacks are null
    pub fn records(&self) -> Vec<Vec<CellValue>> {
        let columns = self.columns();
        let demographic_columns = &columns[TRIAL_COLUMNS.len()..];

        let mut records = Vec::with_capacity(self.len());
        for table in &self.tables {
            let broadcast: Vec<CellValue> = demographic_columns
                .iter()
                .map(|c| {
                    table
                        .demographics
                        .get(c)
                        .cloned()
                        .flatten()
                        .into()
                })
                .collect();

            for row in &table.rows {
                let mut record = row.cells();
                record.extend(broadcast.iter().cloned());
                records.push(record);
            }
        }
        records
    }
}
