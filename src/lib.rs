//! PCIbex Results - reading-time log parser
//!
//! Turns the raw results log of a PCIbex self-paced reading study into one
//! tidy table through a deterministic pipeline: participant segmentation →
//! section classification → demographics, comprehension and trial extraction
//! → participant assembly → corpus merge.
//!
//! ## Modules
//!
//! - **Pipeline**: [`parse_results`] and [`ResultsProcessor`] run the full pipeline
//! - **Encoder**: [`CorpusEncoder`] writes the merged corpus as CSV

pub mod assembler;
pub mod comprehension;
pub mod config;
pub mod demographics;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod sections;
pub mod segmenter;
pub mod trials;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::ParserConfig;
pub use demographics::ParticipantIdSequence;
pub use encoder::CorpusEncoder;
pub use error::ParseError;
pub use pipeline::{parse_results, process_participant, results_to_csv, ResultsProcessor};
pub use types::{Corpus, ParticipantTable, TrialRow};

// Schema exports
pub use schema::{RawLine, SCHEMA_VERSION};

/// Crate version
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name used in CLI reports
pub const PRODUCER_NAME: &str = "pcibex-results";
