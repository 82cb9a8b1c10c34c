//! CSV encoding
//!
//! Writes a corpus as one CSV table: a header row with the column union, then
//! one record per trial row.

use crate::error::ParseError;
use crate::types::{CellValue, Corpus};
use std::io::{self, Write};

/// CSV encoder for corpora
pub struct CorpusEncoder {
    delimiter: u8,
}

impl Default for CorpusEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusEncoder {
    /// Create a comma-separated encoder
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Create an encoder with a specific field delimiter
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write the corpus to any writer
    pub fn write<W: Write>(&self, corpus: &Corpus, writer: W) -> Result<(), ParseError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer.write_record(corpus.columns())?;
        for record in corpus.records() {
            csv_writer.write_record(record.iter().map(render_cell))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Encode the corpus into a CSV string
    pub fn encode_to_csv(&self, corpus: &Corpus) -> Result<String, ParseError> {
        let mut buffer = Vec::new();
        self.write(corpus, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ParseError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Nulls are empty cells and booleans use the `True`/`False` spelling
fn render_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Boolean(true) => "True".to_string(),
        CellValue::Boolean(false) => "False".to_string(),
        CellValue::Text(s) => s.clone(),
    }
}
