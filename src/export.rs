// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Log Export
//
// Delimited text export of the event log. Header row = field names of the
// first record, one row per record, CRLF line endings. Fields are never
// quoted: free text is sanitized when a record is built, and export refuses a
// log that still carries the separator or a line break.

use crate::event_log::{EventLog, RoundRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("event log is empty")]
    EmptyLog,

    #[error("record {row} field {field} contains the separator {separator:?}")]
    UnsanitizedField {
        row: usize,
        field: &'static str,
        separator: char,
    },

    #[error("record {row} field {field} contains a line break")]
    LineBreakInField { row: usize, field: &'static str },
}

pub const LINE_TERMINATOR: &str = "\r\n";

/// Download filename for a session's log.
pub fn export_filename(user_id: &str) -> String {
    format!("fermentation_log_{}.csv", user_id)
}

#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    separator: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl CsvExporter {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn export(&self, log: &EventLog) -> Result<String, ExportError> {
        self.export_records(log.records())
    }

    pub fn export_records(&self, records: &[RoundRecord]) -> Result<String, ExportError> {
        let first = records.first().ok_or(ExportError::EmptyLog)?;
        let sep = self.separator.to_string();

        let header: Vec<&str> = first.fields().into_iter().map(|(name, _)| name).collect();
        let mut out = header.join(&sep);
        out.push_str(LINE_TERMINATOR);

        for (row, record) in records.iter().enumerate() {
            let fields = record.fields();
            for (field, value) in &fields {
                if value.contains(self.separator) {
                    return Err(ExportError::UnsanitizedField {
                        row,
                        field: *field,
                        separator: self.separator,
                    });
                }
                if value.contains(['\r', '\n']) {
                    return Err(ExportError::LineBreakInField { row, field: *field });
                }
            }
            let values: Vec<String> = fields.into_iter().map(|(_, v)| v).collect();
            out.push_str(&values.join(&sep));
            out.push_str(LINE_TERMINATOR);
        }

        log::info!("[EXPORT] {} records, {} bytes", records.len(), out.len());
        Ok(out)
    }
}
