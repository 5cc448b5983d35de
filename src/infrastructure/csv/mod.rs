// ============================================================
// CSV EXPORT
// ============================================================
// Semicolon-delimited export with a UTF-8 BOM so spreadsheet tools
// pick the right encoding, one row per test case, fixed column order.

use std::io::Write;
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCase;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub const COLUMNS: [&str; 10] = [
    "archivo_hu",
    "criterio",
    "id_caso",
    "tipo_prueba",
    "prioridad",
    "Automatizar",
    "descripcion",
    "precondiciones",
    "pasos",
    "resultado_esperado",
];

pub struct CsvExporter {
    delimiter: u8,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the cases to any sink, BOM first.
    pub fn write<W: Write>(&self, cases: &[TestCase], mut sink: W) -> Result<()> {
        sink.write_all(UTF8_BOM)
            .map_err(|e| AppError::IoError(format!("Failed to write BOM: {}", e)))?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(sink);

        writer
            .write_record(COLUMNS)
            .map_err(|e| AppError::IoError(format!("Failed to write CSV header: {}", e)))?;

        for case in cases {
            writer
                .write_record([
                    case.story_file.as_str(),
                    case.criterion.as_str(),
                    case.case_id.as_str(),
                    case.test_type.as_str(),
                    case.priority.as_str(),
                    case.automate.as_str(),
                    case.description.as_str(),
                    case.preconditions.as_str(),
                    case.steps.as_str(),
                    case.expected_result.as_str(),
                ])
                .map_err(|e| AppError::IoError(format!("Failed to write CSV row: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| AppError::IoError(format!("Failed to flush CSV: {}", e)))?;
        Ok(())
    }

    /// Serialize the cases into an in-memory CSV byte buffer.
    pub fn to_bytes(&self, cases: &[TestCase]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(cases, &mut buffer)?;
        Ok(buffer)
    }

    /// Write the cases to a file path.
    pub fn write_file(&self, cases: &[TestCase], path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| AppError::IoError(format!("Failed to create {}: {}", path.display(), e)))?;
        self.write(cases, file)
    }
}
