//! Tabular input model and CSV reading
//!
//! The pipeline consumes a single logical table: an ordered header row plus
//! rows of raw cell values. Cells may be numeric, text, or empty; column
//! handles are plain indices. Rows are read-only once built.

use std::fs;
use std::path::Path;

use crate::types::{ConvertError, Result};

/// One raw cell value as read from the input table
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric cell (kept as f64, the way spreadsheet readers hand it over)
    Number(f64),
    /// Text cell
    Text(String),
    /// Blank or absent cell
    Empty,
}

impl CellValue {
    /// True if this cell carries no value
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Canonical text form used by the field parsers
    ///
    /// Whole numbers render without a fractional part, so a spreadsheet
    /// cell holding `4` reads as "4" rather than "4.0".
    pub(crate) fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
        }
    }
}

/// A single logical input table (header row + data rows)
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Column header names, in input order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, in input order
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Cell lookup tolerating short rows (missing trailing cells are empty)
    pub(crate) fn cell<'a>(row: &'a [CellValue], column: usize) -> &'a CellValue {
        row.get(column).unwrap_or(&CellValue::Empty)
    }

    /// Read a table from a UTF-8 CSV file with a single header row
    ///
    /// Blank cells become [`CellValue::Empty`], numeric-looking cells
    /// become [`CellValue::Number`], everything else stays text. Short
    /// rows are tolerated; a UTF-8 BOM on the first header is stripped.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_csv_str(&content)
    }

    /// Read a table from CSV text (see [`Table::from_csv_path`])
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ConvertError::TableParse(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ConvertError::TableParse(e.to_string()))?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        log::debug!("read table: {} columns, {} rows", headers.len(), rows.len());
        Ok(Self::new(headers, rows))
    }
}

/// Classify one raw CSV field into a cell value
fn parse_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_basic() {
        let file = create_temp_csv("CAN ID,DLC,Data\n0x123,4,11 22 33 44\n");
        let table = Table::from_csv_path(file.path()).unwrap();

        assert_eq!(table.headers(), &["CAN ID", "DLC", "Data"]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0][1], CellValue::Number(4.0));
        assert_eq!(table.rows()[0][2], CellValue::Text("11 22 33 44".into()));
    }

    #[test]
    fn test_read_csv_empty_cells() {
        let file = create_temp_csv("CAN ID,Data,Timeout\n0x100,AA BB,\n");
        let table = Table::from_csv_path(file.path()).unwrap();

        assert_eq!(table.rows()[0][2], CellValue::Empty);
    }

    #[test]
    fn test_read_csv_with_bom() {
        let file = create_temp_csv("\u{feff}CAN ID,Data\n0x100,AA\n");
        let table = Table::from_csv_path(file.path()).unwrap();

        assert_eq!(table.headers()[0], "CAN ID");
    }

    #[test]
    fn test_read_csv_short_rows() {
        let file = create_temp_csv("CAN ID,DLC,Data\n0x100\n");
        let table = Table::from_csv_path(file.path()).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row.len(), 1);
        assert_eq!(Table::cell(row, 2), &CellValue::Empty);
    }

    #[test]
    fn test_read_csv_missing_file() {
        let result = Table::from_csv_path(Path::new("/nonexistent/frames.csv"));
        assert!(matches!(result, Err(ConvertError::TableRead(_))));
    }

    #[test]
    fn test_cell_text_forms() {
        assert_eq!(CellValue::Number(4.0).to_text().unwrap(), "4");
        assert_eq!(CellValue::Number(99.5).to_text().unwrap(), "99.5");
        assert_eq!(CellValue::Text("  0x123  ".into()).to_text().unwrap(), "0x123");
        assert_eq!(CellValue::Text("   ".into()).to_text(), None);
        assert_eq!(CellValue::Empty.to_text(), None);
    }
}
