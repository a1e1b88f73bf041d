//! Machine-readable result object (emitted with `--json`)

use serde::Serialize;
use std::collections::BTreeMap;

use vsq_converter::{ConversionOutcome, ConversionSettings, PreviewEntry};

/// Result object describing one successful conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub success: bool,
    pub filename: String,
    pub messages_processed: usize,
    pub standard_ids: usize,
    pub extended_ids: usize,
    pub warnings: Vec<String>,
    pub detected_columns: BTreeMap<String, String>,
    pub preview: Vec<PreviewEntry>,
    pub settings: ConversionSettings,
}

impl ConversionResult {
    /// Assemble the result object from a finished conversion
    pub fn from_outcome(
        filename: impl Into<String>,
        outcome: &ConversionOutcome,
        settings: &ConversionSettings,
    ) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            messages_processed: outcome.report.processed,
            standard_ids: outcome.report.standard_ids,
            extended_ids: outcome.report.extended_ids,
            warnings: outcome.report.warnings.clone(),
            detected_columns: outcome.report.detected_columns.clone(),
            preview: outcome.report.preview.clone(),
            settings: settings.clone(),
        }
    }
}

/// Result object describing a failed conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionFailure {
    pub success: bool,
    pub error: String,
}

impl ConversionFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsq_converter::{convert, CellValue, Table};

    #[test]
    fn test_result_object_shape() {
        let table = Table::new(
            vec!["CAN ID".into(), "Data".into()],
            vec![vec![
                CellValue::Text("0x123".into()),
                CellValue::Text("11 22".into()),
            ]],
        );
        let settings = ConversionSettings::default();
        let outcome = convert(&table, &settings).unwrap();

        let result = ConversionResult::from_outcome("frames.vsq", &outcome, &settings);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["filename"], "frames.vsq");
        assert_eq!(json["messages_processed"], 1);
        assert_eq!(json["standard_ids"], 1);
        assert_eq!(json["detected_columns"]["identifier"], "CAN ID");
        assert_eq!(json["settings"]["channel"], "CAN1");
    }

    #[test]
    fn test_failure_object_shape() {
        let failure = ConversionFailure::new("could not detect CAN ID or data columns");
        let json = serde_json::to_value(&failure).unwrap();

        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("columns"));
    }
}
