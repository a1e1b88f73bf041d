//! Conversion pipeline
//!
//! Orchestrates one conversion: detect columns once, walk the rows in
//! order through the field parsers, encode each valid record, and
//! accumulate the report. The pipeline is a pure synchronous transform -
//! it owns every intermediate value, so concurrent conversions share
//! nothing and need no locking.

use crate::columns::detect_columns;
use crate::encoder::{assemble_document, encode_record, payload_text};
use crate::fields::{parse_dlc, parse_identifier, parse_payload, parse_timeout, DEFAULT_DLC};
use crate::settings::ConversionSettings;
use crate::table::{CellValue, Table};
use crate::types::{ConversionReport, ConvertError, FrameRecord, PreviewEntry, Result};

/// Number of processed records captured for the live preview
const PREVIEW_LIMIT: usize = 10;

/// Successful conversion: the rendered document plus its report
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    /// Complete VSQ document text
    pub document: String,
    /// Statistics, warnings and preview accumulated during the run
    pub report: ConversionReport,
}

/// Convert one input table into a VSQ document
///
/// Rows that are entirely empty are dropped up front; row numbers in
/// warnings keep their original 1-based data-row positions. A row whose
/// identifier does not parse is skipped silently - only the payload/DLC
/// mismatch produces a recorded warning. Fails fast with
/// [`ConvertError::MissingColumns`] when no identifier or payload column
/// can be detected.
pub fn convert(table: &Table, settings: &ConversionSettings) -> Result<ConversionOutcome> {
    let columns = detect_columns(table.headers());
    let (Some(identifier_col), Some(payload_col)) = (columns.identifier, columns.payload) else {
        return Err(ConvertError::MissingColumns);
    };

    let mut report = ConversionReport {
        detected_columns: columns.named(table.headers()),
        ..ConversionReport::default()
    };
    let mut lines: Vec<String> = Vec::new();

    for (index, row) in table.rows().iter().enumerate() {
        let row_num = index + 1;
        if row.iter().all(CellValue::is_empty) {
            continue;
        }

        // Unparseable identifier: silent, unrecorded skip
        let Some(id) =
            parse_identifier(Table::cell(row, identifier_col), settings.force_extended)
        else {
            log::debug!("row {}: no usable identifier, skipping", row_num);
            continue;
        };

        let dlc = match columns.length {
            Some(col) => parse_dlc(Table::cell(row, col)),
            None => DEFAULT_DLC,
        };

        let timeout_ms = match columns.timeout {
            Some(col) => parse_timeout(Table::cell(row, col), settings.default_timeout_ms),
            None => settings.default_timeout_ms,
        };

        let payload = parse_payload(Table::cell(row, payload_col), dlc);
        if payload.meaningful > dlc as usize {
            report.warnings.push(format!(
                "Row {}: Data bytes ({}) exceed DLC ({})",
                row_num, payload.meaningful, dlc
            ));
        }

        let record = FrameRecord {
            id,
            dlc,
            payload: payload.bytes,
            timeout_ms,
        };

        let group = encode_record(&record, &settings.channel, settings.mode);

        if record.id.extended {
            report.extended_ids += 1;
        } else {
            report.standard_ids += 1;
        }

        if report.processed < PREVIEW_LIMIT {
            report.preview.push(PreviewEntry {
                line_num: report.processed + 1,
                can_id: record.id.to_string(),
                is_extended: record.id.extended,
                dlc: record.dlc,
                data: payload_text(&record.payload),
                timeout_ms: record.timeout_ms,
                raw: group.join("\n"),
            });
        }

        lines.extend(group);
        report.processed += 1;
    }

    log::info!(
        "converted {} frames ({} standard, {} extended, {} warnings)",
        report.processed,
        report.standard_ids,
        report.extended_ids,
        report.warnings.len()
    );

    Ok(ConversionOutcome {
        document: assemble_document(&settings.sequence_name, &lines),
        report,
    })
}
