//! VSQ Converter Library
//!
//! A stateless, reusable library for converting tabular CAN frame lists
//! (one row per frame) into Vector Visual Sequence (VSQ) replay scripts.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on conversion:
//! - Reads a single tabular input (header row + raw cell values)
//! - Auto-detects which columns carry identifier, DLC, payload and timeout
//! - Parses and normalizes each row into a CAN frame record
//! - Emits one or more scripted bus actions per frame (simple or cyclic)
//!
//! The library does NOT:
//! - Validate frames against a signal database (DBC)
//! - Deduplicate or reorder frames
//! - Handle file uploads, HTTP or any UI concerns
//! - Guarantee real-time delivery - it only produces a static script
//!
//! All higher-level functionality is in the application layer (vsq-cli).
//!
//! # Example Usage
//!
//! ```
//! use vsq_converter::{convert, CellValue, ConversionSettings, Table};
//!
//! let table = Table::new(
//!     vec!["CAN ID".into(), "DLC".into(), "Data".into()],
//!     vec![vec![
//!         CellValue::Text("0x123".into()),
//!         CellValue::Number(4.0),
//!         CellValue::Text("11 22 33 44".into()),
//!     ]],
//! );
//!
//! let settings = ConversionSettings::new().with_channel("CAN1");
//! let outcome = convert(&table, &settings).unwrap();
//!
//! assert_eq!(outcome.report.processed, 1);
//! assert!(outcome.document.contains("CAN1::0x123"));
//! ```

// Public modules
pub mod pipeline;
pub mod settings;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use pipeline::{convert, ConversionOutcome};
pub use settings::{ConversionSettings, EncodingMode};
pub use table::{CellValue, Table};
pub use types::{
    CanIdentifier, ConversionReport, ConvertError, FrameRecord, PreviewEntry, Result,
};

// Internal modules (not exposed in public API)
mod columns;
mod encoder;
mod fields;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty table fails column detection, nothing more
        let table = Table::new(vec!["Comment".into()], vec![]);
        let result = convert(&table, &ConversionSettings::default());
        assert!(matches!(result, Err(ConvertError::MissingColumns)));
    }
}
