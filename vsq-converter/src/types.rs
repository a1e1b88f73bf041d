//! Core types for the VSQ converter library
//!
//! This module defines the record and report types that flow through the
//! conversion pipeline, plus the identifier classification logic. Records
//! are built fresh per row and consumed by the encoder - nothing is
//! retained across rows.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Maximum value of a standard (11-bit) CAN identifier
pub const STANDARD_ID_MAX: u32 = 0x7FF;

/// Maximum value of an extended (29-bit) CAN identifier
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;

/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("could not detect CAN ID or data columns in the input table")]
    MissingColumns,

    #[error("failed to read input table: {0}")]
    TableRead(#[from] std::io::Error),

    #[error("failed to parse input table: {0}")]
    TableParse(String),
}

/// A classified CAN identifier (standard 11-bit or extended 29-bit)
///
/// Classification is purely value-driven: anything above the 11-bit range
/// is extended, anything above the 29-bit range is invalid. The display
/// text is derived from the value and flag - it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanIdentifier {
    /// Numeric identifier value
    pub value: u32,
    /// True if this is an extended (29-bit) identifier
    pub extended: bool,
}

impl CanIdentifier {
    /// Classify a numeric identifier value
    ///
    /// `extended_hint` is set when the caller saw an explicit extended
    /// marker in the source text or a force-extended setting. Values above
    /// the 11-bit range are promoted to extended regardless of the hint;
    /// values above the 29-bit range yield `None`.
    pub fn classify(value: u32, extended_hint: bool) -> Option<Self> {
        let extended = extended_hint || value > STANDARD_ID_MAX;
        if extended && value > EXTENDED_ID_MAX {
            return None;
        }
        Some(Self { value, extended })
    }
}

impl fmt::Display for CanIdentifier {
    /// Render the tool-facing identifier text
    ///
    /// Extended identifiers use 8 uppercase hex digits plus an `x` suffix;
    /// standard identifiers use uppercase hex with a 3-digit minimum width.
    /// The width is cosmetic - it never affects classification.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extended {
            write!(f, "0x{:08X}x", self.value)
        } else {
            write!(f, "0x{:03X}", self.value)
        }
    }
}

/// A fully parsed and normalized frame row, ready for encoding
///
/// The payload is always the fixed 8-byte wire representation; `dlc` only
/// records how many source bytes the frame logically carries.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Classified identifier
    pub id: CanIdentifier,
    /// Data length code (0-8 classic CAN, up to 64 for CAN-FD)
    pub dlc: u8,
    /// Payload bytes, zero-padded to the fixed wire width
    pub payload: [u8; 8],
    /// Send timeout in milliseconds (1-60000)
    pub timeout_ms: u32,
}

/// Summary of one converted record, for the caller's live preview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewEntry {
    /// 1-based position among processed records
    pub line_num: usize,
    /// Rendered identifier text
    pub can_id: String,
    /// True if the identifier is extended
    pub is_extended: bool,
    /// Data length code
    pub dlc: u8,
    /// Rendered payload text (8 space-separated hex bytes)
    pub data: String,
    /// Timeout in milliseconds
    pub timeout_ms: u32,
    /// The emitted action line(s), newline-joined for cyclic groups
    pub raw: String,
}

/// Statistics and diagnostics accumulated over one conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Number of rows successfully converted into action lines
    pub processed: usize,
    /// Count of standard (11-bit) identifiers
    pub standard_ids: usize,
    /// Count of extended (29-bit) identifiers
    pub extended_ids: usize,
    /// Row-level warnings, in row order
    pub warnings: Vec<String>,
    /// Detected column roles (role name -> header name)
    pub detected_columns: BTreeMap<String, String>,
    /// Encoded summaries of the first 10 processed records
    pub preview: Vec<PreviewEntry>,
}
