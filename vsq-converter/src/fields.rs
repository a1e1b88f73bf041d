//! Per-field cell parsers
//!
//! Independent, stateless parsers for the identifier, DLC, payload and
//! timeout cells of one frame row. Each parser owns its own defaulting
//! policy: an unparseable identifier drops the row, an out-of-range DLC
//! is discarded in favour of the default, and an out-of-range timeout is
//! clamped.

use crate::table::CellValue;
use crate::types::CanIdentifier;

/// Default DLC when the cell is missing, unparseable or out of range
pub(crate) const DEFAULT_DLC: u8 = 8;

/// CAN-FD ceiling for the data length code
const MAX_DLC: u64 = 64;

/// Upper clamp for the per-frame timeout (ms)
const MAX_TIMEOUT_MS: i64 = 60_000;

/// Parse and classify the identifier cell
///
/// Native numbers are used directly (decimal value). Text is lowercased,
/// a `0x` prefix is stripped, an explicit `ext` marker or residual `x`
/// flags the identifier as extended, and the remainder parses as hex.
/// Returns `None` for empty, unparseable or out-of-range input - the
/// caller skips such rows silently.
pub(crate) fn parse_identifier(cell: &CellValue, force_extended: bool) -> Option<CanIdentifier> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(n) => {
            if !n.is_finite() || *n < 0.0 || *n > u32::MAX as f64 {
                return None;
            }
            CanIdentifier::classify(n.trunc() as u32, force_extended)
        }
        CellValue::Text(s) => {
            let lower = s.trim().to_lowercase();
            let stripped = lower.strip_prefix("0x").unwrap_or(&lower);

            // "ext" and a bare trailing "x" both mark an extended identifier
            let marker = stripped.contains('x');
            let digits = stripped.replace("ext", "").replace('x', "");

            let value = u32::from_str_radix(digits.trim(), 16).ok()?;
            CanIdentifier::classify(value, force_extended || marker)
        }
    }
}

/// Parse the DLC cell
///
/// Extracts the first run of decimal digits anywhere in the text, so
/// "DLC = 3" reads as 3. Values above the CAN-FD ceiling are treated as
/// noise and revert to the default rather than clamping.
pub(crate) fn parse_dlc(cell: &CellValue) -> u8 {
    let Some(text) = cell.to_text() else {
        return DEFAULT_DLC;
    };

    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u64>() {
        Ok(value) if value <= MAX_DLC => value as u8,
        _ => DEFAULT_DLC,
    }
}

/// Parsed payload cell: fixed-width wire bytes plus a source-byte count
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedPayload {
    /// Wire representation, always exactly 8 bytes (zero-padded)
    pub bytes: [u8; 8],
    /// Count of meaningful (non-zero) byte tokens in the source cell,
    /// before DLC truncation - used for the overflow warning
    pub meaningful: usize,
}

/// Parse the payload cell against the row's resolved DLC
///
/// Separators (comma, semicolon, colon) normalize to whitespace; at most
/// `dlc` leading tokens are consumed, and the wire payload is always
/// padded to exactly 8 bytes regardless of DLC.
pub(crate) fn parse_payload(cell: &CellValue, dlc: u8) -> ParsedPayload {
    let mut bytes = [0u8; 8];

    let Some(text) = cell.to_text() else {
        return ParsedPayload { bytes, meaningful: 0 };
    };

    let normalized = text.replace([',', ';', ':'], " ");
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let meaningful = tokens
        .iter()
        .filter(|t| parse_byte_token(t) != 0)
        .count();

    for (slot, token) in bytes.iter_mut().zip(tokens.iter().take(dlc as usize)) {
        *slot = parse_byte_token(token);
    }

    ParsedPayload { bytes, meaningful }
}

/// Normalize one payload token into a byte value
///
/// Strips an optional `0x` prefix; a token with any non-hex character
/// becomes `00`, and a token longer than two characters keeps only its
/// last two.
fn parse_byte_token(token: &str) -> u8 {
    let upper = token.to_ascii_uppercase();
    let hex = upper.strip_prefix("0X").unwrap_or(&upper);

    if hex.is_empty() || hex.bytes().any(|b| !b.is_ascii_hexdigit()) {
        return 0;
    }

    let tail = if hex.len() > 2 { &hex[hex.len() - 2..] } else { hex };
    u8::from_str_radix(tail, 16).unwrap_or(0)
}

/// Parse the timeout cell
///
/// Float-tolerant; the value truncates to whole milliseconds. Values
/// below 1 fall back to the default, values above 60000 clamp down.
pub(crate) fn parse_timeout(cell: &CellValue, default_ms: u32) -> u32 {
    let Some(text) = cell.to_text() else {
        return default_ms;
    };

    let Ok(value) = text.parse::<f64>() else {
        return default_ms;
    };
    if !value.is_finite() {
        return default_ms;
    }

    let ms = value.trunc() as i64;
    if ms < 1 {
        default_ms
    } else if ms > MAX_TIMEOUT_MS {
        MAX_TIMEOUT_MS as u32
    } else {
        ms as u32
    }
}
