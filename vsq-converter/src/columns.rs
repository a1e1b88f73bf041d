//! Column role detection
//!
//! Assigns a semantic role to each input header by case-insensitive
//! keyword substring matching. Scanning is left to right and the first
//! header matching a role keeps it; a header stays available to other,
//! still-unfilled roles.

use std::collections::BTreeMap;

/// Keywords recognized for the identifier column
const IDENTIFIER_KEYWORDS: &[&str] = &["can", "id", "canid", "can_id", "identifier", "pgn"];

/// Keywords recognized for the DLC column
const LENGTH_KEYWORDS: &[&str] = &["dlc", "length", "len"];

/// Keywords recognized for the payload column
const PAYLOAD_KEYWORDS: &[&str] = &["byte", "data", "payload", "message"];

/// Keywords recognized for the timeout column
const TIMEOUT_KEYWORDS: &[&str] = &["timeout", "time", "delay", "wait"];

/// Keywords recognized for the informational label column
const LABEL_KEYWORDS: &[&str] = &["address", "addr", "name", "description"];

/// Detected column roles, as indices into the header row
///
/// Built once per input table; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ColumnMapping {
    pub identifier: Option<usize>,
    pub length: Option<usize>,
    pub payload: Option<usize>,
    pub timeout: Option<usize>,
    pub label: Option<usize>,
}

impl ColumnMapping {
    /// Role name -> header name view for the conversion report
    pub fn named(&self, headers: &[String]) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (role, column) in [
            ("identifier", self.identifier),
            ("length", self.length),
            ("payload", self.payload),
            ("timeout", self.timeout),
            ("label", self.label),
        ] {
            if let Some(index) = column {
                if let Some(header) = headers.get(index) {
                    map.insert(role.to_string(), header.clone());
                }
            }
        }
        map
    }
}

/// Detect column roles from the header row
pub(crate) fn detect_columns(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();

    for (index, header) in headers.iter().enumerate() {
        let lower = header.to_lowercase();

        if mapping.identifier.is_none() && matches_any(&lower, IDENTIFIER_KEYWORDS) {
            mapping.identifier = Some(index);
        }
        if mapping.length.is_none() && matches_any(&lower, LENGTH_KEYWORDS) {
            mapping.length = Some(index);
        }
        if mapping.payload.is_none() && matches_any(&lower, PAYLOAD_KEYWORDS) {
            mapping.payload = Some(index);
        }
        // A "Cycle Time" column is a cyclic-interval column, not a timeout
        if mapping.timeout.is_none()
            && !lower.contains("cycle")
            && matches_any(&lower, TIMEOUT_KEYWORDS)
        {
            mapping.timeout = Some(index);
        }
        if mapping.label.is_none() && matches_any(&lower, LABEL_KEYWORDS) {
            mapping.label = Some(index);
        }
    }

    log::debug!("detected columns: {:?}", mapping);
    mapping
}

fn matches_any(header_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| header_lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_detect_typical_headers() {
        let mapping = detect_columns(&headers(&["CAN ID", "DLC", "Data", "Timeout"]));

        assert_eq!(mapping.identifier, Some(0));
        assert_eq!(mapping.length, Some(1));
        assert_eq!(mapping.payload, Some(2));
        assert_eq!(mapping.timeout, Some(3));
        assert_eq!(mapping.label, None);
    }

    #[test]
    fn test_first_match_wins() {
        // Both headers match the identifier role; the first keeps it
        let mapping = detect_columns(&headers(&["Identifier", "CAN ID", "Payload"]));

        assert_eq!(mapping.identifier, Some(0));
        assert_eq!(mapping.payload, Some(2));
    }

    #[test]
    fn test_header_can_fill_multiple_roles() {
        // "Message Name" matches both payload ("message") and label ("name")
        let mapping = detect_columns(&headers(&["CAN ID", "Message Name"]));

        assert_eq!(mapping.payload, Some(1));
        assert_eq!(mapping.label, Some(1));
    }

    #[test]
    fn test_cycle_time_is_not_a_timeout() {
        let mapping = detect_columns(&headers(&["CAN ID", "Data", "Cycle Time"]));

        assert_eq!(mapping.timeout, None);
    }

    #[test]
    fn test_missing_required_columns() {
        let mapping = detect_columns(&headers(&["Comment", "Node"]));
        assert_eq!(mapping.identifier, None);
        assert_eq!(mapping.payload, None);

        let mapping = detect_columns(&headers(&["CAN ID", "DLC"]));
        assert_eq!(mapping.payload, None);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let input = headers(&["PGN", "Len", "Payload", "Delay", "Description"]);
        let first = detect_columns(&input);
        let second = detect_columns(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_named_mapping() {
        let input = headers(&["CAN ID", "Data"]);
        let named = detect_columns(&input).named(&input);

        assert_eq!(named.get("identifier"), Some(&"CAN ID".to_string()));
        assert_eq!(named.get("payload"), Some(&"Data".to_string()));
        assert_eq!(named.get("timeout"), None);
    }
}
