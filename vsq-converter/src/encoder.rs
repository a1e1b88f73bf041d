//! Sequence encoding
//!
//! Turns a frame record into VSQ action lines and assembles the output
//! document. Every action line is the same fixed 10-field comma-separated
//! shape; the document is a static settings header followed by the action
//! lines in row order, with no trailing metadata.

use crate::settings::EncodingMode;
use crate::types::FrameRecord;

/// Action name for a one-shot frame transmission
const SEND_ACTION: &str = "Send CAN Raw Frame";

/// Action name starting a cyclic transmission
const START_CYCLIC_ACTION: &str = "Start Cyclic CAN Raw Frame";

/// Action name stopping a cyclic transmission
const STOP_CYCLIC_ACTION: &str = "Stop Cyclic CAN Raw Frame";

/// Render the document's fixed settings header
///
/// Static logging/execution settings, parameterized only by the sequence
/// name (log file name and symbol display).
pub(crate) fn document_header(sequence_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<VisualSequence version="1">
  <Settings>
    <NumberOfRepetitions>1</NumberOfRepetitions>
    <StartOnMeasurementStart>False</StartOnMeasurementStart>
    <RunUntilMeasurementStop>False</RunUntilMeasurementStop>
    <DebugMode>False</DebugMode>
    <ShowCommentColumn>False</ShowCommentColumn>
    <LogToWrite>True</LogToWrite>
    <LogToFile>False</LogToFile>
    <LogFile>{name}.csv</LogFile>
    <CSVColumnSeparator>,</CSVColumnSeparator>
    <CSVDecimalSymbol>.</CSVDecimalSymbol>
    <CSVDecimalPlaces>6</CSVDecimalPlaces>
    <LogTimeStamp>False</LogTimeStamp>
    <SymbolNameDisplay>{name}</SymbolNameDisplay>
    <WaitForKeyKey />
    <CheckOutputFailedOnly>False</CheckOutputFailedOnly>
    <UseSignalLayer>False</UseSignalLayer>
    <ExecMode>Standard</ExecMode>
  </Settings>
</VisualSequence>"#,
        name = sequence_name
    )
}

/// Render the payload as 8 space-separated uppercase hex bytes
pub(crate) fn payload_text(payload: &[u8; 8]) -> String {
    payload
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One action line: `seq,action,channel::id,op,payload,timeout,comment,flags`
fn action_line(action: &str, channel: &str, id_text: &str, payload: &str, timeout_ms: u32) -> String {
    format!(
        "1,{action},{channel}::{id},=,{payload},{timeout},,False,False,False",
        action = action,
        channel = channel,
        id = id_text,
        payload = payload,
        timeout = timeout_ms,
    )
}

/// Encode one frame record into its action line group
///
/// Simple mode emits a single send line. Cyclic mode brackets the send
/// line with an explicit start (carrying the cycle interval, no payload)
/// and stop (no payload) so the periodic frame is bounded by actions
/// rather than an implicit duration.
pub(crate) fn encode_record(record: &FrameRecord, channel: &str, mode: EncodingMode) -> Vec<String> {
    let id_text = record.id.to_string();
    let payload = payload_text(&record.payload);
    let send = action_line(SEND_ACTION, channel, &id_text, &payload, record.timeout_ms);

    match mode {
        EncodingMode::Simple => vec![send],
        EncodingMode::Cyclic { interval_ms } => vec![
            action_line(START_CYCLIC_ACTION, channel, &id_text, "", interval_ms),
            send,
            action_line(STOP_CYCLIC_ACTION, channel, &id_text, "", 0),
        ],
    }
}

/// Assemble the final document from the header and all line groups
pub(crate) fn assemble_document(sequence_name: &str, lines: &[String]) -> String {
    let mut parts = Vec::with_capacity(lines.len() + 1);
    parts.push(document_header(sequence_name));
    parts.extend(lines.iter().cloned());
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CanIdentifier;

    fn record() -> FrameRecord {
        FrameRecord {
            id: CanIdentifier::classify(0x123, false).unwrap(),
            dlc: 4,
            payload: [0x11, 0x22, 0x33, 0x44, 0, 0, 0, 0],
            timeout_ms: 100,
        }
    }

    #[test]
    fn test_simple_line_shape() {
        let lines = encode_record(&record(), "CAN1", EncodingMode::Simple);

        assert_eq!(lines, vec![
            "1,Send CAN Raw Frame,CAN1::0x123,=,11 22 33 44 00 00 00 00,100,,False,False,False"
                .to_string()
        ]);
        // Exactly the fixed 10-field shape
        assert_eq!(lines[0].split(',').count(), 10);
    }

    #[test]
    fn test_cyclic_line_group() {
        let lines = encode_record(&record(), "CAN1", EncodingMode::Cyclic { interval_ms: 50 });

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "1,Start Cyclic CAN Raw Frame,CAN1::0x123,=,,50,,False,False,False"
        );
        assert_eq!(
            lines[1],
            "1,Send CAN Raw Frame,CAN1::0x123,=,11 22 33 44 00 00 00 00,100,,False,False,False"
        );
        assert_eq!(
            lines[2],
            "1,Stop Cyclic CAN Raw Frame,CAN1::0x123,=,,0,,False,False,False"
        );
        for line in &lines {
            assert_eq!(line.split(',').count(), 10);
        }
    }

    #[test]
    fn test_payload_text_fixed_width() {
        assert_eq!(
            payload_text(&[0xAA, 0xBB, 0, 0, 0, 0, 0, 0]),
            "AA BB 00 00 00 00 00 00"
        );
    }

    #[test]
    fn test_header_parameterized_by_name() {
        let header = document_header("Bench");

        assert!(header.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(header.contains("<LogFile>Bench.csv</LogFile>"));
        assert!(header.contains("<SymbolNameDisplay>Bench</SymbolNameDisplay>"));
        assert!(header.ends_with("</VisualSequence>"));
    }

    #[test]
    fn test_assemble_document_no_trailer() {
        let lines = vec!["1,a,b,=,,1,,False,False,False".to_string()];
        let document = assemble_document("Seq", &lines);

        assert!(document.ends_with("1,a,b,=,,1,,False,False,False"));
        assert_eq!(document.matches("</VisualSequence>").count(), 1);
    }
}
