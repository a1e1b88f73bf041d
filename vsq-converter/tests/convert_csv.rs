//! End-to-end test: CSV file on disk -> VSQ document

use std::io::Write;

use tempfile::NamedTempFile;
use vsq_converter::{convert, ConversionSettings, Table};

#[test]
fn csv_file_to_vsq_document() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "CAN ID,DLC,Data,Timeout\n\
         0x123,4,11 22 33 44,100\n\
         1FFFFFF,2,AA BB,\n\
         ,,,\n\
         garbage,8,55 66,\n"
    )
    .unwrap();

    let table = Table::from_csv_path(file.path()).unwrap();
    let settings = ConversionSettings::new().with_sequence_name("BenchRun");
    let outcome = convert(&table, &settings).unwrap();

    // Two usable rows: one standard, one extended; the empty row and the
    // row with an unparseable identifier disappear silently
    assert_eq!(outcome.report.processed, 2);
    assert_eq!(outcome.report.standard_ids, 1);
    assert_eq!(outcome.report.extended_ids, 1);
    assert!(outcome.report.warnings.is_empty());

    let lines: Vec<&str> = outcome.document.lines().collect();
    assert_eq!(lines[0], "<?xml version=\"1.0\" encoding=\"utf-8\"?>");
    assert!(outcome.document.contains("<LogFile>BenchRun.csv</LogFile>"));
    assert_eq!(
        lines[lines.len() - 2],
        "1,Send CAN Raw Frame,CAN1::0x123,=,11 22 33 44 00 00 00 00,100,,False,False,False"
    );
    assert_eq!(
        lines[lines.len() - 1],
        "1,Send CAN Raw Frame,CAN1::0x01FFFFFFx,=,AA BB 00 00 00 00 00 00,3000,,False,False,False"
    );
}
