use super::*;
use crate::schema::{Schema, TableKind};
use arrow::array::{Array, Float32Array, Float64Array, StringArray, TimestampMicrosecondArray};
use chrono::NaiveDate;
use std::io::Cursor;

const MARKER: &str = "C,NEMP.WORLD,BIDPEROFFER,AEMO,PUBLIC,2021/07/31,00:00:00";
const HEADER: &str =
    "I,BIDS,BIDOFFERPERIOD,1,DUID,TRADINGDATE,OFFERDATETIME,MAXAVAIL,RAMPUPRATE";
const TRAILER: &str = "C,\"END OF REPORT\",7";

fn schema() -> Schema {
    let header: Vec<String> = HEADER.split(',').map(String::from).collect();
    Schema::resolve(TableKind::BidPerOffer, &header)
}

fn table(rows: &[&str]) -> String {
    let mut out = format!("{MARKER}\n{HEADER}\n");
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

fn row(duid: &str, date: &str, maxavail: &str) -> String {
    format!("D,BIDS,BIDOFFERPERIOD,1,{duid},{date},2021/07/06 12:30:00,{maxavail},3.25")
}

fn reader(csv: String, config: ReaderConfig) -> ChunkedReader<Cursor<String>> {
    ChunkedReader::from_reader(Cursor::new(csv), schema(), config).unwrap()
}

#[test]
fn test_batches_respect_chunk_size() -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<String> = (0..5)
        .map(|i| row(&format!("UNIT{i}"), "2021/07/07 00:00:00", "10"))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();

    let mut reader = reader(table(&rows), ReaderConfig::with_chunk_size(2));
    let sizes: Vec<usize> = reader
        .by_ref()
        .map(|b| b.map(|b| b.num_rows()))
        .collect::<Result<_, _>>()?;

    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(reader.rows_read(), 5);
    assert_eq!(reader.batches_read(), 3);
    Ok(())
}

#[test]
fn test_first_line_numbers() -> Result<(), Box<dyn std::error::Error>> {
    let rows = [
        row("A", "2021/07/07", "1"),
        row("B", "2021/07/07", "2"),
        row("C", "2021/07/07", "3"),
    ];
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let mut reader = reader(table(&rows), ReaderConfig::with_chunk_size(2));

    assert_eq!(reader.next_batch()?.unwrap().first_line(), 3);
    assert_eq!(reader.next_batch()?.unwrap().first_line(), 5);
    assert!(reader.next_batch()?.is_none());
    Ok(())
}

#[test]
fn test_typed_values() -> Result<(), Box<dyn std::error::Error>> {
    let csv = table(&[&row("AGLHAL", "2021/07/07 00:00:00", "12.5")]);
    let batch = reader(csv, ReaderConfig::default())
        .next_batch()?
        .unwrap()
        .into_record_batch();

    let duid = batch
        .column_by_name("DUID")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(duid.value(0), "AGLHAL");

    let maxavail = batch
        .column_by_name("MAXAVAIL")
        .unwrap()
        .as_any()
        .downcast_ref::<Float32Array>()
        .unwrap();
    assert_eq!(maxavail.value(0), 12.5);

    let ramp = batch
        .column_by_name("RAMPUPRATE")
        .unwrap()
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(ramp.value(0), 3.25);

    let offered = batch
        .column_by_name("OFFERDATETIME")
        .unwrap()
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .unwrap();
    let expected = NaiveDate::from_ymd_opt(2021, 7, 6)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    assert_eq!(offered.value(0), timestamp_micros(&expected));
    Ok(())
}

#[test]
fn test_empty_cells_are_null() -> Result<(), Box<dyn std::error::Error>> {
    let csv = table(&["D,BIDS,BIDOFFERPERIOD,1,AGLHAL,2021/07/07,,  ,"]);
    let batch = reader(csv, ReaderConfig::default())
        .next_batch()?
        .unwrap()
        .into_record_batch();

    assert!(batch.column_by_name("OFFERDATETIME").unwrap().is_null(0));
    assert!(batch.column_by_name("MAXAVAIL").unwrap().is_null(0));
    assert!(batch.column_by_name("RAMPUPRATE").unwrap().is_null(0));
    Ok(())
}

#[test]
fn test_dash_is_invalid_unless_configured() -> Result<(), Box<dyn std::error::Error>> {
    let csv = table(&[&row("AGLHAL", "2021/07/07", "-")]);

    let err = reader(csv.clone(), ReaderConfig::default())
        .next_batch()
        .unwrap_err();
    assert!(err.is_data_error());
    match err {
        ReadError::InvalidCell {
            line,
            column,
            value,
            ..
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "MAXAVAIL");
            assert_eq!(value, "-");
        }
        other => panic!("unexpected error: {other}"),
    }

    let config = ReaderConfig {
        null_markers: vec!["-".to_string()],
        ..Default::default()
    };
    let batch = reader(csv, config).next_batch()?.unwrap();
    assert!(batch.record_batch().column_by_name("MAXAVAIL").unwrap().is_null(0));
    Ok(())
}

#[test]
fn test_invalid_timestamp() {
    let csv = table(&[&row("AGLHAL", "07/07/2021", "1")]);
    let err = reader(csv, ReaderConfig::default()).next_batch().unwrap_err();
    assert!(matches!(err, ReadError::InvalidCell { ref column, .. } if column == "TRADINGDATE"));
}

#[test]
fn test_trailer_is_padded_with_nulls() -> Result<(), Box<dyn std::error::Error>> {
    let csv = table(&[&row("AGLHAL", "2021/07/07", "1"), TRAILER]);
    let batch = reader(csv, ReaderConfig::default()).next_batch()?.unwrap();
    assert_eq!(batch.num_rows(), 2);

    let last = batch.record_batch();
    assert!(last.column_by_name("DUID").unwrap().is_null(1));
    assert!(last.column_by_name("TRADINGDATE").unwrap().is_null(1));

    let stripped = batch.without_last_row();
    assert_eq!(stripped.num_rows(), 1);
    assert_eq!(stripped.first_line(), batch.first_line());
    Ok(())
}

#[test]
fn test_too_many_fields() {
    let long = format!("{},extra", row("AGLHAL", "2021/07/07", "1"));
    let err = reader(table(&[&long]), ReaderConfig::default())
        .next_batch()
        .unwrap_err();
    assert!(matches!(
        err,
        ReadError::TooManyFields { line: 3, found: 10, expected: 9 }
    ));
}

#[test]
fn test_iterator_fuses_after_error() {
    let rows = [
        row("A", "2021/07/07", "bad"),
        row("B", "2021/07/07", "1"),
    ];
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let mut reader = reader(table(&rows), ReaderConfig::with_chunk_size(1));

    assert!(matches!(reader.next(), Some(Err(_))));
    assert!(reader.next().is_none());
}

#[test]
fn test_header_only_file_yields_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = reader(table(&[]), ReaderConfig::default());
    assert!(reader.next_batch()?.is_none());
    assert_eq!(reader.rows_read(), 0);
    Ok(())
}

#[test]
fn test_rejects_bad_setup() {
    let err = ChunkedReader::from_reader(
        Cursor::new(table(&[])),
        schema(),
        ReaderConfig::with_chunk_size(0),
    )
    .err()
    .unwrap();
    assert!(matches!(err, ReadError::InvalidConfig(_)));

    #[cfg(target_pointer_width = "64")]
    {
        let err = ChunkedReader::from_reader(
            Cursor::new(table(&[])),
            schema(),
            ReaderConfig::with_chunk_size(MAX_CHUNK_SIZE + 1),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ReadError::InvalidConfig(_)));
    }

    let err = ChunkedReader::from_reader(
        Cursor::new(format!("{MARKER}\n")),
        schema(),
        ReaderConfig::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, ReadError::MissingHeader));

    let err = ChunkedReader::from_reader(
        Cursor::new(format!("{MARKER}\nI,BIDS,BIDOFFERPERIOD\n")),
        schema(),
        ReaderConfig::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, ReadError::SchemaMismatch { found: 3, expected: 9 }));
}

#[test]
fn test_restart_rereads_from_first_row() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("PUBLIC_DVD_BIDPEROFFER_202107010000.CSV");
    std::fs::write(
        &path,
        table(&[&row("A", "2021/07/07", "1"), &row("B", "2021/07/08", "2")]),
    )?;

    let mut reader = ChunkedReader::open(&path, schema(), ReaderConfig::with_chunk_size(10))?;
    assert_eq!(reader.next_batch()?.unwrap().num_rows(), 2);
    assert!(reader.next_batch()?.is_none());

    reader.restart()?;
    assert_eq!(reader.rows_read(), 0);
    assert_eq!(reader.next_batch()?.unwrap().num_rows(), 2);
    Ok(())
}

#[test]
fn test_parse_timestamp_forms() {
    let full = parse_timestamp("2021/07/07 04:05:00").unwrap();
    assert_eq!(full.to_string(), "2021-07-07 04:05:00");

    let date_only = parse_timestamp("2021/07/07").unwrap();
    assert_eq!(date_only.to_string(), "2021-07-07 00:00:00");

    assert!(parse_timestamp("2021-07-07").is_none());
    assert!(parse_timestamp("-").is_none());
}

#[test]
fn test_estimate_row_size() -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<String> = (0..20)
        .map(|i| row(&format!("U{i:02}"), "2021/07/07 00:00:00", "10"))
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();

    let estimate = estimate_row_size_from(Cursor::new(table(&refs)), &schema(), 10)?.unwrap();
    assert_eq!(estimate.sample_rows, 10);

    // Every sampled row has the same length plus its newline
    let expected_disk = (rows[0].len() + 1) as f64;
    assert!((estimate.disk_bytes_per_row - expected_disk).abs() < 1e-9);
    assert!(estimate.memory_bytes_per_row > 0.0);
    assert_eq!(estimate.estimated_rows(expected_disk as u64 * 100), 100);
    Ok(())
}

#[test]
fn test_estimate_without_rows_is_none() -> Result<(), Box<dyn std::error::Error>> {
    let estimate = estimate_row_size_from(Cursor::new(table(&[])), &schema(), 10)?;
    assert!(estimate.is_none());
    Ok(())
}
