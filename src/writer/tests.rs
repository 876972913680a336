use super::*;
use crate::metadata::SegmentMetadata;
use crate::schema::{TableKind, KEY_PARTITION_TOKEN};
use arrow::array::{ArrayRef, Float32Array, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use std::sync::Arc;
use tempfile::tempdir;

fn micros(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
        .and_utc()
        .timestamp_micros()
}

fn test_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("DUID", DataType::Utf8, true),
        Field::new(
            "TRADINGDATE",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            true,
        ),
        Field::new("MAXAVAIL", DataType::Float32, true),
    ]))
}

fn test_batch(duids: &[&str], dates: &[Option<i64>], maxavail: &[f32]) -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(duids.to_vec())),
        Arc::new(TimestampMicrosecondArray::from(dates.to_vec())),
        Arc::new(Float32Array::from(maxavail.to_vec())),
    ];
    RecordBatch::try_new(test_schema(), columns).unwrap()
}

fn writer(dir: &std::path::Path, partition_index: usize) -> PartitionWriter {
    let column = test_schema().field(partition_index).name().clone();
    PartitionWriter::new(
        dir,
        test_schema(),
        partition_index,
        SegmentMetadata::new(TableKind::BidPerOffer, &column),
        WriterConfig::fast_write(),
    )
    .unwrap()
}

fn parquet_rows(path: &std::path::Path) -> i64 {
    let reader = SerializedFileReader::new(File::open(path).unwrap()).unwrap();
    reader.metadata().file_metadata().num_rows()
}

#[test]
fn test_segment_file_name() {
    assert_eq!(segment_file_name("20210707", 1), "20210707-chunk-001.parquet");
    assert_eq!(segment_file_name("20210707", 42), "20210707-chunk-042.parquet");
    assert_eq!(segment_file_name("20210707", 1000), "20210707-chunk-1000.parquet");
}

#[test]
fn test_next_sequence() {
    assert_eq!(next_sequence(Vec::<String>::new(), "20210707"), 1);

    let names = [
        "20210707-chunk-001.parquet",
        "20210707-chunk-999.parquet",
        "20210707-chunk-1000.parquet",
        "20210708-chunk-005.parquet",
        "20210707-chunk-abc.parquet",
        "20210707-chunk-002.parquet.tmp",
        "notes.txt",
    ];
    assert_eq!(next_sequence(names, "20210707"), 1001);
    assert_eq!(next_sequence(names, "20210708"), 6);
    assert_eq!(next_sequence(names, "2021070"), 1);
}

#[test]
fn test_parse_sequence() {
    assert_eq!(parse_sequence("X-chunk-007.parquet", "X"), Some(7));
    assert_eq!(parse_sequence("X-chunk-.parquet", "X"), None);
    assert_eq!(parse_sequence("X-chunk-+7.parquet", "X"), None);
    assert_eq!(parse_sequence("XY-chunk-007.parquet", "X"), None);
}

#[test]
fn test_split_segment_name() {
    assert_eq!(split_segment_name("20210707-chunk-003.parquet"), Some(("20210707", 3)));
    assert_eq!(split_segment_name("a-chunk-b-chunk-010.parquet"), Some(("a-chunk-b", 10)));
    assert_eq!(split_segment_name("-chunk-001.parquet"), None);
    assert_eq!(split_segment_name("20210707-chunk-003.csv"), None);
    assert_eq!(split_segment_name("20210707.parquet"), None);
}

#[test]
fn test_timestamp_tokens() {
    let midnight = PartitionKey::Timestamp(micros(2021, 7, 7, 0, 0));
    let offer = PartitionKey::Timestamp(micros(2021, 7, 6, 12, 30));

    assert_eq!(partition_token(&midnight, TimestampTokenStyle::Auto).unwrap(), "20210707");
    assert_eq!(
        partition_token(&midnight, TimestampTokenStyle::DateTime).unwrap(),
        "20210707000000"
    );
    assert_eq!(
        partition_token(&offer, TimestampTokenStyle::Auto).unwrap(),
        "20210706123000"
    );
    assert_eq!(partition_token(&offer, TimestampTokenStyle::Date).unwrap(), "20210706");
}

#[test]
fn test_string_tokens() {
    let token = |s: &str| partition_token(&PartitionKey::Utf8(s.to_string()), TimestampTokenStyle::Auto);

    assert_eq!(token("AGLHAL").unwrap(), "AGLHAL");
    assert_eq!(token("2021/07/07").unwrap(), "20210707");
    assert_eq!(token("a\\b").unwrap(), "ab");
    assert_eq!(token("NSW1 PRICE").unwrap(), "NSW1%20PRICE");
    assert_eq!(token("100%").unwrap(), "100%25");
    assert_eq!(token("12:30").unwrap(), "12%3A30");
    assert_eq!(token("2009/01/01 00:00:00").unwrap(), "20090101");
    assert_eq!(token("2009/01/01 04:30:00").unwrap(), "20090101043000");
    // Not a valid date, so it stays an encoded string
    assert_eq!(token("2009/13/01 00:00:00").unwrap(), "20091301%2000%3A00%3A00");

    let key = PartitionKey::Utf8("2009/01/01".to_string());
    assert_eq!(
        partition_token(&key, TimestampTokenStyle::DateTime).unwrap(),
        "20090101000000"
    );

    assert!(matches!(token(""), Err(WriterError::InvalidPartitionToken(_))));
    assert!(matches!(token("/"), Err(WriterError::InvalidPartitionToken(_))));
    assert!(matches!(token(".."), Err(WriterError::InvalidPartitionToken(_))));
    assert!(matches!(token("./."), Err(WriterError::InvalidPartitionToken(_))));
}

#[test]
fn test_float_tokens() {
    let key = PartitionKey::Float32(12.5);
    assert_eq!(partition_token(&key, TimestampTokenStyle::Auto).unwrap(), "12.5");
    let key = PartitionKey::Float64(-3.0);
    assert_eq!(partition_token(&key, TimestampTokenStyle::Auto).unwrap(), "-3");
}

#[test]
fn test_timestamp_style_from_str() {
    assert_eq!("auto".parse::<TimestampTokenStyle>().unwrap(), TimestampTokenStyle::Auto);
    assert_eq!("DateTime".parse::<TimestampTokenStyle>().unwrap(), TimestampTokenStyle::DateTime);
    assert!("hourly".parse::<TimestampTokenStyle>().is_err());
    assert_eq!(TimestampTokenStyle::Date.to_string(), "date");
}

#[test]
fn test_write_batch_groups_by_value() -> Result<(), WriterError> {
    let dir = tempdir()?;
    let mut writer = writer(dir.path(), 1);

    let d7 = micros(2021, 7, 7, 0, 0);
    let d8 = micros(2021, 7, 8, 0, 0);
    let batch = test_batch(
        &["A", "B", "C", "D"],
        &[Some(d8), Some(d7), Some(d8), Some(d7)],
        &[1.0, 2.0, 3.0, 4.0],
    );

    let segments = writer.write_batch(&batch)?;
    assert_eq!(segments.len(), 2);

    // First-seen order
    assert_eq!(segments[0].token, "20210708");
    assert_eq!(segments[0].rows, 2);
    assert_eq!(segments[1].token, "20210707");
    assert_eq!(segments[1].rows, 2);

    for segment in &segments {
        assert_eq!(segment.sequence, 1);
        assert!(segment.path.exists());
        assert_eq!(parquet_rows(&segment.path), 2);
        assert!(segment.file_size_bytes > 0);
    }

    assert_eq!(writer.stats().rows_written, 4);
    assert_eq!(writer.stats().segments_written, 2);
    Ok(())
}

#[test]
fn test_sequences_advance_and_never_overwrite() -> Result<(), WriterError> {
    let dir = tempdir()?;
    let d7 = micros(2021, 7, 7, 0, 0);
    let batch = test_batch(&["A"], &[Some(d7)], &[1.0]);

    let mut first = writer(dir.path(), 1);
    first.write_batch(&batch)?;
    first.write_batch(&batch)?;

    // A fresh writer picks up where the directory left off
    let mut second = writer(dir.path(), 1);
    let segments = second.write_batch(&batch)?;
    assert_eq!(segments[0].sequence, 3);

    let mut names: Vec<String> = std::fs::read_dir(dir.path())?
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "20210707-chunk-001.parquet",
            "20210707-chunk-002.parquet",
            "20210707-chunk-003.parquet",
        ]
    );
    Ok(())
}

#[test]
fn test_existing_segment_is_not_clobbered() -> Result<(), WriterError> {
    let dir = tempdir()?;
    let mut writer = writer(dir.path(), 0);
    let batch = test_batch(&["A"], &[Some(0)], &[1.0]);

    writer.write_batch(&batch)?;
    // Another process drops a file under the name the writer will pick next
    std::fs::write(dir.path().join("A-chunk-002.parquet"), b"foreign")?;

    let err = writer.write_batch(&batch).unwrap_err();
    assert!(matches!(err, WriterError::SegmentExists(_)));
    assert_eq!(std::fs::read(dir.path().join("A-chunk-002.parquet"))?, b"foreign");
    Ok(())
}

#[test]
fn test_null_partition_value() -> Result<(), WriterError> {
    let dir = tempdir()?;
    let mut writer = writer(dir.path(), 1);
    let batch = test_batch(&["A", "B"], &[Some(0), None], &[1.0, 2.0]);

    let err = writer.write_batch(&batch).unwrap_err();
    assert!(err.is_data_error());
    assert!(matches!(err, WriterError::NullPartitionValue { row: 1, .. }));
    // Nothing is written when a batch is rejected
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_footer_records_token() -> Result<(), WriterError> {
    let dir = tempdir()?;
    let mut writer = writer(dir.path(), 0);
    let segments = writer.write_batch(&test_batch(&["AGLHAL"], &[Some(0)], &[1.0]))?;

    let reader = SerializedFileReader::new(File::open(&segments[0].path)?)?;
    let kv = reader
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .cloned()
        .unwrap_or_default();
    let token = kv
        .iter()
        .find(|kv| kv.key == KEY_PARTITION_TOKEN)
        .and_then(|kv| kv.value.clone());
    assert_eq!(token.as_deref(), Some("AGLHAL"));
    Ok(())
}

#[test]
fn test_rejects_out_of_range_partition_index() {
    let dir = tempdir().unwrap();
    let result = PartitionWriter::new(
        dir.path(),
        test_schema(),
        3,
        SegmentMetadata::new(TableKind::BidPerOffer, "X"),
        WriterConfig::default(),
    );
    assert!(matches!(result, Err(WriterError::InvalidData(_))));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Tokens of string values are always a single safe path component
        #[test]
        fn test_token_is_path_safe(value in ".{0,40}") {
            if let Ok(token) = partition_token(&PartitionKey::Utf8(value), TimestampTokenStyle::Auto) {
                prop_assert!(!token.is_empty());
                prop_assert!(token != "." && token != "..");
                prop_assert!(token
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-' | b'%')));
            }
        }

        /// The next sequence is strictly above every existing one
        #[test]
        fn test_next_sequence_is_monotonic(existing in prop::collection::vec(1u32..100_000, 0..20)) {
            let names: Vec<String> = existing.iter().map(|s| segment_file_name("T", *s)).collect();
            let next = next_sequence(&names, "T");
            prop_assert!(existing.iter().all(|s| next > *s));
            prop_assert_eq!(next, existing.iter().max().map_or(1, |m| m + 1));
        }
    }
}
