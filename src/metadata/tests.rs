use super::*;
use crate::schema::*;

#[test]
fn test_source_file_json() {
    let mut source = SourceFileInfo::new("PUBLIC_DVD_BIDPEROFFER_202107010000.CSV");
    source.size_bytes = Some(1024);

    let json = source.to_json().unwrap();
    assert!(!json.contains("path"));
    assert_eq!(SourceFileInfo::from_json(&json).unwrap(), source);
}

#[test]
fn test_source_file_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    std::fs::write(&path, "C,HEADER\n").unwrap();

    let source = SourceFileInfo::from_path(&path).unwrap();
    assert_eq!(source.name, "table.csv");
    assert_eq!(source.size_bytes, Some(9));
    assert!(SourceFileInfo::from_path(dir.path().join("missing.csv")).is_err());
}

#[test]
fn test_segment_metadata_keys() {
    let metadata = SegmentMetadata::new(TableKind::BidPerOffer, "TRADINGDATE")
        .with_source_file(SourceFileInfo::new("bids.csv"))
        .for_token("20210707");

    let kv = metadata.to_parquet_metadata().unwrap();
    assert_eq!(kv.get(KEY_FORMAT_VERSION).unwrap(), NEMPART_FORMAT_VERSION);
    assert_eq!(kv.get(KEY_TABLE_KIND).unwrap(), "BIDPEROFFER");
    assert_eq!(kv.get(KEY_PARTITION_COLUMN).unwrap(), "TRADINGDATE");
    assert_eq!(kv.get(KEY_PARTITION_TOKEN).unwrap(), "20210707");
    assert!(kv.get(KEY_CONVERTER_INFO).unwrap().starts_with("nempart v"));
    assert!(kv.contains_key(KEY_CONVERSION_TIMESTAMP));

    let parsed = SegmentMetadata::from_parquet_metadata(&kv).unwrap();
    assert_eq!(parsed, metadata);
}

#[test]
fn test_segment_metadata_missing_key() {
    let kv = SegmentMetadata::new(TableKind::Unrecognized, "DUID")
        .to_parquet_metadata()
        .unwrap();
    assert!(!kv.contains_key(KEY_PARTITION_TOKEN));

    let mut partial = kv.clone();
    partial.remove(KEY_PARTITION_COLUMN);
    assert!(matches!(
        SegmentMetadata::from_parquet_metadata(&partial),
        Err(MetadataError::MissingKey(key)) if key == KEY_PARTITION_COLUMN
    ));

    let mut bad = kv;
    bad.insert(KEY_TABLE_KIND.to_string(), "DISPATCH".to_string());
    assert!(matches!(
        SegmentMetadata::from_parquet_metadata(&bad),
        Err(MetadataError::InvalidValue { .. })
    ));
}
