#![no_main]

use libfuzzer_sys::fuzz_target;
use nempart::reader::{ChunkedReader, ReaderConfig};
use nempart::schema::{read_header_from, Schema, TableKind};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce batches or errors, never a panic
    let header = match read_header_from(Cursor::new(data), "fuzz") {
        Ok(header) => header,
        Err(_) => return,
    };

    // Exercise both the typed and the pass-through schema
    for kind in [TableKind::BidPerOffer, TableKind::Unrecognized] {
        let schema = Schema::resolve(kind, &header);
        let config = ReaderConfig {
            chunk_size: 7,
            null_markers: vec!["-".to_string()],
            ..ReaderConfig::default()
        };
        let Ok(reader) = ChunkedReader::from_reader(Cursor::new(data), schema, config) else {
            continue;
        };

        // Stop after 100 batches; the iterator fuses after the first error
        for batch in reader.take(100) {
            match batch {
                Ok(batch) => {
                    let _ = batch.without_last_row();
                }
                Err(_) => break,
            }
        }
    }
});
