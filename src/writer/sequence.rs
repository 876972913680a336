use std::path::Path;

use crate::schema::{SEGMENT_EXTENSION, SEGMENT_INFIX, SEQUENCE_WIDTH};

use super::error::WriterError;

/// File name of segment `sequence` of `token`, e.g. `20210707-chunk-001.parquet`
pub fn segment_file_name(token: &str, sequence: u32) -> String {
    format!(
        "{token}{SEGMENT_INFIX}{sequence:0width$}.{SEGMENT_EXTENSION}",
        width = SEQUENCE_WIDTH
    )
}

/// Sequence number of `name` if it is a segment of `token`
pub fn parse_sequence(name: &str, token: &str) -> Option<u32> {
    let digits = name
        .strip_prefix(token)?
        .strip_prefix(SEGMENT_INFIX)?
        .strip_suffix(SEGMENT_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Split a segment file name into its token and sequence number
pub fn split_segment_name(name: &str) -> Option<(&str, u32)> {
    let stem = name.strip_suffix(SEGMENT_EXTENSION)?.strip_suffix('.')?;
    let (token, _) = stem.rsplit_once(SEGMENT_INFIX)?;
    if token.is_empty() {
        return None;
    }
    parse_sequence(name, token).map(|sequence| (token, sequence))
}

/// Next free sequence number for `token` given the existing file names.
///
/// Compares suffixes numerically, so `-chunk-1000` follows `-chunk-999`.
/// Returns 1 when `token` has no segments yet.
pub fn next_sequence<I, S>(names: I, token: &str) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| parse_sequence(name.as_ref(), token))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Scan `dir` for segments of `token` and return the next sequence number
pub fn scan_sequence(dir: &Path, token: &str) -> Result<u32, WriterError> {
    let pattern = format!(
        "{}/{}{}*",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(token),
        SEGMENT_INFIX
    );

    let mut names = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if let Some(name) = path.file_name() {
            names.push(name.to_string_lossy().into_owned());
        }
    }
    Ok(next_sequence(&names, token))
}
