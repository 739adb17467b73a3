//! Deduplicating compaction of the log file
//!
//! Collapses duplicate entries (same `[LEVEL] message` key) into a single
//! line with a repeat count, keeps the most recently touched `max_lines`
//! distinct entries, and rewrites the file in recency order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::codec;
use super::splitter;

/// One distinct entry during a compaction pass
struct Record {
    /// Most recent full rendering of this entry, without repeat suffix
    base: String,
    /// Sum of multiplicities of all occurrences sharing the key
    count: u64,
    /// Index of the latest occurrence in chronological read order
    last_index: usize,
}

/// Compact an ordered sequence of logical lines
///
/// Occurrences sharing a dedup key merge into one record: counts add up
/// (honoring any existing repeat suffix), and the most recent occurrence
/// supplies the surviving wording and timestamp. Records come out sorted by
/// recency, trimmed to the `max_lines` most recently touched.
pub fn compact_lines<I, S>(logical: I, max_lines: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<Record> = Vec::new();

    for (i, line) in logical.into_iter().enumerate() {
        let line = line.as_ref();
        let (multiplicity, base) = match codec::parse_repeat_suffix(line) {
            Some((count, start)) => (count, &line[..start]),
            None => (1, line),
        };
        let key = codec::extract_key(base);

        match index_by_key.get(key) {
            Some(&idx) => {
                let record = &mut records[idx];
                // Historical counts come from file content; never overflow
                record.count = record.count.saturating_add(multiplicity);
                record.last_index = i;
                // Most recent wording and timestamp win
                record.base = base.to_string();
            }
            None => {
                index_by_key.insert(key.to_string(), records.len());
                records.push(Record {
                    base: base.to_string(),
                    count: multiplicity,
                    last_index: i,
                });
            }
        }
    }

    // Recency order; a key repeated late counts as recent even if first seen
    // early, so it outlives stale unique entries when trimming.
    records.sort_by_key(|r| r.last_index);
    if records.len() > max_lines {
        records.drain(..records.len() - max_lines);
    }

    records
        .iter()
        .map(|r| codec::serialize_record(&r.base, r.count))
        .collect()
}

/// Compact the log file at `path` in place
///
/// Reads the whole file, splits concatenated entries, deduplicates, and
/// atomically rewrites via a sibling temp file. An unreadable file and an
/// empty logical sequence are both no-ops that leave the file untouched.
pub fn compact_file(path: &Path, max_lines: usize) -> Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Ok(()),
    };

    let logical: Vec<&str> = content
        .lines()
        .filter(|line| !line.is_empty())
        .flat_map(splitter::split_entries)
        .collect();
    if logical.is_empty() {
        return Ok(());
    }

    let compacted = compact_lines(logical, max_lines);

    let mut output = String::with_capacity(content.len());
    for line in &compacted {
        output.push_str(line);
        output.push('\n');
    }

    // Sibling temp file keeps the rename on the same filesystem
    let tmp = path.with_extension("txt.tmp");
    fs::write(&tmp, output)
        .with_context(|| format!("Failed to write temp log file {:?}", tmp))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace log file {:?}", path))?;

    Ok(())
}
