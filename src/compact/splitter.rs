//! Splitting of concatenated log entries
//!
//! Older log files can contain several timestamped entries glued onto one
//! physical line (earlier writer bugs, manual edits). This module splits such
//! a line back into logical entries by spotting embedded timestamp starts.

/// Check whether `pos` begins a timestamp marker: `[` followed by four digits
/// and a dash. A year-prefix heuristic, deliberately not a date parse.
pub fn is_timestamp_start(line: &str, pos: usize) -> bool {
    let bytes = line.as_bytes();
    if pos >= bytes.len() || bytes[pos] != b'[' {
        return false;
    }
    // Need at least "[YYYY-" plus one more byte
    if pos + 6 >= bytes.len() {
        return false;
    }
    bytes[pos + 1].is_ascii_digit()
        && bytes[pos + 2].is_ascii_digit()
        && bytes[pos + 3].is_ascii_digit()
        && bytes[pos + 4].is_ascii_digit()
        && bytes[pos + 5] == b'-'
}

/// Lazily split a raw physical line into logical entries
///
/// Every timestamp start from the second byte onward opens a new segment; the
/// first byte is exempt since it begins the first entry. A blank line yields
/// nothing. Concatenating the yielded segments reconstructs the input exactly.
pub fn split_entries(raw: &str) -> SplitEntries<'_> {
    SplitEntries {
        raw,
        start: 0,
        pos: 1,
        done: raw.is_empty(),
    }
}

/// Iterator returned by [`split_entries`]
pub struct SplitEntries<'a> {
    raw: &'a str,
    start: usize,
    pos: usize,
    done: bool,
}

impl<'a> Iterator for SplitEntries<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        while self.pos < self.raw.len() {
            if is_timestamp_start(self.raw, self.pos) {
                let segment = &self.raw[self.start..self.pos];
                self.start = self.pos;
                self.pos += 1;
                if !segment.is_empty() {
                    return Some(segment);
                }
            } else {
                self.pos += 1;
            }
        }
        self.done = true;
        if self.start < self.raw.len() {
            Some(&self.raw[self.start..])
        } else {
            None
        }
    }
}
