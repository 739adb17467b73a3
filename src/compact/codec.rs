//! Parsing and serialization of persisted log lines
//!
//! A persisted line looks like `[timestamp] [LEVEL] message` or
//! `[timestamp] [source] [LEVEL] message`, optionally carrying a trailing
//! repeat suffix ` (repeated N times)`. This module extracts the dedup key
//! (the line minus timestamp and source) and round-trips the repeat suffix.

const SUFFIX_PREFIX: &str = " (repeated ";
const SUFFIX_TAIL: &str = " times)";

/// Extract the dedup key from a rendered line
///
/// The key is everything after the timestamp (and source, when present),
/// i.e. `[LEVEL] message`. Duplicate detection compares keys only, so two
/// entries with different timestamps still collapse together.
///
/// Lines without a recognizable bracket boundary are returned whole — a
/// malformed line is its own key, never an error.
pub fn extract_key(line: &str) -> &str {
    let Some(first) = line.find("] [") else {
        return line;
    };
    match line[first + 1..].find("] [") {
        Some(rel) => {
            // Source present: key starts after the second boundary
            let second = first + 1 + rel;
            if second + 2 >= line.len() {
                line
            } else {
                &line[second + 2..]
            }
        }
        // Source absent: key starts after the first boundary
        None => &line[first + 2..],
    }
}

/// Detect a trailing ` (repeated N times)` suffix
///
/// Returns the parsed count and the byte offset where the suffix begins so
/// the caller can strip it. `None` for anything malformed: missing anchors,
/// non-numeric or zero counts, suffix not at the very end of the line.
pub fn parse_repeat_suffix(line: &str) -> Option<(u64, usize)> {
    if line.len() < SUFFIX_PREFIX.len() + SUFFIX_TAIL.len() + 1 {
        return None;
    }
    if !line.ends_with(SUFFIX_TAIL) {
        return None;
    }
    let start = line.rfind(SUFFIX_PREFIX)?;
    let digits_start = start + SUFFIX_PREFIX.len();
    let tail_start = line.len() - SUFFIX_TAIL.len();
    // Prefix and tail may overlap on a shared space, leaving no digit region
    if digits_start >= tail_start {
        return None;
    }
    let digits = &line[digits_start..tail_start];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count: u64 = digits.parse().ok()?;
    if count == 0 {
        return None;
    }
    Some((count, start))
}

/// Return the line with any valid repeat suffix removed
pub fn strip_repeat_suffix(line: &str) -> &str {
    match parse_repeat_suffix(line) {
        Some((_, start)) => &line[..start],
        None => line,
    }
}

/// Serialize a compacted record back to a persisted line
///
/// A count of 1 yields the base line unchanged, so single entries never grow
/// a suffix.
pub fn serialize_record(base: &str, count: u64) -> String {
    if count == 1 {
        base.to_string()
    } else {
        format!("{base}{SUFFIX_PREFIX}{count}{SUFFIX_TAIL}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_key_without_source() {
        let line = "[2024-01-01 10:00:00] [INFO] Renderer started";
        assert_eq!(extract_key(line), "[INFO] Renderer started");
    }

    #[test]
    fn test_extract_key_with_source() {
        let line = "[2024-01-01 10:00:00] [Renderer] [WARNING] Shader cache miss";
        assert_eq!(extract_key(line), "[WARNING] Shader cache miss");
    }

    #[test]
    fn test_extract_key_ignores_timestamp_and_source() {
        let a = "[2024-01-01 10:00:00] [Audio] [ERROR] Device lost";
        let b = "[2024-06-30 23:59:59] [Video] [ERROR] Device lost";
        assert_eq!(extract_key(a), extract_key(b));
    }

    #[test]
    fn test_extract_key_malformed_line_returned_whole() {
        assert_eq!(extract_key("no brackets at all"), "no brackets at all");
        assert_eq!(extract_key(""), "");
    }

    #[test]
    fn test_extract_key_boundary_at_end_of_line() {
        // Second boundary with nothing after it
        let line = "[2024-01-01 10:00:00] [src] [";
        assert_eq!(extract_key(line), line);
    }

    #[test]
    fn test_parse_repeat_suffix_valid() {
        let line = "[2024-01-01 10:00:00] [INFO] hi (repeated 3 times)";
        let (count, start) = parse_repeat_suffix(line).unwrap();
        assert_eq!(count, 3);
        assert_eq!(&line[..start], "[2024-01-01 10:00:00] [INFO] hi");
    }

    #[test]
    fn test_parse_repeat_suffix_rejects_malformed() {
        // Not anchored at end
        assert!(parse_repeat_suffix("x (repeated 3 times) tail").is_none());
        // Non-numeric count
        assert!(parse_repeat_suffix("x (repeated many times)").is_none());
        // Zero count
        assert!(parse_repeat_suffix("x (repeated 0 times)").is_none());
        // Missing prefix
        assert!(parse_repeat_suffix("x 3 times)").is_none());
        // Empty count
        assert!(parse_repeat_suffix("x (repeated  times)").is_none());
        assert!(parse_repeat_suffix("").is_none());
    }

    #[test]
    fn test_parse_repeat_suffix_overlapping_anchors() {
        // Prefix and tail share the single space before "times": there is no
        // digit region at all, and the line must be treated literally
        assert!(parse_repeat_suffix("aa (repeated times)").is_none());
        assert!(parse_repeat_suffix("a longer line (repeated times)").is_none());
        assert_eq!(
            strip_repeat_suffix("aa (repeated times)"),
            "aa (repeated times)"
        );
    }

    #[test]
    fn test_parse_repeat_suffix_uses_last_occurrence() {
        let line = "msg (repeated 2 times) (repeated 5 times)";
        let (count, start) = parse_repeat_suffix(line).unwrap();
        assert_eq!(count, 5);
        assert_eq!(&line[..start], "msg (repeated 2 times)");
    }

    #[test]
    fn test_strip_repeat_suffix() {
        assert_eq!(strip_repeat_suffix("msg (repeated 4 times)"), "msg");
        assert_eq!(strip_repeat_suffix("msg"), "msg");
        assert_eq!(
            strip_repeat_suffix("msg (repeated x times)"),
            "msg (repeated x times)"
        );
    }

    #[test]
    fn test_serialize_record_round_trip() {
        let base = "[2024-01-01 10:00:00] [INFO] hi";
        for count in [2, 7, 1000] {
            let line = serialize_record(base, count);
            let (parsed, start) = parse_repeat_suffix(&line).unwrap();
            assert_eq!(parsed, count);
            assert_eq!(&line[..start], base);
        }
    }

    #[test]
    fn test_serialize_record_count_one_unchanged() {
        let base = "[2024-01-01 10:00:00] [INFO] hi";
        assert_eq!(serialize_record(base, 1), base);
    }
}
