//! rpmvercmp-style ordering of `(epoch, version, release)` triples
//!
//! Version and release strings are compared part by part. Each part is split
//! into segments: a run of ASCII digits, a run of letters, or one other
//! character. Segments are then compared pairwise with these rules:
//!
//! - a missing segment sorts after any present one
//! - `~` sorts before anything else (pre-release marker)
//! - digit runs compare by numeric value, with no width limit
//! - a digit run sorts after a letter run
//! - everything else compares by code point
//!
//! Note the whole-part rule is the opposite of the segment rule: an empty
//! version or release sorts *before* a non-empty one.

use std::cmp::Ordering;

/// Compare two complete version identifiers.
///
/// Epoch always wins. Version is compared next and release last.
pub fn compare(
    epoch_a: u64,
    version_a: &str,
    release_a: &str,
    epoch_b: u64,
    version_b: &str,
    release_b: &str,
) -> Ordering {
    epoch_a
        .cmp(&epoch_b)
        .then_with(|| compare_parts(version_a, version_b))
        .then_with(|| compare_parts(release_a, release_b))
}

/// Compare a single version or release string.
pub fn compare_parts(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    match (a.starts_with('~'), b.starts_with('~')) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let left = split_segments(a);
    let right = split_segments(b);
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            compare_segments(
                left.get(i).copied().unwrap_or(""),
                right.get(i).copied().unwrap_or(""),
            )
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentClass {
    Digit,
    Letter,
    Other,
}

impl SegmentClass {
    // Only ASCII digits form numeric runs, as in C rpmvercmp. Other Unicode
    // decimal digits such as '٢' fall through to single-character segments.
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            SegmentClass::Digit
        } else if c.is_alphabetic() {
            SegmentClass::Letter
        } else {
            SegmentClass::Other
        }
    }
}

/// Split a part into digit runs, letter runs and single other characters.
///
/// Examples:
/// - "1.10" -> ["1", ".", "10"]
/// - "alt1_2" -> ["alt", "1", "_", "2"]
/// - "1.0~rc1" -> ["1", ".", "0", "~", "rc", "1"]
pub fn split_segments(part: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = part;

    while let Some(first) = rest.chars().next() {
        let class = SegmentClass::of(first);
        let end = match class {
            SegmentClass::Other => first.len_utf8(),
            _ => rest
                .char_indices()
                .find(|&(_, c)| SegmentClass::of(c) != class)
                .map_or(rest.len(), |(i, _)| i),
        };

        let (segment, tail) = rest.split_at(end);
        segments.push(segment);
        rest = tail;
    }

    segments
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (a.strip_prefix('~'), b.strip_prefix('~')) {
        (Some(a), Some(b)) => return compare_segments(a, b),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    match (is_digit_run(a), is_digit_run(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

fn is_digit_run(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit runs by value without parsing them into a fixed-width integer.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
