//! Binary/text heuristics and line counting.
//!
//! The decision only looks at a bounded prefix of the content. A NUL byte
//! anywhere in the prefix means binary; otherwise the share of control bytes
//! that never appear in text decides.

use std::fs::File;
use std::io::{self, Read};

use camino::Utf8Path;

/// Number of leading bytes inspected by [`looks_binary`].
pub const BINARY_SAMPLE_LEN: usize = 8000;

/// Returns `true` if `data` looks like binary content.
///
/// # Examples
///
/// ```
/// use ds_classify::looks_binary;
///
/// assert!(looks_binary(b"\x7fELF\x02\x01\x01\x00"));
/// assert!(!looks_binary(b"fn main() {}\n"));
/// assert!(!looks_binary(b""));
/// ```
#[must_use]
pub fn looks_binary(data: &[u8]) -> bool {
    let sample = &data[..data.len().min(BINARY_SAMPLE_LEN)];
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let suspicious = sample.iter().filter(|&&b| is_suspicious(b)).count();
    // more than 10% control bytes
    suspicious * 10 > sample.len()
}

/// Counts `\n` bytes.
///
/// # Examples
///
/// ```
/// use ds_classify::count_lines;
///
/// assert_eq!(count_lines(b"a\nb\n"), 2);
/// assert_eq!(count_lines(b"no newline"), 0);
/// ```
#[inline]
#[must_use]
pub fn count_lines(data: &[u8]) -> usize {
    data.iter().filter(|&&b| b == b'\n').count()
}

/// Reads at most [`BINARY_SAMPLE_LEN`] bytes from the start of `path`.
pub(crate) fn read_sample(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let file = File::open(path.as_std_path())?;
    let mut buf = Vec::with_capacity(BINARY_SAMPLE_LEN);
    file.take(BINARY_SAMPLE_LEN as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Control bytes other than TAB, LF, FF, CR and ESC, plus DEL.
const fn is_suspicious(b: u8) -> bool {
    (b < 0x20 && !matches!(b, b'\t' | b'\n' | 0x0c | b'\r' | 0x1b)) || b == 0x7f
}
