use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{Error, ParseError};
use crate::model::Entry;

/// Classification of a single raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank, whitespace-only, or a `#` comment.
    Ignore,
    /// Exactly one `KEY=VALUE` pair.
    Assignment,
    /// Anything else.
    Invalid,
}

/// Classify one line of input.
///
/// Surrounding ASCII whitespace is trimmed first. What remains must be empty,
/// start with `#`, or be a non-empty key and a non-empty value around a single
/// `=`, neither side containing ASCII whitespace, NUL or another `=`.
pub fn classify_line(line: &str) -> LineKind {
    let line = trim_ascii(line);
    if line.is_empty() || line.starts_with('#') {
        return LineKind::Ignore;
    }

    match line.split_once('=') {
        Some((key, value)) if is_valid_token(key) && is_valid_token(value) => {
            LineKind::Assignment
        }
        _ => LineKind::Invalid,
    }
}

/// Parse one line into an [`Entry`].
///
/// Returns `Ok(None)` for ignorable lines.
pub fn parse_line(
    line: &str,
    line_num: u32,
    source: Option<&Path>,
) -> Result<Option<Entry>, ParseError> {
    match classify_line(line) {
        LineKind::Ignore => Ok(None),
        LineKind::Invalid => Err(ParseError::new(line_num, source.map(Path::to_path_buf))),
        LineKind::Assignment => {
            let Some((key, value)) = split_assignment(trim_ascii(line)) else {
                return Err(ParseError::new(line_num, source.map(Path::to_path_buf)));
            };
            Ok(Some(Entry {
                key: key.to_owned(),
                value: value.to_owned(),
                source: source.map(Path::to_path_buf),
                line: line_num,
            }))
        }
    }
}

/// Parse env entries from UTF-8 text.
///
/// Later assignments to the same key replace earlier ones in place.
pub fn parse_str(input: &str) -> Result<Vec<Entry>, Error> {
    parse_reader(input.as_bytes())
}

/// Parse env entries from a buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Entry>, Error> {
    let mut entries = Vec::new();
    let mut by_key = HashMap::<String, usize>::new();
    for entry in Entries::new(reader, None) {
        push_keep_last(&mut entries, &mut by_key, entry?);
    }
    Ok(entries)
}

/// Append `entry`, or replace the earlier entry with the same key in place.
pub(crate) fn push_keep_last(
    entries: &mut Vec<Entry>,
    by_key: &mut HashMap<String, usize>,
    entry: Entry,
) {
    if let Some(existing_idx) = by_key.get(&entry.key).copied() {
        entries[existing_idx] = entry;
    } else {
        by_key.insert(entry.key.clone(), entries.len());
        entries.push(entry);
    }
}

/// Streaming iterator over the assignments of a reader, in file order.
///
/// Stops after the first error.
pub(crate) struct Entries<R> {
    lines: std::io::Lines<R>,
    source: Option<PathBuf>,
    line_num: u32,
    failed: bool,
}

impl<R: BufRead> Entries<R> {
    pub(crate) fn new(reader: R, source: Option<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            source,
            line_num: 0,
            failed: false,
        }
    }

    pub(crate) fn lines_read(&self) -> usize {
        self.line_num as usize
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(Error::Io(err)));
                }
            };
            self.line_num += 1;

            match parse_line(&line, self.line_num, self.source.as_deref()) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(Error::InvalidLineFormat(err)));
                }
            }
        }
    }
}

// Splits on the first `=` and refuses a second one, so a looser classifier
// can never smuggle `=` into a value.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if value.contains('=') {
        return None;
    }
    Some((key, value))
}

fn trim_ascii(line: &str) -> &str {
    line.trim_matches(|ch: char| ch.is_ascii_whitespace())
}

// NUL is refused because the process table cannot store it.
fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && !token
            .chars()
            .any(|ch| ch == '=' || ch == '\0' || ch.is_ascii_whitespace())
}
