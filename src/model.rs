use std::path::PathBuf;

/// A parsed `KEY=VALUE` assignment from an env file or input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub source: Option<PathBuf>,
    pub line: u32,
}

/// Summary of a load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub files_read: usize,
    pub lines_read: usize,
    pub bound: usize,
    pub skipped_unknown: usize,
}

/// What to do with a key that names no field of the target record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Leave the record untouched and keep going.
    #[default]
    Skip,
    /// Abort the load with [`crate::Error::UnknownField`].
    Reject,
}
