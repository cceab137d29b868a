use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Every way a load can fail. The first error aborts the whole load.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The record's field registry is inconsistent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidLineFormat(#[from] ParseError),

    #[error("[{field}] must be an integer")]
    FieldMustBeInteger { field: String },

    #[error("[{field}] must not be blank")]
    FieldMustNotBeBlank { field: String },

    #[error("[{field}] must not be empty")]
    FieldMustNotBeEmpty { field: String },

    #[error("[{field}] must be string or int")]
    FieldMustBeStringOrInt { field: String },

    #[error("[{field}] does not exist in struct")]
    UnknownField { field: String },
}

impl Error {
    /// Name of the field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldMustBeInteger { field }
            | Self::FieldMustNotBeBlank { field }
            | Self::FieldMustNotBeEmpty { field }
            | Self::FieldMustBeStringOrInt { field }
            | Self::UnknownField { field } => Some(field.as_str()),
            Self::InvalidArgument(_) | Self::Io(_) | Self::InvalidLineFormat(_) => None,
        }
    }
}

/// A non-ignorable line that is not a single `KEY=VALUE` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: u32,
    pub path: Option<PathBuf>,
}

impl ParseError {
    pub(crate) fn new(line: u32, path: Option<PathBuf>) -> Self {
        Self { line, path }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(
                f,
                "invalid env line at {}:{}",
                path.display(),
                self.line
            ),
            None => write!(f, "invalid env line at line {}", self.line),
        }
    }
}

impl std::error::Error for ParseError {}
