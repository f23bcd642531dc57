use thiserror::Error;

pub type CsvReverseResult<T> = std::result::Result<T, CsvReverseError>;

/// Errors csvreverse can have
#[derive(Debug, Error)]
pub enum CsvReverseError {
    #[error("Usage: csvreverse <input_file> <output_file>\nExample: csvreverse data.csv reversed_data.csv")]
    Usage,

    #[error("Could not find file '{0}'")]
    FileNotFound(String),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Failed to write '{path}': {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Delimiter should not be empty")]
    DelimiterEmpty,

    #[error("Delimiter should be within the ASCII range: {0} is too fancy")]
    DelimiterNotAscii(char),

    #[error("Delimiter should be exactly one character (or \\t), got '{0}'")]
    DelimiterMultipleCharacters(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CsvReverseError {
    /// Whether the input could be opened but not parsed as CSV
    pub fn is_malformed_input(&self) -> bool {
        match self {
            CsvReverseError::NoColumns | CsvReverseError::TooManyFields { .. } => true,
            CsvReverseError::Csv(e) => !matches!(e.kind(), csv::ErrorKind::Io(_)),
            _ => false,
        }
    }
}
