use std::fmt;

#[derive(Debug)]
pub enum MatchError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (negative weight, zero top-n, etc.).
    ConfigValidation(String),
    /// A mandatory column could not be resolved at load time.
    MissingColumn { dataset: String, column: String },
    /// A reference row index outside the loaded dataset.
    RowOutOfRange { dataset: String, index: usize, len: usize },
    /// IO error (file read, CSV decode, etc.).
    Io(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { dataset, column } => {
                write!(f, "dataset '{dataset}': missing column '{column}'")
            }
            Self::RowOutOfRange { dataset, index, len } => {
                write!(f, "dataset '{dataset}': row {index} out of range (len {len})")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}
