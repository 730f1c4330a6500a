use std::fmt;
use std::path::PathBuf;

/// Failure kinds of the preparation pipeline. All of them abort the run;
/// there is no retry or partial-result recovery.
#[derive(Debug)]
pub enum PrepError {
    /// Input directory or file could not be read
    Io { path: PathBuf, detail: String },
    /// A csv row, the merged column layout, or the configuration did not
    /// match what the pipeline expects
    Format { what: String, detail: String },
    /// Not enough cleaned rows to emit a single window
    InsufficientData { rows: usize, seq_len: usize },
}

impl std::error::Error for PrepError {}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrepError::Io { path, detail } => {
                write!(f, "failed to read {}: {}", path.display(), detail)
            }
            PrepError::Format { what, detail } => {
                write!(f, "format error in {}: {}", what, detail)
            }
            PrepError::InsufficientData { rows, seq_len } => {
                write!(
                    f,
                    "only {} rows left after cleaning, need at least {} for one window",
                    rows, seq_len
                )
            }
        }
    }
}
