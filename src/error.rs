use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuakeError {
    #[error("malformed record on line {line}: expected at least 5 columns, found {found}")]
    MalformedRecord { line: u64, found: usize },
    #[error("invalid {field} {value:?} on line {line}")]
    InvalidCoordinate {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("feed contains no events with a positive magnitude")]
    NoEvents,
}

pub type QuakeResult<T> = Result<T, QuakeError>;
