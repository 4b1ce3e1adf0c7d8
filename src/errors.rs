use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("missing required input: {field}")]
    MissingInput {
        field: &'static str,
    },

    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },

    #[error("invalid date for {field}: {value:?}")]
    InvalidDate {
        field: &'static str,
        value: String,
    },

    #[error("invalid deposit at index {index}: {message}")]
    InvalidDeposit {
        index: usize,
        message: String,
    },

    #[error("close date {close} is before open date {open}")]
    InvertedDateRange {
        open: NaiveDate,
        close: NaiveDate,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
