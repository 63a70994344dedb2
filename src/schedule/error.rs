use thiserror::Error;

/// Reasons a class record is refused at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("invalid class date '{value}'")]
    InvalidDate { value: String },

    #[error("invalid class time '{value}'")]
    InvalidTime { value: String },

    #[error("unknown schedule status '{value}'")]
    UnknownStatus { value: String },
}
