use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("malformed date string: '{0}'")]
    #[diagnostic(code(triage_cal::invalid_date))]
    InvalidDate(String),

    #[error("{0}")]
    #[diagnostic(code(triage_cal::missing_window_bound))]
    MissingWindowBound(String),

    #[error("--extend requested but the calendar has no triage assignments")]
    #[diagnostic(code(triage_cal::no_prior_assignment))]
    NoPriorAssignment,

    #[error("--cycles requires a non-empty name list")]
    #[diagnostic(code(triage_cal::empty_name_list))]
    EmptyNameList,

    #[error("credentials have been revoked or expired")]
    #[diagnostic(code(triage_cal::auth_expired))]
    AuthExpired,

    #[error("Environment error: {0}")]
    #[diagnostic(code(triage_cal::environment))]
    Environment(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(triage_cal::calendar_api))]
    CalendarApi(String),

    #[error(transparent)]
    #[diagnostic(code(triage_cal::io))]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with our Error type
pub type TriageResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create Google Calendar API errors
pub fn calendar_api_error(message: &str) -> Error {
    Error::CalendarApi(message.to_string())
}

/// Helper to create missing-bound errors
pub fn missing_bound(message: &str) -> Error {
    Error::MissingWindowBound(message.to_string())
}
