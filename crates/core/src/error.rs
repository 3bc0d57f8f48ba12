// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// "No records" is never an error: an empty query result maps to an empty
/// vector or `None`. Every variant here is a real execution or parse
/// failure and stays inspectable for the caller.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Script error: {0}")]
    Script(#[from] crate::port::ScriptError),

    #[error("Payload error: {0}")]
    Payload(#[from] crate::application::payload::PayloadError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
