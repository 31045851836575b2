//! Error types for the chatstack application.
//!
//! This module defines the error taxonomy using `thiserror` for structured error handling.
//! Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`InputError`] - Conversation file reading failures (file not found, IO)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`ConfigurationError`](crate::view_state::ConfigurationError) - Invalid layout parameters
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! Parsing errors ([`ParseError`]) are **non-fatal**: malformed conversation lines are logged
//! and skipped, so the stack still renders the messages that did parse. Input, configuration
//! and terminal errors are fatal and propagate to `main`.
//!
//! The layout engine itself has no user-facing failure surface beyond
//! `ConfigurationError`: stale caches are rebuilt silently and unknown items are simply
//! absent from the output.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use chatstack::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = read_conversation()?;
///     Ok(())
/// }
/// # fn read_conversation() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the conversation input.
    ///
    /// **Recovery**: Display error to user and exit.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// The config file exists but cannot be read or parsed.
    #[error("Configuration file error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The resolved layout parameters are invalid.
    ///
    /// Fatal at configuration time: the engine refuses to compute rather than
    /// dividing by zero or interpolating over a malformed key-point table.
    #[error("Invalid layout configuration: {0}")]
    Layout(#[from] crate::view_state::ConfigurationError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// **Recovery**: Attempt graceful terminal cleanup, then exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading conversation input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified conversation file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use chatstack::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error reading from the input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing a conversation line.
///
/// Non-fatal: the line is logged with its number and skipped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A line is not valid JSON or does not match the message shape.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the input file.
        line: usize,
        /// Parser error message.
        message: String,
    },

    /// A line carries neither `sort_value` nor `timestamp`.
    #[error("Missing sort_value or timestamp at line {line}")]
    MissingSortKey {
        /// 1-based line number in the input file.
        line: usize,
    },

    /// The `timestamp` field is not RFC 3339.
    #[error("Invalid timestamp at line {line}: {raw}")]
    InvalidTimestamp {
        /// 1-based line number in the input file.
        line: usize,
        /// The raw timestamp text.
        raw: String,
    },

    /// The sort value is NaN or infinite.
    #[error("Non-finite sort value at line {line}")]
    NonFiniteSortValue {
        /// 1-based line number in the input file.
        line: usize,
    },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. }
            | ParseError::MissingSortKey { line }
            | ParseError::InvalidTimestamp { line, .. }
            | ParseError::NonFiniteSortValue { line } => *line,
        }
    }
}
