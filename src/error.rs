//! Error handling for progdir.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while creating or checking a program directory.
///
/// Entry-level variants (a single template file that cannot be interpreted)
/// are reported by the walker and the walk continues. The rest abort the run.
#[derive(Error, Debug)]
pub enum Error {
    /// The template tree itself could not be traversed
    #[error("Problem found walking the template directory: {0}")]
    WalkError(#[from] walkdir::Error),

    /// A template file exists but its content could not be read
    #[error("Can't read the template file {path:?}: {source}")]
    TemplateReadError { path: String, source: io::Error },

    /// Represents errors locating or loading a template
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// A check descriptor whose name does not end with a known check type
    #[error("{path:?}: has no valid check-type suffix")]
    CheckTypeError { path: String },

    /// A check descriptor whose name is nothing but directives
    #[error("{path:?}: the check has no target file name")]
    CheckTargetError { path: String },

    /// The content of a matches/doesNotMatch check is not a valid regular expression
    #[error("File checks for {path:?} could not be made: {source}")]
    CheckPatternError { path: String, source: regex::Error },

    /// Macro substitution failed for a generated file
    #[error("Can't replace macros from {origin:?}: {message}")]
    MacroError { origin: String, message: String },

    /// Represents errors in the values supplied on the command line
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Create was asked for but the target is already there
    #[error("The target directory {target:?} already exists")]
    TargetExistsError { target: String },

    /// Check or fix was asked for but there is no target directory
    #[error("The target directory {target:?} does not exist or is not a directory")]
    TargetMissingError { target: String },

    /// The built-in tables disagree with each other
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
