//! Error handling for the Mason application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Mason operations.
///
/// This enum represents all possible errors that can occur within the Mason
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Raised when the application name fails validation
    #[error("Invalid application name {name:?}: use only letters, digits and spaces.")]
    InvalidNameError { name: String },

    /// Raised when the template directory cannot be found
    #[error("Template directory does not exist: {template_dir}.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Raised when the output directory overlaps the template directory
    #[error("Output directory '{output_dir}' overlaps the template directory '{template_dir}'.")]
    OverlappingPathsError { template_dir: String, output_dir: String },

    /// Raised when the user declines to overwrite an existing output directory
    #[error("Output directory exists and was not overwritten. Nothing was copied.")]
    OutputDirectoryDeclinedError,

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors in compiling exclusion patterns
    #[error("Exclude pattern error: {0}.")]
    ExcludeError(String),

    /// Represents errors that occur during user interaction
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents a failure to process a single entry; callers treat this as
    /// a warning and fall back to a raw copy rather than aborting the run
    #[error("Could not process '{path}': {reason}.")]
    ProcessError { path: String, reason: String },
}

/// Convenience type alias for Results with Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
