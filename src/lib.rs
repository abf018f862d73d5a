//! progdir creates a program directory from a template and checks that an
//! existing one still matches it.
//! Directives in the template file names say which files are generated
//! with macro substitution, which are optional and which describe checks on
//! the content of other files.

/// Content checks and the check-type registry
pub mod checks;

/// Command-line interface module for the progdir application
pub mod cli;

/// Run configuration built from the command line
pub mod config;

/// Common constants
pub mod constants;

/// Decoding of the directive suffixes in template file names
pub mod directive;

/// Error types and handling for the progdir application
pub mod error;

/// Logger setup
pub mod logger;

/// Macro substitution for generated files
pub mod macros;

/// Mapping of template paths onto the target directory
pub mod paths;

/// The template walk and the create/check/fix strategies
pub mod processor;

/// Runs the chosen action end to end
pub mod runner;

/// Exit status tracking and diagnostic output
pub mod status;

/// Template sources, nodes and entries
pub mod template;
