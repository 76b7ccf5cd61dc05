//! Input/output: command line, result files, rendering and error handling

/// Command-line interface
pub mod cli;
/// Domain constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering
pub mod image;
/// Terminal progress display
pub mod progress;
/// Flat-text result files
pub mod store;
