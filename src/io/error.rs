//! Error types and context management for search operations
//!
//! An infeasible town is a normal negative result and never an error; these
//! types cover malformed input and failing collaborators.

use std::fmt;
use std::path::{Path, PathBuf};

/// Reason a pattern string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFault {
    /// Pattern has the wrong number of characters
    WrongLength {
        /// Expected character count
        expected: usize,
        /// Characters found
        found: usize,
    },
    /// A character is not an ASCII digit
    NonDigit {
        /// Character index
        index: usize,
    },
    /// A tile digit names no tile
    TileOutOfRange {
        /// Position on the board
        position: usize,
        /// Offending digit
        digit: u8,
    },
    /// A direction digit is 8 or 9
    DirectionOutOfRange {
        /// Position on the board
        position: usize,
        /// Offending digit
        digit: u8,
    },
    /// The tile half repeats a tile
    DuplicateTile {
        /// Repeated tile id
        tile: u8,
    },
    /// A synonym class digit names no class
    SynonymClassOutOfRange {
        /// Position on the board
        position: usize,
        /// Offending digit
        digit: u8,
    },
    /// A synonym rotation digit is outside 0 to 3
    SynonymRotationOutOfRange {
        /// Position on the board
        position: usize,
        /// Offending digit
        digit: u8,
    },
}

impl fmt::Display for PatternFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, found } => {
                write!(f, "expected {expected} characters, found {found}")
            }
            Self::NonDigit { index } => write!(f, "character {index} is not a digit"),
            Self::TileOutOfRange { position, digit } => {
                write!(f, "tile {digit} at position {position} does not exist")
            }
            Self::DirectionOutOfRange { position, digit } => {
                write!(f, "direction {digit} at position {position} is not in 0-7")
            }
            Self::DuplicateTile { tile } => write!(f, "tile {tile} is placed more than once"),
            Self::SynonymClassOutOfRange { position, digit } => {
                write!(f, "road class {digit} at position {position} is not in 0-4")
            }
            Self::SynonymRotationOutOfRange { position, digit } => {
                write!(f, "rotation {digit} at position {position} is not in 0-3")
            }
        }
    }
}

/// Main error type for all search operations
#[derive(Debug)]
pub enum TownError {
    /// Pattern string failed validation
    MalformedPattern {
        /// The rejected input
        pattern: String,
        /// First problem found
        fault: PatternFault,
    },

    /// A result-store line could not be parsed
    MalformedRecord {
        /// One-based line number
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPattern { pattern, fault } => {
                write!(f, "Malformed pattern '{pattern}': {fault}")
            }
            Self::MalformedRecord { line, reason } => {
                write!(f, "Malformed record on line {line}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TownError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for search results
pub type Result<T> = std::result::Result<T, TownError>;

/// Attaches the file and operation to I/O failures
pub trait WithContext<T> {
    /// Name the path and operation of a failed I/O call
    ///
    /// # Errors
    ///
    /// Propagates the original error as [`TownError::FileSystem`]
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithContext<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| TownError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for TownError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a malformed pattern error
pub fn malformed_pattern(pattern: &str, fault: PatternFault) -> TownError {
    TownError::MalformedPattern {
        pattern: pattern.to_string(),
        fault,
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TownError {
    TownError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
