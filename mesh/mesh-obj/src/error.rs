//! Error types for OBJ serialization.

use thiserror::Error;

/// Result alias for OBJ operations.
pub type ObjResult<T> = Result<T, ObjError>;

/// Errors that can occur while reading or writing OBJ text.
#[derive(Debug, Error)]
pub enum ObjError {
    /// A line could not be parsed.
    #[error("malformed OBJ line {line}: {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A face referenced a vertex that does not exist.
    #[error("OBJ line {line} references vertex {index}, but only {available} are defined")]
    IndexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The 1-based index as written in the file.
        index: i64,
        /// Number of vertices defined so far.
        available: usize,
    },

    /// A face had fewer or more than three corners.
    #[error("OBJ line {line} has {corners} face corners, only triangles are supported")]
    NotATriangle {
        /// 1-based line number.
        line: usize,
        /// Corner count found.
        corners: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
