//! Error types for OBJ model operations
//!
//! All errors carry an error code for categorization. The model core fails
//! synchronously and never performs a partial mutation: when an operation
//! returns an error, the model is in the same state as before the call.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: text syntax errors (reader)
//! - **E3xxx**: model errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading or writing a stream
//! - `E2001`: malformed directive, number, or face reference
//! - `E2002`: unsupported directive (strict mode only)
//! - `E3001`: invalid argument
//! - `E3002`: index out of range
//! - `E3003`: no group registered under the given name

use std::io;
use thiserror::Error;

/// Result type for OBJ operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, reading, or writing an OBJ model
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing a stream
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    /// - Disk read or write failure
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed OBJ text
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Wrong number of operands for a directive
    /// - A coordinate that is not a valid number
    /// - A face reference that is not `v`, `v/vt`, `v//vn`, or `v/vt/vn`
    /// - A face reference of `0` (OBJ indices are 1-based)
    ///
    /// The line number is 1-based and counts physical lines, so a
    /// continuation line reports the line the directive started on.
    #[error("[E2001] Line {line}: {message}")]
    Syntax {
        /// 1-based line number in the input
        line: usize,
        /// Description of the syntax error
        message: String,
    },

    /// Unsupported directive encountered in strict mode
    ///
    /// **Error Code**: E2002
    ///
    /// In the default lenient mode unknown directives are logged and
    /// skipped; see [`ReadConfig::strict`](crate::parser::ReadConfig::strict).
    #[error("[E2002] Line {line}: unsupported directive '{directive}'")]
    UnsupportedDirective {
        /// 1-based line number in the input
        line: usize,
        /// The directive keyword that was not recognized
        directive: String,
    },

    /// A required value was missing or structurally invalid
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - An empty group name
    /// - A tuple with the wrong number of components for its role
    /// - A face whose texcoord/normal index list differs in length from
    ///   its vertex index list
    /// - `add_weight` or `add_bone` with no vertex/armature to attach to
    #[error("[E3001] Invalid argument: {0}")]
    InvalidArgument(String),

    /// An index referenced a position outside the target collection
    ///
    /// **Error Code**: E3002
    ///
    /// Raised before any insertion occurs; a face that fails this check
    /// leaves the model untouched.
    #[error("[E3002] {kind} index is {index}, but must be smaller than {len}")]
    IndexOutOfRange {
        /// Which collection the index referenced (e.g. "Vertex")
        kind: &'static str,
        /// The offending index
        index: usize,
        /// The size of the collection at the time of the call
        len: usize,
    },

    /// A name-based replacement referenced an unregistered name
    ///
    /// **Error Code**: E3003
    #[error("[E3003] No {kind} named '{name}' is registered")]
    NotFound {
        /// Which registry was consulted ("group" or "material group")
        kind: &'static str,
        /// The name that failed to resolve
        name: String,
    },
}

impl Error {
    /// Create a `Syntax` error with line context
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Create an `IndexOutOfRange` error for the given collection
    pub fn index_out_of_range(kind: &'static str, index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { kind, index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let io_err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "test"));
        assert!(io_err.to_string().contains("[E1001]"));

        let syntax = Error::syntax(7, "expected 3 operands");
        assert!(syntax.to_string().contains("[E2001]"));
        assert!(syntax.to_string().contains("Line 7"));

        let oor = Error::index_out_of_range("Vertex", 9, 3);
        assert!(oor.to_string().contains("[E3002]"));

        let not_found = Error::NotFound {
            kind: "group",
            name: "wing".to_string(),
        };
        assert!(not_found.to_string().contains("[E3003]"));
        assert!(not_found.to_string().contains("wing"));
    }

    #[test]
    fn test_index_out_of_range_message_shape() {
        let err = Error::index_out_of_range("TexCoord", 4, 2);
        assert_eq!(
            err.to_string(),
            "[E3002] TexCoord index is 4, but must be smaller than 2"
        );
    }
}
