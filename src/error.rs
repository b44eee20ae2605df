//! Error types for HLL wire-format parsing

use std::fmt;

/// Errors that can occur while decoding a serialized HLL
///
/// All variants are returned eagerly from [`crate::Hll::from_bytes`] — there
/// is no deferred/lazy error surface, unlike the dynamically-typed reference
/// this crate is wire-compatible with (see `SPEC_FULL.md` section 7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HllError {
    /// Input does not start with the `HYLL` magic bytes
    InvalidSignature,

    /// Input is shorter than the header or the payload the header declares
    Truncated {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes actually present
        actual: usize,
    },

    /// Encoding byte (offset 4) is neither 0 (dense) nor 1 (sparse)
    UnknownEncoding(u8),

    /// Sparse payload is malformed: an opcode run overflows 16384 registers,
    /// the runs don't sum to exactly 16384, or a VAL opcode would imply a
    /// register value greater than the sparse representation's maximum of 32
    InvalidSparseOpcode {
        /// Byte offset within the sparse payload where decoding failed
        offset: usize,
    },
}

impl fmt::Display for HllError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HllError::InvalidSignature => write!(f, "Invalid signature"),
            HllError::Truncated { expected, actual } => write!(
                f,
                "Truncated HLL payload: expected at least {} bytes, got {}",
                expected, actual
            ),
            HllError::UnknownEncoding(byte) => write!(f, "Unknown HLL encoding byte: {}", byte),
            HllError::InvalidSparseOpcode { offset } => {
                write!(f, "Invalid sparse opcode at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for HllError {}

/// Result type alias for HLL wire-format operations
pub type Result<T> = std::result::Result<T, HllError>;
