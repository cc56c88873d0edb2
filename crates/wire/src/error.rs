//! Typed error types for descriptor encoding and decoding.

/// Encoding failures.
///
/// Every variant is a defect in the registered grammar rather than a per-call
/// recoverable condition: the registry has outgrown what the wire format can
/// carry, and truncating an index silently would corrupt the remote client's
/// completion tables.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A count or index is wider than its wire field.
    #[error("{what} ({value}) exceeds the wire limit of {max}")]
    LimitExceeded {
        /// What was being encoded (e.g. "enum value index").
        what: &'static str,
        /// The offending value.
        value: u64,
        /// The maximum the field width can carry.
        max: u64,
    },

    /// An index referenced a pool entry that does not exist.
    ///
    /// Indicates an internally inconsistent descriptor, not an input error.
    #[error("{what} {index} is out of bounds for a pool of {len}")]
    DanglingIndex {
        /// What kind of index was being encoded.
        what: &'static str,
        /// The dangling index.
        index: u64,
        /// The pool size it had to stay below.
        len: u64,
    },
}

/// Decoding failures.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input ended before the structure was complete.
    #[error("unexpected end of descriptor at byte {offset}")]
    UnexpectedEof {
        /// Byte offset at which more data was required.
        offset: usize,
    },

    /// The format version prefix is not one this decoder understands.
    #[error("unsupported wire format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the input.
        found: u16,
        /// Version this decoder supports.
        expected: u16,
    },

    /// A string field held invalid UTF-8.
    #[error("invalid UTF-8 in string at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset of the string's first byte.
        offset: usize,
    },

    /// Trailing bytes remained after the descriptor was fully read.
    #[error("{count} trailing bytes after descriptor")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },
}
