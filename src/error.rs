//! Error types for ilweave queries

use thiserror::Error;

/// How an offset lookup was phrased, used to describe a failed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetRelation {
    /// Exact offset match
    At,
    /// Last instruction strictly before the offset
    Before,
}

impl std::fmt::Display for OffsetRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetRelation::At => write!(f, "at"),
            OffsetRelation::Before => write!(f, "before"),
        }
    }
}

/// ilweave errors
///
/// Type resolution never produces one of these: an unresolvable type is
/// reported as "does not implement", not as a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No instruction satisfies an offset lookup
    ///
    /// **Triggered by:** `at_offset` with no exact match, or `before_offset`
    /// when nothing precedes the offset (including an empty stream)
    /// **Prevention:** Only look up offsets known to exist in the method body
    #[error("No instruction {relation} offset {offset}")]
    InstructionNotFound {
        /// Requested offset
        offset: i32,
        /// Kind of lookup that failed
        relation: OffsetRelation,
    },

    /// Insertion anchor is not part of the stream
    ///
    /// **Triggered by:** `insert_before`/`insert_after` with an instruction
    /// taken from another method body, or one already removed
    #[error("Anchor instruction {id} is not in the stream")]
    AnchorNotFound {
        /// Identity of the missing anchor
        id: u64,
    },

    /// A node has no IL ranges at all
    ///
    /// **Triggered by:** `first_il_offset` on a synthetic node never tied to
    /// source offsets. Check `last_il_offset() != -1` first.
    #[error("Node has no IL ranges")]
    NoIlRanges,

    /// Type metadata could not be read or parsed
    #[error("Metadata error: {0}")]
    MetadataError(String),

    /// Options could not be read or parsed
    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Caller broke a contract; the weaving pass must stop
    Fatal,
    /// Bad input that can be fixed and retried
    Recoverable,
}

impl Error {
    /// Create a metadata error with a message
    pub fn metadata(msg: impl Into<String>) -> Self {
        Error::MetadataError(msg.into())
    }

    /// Create a config error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::InstructionNotFound { .. } => ErrorSeverity::Fatal,
            Error::AnchorNotFound { .. } => ErrorSeverity::Fatal,
            Error::NoIlRanges => ErrorSeverity::Fatal,

            Error::MetadataError(_) => ErrorSeverity::Recoverable,
            Error::ConfigError(_) => ErrorSeverity::Recoverable,
        }
    }
}

/// Result type for ilweave operations
pub type Result<T> = std::result::Result<T, Error>;
