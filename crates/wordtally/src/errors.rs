//! # Error Types

use std::io;

/// Errors raised by [`crate::vocab::TokenRegistry`] and vocab io.
#[derive(thiserror::Error, Debug)]
pub enum WTError {
    /// The caller supplied an unusable argument; such as an empty token.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The token id space is exhausted.
    #[error("vocabulary size limit reached: no ids remain below {limit}")]
    CapacityExceeded {
        /// The first id which cannot be assigned; see [`crate::types::TokenType::id_limit`].
        limit: u64,
    },

    /// A token's frequency cannot be incremented without overflowing.
    #[error("frequency of {token:?} is at its maximum")]
    FrequencyOverflow {
        /// The token whose count is saturated.
        token: String,
    },

    /// An internal consistency check failed.
    ///
    /// This signals a logic defect rather than bad input;
    /// the registry which raised it should not be used further.
    #[error("registry invariant violated: {0}")]
    Invariant(String),

    /// A vocabulary file could not be opened, read, or written.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,

        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// `load` was called on a non-empty registry.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A vocabulary source parsed to zero entries.
    #[error("empty vocabulary: {0}")]
    EmptyVocabulary(String),

    /// A line of a vocabulary file could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// The 1-based line number.
        line: usize,

        /// What was wrong with the line.
        message: String,
    },
}

impl WTError {
    /// Build a [`WTError::Io`] with context.
    pub fn io<S: Into<String>>(
        context: S,
        source: io::Error,
    ) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Build a [`WTError::Parse`].
    pub fn parse<S: Into<String>>(
        line: usize,
        message: S,
    ) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Is this error unrecoverable?
    ///
    /// Only [`WTError::Invariant`] is fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

/// Result alias for [`WTError`].
pub type WTResult<T> = Result<T, WTError>;
