//! Error types for the IRC session library.
//!
//! This module defines error types for line-level protocol failures and
//! for building outbound lines from user intent. The session state machine
//! itself never fails; see [`crate::state`] for how bad events are handled.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Line exceeded maximum allowed length.
    #[error("message too long: {0} bytes")]
    MessageTooLong(usize),

    /// Illegal control character in a line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// The line contained nothing to parse.
    #[error("empty message")]
    EmptyMessage,

    /// An outbound intent could not be turned into a protocol line.
    #[error("invalid intent: {0}")]
    Encode(#[from] EncodeError),
}

/// Errors encountered when building an outbound line from intent text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Intent text was empty.
    #[error("empty intent")]
    EmptyIntent,

    /// Plain text was submitted without an active channel or peer.
    #[error("no target for plain message")]
    NoTarget,

    /// A known command was missing a required argument.
    #[error("missing argument for /{command}")]
    MissingArgument {
        /// The lowercase command word.
        command: &'static str,
    },
}
