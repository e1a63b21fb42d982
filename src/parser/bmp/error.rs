use crate::ParserError;
use std::io;
use thiserror::Error;

/// Errors that abort the BMP message being decoded.
///
/// None of them affect other [BmpMessage](crate::BmpMessage) instances; the caller drops the
/// failed message and decides whether the connection can continue.
#[derive(Debug, Error)]
pub enum ParserBmpError {
    /// The caller fed a chunk whose size differs from `next_expected_length()`. This is a bug
    /// in the code driving the decoder, not a protocol problem.
    #[error("expected a chunk of {expected} bytes, got {actual}")]
    ChunkLengthMismatch { expected: usize, actual: usize },
    /// `consume` was called on a message that already completed or failed.
    #[error("BMP message is already complete or aborted")]
    MessageFinished,
    #[error("found BMP version {0}, expecting 1")]
    UnsupportedVersion(u8),
    #[error("unknown BMP message type {0}")]
    UnknownMessageType(u8),
    #[error("unknown statistics element type {0}")]
    UnknownStatType(u16),
    #[error("invalid stats data length {0}")]
    InvalidStatsDataLength(u16),
    #[error("invalid embedded BGP message length {0}")]
    InvalidBgpLength(u16),
    /// Failure inside the embedded BGP message decoder.
    #[error(transparent)]
    ParseError(#[from] ParserError),
    #[error(transparent)]
    IoError(#[from] io::Error),
    /// The stream ended in the middle of a message.
    #[error("truncated BMP message: needed {expected} bytes, read {read}")]
    TruncatedMessage { expected: usize, read: usize },
    #[cfg(feature = "oneio")]
    #[error(transparent)]
    OneIoError(#[from] oneio::OneIoError),
}
