use thiserror::Error;

/// Errors raised while decoding or encoding bencode.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// Input ended before a complete value was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Integer is empty, has a forbidden leading zero, is `-0`, or does not
    /// fit a signed 64-bit value.
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// Byte-string length prefix is not a plain decimal number.
    #[error("invalid string length")]
    InvalidStringLength,

    /// A byte that cannot start or continue a value at this position.
    #[error("unexpected byte {0:#04x}")]
    UnexpectedByte(u8),

    /// A dictionary key that is not a byte string.
    #[error("dictionary key is not a byte string")]
    InvalidKey,

    /// Bytes remain after the value (whole-input decoding only).
    #[error("trailing data after value")]
    TrailingData,

    /// Recursion limit exceeded; guards against stack overflow on crafted
    /// input.
    #[error("nesting too deep")]
    NestingTooDeep,
}
