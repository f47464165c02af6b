use core::num::ParseIntError;

/// Errors produced when decoding malformed textual or binary input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The input does not have the fixed length required by the format.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length in characters or bytes.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },

    /// The input contains a character outside the format's alphabet.
    #[error("invalid character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        index: usize,
    },

    /// The decoded value does not fit the fixed-width field (for example a
    /// ULID whose first symbol is above `7`).
    #[error("decoded value overflows the fixed-width field")]
    Overflow,

    /// The input is not a valid unsigned decimal integer.
    #[error("invalid decimal: {0}")]
    InvalidDecimal(#[from] ParseIntError),
}
