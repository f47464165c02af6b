use crate::codec::FormatError;

/// Encodes bytes as lowercase hex.
#[must_use]
pub fn encode_hex(input: &[u8]) -> String {
    ::hex::encode(input)
}

/// Decodes exactly `2 * N` hex characters (either case) into `N` bytes.
///
/// # Errors
///
/// - [`FormatError::InvalidLength`] if `encoded` is not `2 * N` characters.
/// - [`FormatError::InvalidCharacter`] on a non-hex character.
pub fn decode_hex<const N: usize>(encoded: &str) -> Result<[u8; N], FormatError> {
    let expected = N * 2;
    if encoded.len() != expected {
        return Err(FormatError::InvalidLength {
            expected,
            actual: encoded.len(),
        });
    }

    let mut out = [0_u8; N];
    ::hex::decode_to_slice(encoded, &mut out).map_err(|e| match e {
        // `c` is a single byte; recover the full character from the input
        ::hex::FromHexError::InvalidHexCharacter { c, index } => FormatError::InvalidCharacter {
            character: encoded
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(c),
            index,
        },
        _ => FormatError::InvalidLength {
            expected,
            actual: encoded.len(),
        },
    })?;
    Ok(out)
}
