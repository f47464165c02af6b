use crate::codec::FormatError;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Number of Crockford base32 characters needed to encode `bytes` bytes.
///
/// The most significant character carries `len * 5 - bytes * 8` zero pad
/// bits, which is what keeps the textual form sortable.
#[must_use]
pub const fn base32_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(BITS_PER_CHAR)
}

/// Encodes a big-endian byte string as fixed-width Crockford base32.
///
/// The output always has [`base32_len`] characters, with the leading pad bits
/// set to zero. A 16-byte input therefore produces 26 characters whose first
/// symbol is in `0..=7`.
///
/// # Example
/// ```
/// use iden::codec::encode_base32;
///
/// let encoded = encode_base32(&42_u128.to_be_bytes());
/// assert_eq!(encoded, "0000000000000000000000001A");
/// ```
#[must_use]
pub fn encode_base32(input: &[u8]) -> String {
    let output_chars = base32_len(input.len());
    let input_bits = input.len() * 8;
    let total_bits = output_chars * BITS_PER_CHAR;
    let mut bits = total_bits - input_bits;
    let mut acc = 0_u16;
    let mask = 0x1F;

    let mut out = String::with_capacity(output_chars);
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out.push(char::from(ALPHABET[usize::from((acc >> bits) & mask)]));
        }
    }
    out
}

/// Decodes a fixed-width Crockford base32 string into `N` big-endian bytes.
///
/// Decoding is case-insensitive and accepts the Crockford aliases `O` (for
/// `0`) and `I`/`L` (for `1`).
///
/// # Errors
///
/// - [`FormatError::InvalidLength`] if `encoded` is not exactly
///   [`base32_len(N)`](base32_len) characters long.
/// - [`FormatError::InvalidCharacter`] on a symbol outside the alphabet.
/// - [`FormatError::Overflow`] if the leading pad bits are not zero, i.e.
///   the value does not fit in `N` bytes.
pub fn decode_base32<const N: usize>(encoded: &str) -> Result<[u8; N], FormatError> {
    let expected = base32_len(N);
    if encoded.len() != expected {
        return Err(FormatError::InvalidLength {
            expected,
            actual: encoded.len(),
        });
    }

    let pad = expected * BITS_PER_CHAR - N * 8;
    let mut out = [0_u8; N];
    let mut acc = 0_u16;
    let mut bits = 0;
    let mut pos = 0;

    for (index, c) in encoded.char_indices() {
        let val = lookup(c).ok_or(FormatError::InvalidCharacter {
            character: c,
            index,
        })?;

        if index == 0 {
            // The pad bits sit at the top of the first symbol.
            let keep = BITS_PER_CHAR - pad;
            if u16::from(val) >> keep != 0 {
                return Err(FormatError::Overflow);
            }
            acc = u16::from(val);
            bits = keep;
        } else {
            acc = (acc << BITS_PER_CHAR) | u16::from(val);
            bits += BITS_PER_CHAR;
        }

        if bits >= 8 {
            bits -= 8;
            out[pos] = (acc >> bits) as u8;
            pos += 1;
            acc &= (1 << bits) - 1;
        }
    }

    Ok(out)
}

fn lookup(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match LOOKUP[c as usize] {
        NO_VALUE => None,
        val => Some(val),
    }
}
