use crate::codec::FormatError;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;
const BASE: u32 = 62;

const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 62 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes a big-endian byte string as base62, left-padded with `0` to
/// `width` characters.
///
/// The alphabet is in ASCII order, so equal-width outputs sort the same way
/// as the numbers they encode. A 20-byte input needs 27 characters.
///
/// # Example
/// ```
/// use iden::codec::encode_base62;
///
/// assert_eq!(encode_base62(&[0; 20], 27), "000000000000000000000000000");
/// assert_eq!(encode_base62(&[0xFF; 20], 27), "aWgEPTl1tmebfsQzFP4bxwgy80V");
/// ```
#[must_use]
pub fn encode_base62(input: &[u8], width: usize) -> String {
    let mut num = input.to_vec();
    let mut digits = Vec::with_capacity(width);

    // Repeated long division of the big-endian number by 62.
    while num.iter().any(|&b| b != 0) {
        let mut rem = 0_u32;
        for byte in &mut num {
            let acc = (rem << 8) | u32::from(*byte);
            *byte = (acc / BASE) as u8;
            rem = acc % BASE;
        }
        digits.push(ALPHABET[rem as usize]);
    }
    debug_assert!(digits.len() <= width, "width too small for input");

    let padding = width.saturating_sub(digits.len());
    let mut out = String::with_capacity(width.max(digits.len()));
    out.extend(core::iter::repeat_n('0', padding));
    out.extend(digits.iter().rev().map(|&d| char::from(d)));
    out
}

/// Decodes a base62 string into `N` big-endian bytes.
///
/// The input length is not checked here; callers with a fixed textual width
/// validate it first.
///
/// # Errors
///
/// - [`FormatError::InvalidCharacter`] on a symbol outside `[0-9A-Za-z]`.
/// - [`FormatError::Overflow`] if the value does not fit in `N` bytes.
pub fn decode_base62<const N: usize>(encoded: &str) -> Result<[u8; N], FormatError> {
    let mut out = [0_u8; N];
    for (index, c) in encoded.char_indices() {
        let digit = lookup(c).ok_or(FormatError::InvalidCharacter {
            character: c,
            index,
        })?;

        // out = out * 62 + digit
        let mut carry = u32::from(digit);
        for byte in out.iter_mut().rev() {
            let acc = u32::from(*byte) * BASE + carry;
            *byte = (acc & 0xFF) as u8;
            carry = acc >> 8;
        }
        if carry != 0 {
            return Err(FormatError::Overflow);
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
