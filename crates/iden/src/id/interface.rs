use core::{fmt, hash::Hash, str::FromStr};

use crate::{Error, Result};

/// Behaviour shared by every identifier value.
///
/// Values are immutable and ordered by their canonical big-endian binary
/// encoding, which is also the order of their canonical textual encoding.
/// Equality is on the packed fields, so a generated value and the same value
/// parsed back from text or bytes compare equal.
pub trait Id:
    Copy + Clone + fmt::Display + fmt::Debug + FromStr<Err = Error> + Ord + Eq + Hash
{
    /// Length of the canonical binary encoding, in bytes.
    const BYTES: usize;

    /// Fixed-size array holding the canonical binary encoding.
    type Bytes: AsRef<[u8]> + Copy + fmt::Debug + Ord + Eq + Hash;

    /// Returns the canonical big-endian binary encoding.
    fn to_bytes(&self) -> Self::Bytes;

    /// Parses the canonical binary encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `bytes` has the wrong length or encodes a
    /// value outside the type's fixed-width fields.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Parses the canonical textual encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on malformed input.
    fn from_string(s: &str) -> Result<Self> {
        s.parse()
    }
}
