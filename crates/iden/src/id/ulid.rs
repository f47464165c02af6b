use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    Error, Result,
    codec::{FormatError, decode_base32, encode_base32},
    id::Id,
};

/// A 128-bit ULID.
///
/// - 48 bits timestamp (ms since the UNIX epoch)
/// - 80 bits random
///
/// ```text
///  Bit Index:  127            80 79           0
///              +----------------+-------------+
///  Field:      | timestamp (48) | random (80) |
///              +----------------+-------------+
///              |<-- MSB -- 128 bits -- LSB -->|
/// ```
///
/// The textual form is 26 Crockford base32 characters; the first one is
/// always in `0..=7` because the encoding has two zero pad bits.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ulid {
    id: u128,
}

impl Ulid {
    /// Width of the millisecond timestamp field.
    pub const TIMESTAMP_BITS: u128 = 48;
    /// Width of the random field.
    pub const RANDOM_BITS: u128 = 80;

    /// Number of bits to shift the random field (bit 0).
    pub const RANDOM_SHIFT: u128 = 0;
    /// Number of bits to shift the timestamp to its correct position.
    pub const TIMESTAMP_SHIFT: u128 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;

    /// Bitmask for extracting the 48-bit timestamp field. Occupies bits 80
    /// through 127.
    pub const TIMESTAMP_MASK: u128 = (1 << Self::TIMESTAMP_BITS) - 1;
    /// Bitmask for extracting the 80-bit random field. Occupies bits 0
    /// through 79.
    pub const RANDOM_MASK: u128 = (1 << Self::RANDOM_BITS) - 1;

    /// Length of the canonical textual encoding.
    pub const ENCODED_LEN: usize = 26;

    /// Packs the two fields, silently truncating each to its width.
    #[must_use]
    pub const fn from_components(timestamp: u64, random: u128) -> Self {
        let t = (timestamp as u128 & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let r = (random & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
        Self { id: t | r }
    }

    /// Packs the two fields after checking each fits its width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the timestamp needs more than 48 bits
    /// or the random value more than 80 bits.
    pub fn new(timestamp: u64, random: u128) -> Result<Self> {
        if u128::from(timestamp) > Self::TIMESTAMP_MASK {
            return Err(Error::validation(
                "timestamp",
                format!("must fit in 48 bits, got {timestamp}"),
            ));
        }
        if random > Self::RANDOM_MASK {
            return Err(Error::validation(
                "random",
                format!("must fit in 80 bits, got {random}"),
            ));
        }
        Ok(Self::from_components(timestamp, random))
    }

    /// Extracts the timestamp from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        ((self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK) as u64
    }

    /// Extracts the random number from the packed ID.
    #[must_use]
    pub const fn random(&self) -> u128 {
        (self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK
    }

    /// Returns the maximum representable timestamp value.
    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK as u64
    }

    /// Returns the maximum representable random value.
    #[must_use]
    pub const fn max_random() -> u128 {
        Self::RANDOM_MASK
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Converts a raw type into this type
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    /// Returns the 16-byte big-endian encoding.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.id.to_be_bytes()
    }

    /// Parses the 16-byte big-endian encoding.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidLength`] for anything but 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 16] = bytes.try_into().map_err(|_| FormatError::InvalidLength {
            expected: 16,
            actual: bytes.len(),
        })?;
        Ok(Self::from_raw(u128::from_be_bytes(bytes)))
    }

    /// Parses the 26-character Crockford base32 form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on a wrong length, a character outside the
    /// alphabet, or a first character above `7`.
    pub fn from_string(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Returns the time the ID was generated.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.timestamp())
    }

    /// Returns true if the random field can be incremented without carrying
    /// into the timestamp.
    pub(crate) const fn has_random_room(&self) -> bool {
        self.random() < Self::max_random()
    }

    /// Returns a new ID with the random portion incremented.
    #[must_use]
    pub(crate) const fn increment_random(&self) -> Self {
        Self::from_components(self.timestamp(), self.random() + 1)
    }
}

impl Id for Ulid {
    const BYTES: usize = 16;

    type Bytes = [u8; 16];

    fn to_bytes(&self) -> Self::Bytes {
        Self::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<Ulid> for u128 {
    fn from(id: Ulid) -> Self {
        id.to_raw()
    }
}

impl From<u128> for Ulid {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl FromStr for Ulid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = decode_base32::<16>(s)?;
        Ok(Self::from_raw(u128::from_be_bytes(bytes)))
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_base32(&self.to_bytes()))
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("random", &self.random())
            .finish()
    }
}
