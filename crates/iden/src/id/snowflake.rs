use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result, codec::FormatError, id::Id};

/// A 64-bit Snowflake ID.
///
/// - 1 bit reserved (always zero)
/// - 41 bits timestamp (ms since the generator's epoch, [`TWITTER_EPOCH`] by
///   default)
/// - 5 bits datacenter ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21                17 16            12 11             0
///              +--------------+----------------+--------------------+----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter ID (5)  | worker ID (5)  | sequence (12) |
///              +--------------+----------------+--------------------+----------------+---------------+
///              |<------------------- MSB ------------- 64 bits ------------- LSB ------------------>|
/// ```
///
/// The textual form is the unsigned decimal of the packed integer.
///
/// [`TWITTER_EPOCH`]: crate::time::TWITTER_EPOCH
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake {
    id: u64,
}

impl Snowflake {
    /// Bitmask for the reserved most significant bit.
    pub const RESERVED_MASK: u64 = 1 << 63;

    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit datacenter ID field. Occupies bits 17
    /// through 21.
    pub const DATACENTER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 12
    /// through 16.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position.
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the datacenter ID to its correct position.
    pub const DATACENTER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the worker ID to its correct position.
    pub const WORKER_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four fields, silently truncating each to its width.
    ///
    /// Prefer [`Snowflake::new`] for untrusted input.
    #[must_use]
    pub const fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let datacenter_id = (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | datacenter_id | worker_id | sequence,
        }
    }

    /// Packs the four fields after checking each fits its width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any field is out of range.
    pub fn new(timestamp: u64, datacenter_id: u64, worker_id: u64, sequence: u64) -> Result<Self> {
        check_width("timestamp", timestamp, Self::TIMESTAMP_MASK)?;
        check_width("datacenter_id", datacenter_id, Self::DATACENTER_ID_MASK)?;
        check_width("worker_id", worker_id, Self::WORKER_ID_MASK)?;
        check_width("sequence", sequence, Self::SEQUENCE_MASK)?;
        Ok(Self::from_components(
            timestamp,
            datacenter_id,
            worker_id,
            sequence,
        ))
    }

    /// Extracts the timestamp from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter ID from the packed ID.
    #[must_use]
    pub const fn datacenter_id(&self) -> u64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the worker ID from the packed ID.
    #[must_use]
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the maximum representable sequence value.
    #[must_use]
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns the maximum representable timestamp value.
    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw type into this type without validation.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns `true` if the reserved bit is unset.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id & Self::RESERVED_MASK == 0
    }

    /// Returns the 8-byte big-endian encoding.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.id.to_be_bytes()
    }

    /// Parses the 8-byte big-endian encoding.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidLength`] for anything but 8 bytes, and
    /// [`FormatError::Overflow`] if the reserved bit is set.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 8] = bytes.try_into().map_err(|_| FormatError::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Self::try_from(u64::from_be_bytes(bytes))
    }

    /// Parses the decimal textual form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `s` is not a decimal `u64` with the
    /// reserved bit clear.
    pub fn from_string(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Returns the time the ID was generated, given the epoch its generator
    /// counted from.
    #[must_use]
    pub fn datetime(&self, epoch: Duration) -> SystemTime {
        UNIX_EPOCH + epoch + Duration::from_millis(self.timestamp())
    }

    /// Returns `true` if another ID can be issued in the same millisecond.
    pub(crate) const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented.
    #[must_use]
    pub(crate) const fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.datacenter_id(),
            self.worker_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with sequence reset to zero.
    #[must_use]
    pub(crate) const fn rollover_to_timestamp(&self, ts: u64) -> Self {
        Self::from_components(ts, self.datacenter_id(), self.worker_id(), 0)
    }
}

fn check_width(field: &'static str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(Error::validation(
            field,
            format!("must be between 0 and {max}, got {value}"),
        ));
    }
    Ok(())
}

impl Id for Snowflake {
    const BYTES: usize = 8;

    type Bytes = [u8; 8];

    fn to_bytes(&self) -> Self::Bytes {
        Self::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.to_raw()
    }
}

impl TryFrom<u64> for Snowflake {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(FormatError::Overflow.into());
        }
        Ok(id)
    }
}

impl FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // `u64::from_str` tolerates a leading '+'; the wire format does not.
        if let Some((index, character)) = s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(FormatError::InvalidCharacter { character, index }.into());
        }
        let raw = s.parse::<u64>().map_err(FormatError::from)?;
        Self::try_from(raw)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snowflake")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
