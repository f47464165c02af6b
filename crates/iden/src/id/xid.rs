use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    Error, Result,
    codec::{FormatError, decode_hex, encode_hex},
    id::Id,
};

/// A 96-bit XID.
///
/// - 32 bits timestamp (seconds since the UNIX epoch)
/// - 24 bits machine ID
/// - 16 bits process ID
/// - 24 bits counter
///
/// ```text
///  Byte Index:  0            3 4          6 7          8 9          11
///               +--------------+------------+------------+-------------+
///  Field:       | timestamp(4) | machine(3) | process(2) | counter (3) |
///               +--------------+------------+------------+-------------+
/// ```
///
/// The textual form is the 12 bytes as 24 lowercase hex characters. This is
/// not the 20-character base32 form used by other XID libraries.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Xid {
    bytes: [u8; 12],
}

impl Xid {
    /// Bitmask for the 24-bit counter.
    pub const COUNTER_MASK: u32 = (1 << 24) - 1;

    /// Length of the canonical textual encoding.
    pub const ENCODED_LEN: usize = 24;

    /// Packs the four fields. The counter is truncated to 24 bits.
    #[must_use]
    pub const fn from_components(
        timestamp: u32,
        machine_id: [u8; 3],
        process_id: [u8; 2],
        counter: u32,
    ) -> Self {
        let ts = timestamp.to_be_bytes();
        let ctr = (counter & Self::COUNTER_MASK).to_be_bytes();
        Self {
            bytes: [
                ts[0],
                ts[1],
                ts[2],
                ts[3],
                machine_id[0],
                machine_id[1],
                machine_id[2],
                process_id[0],
                process_id[1],
                ctr[1],
                ctr[2],
                ctr[3],
            ],
        }
    }

    /// Packs the four fields from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `timestamp` is negative or above
    /// `u32::MAX`, `machine_id` is not 3 bytes, `process_id` is not 2 bytes,
    /// or `counter` is not below 2^24.
    pub fn new(timestamp: i64, machine_id: &[u8], process_id: &[u8], counter: u32) -> Result<Self> {
        let timestamp = u32::try_from(timestamp).map_err(|_| {
            Error::validation(
                "timestamp",
                format!("must be between 0 and {}, got {timestamp}", u32::MAX),
            )
        })?;
        let machine_id: [u8; 3] = machine_id.try_into().map_err(|_| {
            Error::validation(
                "machine_id",
                format!("must be 3 bytes, got {}", machine_id.len()),
            )
        })?;
        let process_id: [u8; 2] = process_id.try_into().map_err(|_| {
            Error::validation(
                "process_id",
                format!("must be 2 bytes, got {}", process_id.len()),
            )
        })?;
        if counter > Self::COUNTER_MASK {
            return Err(Error::validation(
                "counter",
                format!("must be below 2^24, got {counter}"),
            ));
        }
        Ok(Self::from_components(
            timestamp, machine_id, process_id, counter,
        ))
    }

    /// Seconds since the UNIX epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// The 3-byte machine ID.
    #[must_use]
    pub const fn machine_id(&self) -> [u8; 3] {
        [self.bytes[4], self.bytes[5], self.bytes[6]]
    }

    /// The 2-byte process ID.
    #[must_use]
    pub const fn process_id(&self) -> [u8; 2] {
        [self.bytes[7], self.bytes[8]]
    }

    /// The 24-bit counter.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        u32::from_be_bytes([0, self.bytes[9], self.bytes[10], self.bytes[11]])
    }

    /// Returns the maximum representable counter value.
    #[must_use]
    pub const fn max_counter() -> u32 {
        Self::COUNTER_MASK
    }

    /// Returns the 12-byte encoding.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 12] {
        self.bytes
    }

    /// Parses the 12-byte encoding.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidLength`] for anything but 12 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 12] = bytes.try_into().map_err(|_| FormatError::InvalidLength {
            expected: 12,
            actual: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Parses the 24-character hex form (either case).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on a wrong length or a non-hex character.
    pub fn from_string(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Returns the time the ID was generated, to the second.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(u64::from(self.timestamp()))
    }
}

impl Id for Xid {
    const BYTES: usize = 12;

    type Bytes = [u8; 12];

    fn to_bytes(&self) -> Self::Bytes {
        Self::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Xid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = decode_hex::<12>(s)?;
        Ok(Self { bytes })
    }
}

impl fmt::Display for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.bytes))
    }
}

impl fmt::Debug for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machine_id = encode_hex(&self.machine_id());
        let process_id = encode_hex(&self.process_id());
        f.debug_struct("Xid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("machine_id", &format_args!("{machine_id}"))
            .field("process_id", &format_args!("{process_id}"))
            .field("counter", &self.counter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, rng};

    #[test]
    fn packs_fields_big_endian() {
        let id = Xid::from_components(0x0102_0304, [0xAA, 0xBB, 0xCC], [0x12, 0x34], 0x00AB_CDEF);
        let bytes = id.to_bytes();
        assert_eq!(bytes[..4], [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(bytes[4..7], [0xAA, 0xBB, 0xCC]);
        assert_eq!(bytes[7..9], [0x12, 0x34]);
        assert_eq!(bytes[9..], [0xAB, 0xCD, 0xEF]);
        assert_eq!(id.to_string(), "01020304aabbcc1234abcdef");
        assert_eq!(id.timestamp(), 0x0102_0304);
        assert_eq!(id.machine_id(), [0xAA, 0xBB, 0xCC]);
        assert_eq!(id.process_id(), [0x12, 0x34]);
        assert_eq!(id.counter(), 0x00AB_CDEF);
    }

    #[test]
    fn counter_is_truncated_to_24_bits() {
        let id = Xid::from_components(0, [0; 3], [0; 2], 0x0100_0001);
        assert_eq!(id.counter(), 1);
    }

    #[test]
    fn new_validates_fields() {
        assert!(Xid::new(0, &[0; 3], &[0; 2], Xid::max_counter()).is_ok());
        for (field, result) in [
            ("timestamp", Xid::new(-1, &[0; 3], &[0; 2], 0)),
            ("timestamp", Xid::new(1 << 32, &[0; 3], &[0; 2], 0)),
            ("machine_id", Xid::new(0, &[0; 4], &[0; 2], 0)),
            ("process_id", Xid::new(0, &[0; 3], &[0; 1], 0)),
            ("counter", Xid::new(0, &[0; 3], &[0; 2], 1 << 24)),
        ] {
            match result {
                Err(Error::Validation { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn string_and_bytes_roundtrip() {
        let id = Xid::new(1_700_000_000, &[1, 2, 3], &[4, 5], 99).unwrap();
        let s = id.to_string();
        assert_eq!(s.len(), Xid::ENCODED_LEN);
        assert_eq!(Xid::from_string(&s).unwrap(), id);
        assert_eq!(Xid::from_string(&s.to_uppercase()).unwrap(), id);
        assert_eq!(Xid::from_bytes(&id.to_bytes()).unwrap(), id);
    }

    #[test]
    fn roundtrips_random_field_tuples() {
        let mut rng = rng();
        for _ in 0..1_000 {
            let timestamp: u32 = rng.random();
            let machine_id: [u8; 3] = rng.random();
            let process_id: [u8; 2] = rng.random();
            let counter = rng.random_range(0..=Xid::max_counter());

            let id = Xid::new(i64::from(timestamp), &machine_id, &process_id, counter).unwrap();
            assert_eq!(id.timestamp(), timestamp);
            assert_eq!(id.machine_id(), machine_id);
            assert_eq!(id.process_id(), process_id);
            assert_eq!(id.counter(), counter);
            assert_eq!(Xid::from_string(&id.to_string()).unwrap(), id);
            assert_eq!(Xid::from_bytes(&id.to_bytes()).unwrap(), id);
        }
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(matches!(Xid::from_string("invalid"), Err(Error::Format(_))));
        assert!(matches!(Xid::from_bytes(b"short"), Err(Error::Format(_))));
        assert_eq!(
            Xid::from_string(&"gg".repeat(12)),
            Err(Error::Format(FormatError::InvalidCharacter {
                character: 'g',
                index: 0
            }))
        );
        assert_eq!(
            Xid::from_bytes(&[0; 13]),
            Err(Error::Format(FormatError::InvalidLength {
                expected: 12,
                actual: 13
            }))
        );
    }

    #[test]
    fn order_is_bytewise() {
        let a = Xid::from_components(5, [0xFF; 3], [0xFF; 2], Xid::max_counter());
        let b = Xid::from_components(6, [0; 3], [0; 2], 0);
        let c = Xid::from_components(6, [0; 3], [0; 2], 1);
        assert!(a < b && b < c);
        assert!(a.to_string() < b.to_string() && b.to_string() < c.to_string());
    }

    #[test]
    fn datetime_is_unix_seconds() {
        let id = Xid::from_components(60, [0; 3], [0; 2], 0);
        assert_eq!(id.datetime(), UNIX_EPOCH + Duration::from_secs(60));
    }
}
