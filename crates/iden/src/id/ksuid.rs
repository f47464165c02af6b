use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    Error, Result,
    codec::{FormatError, decode_base62, encode_base62, encode_hex},
    id::Id,
    time::KSUID_EPOCH,
};

/// A 160-bit KSUID.
///
/// - 32 bits timestamp (seconds since [`KSUID_EPOCH`])
/// - 128 bits random payload
///
/// ```text
///  Byte Index:  0            3 4                    19
///               +--------------+----------------------+
///  Field:       | timestamp(4) |     payload (16)     |
///               +--------------+----------------------+
/// ```
///
/// The textual form is exactly 27 base62 characters, left-padded with `0`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ksuid {
    bytes: [u8; 20],
}

impl Ksuid {
    /// Length of the random payload, in bytes.
    pub const PAYLOAD_LEN: usize = 16;

    /// Length of the canonical textual encoding.
    pub const ENCODED_LEN: usize = 27;

    /// Builds a KSUID from a timestamp and payload.
    #[must_use]
    pub const fn from_components(timestamp: u32, payload: [u8; 16]) -> Self {
        let ts = timestamp.to_be_bytes();
        let mut bytes = [0_u8; 20];
        let mut i = 0;
        while i < 4 {
            bytes[i] = ts[i];
            i += 1;
        }
        while i < 20 {
            bytes[i] = payload[i - 4];
            i += 1;
        }
        Self { bytes }
    }

    /// Builds a KSUID from untrusted parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `timestamp` does not fit in 32
    /// unsigned bits or `payload` is not exactly 16 bytes.
    pub fn from_parts(timestamp: i64, payload: &[u8]) -> Result<Self> {
        let timestamp = u32::try_from(timestamp).map_err(|_| {
            Error::validation(
                "timestamp",
                format!("must be between 0 and {}, got {timestamp}", u32::MAX),
            )
        })?;
        let payload: [u8; 16] = payload.try_into().map_err(|_| {
            Error::validation(
                "payload",
                format!("must be 16 bytes, got {}", payload.len()),
            )
        })?;
        Ok(Self::from_components(timestamp, payload))
    }

    /// Seconds since [`KSUID_EPOCH`].
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// The 16-byte random payload.
    #[must_use]
    pub fn payload(&self) -> [u8; 16] {
        let mut payload = [0_u8; 16];
        payload.copy_from_slice(&self.bytes[4..]);
        payload
    }

    /// Returns the 20-byte big-endian encoding.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 20] {
        self.bytes
    }

    /// Parses the 20-byte binary encoding.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidLength`] for anything but 20 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 20] = bytes.try_into().map_err(|_| FormatError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Parses the 27-character base62 form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on a wrong length, a non-base62 character, or
    /// a value above 2^160 - 1.
    pub fn from_string(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Returns the time the ID was generated, to the second.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + KSUID_EPOCH + Duration::from_secs(u64::from(self.timestamp()))
    }
}

impl Id for Ksuid {
    const BYTES: usize = 20;

    type Bytes = [u8; 20];

    fn to_bytes(&self) -> Self::Bytes {
        Self::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Ksuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != Self::ENCODED_LEN {
            return Err(FormatError::InvalidLength {
                expected: Self::ENCODED_LEN,
                actual: s.len(),
            }
            .into());
        }
        let bytes = decode_base62::<20>(s)?;
        Ok(Self { bytes })
    }
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_base62(&self.bytes, Self::ENCODED_LEN))
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ksuid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("payload", &format_args!("{}", encode_hex(&self.bytes[4..])))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_hex;

    use rand::{Rng, rng};

    // Reference value from segmentio/ksuid.
    const REFERENCE: &str = "0ujtsYcgvSTl8PAuAdqWYSMnLOv";
    const REFERENCE_HEX: &str = "0669f7efb5a1cd34b5f99d1154fb6853345c9735";

    #[test]
    fn decodes_reference_value() {
        let id = Ksuid::from_string(REFERENCE).unwrap();
        assert_eq!(id.timestamp(), 107_608_047);
        assert_eq!(
            id.payload(),
            decode_hex::<16>("b5a1cd34b5f99d1154fb6853345c9735").unwrap()
        );
        assert_eq!(id.to_bytes(), decode_hex::<20>(REFERENCE_HEX).unwrap());
        assert_eq!(id.to_string(), REFERENCE);
    }

    #[test]
    fn extremes_encode_to_fixed_width() {
        let min = Ksuid::from_components(0, [0; 16]);
        let max = Ksuid::from_components(u32::MAX, [0xFF; 16]);
        assert_eq!(min.to_string(), "000000000000000000000000000");
        assert_eq!(max.to_string(), "aWgEPTl1tmebfsQzFP4bxwgy80V");
    }

    #[test]
    fn from_parts_validates() {
        assert!(Ksuid::from_parts(0, &[0; 16]).is_ok());
        assert!(Ksuid::from_parts(i64::from(u32::MAX), &[0; 16]).is_ok());
        assert!(matches!(
            Ksuid::from_parts(-1, &[0; 16]),
            Err(Error::Validation {
                field: "timestamp",
                ..
            })
        ));
        assert!(matches!(
            Ksuid::from_parts(1 << 32, &[0; 16]),
            Err(Error::Validation {
                field: "timestamp",
                ..
            })
        ));
        assert!(matches!(
            Ksuid::from_parts(0, &[0; 15]),
            Err(Error::Validation {
                field: "payload",
                ..
            })
        ));
    }

    #[test]
    fn string_and_bytes_roundtrip() {
        let id = Ksuid::from_components(123_456_789, core::array::from_fn(|i| i as u8 * 7));
        assert_eq!(Ksuid::from_string(&id.to_string()).unwrap(), id);
        assert_eq!(Ksuid::from_bytes(&id.to_bytes()).unwrap(), id);
    }

    #[test]
    fn roundtrips_random_field_tuples() {
        let mut rng = rng();
        for _ in 0..1_000 {
            let timestamp: u32 = rng.random();
            let payload: [u8; 16] = rng.random();

            let id = Ksuid::from_parts(i64::from(timestamp), &payload).unwrap();
            assert_eq!(id.timestamp(), timestamp);
            assert_eq!(id.payload(), payload);
            assert_eq!(Ksuid::from_string(&id.to_string()).unwrap(), id);
            assert_eq!(Ksuid::from_bytes(&id.to_bytes()).unwrap(), id);
        }
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(
            Ksuid::from_string("0ujtsYcgvSTl8PAuAdqWYSMnLO"),
            Err(Error::Format(FormatError::InvalidLength {
                expected: 27,
                actual: 26
            }))
        );
        assert!(matches!(
            Ksuid::from_string("0ujtsYcgvSTl8PAuAdqWYSMnLO_"),
            Err(Error::Format(FormatError::InvalidCharacter {
                character: '_',
                index: 26
            }))
        ));
        assert_eq!(
            Ksuid::from_string("zzzzzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(Error::Format(FormatError::Overflow))
        );
        assert_eq!(
            Ksuid::from_bytes(&[0; 19]),
            Err(Error::Format(FormatError::InvalidLength {
                expected: 20,
                actual: 19
            }))
        );
    }

    #[test]
    fn order_is_timestamp_then_payload() {
        let a = Ksuid::from_components(1, [0xFF; 16]);
        let b = Ksuid::from_components(2, [0; 16]);
        let c = Ksuid::from_components(2, [1; 16]);
        assert!(a < b && b < c);
        assert!(a.to_string() < b.to_string() && b.to_string() < c.to_string());
    }

    #[test]
    fn datetime_counts_from_ksuid_epoch() {
        let id = Ksuid::from_components(10, [0; 16]);
        assert_eq!(
            id.datetime(),
            UNIX_EPOCH + Duration::from_secs(1_425_859_210)
        );
    }

    #[test]
    fn debug_shows_hex_payload() {
        let id = Ksuid::from_string(REFERENCE).unwrap();
        let debug = format!("{id:?}");
        let payload = "b5a1cd34b5f99d1154fb6853345c9735";
        assert!(debug.contains(payload), "{debug}");
        assert!(debug.contains("107608047"), "{debug}");
    }
}
