//! Serde support. Every identifier serializes as its canonical string;
//! [`as_native_snowflake`] keeps a Snowflake as its `u64`.

use core::{fmt, marker::PhantomData, str::FromStr};

use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::id::{Ksuid, Snowflake, Ulid, Xid};

struct CanonicalVisitor<ID>(PhantomData<ID>, &'static str);

impl<ID> de::Visitor<'_> for CanonicalVisitor<ID>
where
    ID: FromStr,
    ID::Err: fmt::Display,
{
    type Value = ID;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.1)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(de::Error::custom)
    }
}

macro_rules! impl_string_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                s.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(d: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                d.deserialize_str(CanonicalVisitor(PhantomData, $expecting))
            }
        }
    };
}

impl_string_serde!(Snowflake, "a decimal Snowflake string");
impl_string_serde!(Ulid, "a 26-character Crockford base32 ULID");
impl_string_serde!(Ksuid, "a 27-character base62 KSUID");
impl_string_serde!(Xid, "a 24-character hex XID");

/// Serializes a [`Snowflake`] as its native `u64`.
///
/// ```
/// use iden::id::Snowflake;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "iden::serde::as_native_snowflake")]
///     id: Snowflake,
/// }
/// ```
pub mod as_native_snowflake {
    use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use crate::id::Snowflake;

    /// Serialize a Snowflake as its packed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a Snowflake from its packed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the reserved
    /// bit is set.
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(d)?;
        Snowflake::try_from(raw).map_err(de::Error::custom)
    }
}
