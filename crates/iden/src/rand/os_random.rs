use ::rand::{TryRngCore, rngs::OsRng};

use crate::{Error, Result, rand::RandSource};

/// A `RandSource` that reads directly from the operating system's entropy
/// source (`getrandom`).
///
/// Slower than [`ThreadRandom`](crate::rand::ThreadRandom), but every value
/// comes straight from the kernel and a failing source surfaces as
/// [`Error::EntropySource`] instead of a panic.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl OsRandom {
    fn fill<const N: usize>() -> Result<[u8; N]> {
        let mut buf = [0_u8; N];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| Error::EntropySource(e.to_string()))?;
        Ok(buf)
    }
}

impl RandSource<u32> for OsRandom {
    fn rand(&self) -> Result<u32> {
        Self::fill().map(u32::from_be_bytes)
    }
}

impl RandSource<u64> for OsRandom {
    fn rand(&self) -> Result<u64> {
        Self::fill().map(u64::from_be_bytes)
    }
}

impl RandSource<u128> for OsRandom {
    fn rand(&self) -> Result<u128> {
        Self::fill().map(u128::from_be_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_produces_distinct_values() {
        let a: u128 = OsRandom.rand().unwrap();
        let b: u128 = OsRandom.rand().unwrap();
        assert_ne!(a, b);
    }
}
