use ::rand::{Rng, rng};

use crate::{Result, rand::RandSource};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free and safe. This type does **not** store the RNG itself; it
/// simply accesses the thread-local generator on each call, which makes it
/// `Send + Sync` even though `ThreadRng` is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> Result<u32> {
        Ok(rng().random())
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> Result<u64> {
        Ok(rng().random())
    }
}

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> Result<u128> {
        Ok(rng().random())
    }
}
