#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Result,
    generator::Generator,
    id::Ksuid,
    rand::{RandSource, ThreadRandom},
    time::{KSUID_EPOCH, SystemClock, TimeSource},
};

/// A KSUID generator.
///
/// There is no shared state: every call reads the clock in whole seconds
/// since [`KSUID_EPOCH`] and draws a fresh 128-bit payload, so no lock is
/// needed and the generator is trivially thread-safe when its sources are.
///
/// IDs from the same second are unordered relative to each other.
pub struct KsuidGenerator<T = SystemClock, R = ThreadRandom> {
    pub(crate) time: T,
    pub(crate) rng: R,
}

impl KsuidGenerator<SystemClock, ThreadRandom> {
    /// Creates a generator counting seconds from [`KSUID_EPOCH`].
    ///
    /// # Example
    /// ```
    /// use iden::generator::KsuidGenerator;
    ///
    /// let generator = KsuidGenerator::new();
    /// let id = generator.generate().unwrap();
    /// assert_eq!(id.to_string().len(), 27);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(SystemClock::with_epoch(KSUID_EPOCH), ThreadRandom)
    }
}

impl Default for KsuidGenerator<SystemClock, ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> KsuidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    /// Creates a generator with the provided time source and RNG. The time
    /// source must count from [`KSUID_EPOCH`].
    pub const fn with_sources(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates a new KSUID.
    ///
    /// # Errors
    ///
    /// - [`Error::EntropySource`] if the RNG fails.
    /// - [`Error::Validation`] if the clock is past the 32-bit seconds range.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Ksuid> {
        let now = self.time.current_secs();
        let timestamp = u32::try_from(now).map_err(|_| {
            Error::validation(
                "timestamp",
                format!("clock reads {now} s past the epoch, beyond the 32-bit maximum"),
            )
        })?;
        let payload: u128 = self.rng.rand()?;
        Ok(Ksuid::from_components(timestamp, payload.to_be_bytes()))
    }
}

impl<T, R> Generator for KsuidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    type Id = Ksuid;

    fn generate(&self) -> Result<Ksuid> {
        self.generate()
    }
}
