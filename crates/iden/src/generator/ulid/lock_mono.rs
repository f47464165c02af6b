use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Result,
    generator::{Generator, Mutex},
    id::Ulid,
    rand::{RandSource, ThreadRandom},
    time::{SystemClock, TimeSource, ULID_EPOCH},
};

/// A lock-based *monotonic* ULID generator suitable for multi-threaded
/// environments.
///
/// IDs generated within the same millisecond increment the previous random
/// field as an 80-bit integer, so they are strictly increasing. A new
/// millisecond draws a fresh random field.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered (monotonically increasing per millisecond)
pub struct UlidGenerator<T = SystemClock, R = ThreadRandom> {
    pub(crate) state: Mutex<Ulid>,
    pub(crate) time: T,
    pub(crate) rng: R,
}

impl UlidGenerator<SystemClock, ThreadRandom> {
    /// Creates a generator using the system clock and the thread-local RNG.
    ///
    /// # Example
    /// ```
    /// use iden::generator::UlidGenerator;
    ///
    /// let generator = UlidGenerator::new();
    /// let a = generator.generate().unwrap();
    /// let b = generator.generate().unwrap();
    /// assert!(a < b);
    /// assert!(a.to_string() < b.to_string());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(SystemClock::with_epoch(ULID_EPOCH), ThreadRandom)
    }
}

impl Default for UlidGenerator<SystemClock, ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> UlidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    /// Creates a generator with the provided time source and RNG.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] used to retrieve the current timestamp
    /// - `rng`: A [`RandSource`] used to generate random bits
    pub fn with_sources(time: T, rng: R) -> Self {
        Self::from_components(0, 0, time, rng)
    }

    /// Creates a generator from explicit state.
    ///
    /// Fields wider than their slot are truncated. In typical use cases, you
    /// should prefer [`Self::with_sources`].
    pub fn from_components(timestamp: u64, random: u128, time: T, rng: R) -> Self {
        Self {
            state: Mutex::new(Ulid::from_components(timestamp, random)),
            time,
            rng,
        }
    }

    /// Generates the next ULID.
    ///
    /// # Errors
    ///
    /// - [`Error::EntropyExhausted`] if the 80-bit random field overflows
    ///   within one millisecond.
    /// - [`Error::EntropySource`] if the RNG fails.
    /// - [`Error::Validation`] if the clock is past the 48-bit timestamp
    ///   range.
    /// - [`Error::LockPoisoned`] if another caller panicked while holding the
    ///   lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Ulid> {
        #[cfg(feature = "parking-lot")]
        let mut id = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut id = self.state.lock()?;

        let now = self.time.current_millis();
        if now > Ulid::max_timestamp() {
            return Err(Error::validation(
                "timestamp",
                format!("clock reads {now} ms, beyond the 48-bit maximum"),
            ));
        }

        let last = id.timestamp();
        match now.cmp(&last) {
            Ordering::Equal => {
                if id.has_random_room() {
                    *id = id.increment_random();
                } else {
                    return Err(Self::cold_exhausted(now));
                }
            }
            Ordering::Greater => {
                *id = Ulid::from_components(now, self.rng.rand()?);
            }
            Ordering::Less => {
                #[cfg(feature = "tracing")]
                tracing::warn!(last, now, "clock moved backwards, drawing fresh randomness");
                *id = Ulid::from_components(now, self.rng.rand()?);
            }
        }
        Ok(*id)
    }

    #[cold]
    #[inline(never)]
    fn cold_exhausted(timestamp: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::error!(timestamp, "random space exhausted within one millisecond");
        Error::EntropyExhausted { timestamp }
    }
}

impl<T, R> Generator for UlidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    type Id = Ulid;

    fn generate(&self) -> Result<Ulid> {
        self.generate()
    }
}
