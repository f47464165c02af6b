use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Result,
    generator::{Generator, IdGenStatus, Mutex},
    id::Snowflake,
    time::{SystemClock, TWITTER_EPOCH, TimeSource},
};

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The last emitted ID is the generator state; it lives behind a [`Mutex`]
/// and the clock is read while the lock is held, so concurrent callers never
/// observe or advance the same state.
///
/// ## Behaviour
/// - Same millisecond: the sequence is incremented. When it is exhausted the
///   caller spins, still holding the lock, until the clock advances.
/// - Newer millisecond: the sequence resets to zero.
/// - Older millisecond: [`Error::ClockRegression`]. Nothing is retried.
///
/// ## See Also
/// - [`SnowflakeGenerator::try_poll_id`] for a non-spinning variant.
pub struct SnowflakeGenerator<T = SystemClock> {
    pub(crate) state: Mutex<Snowflake>,
    pub(crate) time: T,
    datacenter_id: u64,
    worker_id: u64,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator counting milliseconds from [`TWITTER_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] unless both IDs are in `0..=31`.
    ///
    /// # Example
    /// ```
    /// use iden::generator::SnowflakeGenerator;
    ///
    /// let generator = SnowflakeGenerator::new(1, 1).unwrap();
    /// let a = generator.generate().unwrap();
    /// let b = generator.generate().unwrap();
    /// assert!(a < b);
    /// assert_eq!(a.datacenter_id(), 1);
    ///
    /// assert!(SnowflakeGenerator::new(0, 32).is_err());
    /// ```
    pub fn new(datacenter_id: i64, worker_id: i64) -> Result<Self> {
        Self::with_time(
            datacenter_id,
            worker_id,
            SystemClock::with_epoch(TWITTER_EPOCH),
        )
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time`.
    ///
    /// The initial state has timestamp and sequence zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] unless both IDs are in `0..=31`.
    pub fn with_time(datacenter_id: i64, worker_id: i64, time: T) -> Result<Self> {
        Self::from_components(datacenter_id, worker_id, 0, 0, time)
    }

    /// Creates a generator from explicit state.
    ///
    /// This constructor is primarily useful for restoring a generator or
    /// forcing it into a particular state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] unless both IDs are in `0..=31`, and
    /// [`Error::Validation`] if `last_timestamp` or `sequence` does not fit
    /// its field.
    pub fn from_components(
        datacenter_id: i64,
        worker_id: i64,
        last_timestamp: u64,
        sequence: u64,
        time: T,
    ) -> Result<Self> {
        let datacenter_id = node_id("datacenter_id", datacenter_id)?;
        let worker_id = node_id("worker_id", worker_id)?;
        let id = Snowflake::new(last_timestamp, datacenter_id, worker_id, sequence)?;
        Ok(Self {
            state: Mutex::new(id),
            time,
            datacenter_id,
            worker_id,
        })
    }

    /// Datacenter ID stamped into every generated Snowflake.
    #[must_use]
    pub const fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Worker ID stamped into every generated Snowflake.
    #[must_use]
    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// Generates the next ID, spinning through a sequence overflow.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock is behind the last emitted
    ///   timestamp.
    /// - [`Error::Validation`] if the clock is past the 41-bit timestamp
    ///   range.
    /// - [`Error::LockPoisoned`] if another caller panicked while holding the
    ///   lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Snowflake> {
        #[cfg(feature = "parking-lot")]
        let mut id = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut id = self.state.lock()?;

        let mut spinning = false;
        loop {
            match self.advance(&mut id)? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { .. } => {
                    if !spinning {
                        spinning = true;
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            timestamp = id.timestamp(),
                            "sequence exhausted, waiting for next millisecond"
                        );
                    }
                    core::hint::spin_loop();
                }
            }
        }
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// Returns [`IdGenStatus::Pending`] with `yield_for: 1` when the
    /// sequence is exhausted for the current millisecond; the lock is
    /// released before returning.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    ///
    /// # Example
    /// ```
    /// use iden::generator::{IdGenStatus, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(0, 0).unwrap();
    /// let id = loop {
    ///     match generator.try_poll_id().unwrap() {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// assert_eq!(id.sequence(), 0);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus<Snowflake>> {
        #[cfg(feature = "parking-lot")]
        let mut id = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut id = self.state.lock()?;

        self.advance(&mut id)
    }

    /// One step of the state machine. Must be called with the lock held.
    fn advance(&self, id: &mut Snowflake) -> Result<IdGenStatus<Snowflake>> {
        let now = self.time.current_millis();
        let last = id.timestamp();

        match now.cmp(&last) {
            Ordering::Equal => {
                if id.has_sequence_room() {
                    *id = id.increment_sequence();
                    Ok(IdGenStatus::Ready { id: *id })
                } else {
                    Ok(IdGenStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                if now > Snowflake::max_timestamp() {
                    return Err(Self::cold_timestamp_overflow(now));
                }
                *id = id.rollover_to_timestamp(now);
                Ok(IdGenStatus::Ready { id: *id })
            }
            Ordering::Less => Err(Self::cold_clock_behind(now, last)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::error!(last, now, "clock moved backwards, refusing to generate");
        Error::ClockRegression { last, now }
    }

    #[cold]
    #[inline(never)]
    fn cold_timestamp_overflow(now: u64) -> Error {
        Error::validation(
            "timestamp",
            format!(
                "clock reads {now} ms past the epoch, beyond the 41-bit maximum {}",
                Snowflake::max_timestamp()
            ),
        )
    }
}

impl<T> Generator for SnowflakeGenerator<T>
where
    T: TimeSource,
{
    type Id = Snowflake;

    fn generate(&self) -> Result<Snowflake> {
        self.generate()
    }
}

const MAX_NODE_ID: i64 = 31;

fn node_id(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|&id| id <= MAX_NODE_ID as u64)
        .ok_or(Error::Config {
            field,
            value,
            max: MAX_NODE_ID,
        })
}
