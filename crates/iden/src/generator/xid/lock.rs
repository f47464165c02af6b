#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Result,
    generator::{Generator, Mutex, host_machine_id, host_process_id},
    id::Xid,
    rand::{RandSource, ThreadRandom},
    time::{SystemClock, TimeSource, XID_EPOCH},
};

/// A lock-based XID generator suitable for multi-threaded environments.
///
/// The machine and process IDs are fixed at construction. Every call
/// increments a 24-bit counter that wraps to zero and is never reset when
/// the second changes, so IDs from one second are ordered by counter value.
pub struct XidGenerator<T = SystemClock> {
    pub(crate) state: Mutex<Xid>,
    pub(crate) time: T,
    machine_id: [u8; 3],
    process_id: [u8; 2],
}

impl XidGenerator<SystemClock> {
    /// Creates a generator for this host and process.
    ///
    /// The machine ID is derived from the host name and the process ID from
    /// the OS process ID; the counter starts at a random value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropySource`] if the RNG fails.
    ///
    /// # Example
    /// ```
    /// use iden::generator::XidGenerator;
    ///
    /// let generator = XidGenerator::new().unwrap();
    /// let id = generator.generate().unwrap();
    /// assert_eq!(id.to_string().len(), 24);
    /// assert_eq!(id.machine_id(), generator.machine_id());
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_sources(SystemClock::with_epoch(XID_EPOCH), &ThreadRandom)
    }
}

impl<T> XidGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator for this host and process reading time from
    /// `time`. `rng` seeds the counter and covers a missing host name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropySource`] if the RNG fails.
    pub fn with_sources<R>(time: T, rng: &R) -> Result<Self>
    where
        R: RandSource<u32>,
    {
        let machine_id = host_machine_id(rng)?;
        let counter: u32 = rng.rand()?;
        Ok(Self::from_components(
            machine_id,
            host_process_id(),
            counter,
            time,
        ))
    }

    /// Creates a generator from explicit state. The next ID carries
    /// `counter + 1`, modulo 2^24.
    pub fn from_components(
        machine_id: [u8; 3],
        process_id: [u8; 2],
        counter: u32,
        time: T,
    ) -> Self {
        Self {
            state: Mutex::new(Xid::from_components(0, machine_id, process_id, counter)),
            time,
            machine_id,
            process_id,
        }
    }

    /// Machine ID stamped into every generated XID.
    #[must_use]
    pub const fn machine_id(&self) -> [u8; 3] {
        self.machine_id
    }

    /// Process ID stamped into every generated XID.
    #[must_use]
    pub const fn process_id(&self) -> [u8; 2] {
        self.process_id
    }

    /// Generates the next XID.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the clock is past the 32-bit seconds range.
    /// - [`Error::LockPoisoned`] if another caller panicked while holding the
    ///   lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Xid> {
        #[cfg(feature = "parking-lot")]
        let mut id = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut id = self.state.lock()?;

        let now = self.time.current_secs();
        let timestamp = u32::try_from(now).map_err(|_| {
            Error::validation(
                "timestamp",
                format!("clock reads {now} s, beyond the 32-bit maximum"),
            )
        })?;

        let counter = id.counter().wrapping_add(1) & Xid::COUNTER_MASK;
        *id = Xid::from_components(timestamp, self.machine_id, self.process_id, counter);
        Ok(*id)
    }
}

impl<T> Generator for XidGenerator<T>
where
    T: TimeSource,
{
    type Id = Xid;

    fn generate(&self) -> Result<Xid> {
        self.generate()
    }
}
