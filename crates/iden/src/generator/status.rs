/// Represents the result of polling a generator without blocking.
///
/// This type models the outcome of
/// [`SnowflakeGenerator::try_poll_id`](crate::generator::SnowflakeGenerator::try_poll_id):
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the sequence is exhausted for the current
///   millisecond and no ID can be produced until the clock advances.
///
/// This allows non-blocking generation loops and clean backoff strategies.
///
/// # Example
///
/// ```
/// use iden::{
///     generator::{IdGenStatus, SnowflakeGenerator},
///     time::TimeSource,
/// };
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let generator = SnowflakeGenerator::from_components(0, 0, 1, 4095, FixedTime).unwrap();
/// match generator.try_poll_id().unwrap() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_for } => println!("Back off for {yield_for} ms"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus<T> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: T,
    },
    /// No ID could be generated because the sequence has been exhausted for the
    /// current tick.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: u64,
    },
}

impl<T> IdGenStatus<T> {
    /// Returns the ID if one was generated.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready { id } => Some(id),
            Self::Pending { .. } => None,
        }
    }
}
