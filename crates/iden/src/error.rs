use crate::codec::FormatError;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `iden` can produce.
///
/// Every variant is surfaced synchronously to the caller of the operation
/// that detected it. Nothing is retried internally; the only designed wait is
/// the bounded Snowflake sequence-overflow spin, which is not an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A generator was constructed with an out-of-range node identifier.
    #[error("{field} must be between 0 and {max}, got {value}")]
    Config {
        /// Name of the offending constructor argument.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// The largest accepted value.
        max: i64,
    },

    /// The wall clock was observed behind the generator's last timestamp.
    ///
    /// This is fatal for the call: emitting an ID would risk a duplicate or an
    /// out-of-order value. The caller decides whether to abort or resync.
    #[error("clock moved backwards: last timestamp {last}, now {now}")]
    ClockRegression {
        /// Timestamp stored in the generator state.
        last: u64,
        /// Timestamp just read from the clock.
        now: u64,
    },

    /// The monotonic random field was exhausted within a single tick.
    #[error("random space exhausted for timestamp {timestamp}")]
    EntropyExhausted {
        /// The millisecond in which the space ran out.
        timestamp: u64,
    },

    /// The random source failed to produce bytes.
    #[error("entropy source failure: {0}")]
    EntropySource(String),

    /// Malformed textual or binary input to a parse operation.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A field is outside its fixed-width range on direct construction.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: String,
    },

    /// The generator lock was poisoned by a panicking caller.
    ///
    /// `parking_lot` mutexes do not poison, so this variant only exists when
    /// the `parking-lot` feature is disabled.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
