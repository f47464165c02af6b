use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::TimeSource;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// KSUID epoch: Monday, March 9, 2015 00:00:00 UTC
pub const KSUID_EPOCH: Duration = Duration::from_secs(1_425_859_200);

/// ULIDs use the standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const ULID_EPOCH: Duration = Duration::ZERO;

/// XIDs use the standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const XID_EPOCH: Duration = Duration::ZERO;

/// A wall-clock time source offset from a fixed epoch.
///
/// Every call reads [`SystemTime::now`], so an NTP step or manual adjustment
/// is visible to the generator. Generators that must never emit out-of-order
/// IDs (Snowflake) detect this and fail with
/// [`Error::ClockRegression`](crate::Error::ClockRegression).
///
/// Times before the epoch saturate to `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    epoch_offset: u64, // in milliseconds
}

impl Default for SystemClock {
    /// Constructs a clock counting from the UNIX epoch.
    fn default() -> Self {
        Self::with_epoch(Duration::ZERO)
    }
}

impl SystemClock {
    /// Constructs a clock using `epoch` (a [`Duration`] since 1970-01-01 UTC)
    /// as its origin.
    ///
    /// # Example
    ///
    /// ```
    /// use iden::time::{SystemClock, TimeSource, TWITTER_EPOCH};
    ///
    /// let unix = SystemClock::default();
    /// let twitter = SystemClock::with_epoch(TWITTER_EPOCH);
    /// assert!(twitter.current_millis() < unix.current_millis());
    /// ```
    #[must_use]
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_offset: epoch.as_millis() as u64,
        }
    }

    /// Returns the configured epoch.
    #[must_use]
    pub const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_offset)
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        let since_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let millis = u64::try_from(since_unix.as_millis()).unwrap_or(u64::MAX);
        millis.saturating_sub(self.epoch_offset)
    }
}
