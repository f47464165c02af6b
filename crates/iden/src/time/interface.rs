/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests. The unit is **milliseconds** relative to the source's own
/// epoch; generators that only need second resolution use
/// [`TimeSource::current_secs`].
///
/// # Example
///
/// ```
/// use iden::time::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// assert_eq!(time.current_secs(), 1);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> u64;

    /// Returns the current time in whole seconds since the configured epoch.
    fn current_secs(&self) -> u64 {
        self.current_millis() / 1_000
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
