use crate::Result;

/// A trait for random sources that return random integers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Generators draw only the low bits they need from
/// the returned value.
///
/// The random type `T` is generic (typically `u32` or `u128`).
///
/// # Errors
///
/// Implementations backed by an OS entropy source report failures as
/// [`Error::EntropySource`](crate::Error::EntropySource).
///
/// # Example
/// ```
/// use iden::rand::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u128> for FixedRand {
///     fn rand(&self) -> iden::Result<u128> {
///         Ok(1234)
///     }
/// }
///
/// assert_eq!(FixedRand.rand().unwrap(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> Result<T>;
}
