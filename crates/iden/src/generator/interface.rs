use crate::{Result, id::Id};

/// A minimal interface shared by every generator.
///
/// Implementations are passive: they never spawn threads and only block on
/// their own state lock (plus the bounded Snowflake overflow spin).
pub trait Generator {
    /// The identifier type produced.
    type Id: Id;

    /// Returns the next identifier.
    ///
    /// # Errors
    ///
    /// See the concrete generator for the failure modes it reports.
    fn generate(&self) -> Result<Self::Id>;
}
