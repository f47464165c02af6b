//! Fixed-width textual codecs shared by the identifier types.
//!
//! All three alphabets sort in the same order as the unsigned big-endian
//! bytes they encode, provided the output is padded to a fixed width.

mod base16;
mod base62;
mod crockford;
mod error;

pub use base16::*;
pub use base62::*;
pub use crockford::*;
pub use error::*;
