mod interface;
mod ksuid;
#[cfg(test)]
pub(crate) mod mock;
mod mutex;
mod snowflake;
mod status;
mod ulid;
mod xid;

pub use interface::*;
pub use ksuid::*;
pub use mutex::*;
pub use snowflake::*;
pub use status::*;
pub use ulid::*;
pub use xid::*;
