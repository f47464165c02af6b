mod interface;
mod ksuid;
mod snowflake;
mod ulid;
mod xid;

pub use interface::*;
pub use ksuid::*;
pub use snowflake::*;
pub use ulid::*;
pub use xid::*;
