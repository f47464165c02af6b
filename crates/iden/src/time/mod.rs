mod interface;
mod system_clock;

pub use interface::*;
pub use system_clock::*;
