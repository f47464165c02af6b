mod lock;
mod node;

pub use lock::*;
pub use node::*;
