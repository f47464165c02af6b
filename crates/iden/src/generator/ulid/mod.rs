mod lock_mono;
#[cfg(test)]
mod tests;

pub use lock_mono::*;
