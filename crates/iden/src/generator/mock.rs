//! Clocks and random sources for generator tests.

use core::cell::Cell;

use crate::{Error, Result, rand::RandSource, time::TimeSource};

/// A clock that only moves when told to.
pub(crate) struct MockTime {
    millis: Cell<u64>,
}

impl MockTime {
    pub(crate) fn new(millis: u64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    pub(crate) fn set(&self, millis: u64) {
        self.millis.set(millis);
    }
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis.get()
    }
}

/// A clock that returns `values` in order, one per read, then sticks on the
/// last one.
pub(crate) struct MockStepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

impl MockStepTime {
    pub(crate) fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty());
        Self {
            values,
            index: Cell::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.index.get()
    }
}

impl TimeSource for MockStepTime {
    fn current_millis(&self) -> u64 {
        let i = self.index.get();
        self.index.set(i + 1);
        self.values[i.min(self.values.len() - 1)]
    }
}

/// Always returns the same value.
#[derive(Clone, Copy)]
pub(crate) struct MockRand(pub(crate) u128);

impl RandSource<u128> for MockRand {
    fn rand(&self) -> Result<u128> {
        Ok(self.0)
    }
}

impl RandSource<u32> for MockRand {
    fn rand(&self) -> Result<u32> {
        Ok(self.0 as u32)
    }
}

/// An entropy source that is always unavailable.
#[derive(Clone, Copy)]
pub(crate) struct FailingRand;

impl RandSource<u128> for FailingRand {
    fn rand(&self) -> Result<u128> {
        Err(Error::EntropySource("mock entropy failure".into()))
    }
}

impl RandSource<u32> for FailingRand {
    fn rand(&self) -> Result<u32> {
        Err(Error::EntropySource("mock entropy failure".into()))
    }
}
