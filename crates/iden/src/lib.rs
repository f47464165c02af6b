//! Time-ordered, sortable identifiers.
//!
//! `iden` provides four identifier families, each a fixed-width value type
//! plus a generator that fills it:
//!
//! | Type | Bits | Layout | Text |
//! |---|---|---|---|
//! | [`Snowflake`] | 64 | timestamp(41) datacenter(5) worker(5) sequence(12) | decimal |
//! | [`Ulid`] | 128 | timestamp(48) random(80) | 26 Crockford base32 |
//! | [`Ksuid`] | 160 | timestamp(32) payload(128) | 27 base62 |
//! | [`Xid`] | 96 | timestamp(32) machine(24) process(16) counter(24) | 24 hex |
//!
//! Values order by their big-endian binary encoding, and the textual
//! encodings are fixed-width so they sort the same way.
//!
//! Generators are passive: they never spawn threads, keep their state behind
//! a single mutex, and report every failure through [`Error`].
//!
//! ```
//! use iden::generator::{SnowflakeGenerator, UlidGenerator};
//!
//! let snowflakes = SnowflakeGenerator::new(1, 7)?;
//! let a = snowflakes.generate()?;
//! let b = snowflakes.generate()?;
//! assert!(a < b);
//!
//! let ulids = UlidGenerator::new();
//! let id = ulids.generate()?;
//! assert_eq!(iden::id::Ulid::from_string(&id.to_string())?, id);
//! # Ok::<(), iden::Error>(())
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): `trace` spans around generation and events for
//!   clock regression and sequence overflow.
//! - `parking-lot`: use `parking_lot::Mutex`. Locks no longer poison, so
//!   [`Error`] loses its `LockPoisoned` variant.
//! - `serde`: string-form `Serialize`/`Deserialize` for all values.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
mod error;
pub mod generator;
pub mod id;
pub mod rand;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
pub mod time;

pub use crate::error::*;
pub use crate::generator::{
    Generator, IdGenStatus, KsuidGenerator, SnowflakeGenerator, UlidGenerator, XidGenerator,
};
pub use crate::id::{Id, Ksuid, Snowflake, Ulid, Xid};
