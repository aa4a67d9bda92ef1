//! Unique identifiers for distributed applications.
//!
//! `idsmith` produces three kinds of identifiers:
//!
//! - **Distributed IDs**: 64-bit, strictly monotonic, Snowflake-style IDs
//!   packing a millisecond timestamp, a worker id, a process id and a
//!   per-millisecond sequence. See [`BasicSnowflakeGenerator`] and
//!   [`LockSnowflakeGenerator`].
//! - **Random IDs**: RFC 4122 version 4 UUIDs. See [`RandomIdGenerator`].
//! - **Random strings**: fixed-length strings over a configurable alphabet.
//!   See [`RandomStringGenerator`].
//!
//! [`IdGenerator`] dispatches over all three from a single [`IdConfig`].
//!
//! # Example
//!
//! ```
//! use idsmith::{BasicSnowflakeGenerator, Identity, SystemClock, decode};
//!
//! let identity = Identity::new(5, 10, idsmith::DEFAULT_EPOCH)?;
//! let generator = BasicSnowflakeGenerator::new(identity, SystemClock)?;
//!
//! let id = generator.next_id()?.to_string();
//! let decoded = decode(&id, idsmith::DEFAULT_EPOCH)?;
//! assert_eq!(decoded.worker_id, 5);
//! assert_eq!(decoded.process_id, 10);
//! # Ok::<(), idsmith::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "random")]
mod dispatch;
mod error;
mod generator;
mod id;
#[cfg(feature = "random")]
mod rand;
#[cfg(feature = "random")]
mod random;
#[cfg(feature = "serde")]
mod serde;
mod time;

#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
#[cfg(feature = "random")]
pub use crate::dispatch::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
#[cfg(feature = "random")]
pub use crate::rand::*;
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
#[cfg(feature = "random")]
pub use crate::random::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
