//! lazyseq core: lazy sequences driven by suspendable producers
//!
//! A sequence is written as ordinary imperative code that yields one value
//! at a time, and consumed by pulling values one at a time. Nothing is
//! computed ahead of the consumer.
//!
//! Key pieces:
//! - Producer: a body running on its own coroutine, suspended at each yield
//! - Enumerator: the move-only handle that owns and drives one producer
//! - Enumerable: anything that can hand out fresh enumerators
//! - EnumerableExt: queries and combinators built on that capability
//!
//! # Modules
//!
//! - `producer`: coroutine-backed producer state and the `Yielder` handle
//! - `enumerator`: `advance`/`current`, `Iterator` integration
//! - `cursor`: begin/end traversal with a `Sentinel`
//! - `enumerable`: the `Enumerable` / `EnumerableMut` capabilities
//! - `query`: aggregate, all, any, append, concat, as_enumerable
//! - `combinators`: `Append`, `Concat`, `fmap`, `try_fmap`
//! - `config`: producer stack size (env var / TOML)
//! - `error`: `EnumError`, `Violation`, `Fault`
//!
//! # Example
//!
//! ```
//! use lazyseq_core::{Enumerable, EnumerableExt};
//!
//! # fn main() -> Result<(), lazyseq_core::EnumError> {
//! let a = vec![1, 6, 3, 4, 86];
//! let b = 10;
//!
//! assert_eq!(a.aggregate_with(0, |acc, x| acc + x)?, 100);
//!
//! let appended = a.append(&b);
//! let last = appended.enumerator().last().unwrap()?;
//! assert_eq!(*last, 10);
//!
//! assert!(a.concat(&a).all(|x| *x > 0)?);
//! # Ok(())
//! # }
//! ```

pub mod combinators;
pub mod config;
pub mod cursor;
pub mod enumerable;
pub mod enumerator;
pub mod error;
pub mod producer;
pub mod query;

// Re-export key types and functions
pub use combinators::{Append, Concat, fmap, try_fmap};
pub use config::ProducerConfig;
pub use cursor::{Cursor, Sentinel};
pub use enumerable::{Enumerable, EnumerableMut};
pub use enumerator::Enumerator;
pub use error::{EnumError, Fault, Violation};
pub use producer::{Status, Yielder};
pub use query::EnumerableExt;
