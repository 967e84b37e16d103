//! The Enumerable capability
//!
//! An `Enumerable` is not a container. It is something that can hand out a
//! fresh [`Enumerator`] on demand, each one starting from the beginning of
//! the sequence and independent of every other enumerator obtained from the
//! same source.
//!
//! Concrete sequences implement [`Enumerable::enumerator`] by writing a
//! producer body:
//!
//! ```
//! use lazyseq_core::{Enumerable, Enumerator};
//!
//! struct Evens {
//!     limit: u32,
//!     values: Vec<u32>,
//! }
//!
//! impl Evens {
//!     fn new(limit: u32) -> Self {
//!         Evens { limit, values: (0..limit).map(|n| n * 2).collect() }
//!     }
//! }
//!
//! impl Enumerable for Evens {
//!     type Item = u32;
//!
//!     fn enumerator(&self) -> Enumerator<'_, &u32> {
//!         Enumerator::new(move |y| {
//!             for value in &self.values[..self.limit as usize] {
//!                 y.yield_(value);
//!             }
//!             Ok(())
//!         })
//!     }
//! }
//!
//! let evens = Evens::new(3);
//! let collected: Vec<u32> = evens.enumerator().map(|v| *v.unwrap()).collect();
//! assert_eq!(collected, vec![0, 2, 4]);
//! ```

use crate::enumerator::Enumerator;

/// Read-only capability: produce an enumerator over shared references.
pub trait Enumerable {
    /// Element type of the sequence
    type Item;

    /// A fresh traversal from the start of the sequence.
    fn enumerator(&self) -> Enumerator<'_, &Self::Item>;
}

/// Mutable capability: produce an enumerator over exclusive references.
pub trait EnumerableMut: Enumerable {
    /// A fresh traversal whose elements can be modified in place.
    fn enumerator_mut(&mut self) -> Enumerator<'_, &mut Self::Item>;
}

impl<T> Enumerable for [T] {
    type Item = T;

    fn enumerator(&self) -> Enumerator<'_, &T> {
        Enumerator::new(move |y| {
            for item in self {
                y.yield_(item);
            }
            Ok(())
        })
    }
}

impl<T> EnumerableMut for [T] {
    fn enumerator_mut(&mut self) -> Enumerator<'_, &mut T> {
        Enumerator::new(move |y| {
            for item in self {
                y.yield_(item);
            }
            Ok(())
        })
    }
}

impl<T> Enumerable for Vec<T> {
    type Item = T;

    fn enumerator(&self) -> Enumerator<'_, &T> {
        self.as_slice().enumerator()
    }
}

impl<T> EnumerableMut for Vec<T> {
    fn enumerator_mut(&mut self) -> Enumerator<'_, &mut T> {
        self.as_mut_slice().enumerator_mut()
    }
}
