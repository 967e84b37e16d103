//! Sequence-producing combinators
//!
//! `Append` and `Concat` are Enumerables built from other Enumerables. They
//! borrow their sources: the borrow checker guarantees every source outlives
//! the derived sequence, and each `enumerator()` call opens fresh
//! enumerators on the sources, so `a.concat(&a)` is fine.
//!
//! `fmap` and `try_fmap` transform a single [`Enumerator`] instead.

use crate::enumerable::Enumerable;
use crate::enumerator::Enumerator;
use crate::error::Fault;

/// Every element of `source`, then `value`.
pub struct Append<'s, E>
where
    E: Enumerable + ?Sized,
{
    source: &'s E,
    value: &'s E::Item,
}

impl<'s, E> Append<'s, E>
where
    E: Enumerable + ?Sized,
{
    pub(crate) fn new(source: &'s E, value: &'s E::Item) -> Self {
        Append { source, value }
    }
}

impl<E> Enumerable for Append<'_, E>
where
    E: Enumerable + ?Sized,
{
    type Item = E::Item;

    fn enumerator(&self) -> Enumerator<'_, &E::Item> {
        let (source, value) = (self.source, self.value);
        Enumerator::new(move |y| {
            y.yield_from(source.enumerator())?;
            y.yield_(value);
            Ok(())
        })
    }
}

/// Every element of `first`, then every element of `second`.
pub struct Concat<'s, E, O>
where
    E: Enumerable + ?Sized,
    O: Enumerable<Item = E::Item> + ?Sized,
{
    first: &'s E,
    second: &'s O,
}

impl<'s, E, O> Concat<'s, E, O>
where
    E: Enumerable + ?Sized,
    O: Enumerable<Item = E::Item> + ?Sized,
{
    pub(crate) fn new(first: &'s E, second: &'s O) -> Self {
        Concat { first, second }
    }
}

impl<E, O> Enumerable for Concat<'_, E, O>
where
    E: Enumerable + ?Sized,
    O: Enumerable<Item = E::Item> + ?Sized,
{
    type Item = E::Item;

    fn enumerator(&self) -> Enumerator<'_, &E::Item> {
        let (first, second) = (self.first, self.second);
        Enumerator::new(move |y| {
            y.yield_from(first.enumerator())?;
            y.yield_from(second.enumerator())?;
            Ok(())
        })
    }
}

/// Apply `function` to each element of `source`, lazily and in order.
///
/// `function` runs once per element, and only when that element is pulled
/// from the returned enumerator. Faults of `source` pass through unchanged.
///
/// ```
/// use lazyseq_core::{Enumerable, fmap};
///
/// let words = vec!["lazy", "seq"];
/// let lengths: Vec<usize> = fmap(|w: &&str| w.len(), words.enumerator())
///     .map(Result::unwrap)
///     .collect();
/// assert_eq!(lengths, vec![4, 3]);
/// ```
pub fn fmap<'a, T, U, F>(mut function: F, source: Enumerator<'a, T>) -> Enumerator<'a, U>
where
    F: FnMut(T) -> U + 'a,
    T: 'a,
    U: 'a,
{
    Enumerator::new(move |y| {
        source.drive(|source| -> Result<(), Fault> {
            for item in source {
                y.yield_(function(item?));
            }
            Ok(())
        })
    })
}

/// Like [`fmap`], for a function that can fail.
///
/// An `Err` from `function` faults the returned enumerator at that element.
pub fn try_fmap<'a, T, U, F>(mut function: F, source: Enumerator<'a, T>) -> Enumerator<'a, U>
where
    F: FnMut(T) -> Result<U, Fault> + 'a,
    T: 'a,
    U: 'a,
{
    Enumerator::new(move |y| {
        source.drive(|source| -> Result<(), Fault> {
            for item in source {
                y.yield_(function(item?)?);
            }
            Ok(())
        })
    })
}
