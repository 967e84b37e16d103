//! Query operators layered on the Enumerable capability
//!
//! [`EnumerableExt`] is implemented for every [`Enumerable`], including
//! `dyn Enumerable`, and only ever uses `enumerator()`. Scalar queries return
//! `Result` because pulling from a producer can fail; an empty sequence is
//! never an error. A panicking callback still releases the enumerator it
//! was pulling from before the panic leaves the query.
//!
//! | query              | empty sequence  | stops early        |
//! |--------------------|-----------------|--------------------|
//! | `aggregate*`       | seed / default  | never              |
//! | `all`              | `true`          | first non-match    |
//! | `any`              | `false`         | first match        |

use crate::combinators::{Append, Concat};
use crate::enumerable::Enumerable;
use crate::error::EnumError;

/// Query operators available on every Enumerable.
pub trait EnumerableExt: Enumerable {
    /// Left fold seeded with `Item::default()`.
    fn aggregate<F>(&self, func: F) -> Result<Self::Item, EnumError>
    where
        Self::Item: Default,
        F: FnMut(Self::Item, &Self::Item) -> Self::Item,
    {
        self.aggregate_with(<Self::Item as Default>::default(), func)
    }

    /// Left fold with an explicit seed, possibly of another type.
    fn aggregate_with<A, F>(&self, seed: A, mut func: F) -> Result<A, EnumError>
    where
        F: FnMut(A, &Self::Item) -> A,
    {
        self.enumerator().drive(|e| -> Result<A, EnumError> {
            let mut acc = seed;
            for item in e {
                acc = func(acc, item?);
            }
            Ok(acc)
        })
    }

    /// Left fold with an explicit seed, then `select` applied to the result.
    fn aggregate_select<A, R, F, S>(&self, seed: A, func: F, select: S) -> Result<R, EnumError>
    where
        F: FnMut(A, &Self::Item) -> A,
        S: FnOnce(A) -> R,
    {
        self.aggregate_with(seed, func).map(select)
    }

    /// True if every element satisfies `predicate`.
    fn all<P>(&self, mut predicate: P) -> Result<bool, EnumError>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.enumerator().drive(|e| -> Result<bool, EnumError> {
            for item in e {
                if !predicate(item?) {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// True if at least one element satisfies `predicate`.
    fn any<P>(&self, mut predicate: P) -> Result<bool, EnumError>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.enumerator().drive(|e| -> Result<bool, EnumError> {
            for item in e {
                if predicate(item?) {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// This sequence followed by `value`.
    fn append<'s>(&'s self, value: &'s Self::Item) -> Append<'s, Self> {
        Append::new(self, value)
    }

    /// This sequence followed by `other`.
    fn concat<'s, O>(&'s self, other: &'s O) -> Concat<'s, Self, O>
    where
        O: Enumerable<Item = Self::Item> + ?Sized,
    {
        Concat::new(self, other)
    }

    /// View this sequence through the capability alone.
    fn as_enumerable(&self) -> &dyn Enumerable<Item = Self::Item>
    where
        Self: Sized,
    {
        self
    }
}

impl<E: Enumerable + ?Sized> EnumerableExt for E {}
