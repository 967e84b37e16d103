//! Cursor / sentinel traversal over an [`Enumerator`]
//!
//! For code that wants an explicit begin/end loop instead of `Iterator`:
//!
//! ```
//! use lazyseq_core::Enumerator;
//!
//! # fn main() -> Result<(), lazyseq_core::EnumError> {
//! let mut e = Enumerator::new(|y| {
//!     y.yield_(1);
//!     y.yield_(2);
//!     Ok(())
//! });
//! let end = e.end();
//! let mut cursor = e.begin()?;
//! let mut total = 0;
//! while cursor != end {
//!     total += *cursor.get()?;
//!     cursor.increment()?;
//! }
//! assert_eq!(total, 3);
//! # Ok(())
//! # }
//! ```
//!
//! The cursor borrows the enumerator mutably, so it can never outlive it and
//! only one cursor can drive it at a time.

use crate::enumerator::Enumerator;
use crate::error::EnumError;

/// End-of-sequence marker compared against a [`Cursor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sentinel;

/// Single-pass position within an enumerator.
pub struct Cursor<'e, 'a, T> {
    enumerator: &'e mut Enumerator<'a, T>,
}

impl<'a, T> Enumerator<'a, T> {
    /// Start the producer and return a cursor on its first element.
    ///
    /// Each call advances once, so a traversal should call `begin` exactly
    /// once.
    pub fn begin(&mut self) -> Result<Cursor<'_, 'a, T>, EnumError> {
        self.advance()?;
        Ok(Cursor { enumerator: self })
    }

    /// The sentinel every cursor over this enumerator ends at.
    pub fn end(&self) -> Sentinel {
        Sentinel
    }
}

impl<T> Cursor<'_, '_, T> {
    /// Move to the next element. A producer fault is returned here.
    pub fn increment(&mut self) -> Result<&mut Self, EnumError> {
        self.enumerator.advance()?;
        Ok(self)
    }

    /// The element under the cursor.
    pub fn get(&self) -> Result<&T, EnumError> {
        self.enumerator.current()
    }

    /// Mutable access to the element under the cursor.
    pub fn get_mut(&mut self) -> Result<&mut T, EnumError> {
        self.enumerator.current_mut()
    }

    /// True once the enumerator has nothing more to give.
    pub fn is_end(&self) -> bool {
        self.enumerator.is_exhausted()
    }
}

impl<T> PartialEq<Sentinel> for Cursor<'_, '_, T> {
    fn eq(&self, _: &Sentinel) -> bool {
        self.is_end()
    }
}

impl<T> PartialEq<Cursor<'_, '_, T>> for Sentinel {
    fn eq(&self, cursor: &Cursor<'_, '_, T>) -> bool {
        cursor.is_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    fn letters() -> Enumerator<'static, char> {
        Enumerator::new(|y| {
            for c in ['a', 'b', 'c'] {
                y.yield_(c);
            }
            Ok(())
        })
    }

    #[test]
    fn test_begin_starts_producer() {
        let mut e = letters();
        let cursor = e.begin().unwrap();
        assert_eq!(*cursor.get().unwrap(), 'a');
        assert!(cursor != Sentinel);
    }

    #[test]
    fn test_walk_to_sentinel() {
        let mut e = letters();
        let end = e.end();
        let mut cursor = e.begin().unwrap();
        let mut seen = String::new();
        while cursor != end {
            seen.push(*cursor.get().unwrap());
            cursor.increment().unwrap();
        }
        assert_eq!(seen, "abc");
        assert!(Sentinel == cursor);
        assert!(matches!(
            cursor.get(),
            Err(EnumError::Contract(Violation::Exhausted))
        ));
    }

    #[test]
    fn test_empty_enumerator_begins_at_end() {
        let mut e: Enumerator<'_, u8> = Enumerator::empty();
        let cursor = e.begin().unwrap();
        assert!(cursor == Sentinel);

        let mut e: Enumerator<'_, u8> = Enumerator::new(|_| Ok(()));
        let cursor = e.begin().unwrap();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_fault_surfaces_on_increment() {
        let mut e = Enumerator::new(|y| {
            y.yield_(1);
            y.yield_(2);
            Err("lost connection".into())
        });
        let mut cursor = e.begin().unwrap();
        cursor.increment().unwrap();
        assert_eq!(*cursor.get().unwrap(), 2);

        let err = cursor.increment().err().unwrap();
        assert!(err.is_fault());
        assert!(cursor == Sentinel);
    }

    #[test]
    fn test_fault_surfaces_on_begin() {
        let mut e: Enumerator<'_, i32> = Enumerator::new(|_| Err("no data".into()));
        assert!(e.begin().is_err());
        assert!(e.is_exhausted());
    }

    #[test]
    fn test_get_mut() {
        let mut e = letters();
        let mut cursor = e.begin().unwrap();
        *cursor.get_mut().unwrap() = 'z';
        assert_eq!(*cursor.get().unwrap(), 'z');
    }
}
