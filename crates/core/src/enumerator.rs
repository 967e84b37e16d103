//! Enumerator: the owning handle that drives one producer
//!
//! An `Enumerator` is single-use and move-only. It owns exactly one
//! producer and the slot holding the value that producer yielded last.
//!
//! ## Driving it
//!
//! - [`Enumerator::advance`] + [`Enumerator::current`]: explicit pull.
//! - [`Enumerator::begin`] / [`Enumerator::end`]: cursor/sentinel pair
//!   (see [`crate::cursor`]).
//! - `Iterator`: `for item in enumerator { let item = item?; ... }`.
//!
//! ## Terminal states
//!
//! Once the body returns (or fails) the producer is released right away.
//! Further `advance` calls return `Ok(false)` and touch nothing; a fault is
//! reported by exactly one `advance`.
//!
//! ## Dropping during a panic
//!
//! Dropping a suspended enumerator cancels its producer by unwinding the
//! body. That cannot happen while the thread is already unwinding, so an
//! enumerator dropped by a panic leaks its body's locals. Code that runs
//! user callbacks while holding an enumerator should go through
//! [`Enumerator::drive`], which releases the enumerator before letting the
//! panic continue. The queries, combinators and `yield_from` all do.

use crate::config;
use crate::error::{EnumError, Fault, Violation};
use crate::producer::{Producer, Status, Step, Yielder};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace};

/// Owning, single-pass handle over a lazily produced sequence.
#[must_use = "enumerators do nothing unless advanced"]
pub struct Enumerator<'a, T> {
    producer: Option<Producer<'a, T>>,
    current: Option<T>,
    status: Status,
}

impl<'a, T: 'a> Enumerator<'a, T> {
    /// Create an enumerator whose elements are produced by `body`.
    ///
    /// The body does not start until the first [`advance`](Self::advance).
    ///
    /// # Example
    ///
    /// ```
    /// use lazyseq_core::Enumerator;
    ///
    /// let squares = Enumerator::new(|y| {
    ///     for n in 1..=3 {
    ///         y.yield_(n * n);
    ///     }
    ///     Ok(())
    /// });
    /// let values: Vec<i32> = squares.map(Result::unwrap).collect();
    /// assert_eq!(values, vec![1, 4, 9]);
    /// ```
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce(&mut Yielder<'_, T>) -> Result<(), Fault> + 'a,
    {
        Self::from_producer(Producer::new(body))
    }

    /// Like [`new`](Self::new), with an explicit coroutine stack size in bytes.
    pub fn with_stack_size<F>(stack_size: usize, body: F) -> Self
    where
        F: FnOnce(&mut Yielder<'_, T>) -> Result<(), Fault> + 'a,
    {
        Self::from_producer(Producer::with_stack_words(
            config::stack_words(stack_size),
            body,
        ))
    }

    fn from_producer(producer: Producer<'a, T>) -> Self {
        Enumerator {
            producer: Some(producer),
            current: None,
            status: Status::NotStarted,
        }
    }
}

impl<'a, T> Enumerator<'a, T> {
    /// An enumerator with no computation behind it. It behaves as already
    /// completed.
    pub fn empty() -> Self {
        Enumerator {
            producer: None,
            current: None,
            status: Status::Completed,
        }
    }

    /// Resume the producer until it yields a value or finishes.
    ///
    /// Returns `Ok(true)` if a new current value is available and `Ok(false)`
    /// once the sequence is over. A failure inside the body is returned here,
    /// at the step where it happened, and leaves the enumerator terminal.
    pub fn advance(&mut self) -> Result<bool, EnumError> {
        // Only one current value is ever live
        self.current = None;

        let Some(producer) = self.producer.as_mut() else {
            return Ok(false);
        };

        match producer.resume() {
            Some(Step::Yielded(value)) => {
                self.current = Some(value);
                self.status = Status::Suspended;
                Ok(true)
            }
            Some(Step::Complete(Ok(()))) | None => {
                trace!("producer completed");
                self.finish(Status::Completed);
                Ok(false)
            }
            Some(Step::Complete(Err(fault))) => {
                debug!(fault = %fault, "producer faulted");
                self.finish(Status::Faulted);
                Err(EnumError::from_fault(fault))
            }
        }
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        self.producer = None;
    }

    /// The value produced by the most recent successful `advance`.
    pub fn current(&self) -> Result<&T, EnumError> {
        match &self.current {
            Some(value) => Ok(value),
            None => Err(self.violation().into()),
        }
    }

    /// Mutable access to the current value.
    pub fn current_mut(&mut self) -> Result<&mut T, EnumError> {
        let violation = self.violation();
        self.current.as_mut().ok_or(EnumError::Contract(violation))
    }

    fn violation(&self) -> Violation {
        match self.status {
            Status::NotStarted => Violation::NotStarted,
            Status::Suspended => Violation::Taken,
            Status::Completed => Violation::Exhausted,
            Status::Faulted => Violation::Faulted,
        }
    }

    /// Run `f` on this enumerator, then drop it.
    ///
    /// If `f` panics, the enumerator is dropped before the panic resumes, so
    /// its producer is cancelled and the body's locals are released. The
    /// same holds when the caller is itself a producer body being cancelled.
    ///
    /// ```
    /// use lazyseq_core::Enumerator;
    ///
    /// let e = Enumerator::new(|y| {
    ///     y.yield_(3);
    ///     y.yield_(4);
    ///     Ok(())
    /// });
    /// let first = e.drive(|e| e.next());
    /// assert_eq!(first.unwrap().unwrap(), 3);
    /// ```
    pub fn drive<R, F>(mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        match panic::catch_unwind(AssertUnwindSafe(|| f(&mut self))) {
            Ok(result) => result,
            Err(payload) => {
                // Not unwinding any more, so dropping cancels the producer
                drop(self);
                panic::resume_unwind(payload)
            }
        }
    }

    /// Execution status of the underlying producer.
    pub fn status(&self) -> Status {
        self.status
    }

    /// True if there is no active computation or it has finished.
    pub fn is_exhausted(&self) -> bool {
        self.producer.is_none() || self.status.is_terminal()
    }
}

impl<T> Default for Enumerator<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Iterator for Enumerator<'_, T> {
    type Item = Result<T, EnumError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.current.take().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<T> std::iter::FusedIterator for Enumerator<'_, T> {}

impl<T> std::fmt::Debug for Enumerator<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerator")
            .field("status", &self.status)
            .field("has_current", &self.current.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn numbers() -> Enumerator<'static, i32> {
        Enumerator::new(|y| {
            for n in [1, 6, 3, 4, 86] {
                y.yield_(n);
            }
            Ok(())
        })
    }

    #[test]
    fn test_advance_yields_in_order_then_stays_terminal() {
        let mut e = numbers();
        let mut seen = Vec::new();
        while e.advance().unwrap() {
            seen.push(*e.current().unwrap());
        }
        assert_eq!(seen, vec![1, 6, 3, 4, 86]);
        assert_eq!(e.status(), Status::Completed);

        for _ in 0..3 {
            assert!(!e.advance().unwrap());
            assert!(e.is_exhausted());
        }
    }

    #[test]
    fn test_current_outside_window() {
        let mut e = numbers();
        assert!(matches!(
            e.current(),
            Err(EnumError::Contract(Violation::NotStarted))
        ));

        while e.advance().unwrap() {}
        assert!(matches!(
            e.current(),
            Err(EnumError::Contract(Violation::Exhausted))
        ));
    }

    #[test]
    fn test_construction_is_lazy() {
        let started = Cell::new(0);
        let mut e = Enumerator::new(|y| {
            started.set(started.get() + 1);
            y.yield_(());
            Ok(())
        });
        assert_eq!(started.get(), 0);
        assert_eq!(e.status(), Status::NotStarted);

        assert!(e.advance().unwrap());
        assert_eq!(started.get(), 1);
        assert_eq!(e.status(), Status::Suspended);
    }

    #[test]
    fn test_fault_reported_once_at_its_step() {
        let mut e = Enumerator::new(|y| {
            y.yield_(1);
            y.yield_(2);
            Err("third element unavailable".into())
        });

        assert!(e.advance().unwrap());
        assert!(e.advance().unwrap());
        match e.advance() {
            Err(EnumError::Producer(f)) => assert_eq!(f.to_string(), "third element unavailable"),
            other => panic!("Expected fault, got {:?}", other),
        }
        assert_eq!(e.status(), Status::Faulted);
        assert!(matches!(
            e.current(),
            Err(EnumError::Contract(Violation::Faulted))
        ));

        // Terminal: no repeated fault
        assert!(!e.advance().unwrap());
        assert!(!e.advance().unwrap());
    }

    #[test]
    fn test_drop_mid_sequence_skips_remaining_steps() {
        let log = RefCell::new(Vec::new());
        {
            let mut e = Enumerator::new(|y| {
                for n in 1..=5 {
                    log.borrow_mut().push(n);
                    y.yield_(n);
                }
                log.borrow_mut().push(-1);
                Ok(())
            });
            assert!(e.advance().unwrap());
            assert!(e.advance().unwrap());
        }
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    struct Guard<'g>(&'g Cell<bool>);

    impl Drop for Guard<'_> {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn test_drop_releases_body_locals() {
        let released = Cell::new(false);
        let mut e = Enumerator::new(|y| {
            let _guard = Guard(&released);
            y.yield_(1);
            y.yield_(2);
            Ok(())
        });
        assert!(e.advance().unwrap());
        assert!(!released.get());
        drop(e);
        assert!(released.get());
    }

    #[test]
    fn test_drive_releases_body_locals_on_panic() {
        let released = Cell::new(false);
        let e = Enumerator::new(|y| {
            let _guard = Guard(&released);
            y.yield_(1);
            y.yield_(2);
            Ok(())
        });

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            e.drive(|e| -> i32 {
                assert!(e.advance().unwrap());
                panic!("consumer failed")
            })
        }));
        assert!(result.is_err());
        assert!(released.get());
    }

    #[test]
    fn test_drive_returns_result() {
        let total = numbers().drive(|e| e.map(Result::unwrap).sum::<i32>());
        assert_eq!(total, 100);
    }

    #[test]
    fn test_iterator_moves_values_out() {
        let mut e = numbers();
        assert_eq!(e.next().unwrap().unwrap(), 1);
        assert!(matches!(
            e.current(),
            Err(EnumError::Contract(Violation::Taken))
        ));
        let rest: Vec<i32> = e.map(Result::unwrap).collect();
        assert_eq!(rest, vec![6, 3, 4, 86]);
    }

    #[test]
    fn test_iterator_fault_then_none() {
        let mut e = Enumerator::new(|y| {
            y.yield_("a");
            Err("boom".into())
        });
        assert_eq!(e.next().unwrap().unwrap(), "a");
        assert!(e.next().unwrap().is_err());
        assert!(e.next().is_none());
        assert!(e.next().is_none());
    }

    #[test]
    fn test_empty_enumerator() {
        let mut e: Enumerator<'_, String> = Enumerator::default();
        assert!(e.is_exhausted());
        assert!(!e.advance().unwrap());
        assert!(e.next().is_none());
    }

    #[test]
    fn test_current_mut_writes_through() {
        let mut e = numbers();
        assert!(e.advance().unwrap());
        *e.current_mut().unwrap() += 10;
        assert_eq!(*e.current().unwrap(), 11);
    }

    #[test]
    fn test_with_stack_size() {
        let e = Enumerator::with_stack_size(256 * 1024, |y| {
            let buffer = [7u8; 4096];
            y.yield_(buffer.iter().map(|&b| b as u32).sum::<u32>());
            Ok(())
        });
        let values: Vec<u32> = e.map(Result::unwrap).collect();
        assert_eq!(values, vec![7 * 4096]);
    }

    #[test]
    fn test_oversized_stack_is_clamped() {
        let e = Enumerator::with_stack_size(usize::MAX, |y| {
            y.yield_(1u8);
            Ok(())
        });
        let values: Vec<u8> = e.map(Result::unwrap).collect();
        assert_eq!(values, vec![1]);
    }

    #[test]
    #[should_panic(expected = "producer exploded")]
    fn test_panic_propagates_from_advance() {
        let mut e: Enumerator<'_, i32> = Enumerator::new(|_| panic!("producer exploded"));
        let _ = e.advance();
    }
}
