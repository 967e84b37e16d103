//! Suspendable producer state
//!
//! A producer is a body of ordinary imperative code that hands values out
//! one at a time through a [`Yielder`]. Each producer runs on its own
//! stackful coroutine, so the body can yield from inside loops, from inside
//! nested `for` loops over other enumerators, or from helper functions it
//! calls, and its locals survive across every suspension.
//!
//! ## Lifecycle
//!
//! 1. `Producer::new` allocates the coroutine. No body code runs.
//! 2. Each `resume` runs the body until the next `yield_` or until it returns.
//! 3. The body's return value (`Ok(())` or a fault) is the final step.
//! 4. Dropping a producer that is still suspended unwinds its stack: locals
//!    are dropped, but no statement after the last yield ever runs.
//!
//! ## No other suspension points
//!
//! A body is a synchronous `FnOnce`. It cannot `.await`; the only way to
//! suspend it is the `&mut Yielder` it was given. That handle can still be
//! captured by the body of a nested enumerator, where a yield would suspend
//! the wrong coroutine. Every producer therefore carries an id, and
//! `yield_` panics with [`Violation::ForeignYield`] unless its own producer
//! is the one running.

use crate::config;
use crate::enumerator::Enumerator;
use crate::error::{EnumError, Fault, Violation};
use generator::{Gn, LocalGenerator};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    /// Id of the producer whose body is executing on this thread, 0 if none.
    static RUNNING: Cell<u64> = const { Cell::new(0) };
}

/// Marks a producer as running until dropped, restoring the previous one.
struct Running {
    previous: u64,
}

impl Running {
    fn enter(id: u64) -> Self {
        Running {
            previous: RUNNING.replace(id),
        }
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        RUNNING.set(self.previous);
    }
}

/// One step of a producer: either a value, or the body's final outcome.
#[derive(Debug)]
pub(crate) enum Step<Y, D> {
    /// Body suspended after yielding a value
    Yielded(Y),
    /// Body returned
    Complete(D),
}

/// Execution status of a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Created, body not entered yet
    NotStarted,
    /// Paused at a yield
    Suspended,
    /// Body returned `Ok(())`
    Completed,
    /// Body returned an error
    Faulted,
}

impl Status {
    /// Completed or faulted: no further values will ever be produced.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed | Status::Faulted)
    }
}

/// Handle a producer body uses to hand values to its consumer.
///
/// Every `yield_` suspends the body until the consumer pulls again.
pub struct Yielder<'y, T> {
    owner: u64,
    emit: &'y mut dyn FnMut(T),
}

impl<T> Yielder<'_, T> {
    /// Suspend the body, making `value` the consumer's current value.
    ///
    /// # Panics
    ///
    /// If called from the body of another producer that captured this
    /// yielder.
    pub fn yield_(&mut self, value: T) {
        if RUNNING.get() != self.owner {
            panic!("{}", Violation::ForeignYield);
        }
        (self.emit)(value)
    }

    /// Forward every element of `source`, one yield per element.
    ///
    /// Stops at the first fault of `source` and returns it, so the caller can
    /// propagate it with `?`.
    pub fn yield_from(&mut self, source: Enumerator<'_, T>) -> Result<(), EnumError> {
        source.drive(|source| -> Result<(), EnumError> {
            for item in source {
                self.yield_(item?);
            }
            Ok(())
        })
    }
}

type Outcome = Result<(), Fault>;

/// The resumable execution context behind an [`Enumerator`].
pub(crate) struct Producer<'a, T> {
    id: u64,
    coroutine: LocalGenerator<'a, (), Step<T, Outcome>>,
}

impl<'a, T: 'a> Producer<'a, T> {
    /// Wrap `body` in a suspended coroutine using the process-wide stack size.
    pub(crate) fn new<F>(body: F) -> Self
    where
        F: FnOnce(&mut Yielder<'_, T>) -> Outcome + 'a,
    {
        Self::with_stack_words(config::current().stack_words(), body)
    }

    /// Wrap `body` in a suspended coroutine with an explicit stack size.
    pub(crate) fn with_stack_words<F>(stack_words: usize, body: F) -> Self
    where
        F: FnOnce(&mut Yielder<'_, T>) -> Outcome + 'a,
    {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        trace!(id, stack_words, "producer created");
        let coroutine = Gn::<()>::new_scoped_opt_local(stack_words, move |mut scope| {
            trace!(id, "producer started");
            let outcome = {
                let mut emit = |value: T| scope.yield_with(Step::Yielded(value));
                let mut yielder = Yielder {
                    owner: id,
                    emit: &mut emit,
                };
                body(&mut yielder)
            };
            Step::Complete(outcome)
        });
        Producer { id, coroutine }
    }

    /// Run the body up to its next yield or its end.
    ///
    /// Returns `None` once the body has finished and its outcome was already
    /// handed out. A panic in the body propagates out of this call.
    pub(crate) fn resume(&mut self) -> Option<Step<T, Outcome>> {
        if self.coroutine.is_done() {
            return None;
        }
        let _running = Running::enter(self.id);
        self.coroutine.resume()
    }
}

impl<T> Drop for Producer<'_, T> {
    fn drop(&mut self) {
        if !self.coroutine.is_done() {
            trace!(id = self.id, "abandoning unfinished producer");
        }
    }
}
