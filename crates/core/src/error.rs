//! Error types for enumerators and the queries built on them.
//!
//! Two kinds of failure exist:
//! - [`EnumError::Producer`]: a producer body (or a fallible mapping function)
//!   returned an error. It is surfaced by the `advance` that ran the failing
//!   step and never again.
//! - [`EnumError::Contract`]: the caller read the current value outside the
//!   window in which one exists.
//!
//! Running out of elements is not an error.

/// Error raised by user code inside a producer body.
pub type Fault = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why the current value could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `advance` has not produced a value yet
    NotStarted,
    /// The producer ran to completion
    Exhausted,
    /// The producer failed on its last step
    Faulted,
    /// The value was already moved out by the `Iterator` impl
    Taken,
    /// A `Yielder` was used while another producer's body was running
    ForeignYield,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::NotStarted => write!(f, "no value has been produced yet"),
            Violation::Exhausted => write!(f, "the sequence is exhausted"),
            Violation::Faulted => write!(f, "the producer faulted"),
            Violation::Taken => write!(f, "the current value was already taken"),
            Violation::ForeignYield => {
                write!(f, "yielded from outside the producer's own body")
            }
        }
    }
}

/// Error type for enumerator operations.
#[derive(Debug)]
pub enum EnumError {
    /// The current value was read outside its valid window
    Contract(Violation),
    /// A producer body failed while computing the next element
    Producer(Fault),
}

impl EnumError {
    /// Wrap a fault handed back by a producer body.
    ///
    /// Bodies that pull from other enumerators propagate their `EnumError`
    /// with `?`, which boxes it into a [`Fault`]. Unboxing here keeps the
    /// original error intact no matter how many producers it crossed.
    pub fn from_fault(fault: Fault) -> Self {
        match fault.downcast::<EnumError>() {
            Ok(inner) => *inner,
            Err(fault) => EnumError::Producer(fault),
        }
    }

    /// Returns `true` for errors raised by producer code.
    pub fn is_fault(&self) -> bool {
        matches!(self, EnumError::Producer(_))
    }
}

impl std::fmt::Display for EnumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumError::Contract(v) => write!(f, "current value unavailable: {}", v),
            EnumError::Producer(e) => write!(f, "producer failed: {}", e),
        }
    }
}

impl std::error::Error for EnumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnumError::Contract(_) => None,
            EnumError::Producer(e) => Some(e.as_ref()),
        }
    }
}

impl From<Violation> for EnumError {
    fn from(v: Violation) -> Self {
        EnumError::Contract(v)
    }
}
