//! Demo sequence and the queries the CLI runs over it

use lazyseq_core::{EnumError, Enumerable, EnumerableExt, Enumerator, fmap};
use tracing::debug;

/// Values printed when `--values` is not given.
pub const DEFAULT_VALUES: [i64; 5] = [1, 6, 3, 4, 86];

/// A user-defined sequence: its producer walks the stored values.
pub struct Numbers {
    values: Vec<i64>,
}

impl Numbers {
    pub fn new(values: Vec<i64>) -> Self {
        Numbers { values }
    }
}

impl Enumerable for Numbers {
    type Item = i64;

    fn enumerator(&self) -> Enumerator<'_, &i64> {
        Enumerator::new(move |y| {
            for value in &self.values {
                y.yield_(value);
            }
            Ok(())
        })
    }
}

/// Render every element of `seq`, one line each.
pub fn render(seq: &dyn Enumerable<Item = i64>) -> Result<Vec<String>, EnumError> {
    fmap(|v: &i64| v.to_string(), seq.enumerator()).collect()
}

/// Lines for `print`: the sequence, optionally appended to and doubled.
pub fn print_lines(
    numbers: &Numbers,
    append: Option<i64>,
    concat: bool,
) -> Result<Vec<String>, EnumError> {
    let appended;
    let doubled;
    let mut seq = numbers.as_enumerable();

    if let Some(value) = &append {
        debug!(value, "appending");
        appended = seq.append(value);
        seq = &appended;
    }
    if concat {
        debug!("concatenating with itself");
        doubled = seq.concat(seq);
        seq = &doubled;
    }
    render(seq)
}

pub fn sum(numbers: &Numbers) -> Result<i64, EnumError> {
    numbers.aggregate_with(0, |acc, x| acc + x)
}

/// `all` or `any` element greater than `threshold`.
pub fn compare(numbers: &Numbers, threshold: i64, every: bool) -> Result<bool, EnumError> {
    if every {
        numbers.all(|x| *x > threshold)
    } else {
        numbers.any(|x| *x > threshold)
    }
}
