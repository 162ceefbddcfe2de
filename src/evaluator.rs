//! The interval recurrence
//!
//! ```text
//! F(n, k) = 0                                     if k < 0 or k > n
//! F(1, k) = 1/2                                   if k is 0 or 1
//! F(n, k) = sum_{i=k}^{n} F(n - 1, i - 1) / (i + 1)  otherwise
//! ```
//!
//! Every strategy adds the terms in the same order, so they agree bit for bit.

use std::fmt;

use static_assertions::assert_impl_all;
use tracing::{debug, trace};

use crate::{recurse_st, Cache, CacheStats, Error, Frame, Result, Step};

/// How `F` is evaluated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Strategy {
    /// Memoized recursion on the native call stack. Depth grows with `n`.
    Recursive,
    /// Memoized recursion on an explicit heap stack.
    #[default]
    StackSafe,
    /// Recursion without memoization. Exponential; only for small inputs.
    Naive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Recursive, Strategy::StackSafe, Strategy::Naive];

    pub fn name(self) -> &'static str {
        match self {
            Self::Recursive => "recursive",
            Self::StackSafe => "stack-safe",
            Self::Naive => "naive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|strategy| strategy.name() == name)
    }

    /// Evaluates `F(n, k)`, memoizing into `cache`. `Naive` never reads or
    /// writes the cache.
    pub fn eval(self, n: i64, k: i64, cache: &mut Cache) -> Result<f64> {
        validate_degree(n)?;
        let value = match self {
            Self::Recursive => recursive(n, k, cache),
            Self::StackSafe => stack_safe(n, k, cache),
            Self::Naive => naive(n, k),
        };
        debug!(n, k, value, strategy = self.name(), entries = cache.len(), "evaluated");
        Ok(value)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluates `F(n, k)` with a cache private to this call.
pub fn f(n: i64, k: i64) -> Result<f64> {
    f_with_cache(n, k, &mut Cache::new())
}

/// Evaluates `F(n, k)` with a caller-provided cache, which may already hold
/// values from earlier calls.
pub fn f_with_cache(n: i64, k: i64, cache: &mut Cache) -> Result<f64> {
    Strategy::StackSafe.eval(n, k, cache)
}

/// An evaluator that keeps its cache across calls.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    strategy: Strategy,
    cache: Cache,
}

assert_impl_all!(Evaluator: Send, Clone, Default);

impl Evaluator {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            cache: Cache::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn eval(&mut self, n: i64, k: i64) -> Result<f64> {
        self.strategy.eval(n, k, &mut self.cache)
    }

    /// `F(n, k)` for every `k` in `0..=n`.
    pub fn row(&mut self, n: i64) -> Result<Vec<f64>> {
        validate_degree(n)?;
        let row = (0..=n)
            .map(|k| self.eval(n, k))
            .collect::<Result<Vec<_>>>()?;
        debug!(n, stats = ?self.cache.stats(), "evaluated row");
        Ok(row)
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn reset(&mut self) {
        self.cache.clear();
    }
}

fn validate_degree(n: i64) -> Result<()> {
    if n <= 0 {
        Err(Error::NonPositiveDegree { n })
    } else {
        Ok(())
    }
}

/// Values that need no recursion. Only meaningful for `n >= 1`.
fn base_case(n: i64, k: i64) -> Option<f64> {
    if k < 0 || k > n {
        Some(0.0)
    } else if n == 1 {
        Some(0.5)
    } else {
        None
    }
}

fn term(i: i64, value: f64) -> f64 {
    (1.0 / (i + 1) as f64) * value
}

fn recursive(n: i64, k: i64, cache: &mut Cache) -> f64 {
    if let Some(value) = base_case(n, k) {
        return value;
    }
    if let Some(value) = cache.lookup(n, k) {
        return value;
    }
    trace!(n, k, "cache miss");

    let mut sum = 0.0;
    for i in k..=n {
        sum += term(i, recursive(n - 1, i - 1, cache));
    }
    cache.insert(n, k, sum);
    sum
}

fn naive(n: i64, k: i64) -> f64 {
    if let Some(value) = base_case(n, k) {
        return value;
    }

    let mut sum = 0.0;
    for i in k..=n {
        sum += term(i, naive(n - 1, i - 1));
    }
    sum
}

enum Interval {
    Init { n: i64, k: i64 },
    Sum { n: i64, k: i64, i: i64, acc: f64 },
}

impl Frame<f64, Cache> for Interval {
    type Yield = (i64, i64);
    type Return = f64;

    fn resume(&mut self, res: f64, cache: &mut Cache) -> Step<(i64, i64), f64> {
        match *self {
            Self::Init { n, k } => {
                if let Some(value) = base_case(n, k) {
                    return Step::Complete(value);
                }
                if let Some(value) = cache.lookup(n, k) {
                    return Step::Complete(value);
                }
                trace!(n, k, "cache miss");
                *self = Self::Sum { n, k, i: k, acc: 0.0 };
                Step::Yielded((n - 1, k - 1))
            }
            Self::Sum { n, k, i, acc } => {
                let acc = acc + term(i, res);
                if i < n {
                    *self = Self::Sum { n, k, i: i + 1, acc };
                    Step::Yielded((n - 1, i))
                } else {
                    cache.insert(n, k, acc);
                    Step::Complete(acc)
                }
            }
        }
    }
}

fn stack_safe(n: i64, k: i64, cache: &mut Cache) -> f64 {
    recurse_st(|(n, k)| Interval::Init { n, k })((n, k), cache)
}
