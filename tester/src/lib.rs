//! A small unit testing framework
//!
//! Tests are declared with [`test_case!`] anywhere in a program and register
//! themselves at link time, without a central list. [`run_all`] runs them in
//! declaration order and reports one line per test:
//!
//! ```text
//! Discovered test: equality
//! Discovered test: inequality_fails
//! equality         ... [PASSED]
//! inequality_fails ... [FAILED] [Reason: 1 is equal to 1]
//! ```
//!
//! Test bodies use the `expect_*!` macros, which end the body with a
//! [`Failure`] at the first violated check.

pub mod assertions;
pub mod case;
pub mod failure;
pub mod harness;
pub mod registry;
pub mod report;


pub use assertions::{BoxError, Near, DEFAULT_TOLERANCE};
pub use case::{Registration, TestCase, TestFn};
pub use failure::{Failure, Outcome, UNKNOWN_REASON};
pub use registry::{register, registry, run_all, TestRegistry};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

/// Fails the test unless `left == right`
#[macro_export]
macro_rules! expect_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assertions::expect_equal(&$left, &$right)?
    };
}

/// Fails the test if `left == right`
#[macro_export]
macro_rules! expect_not_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assertions::expect_not_equal(&$left, &$right)?
    };
}

/// Fails the test unless the two numbers are within a tolerance of each other
///
/// Without a tolerance, the default of the operand type is used: see
/// [`Near::DEFAULT_TOLERANCE`]
///
/// ```
/// use tester::{expect_near, Outcome};
///
/// fn body(lengths: &[Vec<u8>]) -> Outcome {
///     expect_near!(lengths[0].len(), 3, 1);
///     expect_near!(0.0, 1e-20);
///     Ok(())
/// }
/// assert!(body(&[vec![1, 2]]).is_ok());
/// ```
#[macro_export]
macro_rules! expect_near {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assertions::expect_near_default($left, $right)?
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        $crate::assertions::expect_near($left, $right, $tolerance)?
    };
}

/// Fails the test unless both sequences have equal lengths and elements
#[macro_export]
macro_rules! expect_seq_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assertions::expect_seq_equal(&$left[..], &$right[..])?
    };
}

/// Fails the test unless both sequences have equal lengths and every pair of
/// elements is within a tolerance of each other
#[macro_export]
macro_rules! expect_all_near {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assertions::expect_all_near_default(&$left[..], &$right[..])?
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        $crate::assertions::expect_all_near(&$left[..], &$right[..], $tolerance)?
    };
}

/// Fails the test unless the expression returns an error of type `kind`
///
/// ```
/// use tester::{expect_raises, Failure, Outcome};
///
/// fn body() -> Outcome {
///     expect_raises!(core::num::ParseIntError, "twelve".parse::<u8>());
///     expect_raises!(Failure, tester::assertions::expect_equal(&0, &1));
///     Ok(())
/// }
/// assert!(body().is_ok());
/// ```
#[macro_export]
macro_rules! expect_raises {
    ($kind:ty, $invocation:expr $(,)?) => {
        $crate::assertions::expect_raises::<$kind, _, _>(|| {
            ::core::result::Result::Ok($invocation?)
        })?
    };
}

/// Fails the test unless the condition holds
#[macro_export]
macro_rules! expect_true {
    ($condition:expr $(,)?) => {
        $crate::assertions::expect_true($condition, ::core::stringify!($condition))?
    };
}

/// Fails the test if the condition holds
#[macro_export]
macro_rules! expect_false {
    ($condition:expr $(,)?) => {
        $crate::assertions::expect_false($condition, ::core::stringify!($condition))?
    };
}

/// Fails the test unconditionally, with an optional formatted reason
#[macro_export]
macro_rules! fail {
    () => {
        return ::core::result::Result::Err($crate::Failure::unknown())
    };
    ($($arg:tt)+) => {
        return ::core::result::Result::Err($crate::Failure::new(::std::format!($($arg)+)))
    };
}
