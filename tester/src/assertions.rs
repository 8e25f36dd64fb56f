//! Condition checks usable inside a test body
//!
//! Each check returns `Ok(())` when its predicate holds and otherwise a
//! [`Failure`] whose message renders the compared values. The `expect_*!`
//! macros at the crate root wrap these functions and apply `?`, so the first
//! violated check ends the test body.

use core::any::type_name;
use core::fmt::{self, Debug};
use std::error::Error;
use crate::failure::{Failure, Outcome};

/// Tolerance used by the near-equality checks on floats when none is given
pub const DEFAULT_TOLERANCE: f64 = 1e-20;

/// The error type an invocation checked by [`expect_raises`] may return
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Passes if `condition` holds
///
/// `source` is the text of the condition, shown in the failure message
#[track_caller]
pub fn expect_true(condition: bool, source: &str) -> Outcome {
    if condition {
        Ok(())
    } else {
        Err(Failure::new(format!("condition `{}` is false", source)))
    }
}

/// Passes if `condition` does not hold
#[track_caller]
pub fn expect_false(condition: bool, source: &str) -> Outcome {
    if condition {
        Err(Failure::new(format!("condition `{}` is true", source)))
    } else {
        Ok(())
    }
}

/// Passes if `left == right`
///
/// # Example
///
/// ```
/// use tester::assertions::expect_equal;
///
/// assert!(expect_equal(&1, &1).is_ok());
/// let failure = expect_equal(&0, &1).unwrap_err();
/// assert_eq!(failure.message(), "0 is not equal to 1");
/// ```
#[track_caller]
pub fn expect_equal<A, B>(left: &A, right: &B) -> Outcome
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized
{
    if left == right {
        Ok(())
    } else {
        Err(Failure::new(format!("{:?} is not equal to {:?}", left, right)))
    }
}

/// Passes if `left != right`
#[track_caller]
pub fn expect_not_equal<A, B>(left: &A, right: &B) -> Outcome
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized
{
    if left != right {
        Ok(())
    } else {
        Err(Failure::new(format!("{:?} is equal to {:?}", left, right)))
    }
}

/// Passes if `|left - right| <= tolerance`
///
/// A difference exactly equal to the tolerance passes. NaN is never near
/// anything.
///
/// # Example
///
/// ```
/// use tester::assertions::expect_near;
///
/// assert!(expect_near(0.0, 1e-20, 1e-20).is_ok());
/// assert!(expect_near(0.0, 0.0001, 0.001).is_ok());
/// assert!(expect_near(0.0, 0.0001, 1e-20).is_err());
/// assert!(expect_near(2u64, 5u64, 3).is_ok());
/// ```
#[track_caller]
pub fn expect_near<T: Near>(left: T, right: T, tolerance: T) -> Outcome {
    if left.is_near(right, tolerance) {
        Ok(())
    } else {
        Err(Failure::new(format!(
            "{:?} is not within {:?} of {:?}", left, tolerance, right
        )))
    }
}

/// [`expect_near`] with the default tolerance of `T`
///
/// That is [`DEFAULT_TOLERANCE`] for floats and `0` for integers
#[track_caller]
pub fn expect_near_default<T: Near>(left: T, right: T) -> Outcome {
    expect_near(left, right, T::DEFAULT_TOLERANCE)
}

/// Passes if both sequences have the same length and equal elements
///
/// The length is checked first. Elements are compared left to right and the
/// first unequal pair fails the check.
///
/// # Example
///
/// ```
/// use tester::assertions::expect_seq_equal;
///
/// assert!(expect_seq_equal(&[1, 3, 2, 6], &[1, 3, 2, 6]).is_ok());
/// let failure = expect_seq_equal(&[1, 3, 2], &[1, 3, 2, 6]).unwrap_err();
/// assert_eq!(failure.message(), "unequal sizes 3 and 4: [1, 3, 2] vs [1, 3, 2, 6]");
/// ```
#[track_caller]
pub fn expect_seq_equal<A, B>(left: &[A], right: &[B]) -> Outcome
where
    A: PartialEq<B> + Debug,
    B: Debug
{
    check_sizes(left, right)?;
    match left.iter().zip(right).position(|(l, r)| l != r) {
        None => Ok(()),
        Some(idx) => Err(Failure::new(format!(
            "element {} differs, {:?} is not equal to {:?}: [{}] vs [{}]",
            idx, left[idx], right[idx], Joined(left), Joined(right)
        )))
    }
}

/// Passes if both sequences have the same length and every pair of elements
/// is within `tolerance` of each other
///
/// Fails fast at the first pair whose difference exceeds the tolerance.
#[track_caller]
pub fn expect_all_near<T: Near>(left: &[T], right: &[T], tolerance: T) -> Outcome {
    check_sizes(left, right)?;
    let mismatch = left.iter()
        .zip(right)
        .position(|(&l, &r)| !l.is_near(r, tolerance));
    match mismatch {
        None => Ok(()),
        Some(idx) => Err(Failure::new(format!(
            "element {} differs, {:?} is not within {:?} of {:?}: [{}] vs [{}]",
            idx, left[idx], tolerance, right[idx], Joined(left), Joined(right)
        )))
    }
}

/// [`expect_all_near`] with the default tolerance of `T`
#[track_caller]
pub fn expect_all_near_default<T: Near>(left: &[T], right: &[T]) -> Outcome {
    expect_all_near(left, right, T::DEFAULT_TOLERANCE)
}

/// Passes if `invocation` returns an error of type `K`
///
/// Returning normally, or returning an error of any other type, fails. The
/// expected error itself is swallowed.
///
/// # Example
///
/// ```
/// use core::num::ParseIntError;
/// use tester::assertions::{expect_equal, expect_raises};
/// use tester::Failure;
///
/// assert!(expect_raises::<ParseIntError, _, _>(|| Ok("x".parse::<i32>()?)).is_ok());
/// assert!(expect_raises::<Failure, _, _>(|| Ok(expect_equal(&0, &1)?)).is_ok());
/// assert!(expect_raises::<Failure, _, _>(|| Ok(expect_equal(&1, &1)?)).is_err());
/// ```
#[track_caller]
pub fn expect_raises<K, T, F>(invocation: F) -> Outcome
where
    K: Error + 'static,
    F: FnOnce() -> Result<T, BoxError>
{
    match invocation() {
        Err(err) if err.is::<K>() => Ok(()),
        Err(err) => Err(Failure::new(format!(
            "expected {} to be raised, but a different error was: {}", type_name::<K>(), err
        ))),
        Ok(_) => Err(Failure::new(format!(
            "expected {} to be raised, but nothing was", type_name::<K>()
        )))
    }
}

/// Numbers the near-equality checks can compare
///
/// Both operands and the tolerance share one type, so wide integers are
/// compared without a lossy conversion to `f64`.
pub trait Near: Copy + PartialOrd + Debug {
    /// Tolerance used when none is given
    const DEFAULT_TOLERANCE: Self;

    /// Whether `self` and `other` differ by at most `tolerance`
    fn is_near(self, other: Self, tolerance: Self) -> bool;
}

macro_rules! impl_near_int {
    ($($T:ty)+) => {$(
        impl Near for $T {
            const DEFAULT_TOLERANCE: Self = 0;

            #[inline(always)]
            fn is_near(self, other: Self, tolerance: Self) -> bool {
                let distance = if self > other {
                    self.checked_sub(other)
                } else {
                    other.checked_sub(self)
                };
                // An overflowing distance is wider than any tolerance
                matches!(distance, Some(distance) if distance <= tolerance)
            }
        }
    )+};
}

impl_near_int! { u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize }

macro_rules! impl_near_float {
    ($($T:ty)+) => {$(
        impl Near for $T {
            const DEFAULT_TOLERANCE: Self = DEFAULT_TOLERANCE as $T;

            #[inline(always)]
            fn is_near(self, other: Self, tolerance: Self) -> bool {
                (self - other).abs() <= tolerance
            }
        }
    )+};
}

impl_near_float! { f32 f64 }

#[track_caller]
fn check_sizes<A: Debug, B: Debug>(left: &[A], right: &[B]) -> Outcome {
    if left.len() == right.len() {
        return Ok(());
    }
    Err(Failure::new(format!(
        "unequal sizes {} and {}: [{}] vs [{}]",
        left.len(), right.len(), Joined(left), Joined(right)
    )))
}

/// Renders the elements of a slice separated by `", "`
struct Joined<'a, T>(&'a [T]);

impl<T: Debug> fmt::Display for Joined<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", item)?;
        }
        Ok(())
    }
}
