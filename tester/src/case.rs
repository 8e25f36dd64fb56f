//! Named, executable units of behavior and their registration

use crate::failure::Outcome;

/// A named test which either completes or raises a [`Failure`](crate::Failure)
pub trait TestCase: Send + Sync {
    fn name(&self) -> &str;

    /// Runs the test body once
    fn run(&self) -> Outcome;
}

impl<T: TestCase + ?Sized> TestCase for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self) -> Outcome {
        (**self).run()
    }
}

/// A test made from a name and a closure
///
/// For registries built by hand rather than through [`test_case!`](crate::test_case)
///
/// # Example
///
/// ```
/// use tester::{TestCase, TestFn};
///
/// let test = TestFn::new("adds", || tester::assertions::expect_equal(&(2 + 2), &4));
/// assert_eq!(test.name(), "adds");
/// assert!(test.run().is_ok());
/// ```
pub struct TestFn<F> {
    name: String,
    body: F
}

impl<F> TestFn<F> where F: Fn() -> Outcome + Send + Sync {
    pub fn new(name: impl Into<String>, body: F) -> Self {
        TestFn { name: name.into(), body }
    }
}

impl<F> TestCase for TestFn<F> where F: Fn() -> Outcome + Send + Sync {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> Outcome {
        (self.body)()
    }
}

/// The tests of one [`test_case!`](crate::test_case) block
///
/// Each block submits one of these. They are collected at link time, before
/// `main` runs, and handed to the registry when it is first accessed.
pub struct Registration {
    cases: fn() -> &'static [&'static dyn TestCase],
    file: &'static str,
    line: u32,
    column: u32
}

inventory::collect!(Registration);

impl Registration {
    pub const fn new(
        cases: fn() -> &'static [&'static dyn TestCase],
        file: &'static str,
        line: u32,
        column: u32
    ) -> Self {
        Registration { cases, file, line, column }
    }

    /// The tests of the block, in declaration order
    pub fn cases(&self) -> &'static [&'static dyn TestCase] {
        (self.cases)()
    }

    /// The source position of the block, used to order discovery
    pub fn position(&self) -> (&'static str, u32, u32) {
        (self.file, self.line, self.column)
    }

    /// Every registration linked into the program, in declaration order
    ///
    /// Sorted by file path and position of the `test_case!` invocation, so
    /// the order does not depend on the order the linker laid the
    /// registrations out in
    pub fn linked() -> Vec<&'static Registration> {
        let mut registrations: Vec<&'static Registration> = inventory::iter::<Registration>
            .into_iter()
            .collect();
        registrations.sort_by_key(|registration| registration.position());
        registrations
    }

    /// Every test linked into the program, in declaration order
    pub fn linked_cases() -> Vec<&'static dyn TestCase> {
        Self::linked()
            .into_iter()
            .flat_map(|registration| registration.cases().iter().copied())
            .collect()
    }
}

/// Declares tests which register themselves with the global registry
///
/// Each `fn name() { body }` becomes a type called `name` implementing
/// [`TestCase`] and a static instance of it. The body runs with the `expect_*!`
/// macros available; the first failing one ends it. A block may declare any
/// number of tests.
///
/// # Example
///
/// ```
/// use tester::{test_case, expect_equal, expect_not_equal};
///
/// test_case! {
///     fn equality() {
///         expect_equal!(1, 1);
///     }
///
///     fn inequality() {
///         expect_not_equal!(0, 1);
///     }
/// }
///
/// # fn main() {
/// use tester::TestCase;
/// assert_eq!(equality.name(), "equality");
/// assert!(inequality.run().is_ok());
/// # }
/// ```
#[macro_export]
macro_rules! test_case {
    ($($(#[$attr:meta])* fn $name:ident() $body:block)*) => {
        $(
            $(#[$attr])*
            #[allow(non_camel_case_types)]
            pub struct $name {__private_field: ()}

            #[allow(non_upper_case_globals)]
            pub static $name: $name = $name {__private_field: ()};

            impl $crate::TestCase for $name {
                fn name(&self) -> &str {
                    ::core::stringify!($name)
                }

                #[allow(unreachable_code)]
                fn run(&self) -> $crate::Outcome {
                    $body
                    ::core::result::Result::Ok(())
                }
            }
        )*

        $crate::__private::inventory::submit! {
            $crate::Registration::new(
                {
                    fn __tester_cases() -> &'static [&'static dyn $crate::TestCase] {
                        static __TESTER_CASES: &[&dyn $crate::TestCase] = &[$(&$name),*];
                        __TESTER_CASES
                    }
                    __tester_cases
                },
                ::core::file!(),
                ::core::line!(),
                ::core::column!()
            )
        }
    };
}
