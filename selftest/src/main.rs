//! Runs the tester framework against itself
//!
//! Some of the tests here fail on purpose, so the program exits with a failure
//! status. They show what a failure report looks like.

mod equality;
mod numeric;
mod raises;
mod sequences;

tester::test_main!();
