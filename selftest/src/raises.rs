use core::num::ParseIntError;
use tester::{test_case, expect_raises, expect_equal, Failure};

/// Parses a count of items, rejecting anything that is not a number
fn parse_count(text: &str) -> Result<u32, ParseIntError> {
    text.trim().parse()
}

test_case! {
    fn parse_error_is_raised() {
        expect_raises!(ParseIntError, parse_count("many"));
        expect_equal!(parse_count(" 12 ").ok(), Some(12));
    }

    fn failed_assertion_is_raised() {
        expect_raises!(Failure, tester::assertions::expect_equal(&0, &1));
    }

    fn missing_error_fails() {
        expect_raises!(ParseIntError, parse_count("3"));
    }
}
