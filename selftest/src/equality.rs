use tester::{test_case, expect_equal, expect_not_equal};

test_case! {
    fn testEqualityMacro() {
        // this should pass
        expect_equal!(1, 1);
    }

    fn testInequalityMacro() {
        // this should pass
        expect_not_equal!(0, 1);
    }

    fn testEqualityMacroFail() {
        // this should fail
        expect_equal!(0, 1);
    }

    fn testInequalityMacroFail() {
        // this should fail
        expect_not_equal!(1, 1);
    }
}
