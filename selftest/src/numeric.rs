use tester::{test_case, expect_near};

test_case! {
    fn near_at_tolerance() {
        expect_near!(0.0, 1e-20, 1e-20);
    }

    fn near_outside_tolerance() {
        expect_near!(0.0, 0.0001, 1e-20);
    }

    fn near_inside_tolerance() {
        expect_near!(0.0, 0.0001, 0.001);
    }

    fn near_default_tolerance() {
        expect_near!(0.5f32, 0.5);
    }

    fn near_default_outside_tolerance() {
        expect_near!(0.0, 1e-19);
    }

    fn tiny_difference_outside_tinier_tolerance() {
        expect_near!(0.0, 1e-30, 1e-31);
    }
}
