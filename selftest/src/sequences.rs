use tester::{test_case, expect_seq_equal, expect_all_near};

test_case! {
    fn sequences_equal() {
        expect_seq_equal!([1, 3, 2, 6], [1, 3, 2, 6]);
    }

    fn sequence_sizes_differ() {
        expect_seq_equal!([1, 3, 2], [1, 3, 2, 6]);
    }

    fn sequence_elements_differ() {
        expect_seq_equal!(vec![1, 3, 2], vec![1, 3, 6]);
    }

    fn sequence_within_tolerance() {
        expect_all_near!([1.0, 3.0, 2.0, 6.0], [1.001, 2.999, 2.000, 5.991], 0.01);
    }

    fn sequence_outside_tolerance() {
        expect_all_near!([1.0, 3.0, 2.0, 6.0], [1.001, 2.999, 2.000, 5.991], 0.001);
    }
}
