//! Entry point for test programs

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use crate::registry;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runs every declared test and maps the result to an exit status
///
/// Logs go to stderr, filtered by `RUST_LOG`. The report goes to stdout.
pub fn main() -> ExitCode {
    init_logging();
    eprintln!("RUNNING UNIT TESTS");
    exit_code(registry::run_all())
}

fn exit_code(all_passed: bool) -> ExitCode {
    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Installs a stderr subscriber unless one is already installed
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Generates the `main` function of a test program
///
/// # Example
///
/// ```no_run
/// use tester::{test_case, test_main, expect_equal};
///
/// test_case! {
///     fn one_is_one() {
///         expect_equal!(1, 1);
///     }
/// }
///
/// test_main!();
/// ```
#[macro_export]
macro_rules! test_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::harness::main()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // ExitCode only offers Debug to compare by
    fn rendered(code: ExitCode) -> String {
        format!("{:?}", code)
    }

    #[test]
    fn test_exit_code_follows_result() {
        assert_eq!(rendered(exit_code(true)), rendered(ExitCode::SUCCESS));
        assert_eq!(rendered(exit_code(false)), rendered(ExitCode::FAILURE));
        assert_ne!(rendered(exit_code(true)), rendered(exit_code(false)));
    }
}
