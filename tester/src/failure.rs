//! The signal raised by a violated assertion

use core::any::Any;
use core::panic::Location;
use thiserror::Error;

/// Placeholder reported for a failure that carries no message
pub const UNKNOWN_REASON: &str = "UNKNOWN";

/// The outcome of running one test body
pub type Outcome = Result<(), Failure>;

/// Raised when the predicate of an assertion does not hold
///
/// Propagates out of exactly one test body through `?` and is consumed by the
/// registry, which reports its message. An empty message is valid and is
/// reported as [`UNKNOWN_REASON`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
    location: Option<&'static Location<'static>>
}

impl Failure {
    /// Creates a failure with a message, recording where it was raised
    ///
    /// # Example
    ///
    /// ```
    /// use tester::Failure;
    ///
    /// let failure = Failure::new("0 is not equal to 1");
    /// assert_eq!(failure.message(), "0 is not equal to 1");
    /// assert!(failure.location().is_some());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Failure {
            message: message.into(),
            location: Some(Location::caller())
        }
    }

    /// A failure that says nothing about why it happened
    pub fn unknown() -> Self {
        Failure::default()
    }

    /// Converts the payload of a caught panic into a failure
    ///
    /// String payloads keep their text; anything else is unknown
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let text = match payload.downcast::<String>() {
            Ok(text) => Some(*text),
            Err(payload) => payload.downcast_ref::<&'static str>().map(|text| text.to_string())
        };
        match text {
            Some(text) => Failure { message: format!("panicked: {}", text), location: None },
            None => Failure::unknown()
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the failure was raised, if known
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    pub fn is_unknown(&self) -> bool {
        self.message.is_empty()
    }

    /// The text shown after `Reason:` in the report
    pub fn reason(&self) -> &str {
        if self.is_unknown() {
            UNKNOWN_REASON
        } else {
            &self.message
        }
    }
}
