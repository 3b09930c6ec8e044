use core::fmt;
use std::error::Error;
use std::fmt::Display;

/// Error type shared by the node core and the pluggable transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconError {
    text: String,
    cause: String,
}

pub(crate) type Result<T> = std::result::Result<T, BeaconError>;

impl BeaconError {
    /// Creates an error with the description and an optional (possibly empty) cause.
    pub fn new(text: String, cause: String) -> BeaconError {
        BeaconError { text, cause }
    }
}

/// Creates a `BeaconError` wrapped in `Err`.
pub fn new_err<T>(text: String, cause: String) -> Result<T> {
    Err(BeaconError { text, cause })
}

impl Display for BeaconError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cause_word = {
            if !self.cause.is_empty() {
                " Cause: ".to_string()
            } else {
                String::new()
            }
        };
        write!(f, "{}.{}{}", self.text, cause_word, self.cause)
    }
}

impl Error for BeaconError {}

/// Folds several errors into one, numbering the causes.
pub fn new_multiple_err<T>(text: String, causes: Vec<BeaconError>) -> Result<T> {
    let mut error_string = String::new();

    if !causes.is_empty() {
        error_string.push_str("Errors: ");
    }

    for (error_index, err) in causes.iter().enumerate() {
        error_string.push_str(&format!("{}) {} ", error_index + 1, err));
    }
    Err(BeaconError {
        text,
        cause: error_string.trim_end().to_string(),
    })
}
