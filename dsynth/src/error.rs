use std::error;
use std::fmt::{self, Display, Formatter};

/// Errors raised at the host boundary.
///
/// None of these are recoverable inside the render path: construction is
/// rejected, or the offending block is aborted and its output silenced.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A construction option the processor cannot run without was not supplied.
    MissingOption(&'static str),
    /// A construction option was supplied but is unusable.
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A parameter array was neither one value nor one value per frame.
    ParamLength {
        /// Parameter name.
        name: &'static str,
        /// Length the host delivered.
        len: usize,
        /// Frames in the block being rendered.
        frames: usize,
    },
    /// No processor is registered under this name.
    UnknownProcessor(String),
    /// Two registrations share a name.
    DuplicateProcessor(&'static str),
    /// The options object could not be deserialized.
    Options(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingOption(name) => write!(f, "missing processor option `{name}`"),
            Error::InvalidOption { name, reason } => {
                write!(f, "invalid processor option `{name}`: {reason}")
            }
            Error::ParamLength { name, len, frames } => write!(
                f,
                "parameter `{name}` has {len} values, expected 1 or {frames}"
            ),
            Error::UnknownProcessor(name) => write!(f, "no processor registered as `{name}`"),
            Error::DuplicateProcessor(name) => {
                write!(f, "processor `{name}` is registered more than once")
            }
            Error::Options(message) => write!(f, "malformed processor options: {message}"),
        }
    }
}

impl error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Options(error.to_string())
    }
}
