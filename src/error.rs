//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that's used across this crate. Building values
//! and printing documents both convert their failures into it.

use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For printing, for instance,
/// the context string is populated with the field names of the input object at which a cycle was
/// found.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits. It also implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

/// The kind of failure an [Error] represents.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// A request-level problem, e.g. looking up an operation that the document doesn't contain.
    GraphQL,
    /// A value could not be mapped to any GraphQL literal, e.g. a non-finite float.
    UnsupportedValueKind,
    /// An input object was reached again while it was still being printed.
    CyclicReference,
    /// The output buffer refused a write or a value failed to serialize.
    Format,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: ErrorType) -> Self {
        Self {
            message: message.into(),
            context: None,
            error_type,
        }
    }

    /// Create a new Error with a main message and a context string from two input strings.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        context: S,
        error_type: ErrorType,
    ) -> Self {
        Self {
            message: message.into(),
            context: Some(context.into()),
            error_type,
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the context of the current error, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the kind of the current error.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.error_type {
            ErrorType::GraphQL => {
                format!("GraphQL Error: {}", self.message)
            }
            ErrorType::UnsupportedValueKind => {
                format!("Unsupported Value Error: {}", self.message)
            }
            ErrorType::CyclicReference => {
                format!("Cyclic Reference Error: {}", self.message)
            }
            ErrorType::Format => format!("Format Error: {}", self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::new("Failed to write to the output buffer", ErrorType::Format)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(error.to_string(), ErrorType::Format)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_with_context() {
        let error = Error::new_with_context(
            "Input object is referenced by itself",
            "at field `parent`",
            ErrorType::CyclicReference,
        );
        assert_eq!(
            error.print(false),
            "Cyclic Reference Error: Input object is referenced by itself"
        );
        assert_eq!(
            error.to_string(),
            "Cyclic Reference Error: Input object is referenced by itself\nat field `parent`"
        );
        assert_eq!(error.context(), Some("at field `parent`"));
    }

    #[test]
    fn from_fmt_error() {
        let error: Error = fmt::Error.into();
        assert_eq!(error.error_type(), ErrorType::Format);
        assert_eq!(error.context(), None);
    }
}
