use thiserror::Error;

/// Errors that can occur when accessing the contents of a
/// [`ValueBox`](crate::ValueBox).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The box was empty when its value was accessed.
    ///
    /// Returned by the [`value`](crate::ValueBox::value) accessor family;
    /// the dereference operators instead treat an empty box as a contract
    /// violation and panic.
    #[error("accessed the value of an empty ValueBox")]
    NoValue,
}

/// A specialized `Result` type for value-box operations, returning the
/// crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn no_value_is_error() {
        let error = Error::NoValue;

        // Verify it is a valid Error that can be used in Result context.
        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }

    #[test]
    fn no_value_message_names_the_problem() {
        assert_eq!(
            Error::NoValue.to_string(),
            "accessed the value of an empty ValueBox"
        );
    }
}
