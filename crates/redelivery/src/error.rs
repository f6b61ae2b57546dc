// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// The result type for fallible operations that use the [`Error`] type in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error describing an invalid retry configuration.
///
/// The only way to produce this error today is to finish a
/// [`RetryConfigBuilder`][crate::RetryConfigBuilder] without supplying one of
/// the required backoff schedules. An empty schedule is valid; an absent one
/// is not, because retry timing would otherwise be undefined.
///
/// # Limited introspection
///
/// Other than implementing the [`std::error::Error`] and [`core::fmt::Debug`] traits, this error type
/// currently provides no introspection capabilities.
///
/// # Examples
///
/// ```rust
/// use redelivery::RetryConfig;
///
/// RetryConfig::builder().build().unwrap_err();
/// ```
#[derive(Debug)]
pub struct Error(ErrorKind);

#[derive(Debug)]
enum ErrorKind {
    MissingSchedule(&'static str),
}

impl Error {
    const fn from_kind(kind: ErrorKind) -> Self {
        Self(kind)
    }

    pub(crate) const fn missing_schedule(mode: &'static str) -> Self {
        Self::from_kind(ErrorKind::MissingSchedule(mode))
    }

    #[cfg(test)]
    const fn kind(&self) -> &ErrorKind {
        &self.0
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorKind::MissingSchedule(mode) => {
                write!(f, "invalid retry configuration: no {mode} backoff schedule was provided")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_types() {
        static_assertions::assert_impl_all!(Error: Send, Sync);
    }

    #[test]
    fn missing_schedule_error() {
        let error = Error::missing_schedule("blocking");

        assert!(matches!(error.kind(), ErrorKind::MissingSchedule("blocking")));
        assert_eq!(
            error.to_string(),
            "invalid retry configuration: no blocking backoff schedule was provided"
        );
    }
}
