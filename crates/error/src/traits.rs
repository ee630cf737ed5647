//! # Error Traits
//!
//! Extension methods for results whose errors convert into [`AppError`].

use crate::{AppError, Result};

/// Extension methods for Result types.
pub trait ResultExt<T> {
    fn with_context<C: ToString>(self, context: C) -> Result<T>;
    fn context<C: ToString>(self, context: C) -> Result<T>
    where
        Self: Sized;
    fn log_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError> + std::fmt::Display,
{
    fn with_context<C: ToString>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(context)
        })
    }

    fn context<C: ToString>(self, context: C) -> Result<T>
    where
        Self: Sized,
    {
        self.with_context(context)
    }

    fn log_error(self) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            tracing::error!(error = %err, "Error occurred");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context() {
        let result: Result<i32> = Err(AppError::not_found("OKR not found"));
        let err = result.context("Loading OKR").unwrap_err();

        assert_eq!(format!("{}", err), "NotFound: Loading OKR: OKR not found");
    }

    #[test]
    fn test_context_from_io() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err = result.with_context("Writing log file").unwrap_err();

        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_log_error() {
        let result: Result<i32> = Err(AppError::conflict("duplicate"));
        let err = result.log_error().unwrap_err();

        assert_eq!(err.code(), "CONFLICT");
    }
}
