//! Result type alias for CncFab
//!
//! This module provides a convenient Result type alias that uses CncFabError
//! as the error type.

use super::errors::CncFabError;

/// Result type alias for CncFab operations
///
/// # Examples
///
/// ```
/// use cncfab::domain::result::Result;
/// use cncfab::domain::errors::{CncFabError, ValidationError};
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ValidationError::NoValidParts.into())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CncFabError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ValidationError::NotA3dView.into());
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
