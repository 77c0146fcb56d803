//! Host exception model
//!
//! Each variant mirrors an exception class the host runtime raises. Native
//! code returns these through `?` unchanged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("TypeError: {0}")]
    TypeError(String),

    #[error("ArgumentError: wrong number of arguments (given {given}, expected {expected})")]
    ArgumentError { expected: usize, given: usize },

    #[error("ArgumentError: string contains null byte")]
    NullByte,

    #[error("NoMethodError: undefined method '{method}' for an instance of {class}")]
    NoMethodError { method: String, class: String },

    #[error("FrozenError: can't modify frozen class {0}")]
    FrozenError(String),

    #[error("invalid class descriptor #{0}")]
    UnknownClass(u32),

    #[error("{0}")]
    Raised(String),
}

impl HostError {
    pub fn type_error(found: &str, expected: &str) -> Self {
        Self::TypeError(format!(
            "wrong argument type {} (expected {})",
            found, expected
        ))
    }

    /// Host class name of the exception
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::TypeError(_) => "TypeError",
            Self::ArgumentError { .. } | Self::NullByte => "ArgumentError",
            Self::NoMethodError { .. } => "NoMethodError",
            Self::FrozenError(_) => "FrozenError",
            Self::UnknownClass(_) => "TypeError",
            Self::Raised(_) => "RuntimeError",
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = HostError::type_error("Integer", "SortedSet");
        assert_eq!(
            err.to_string(),
            "TypeError: wrong argument type Integer (expected SortedSet)"
        );

        let err = HostError::ArgumentError { expected: 0, given: 2 };
        assert_eq!(
            err.to_string(),
            "ArgumentError: wrong number of arguments (given 2, expected 0)"
        );
        assert_eq!(err.class_name(), "ArgumentError");
    }

    #[test]
    fn test_raised_passthrough() {
        let err = HostError::Raised("boom".to_string());
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.class_name(), "RuntimeError");
    }
}
