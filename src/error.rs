use thiserror::Error;

/// PSL engine error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PslError {
    #[error("The domain cannot be blank")]
    EmptyInput,

    #[error("IDN conversion failed: {0}")]
    InvalidIdn(String),
}

pub type Result<T> = std::result::Result<T, PslError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_input() {
        let err = PslError::InvalidIdn("xn--badlabel".to_string());
        let display = format!("{}", err);
        assert!(display.contains("xn--badlabel"), "got: {}", display);
    }

    #[test]
    fn test_error_kind_is_matchable() {
        let err = PslError::EmptyInput;
        assert!(matches!(err, PslError::EmptyInput));
    }
}
