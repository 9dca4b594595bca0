use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Message without the variant prefix, suitable for a response body.
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detail_names_entity() {
        let e = ServiceError::not_found("Student");
        assert_eq!(e.detail(), "Student not found");
        assert_eq!(e.to_string(), "not found: Student not found");
    }
}
