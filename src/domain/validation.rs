use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidPattern { pattern: String, reason: String },
    InvalidUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid recipient pattern {pattern:?}: {reason}")
            }
            Self::InvalidUrl { input } => write!(f, "invalid API URL: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
