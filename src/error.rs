use thiserror::Error;

/// Why a single listing field could not be read.
///
/// `Missing` is the normal case for optional fields and is resolved with a
/// default. `Unparsable` means the element was there but its text was not
/// what we expected, which usually points at a markup change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} not present")]
    Missing { field: &'static str },

    #[error("{field} could not be parsed from {raw:?}")]
    Unparsable { field: &'static str, raw: String },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field } | FieldError::Unparsable { field, .. } => field,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldError::Missing { .. })
    }
}

pub type FieldResult<T> = Result<T, FieldError>;
