use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter: {what} (value={value})")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("Unknown variant: {name}")]
    UnknownVariant { name: String },
}

impl ModelError {
    pub fn invalid(what: &'static str, value: f64) -> Self {
        Self::InvalidParameter { what, value }
    }
}
