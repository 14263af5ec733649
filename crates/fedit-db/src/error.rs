use crate::store::FailPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Injected failure at {0:?}")]
    Injected(FailPoint),

    #[error("Row not found in \"{0}\"")]
    NotFound(&'static str),

    #[error("Unique constraint \"{0}\" violated")]
    UniqueViolation(&'static str),
}
