use thiserror::Error;

use crate::ids::ContactId;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid contact range: to ({to}) is less than from ({from})")]
    InvalidRange { from: ContactId, to: ContactId },
    #[error("unknown contact type: {0}")]
    UnknownContactType(String),
    #[error("unknown phone type id: {0}")]
    UnknownPhoneType(i64),
    #[error("settings error: {0}")]
    Settings(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
