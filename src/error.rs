use crate::domain::notification::{Channel, NotificationId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("No strategy registered for channel: {0}")]
    UnknownChannel(Channel),
    #[error("Strategy registered more than once for channel: {0}")]
    DuplicateChannel(Channel),
    #[error("Invalid recipient: {0}")]
    RecipientInvalid(String),
    #[error("Invalid message: {0}")]
    MessageInvalid(String),
    #[error("Notification not found with id: {0}")]
    NotFound(NotificationId),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotificationError>;
