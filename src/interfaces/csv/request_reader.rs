use crate::domain::notification::{Channel, Priority};
use crate::error::{NotificationError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of the batch input: a notification to create, and whether to send
/// it right away. A missing `send` column means the notification is only
/// created.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct NotificationRequest {
    pub channel: Channel,
    pub priority: Priority,
    pub recipient: String,
    pub message: String,
    // `Option` so csv accepts rows that stop before this column.
    #[serde(default)]
    pub send: Option<bool>,
}

impl NotificationRequest {
    pub fn should_send(&self) -> bool {
        self.send.unwrap_or(false)
    }
}

/// Reads notification requests from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<NotificationRequest>`.
/// Fields are trimmed and the trailing `send` column may be left out.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<NotificationRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(NotificationError::from))
    }
}
