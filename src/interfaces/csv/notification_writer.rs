use crate::domain::notification::{
    Channel, Cost, Notification, NotificationId, NotificationState, Priority,
};
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct NotificationRecord<'a> {
    id: NotificationId,
    channel: Channel,
    priority: Priority,
    recipient: &'a str,
    state: NotificationState,
    cost: Cost,
    created_at: String,
    sent_at: Option<String>,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl<'a> From<&'a Notification> for NotificationRecord<'a> {
    fn from(n: &'a Notification) -> Self {
        Self {
            id: n.id(),
            channel: n.channel(),
            priority: n.priority(),
            recipient: n.recipient(),
            state: n.state(),
            cost: n.cost(),
            created_at: timestamp(n.created_at()),
            sent_at: n.sent_at().map(timestamp),
        }
    }
}

/// Writes notifications as CSV, one row per notification.
pub struct NotificationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> NotificationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    /// Writes the header followed by every notification, then flushes.
    pub fn write_notifications<'a>(
        &mut self,
        notifications: impl IntoIterator<Item = &'a Notification>,
    ) -> Result<()> {
        // Written by hand so an empty batch still produces a header.
        self.writer.write_record([
            "id",
            "channel",
            "priority",
            "recipient",
            "state",
            "cost",
            "created_at",
            "sent_at",
        ])?;
        for notification in notifications {
            self.writer.serialize(NotificationRecord::from(notification))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
