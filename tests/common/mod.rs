#![allow(dead_code)]

use bank_notifier::application::service::NotificationService;
use bank_notifier::domain::registry::StrategyRegistry;
use bank_notifier::infrastructure::in_memory::InMemoryNotificationStore;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const HEADER: &str = "channel,priority,recipient,message,send";

pub fn service() -> NotificationService {
    NotificationService::new(
        Box::new(InMemoryNotificationStore::new()),
        StrategyRegistry::standard(),
    )
}

/// Writes a requests CSV with the standard header followed by `rows`.
pub fn requests_csv(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}

pub fn generate_requests(rows: usize) -> Result<NamedTempFile, Error> {
    let file = NamedTempFile::new()?;
    let mut wtr = csv::Writer::from_writer(file.reopen()?);
    wtr.write_record(HEADER.split(','))?;
    for i in 0..rows {
        wtr.write_record([
            "push",
            "low",
            &format!("device_{i}"),
            "Scheduled maintenance",
            "true",
        ])?;
    }
    wtr.flush()?;
    Ok(file)
}
