//! CSV adapters used by the batch binary.

pub mod notification_writer;
pub mod request_reader;
