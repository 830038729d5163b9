//! Application layer containing the notification lifecycle orchestration.
//!
//! This module defines the `NotificationService`, the single entry point for
//! creating, sending and querying notifications. It depends only on the
//! strategy registry and the storage port, never on a concrete store.

pub mod service;
