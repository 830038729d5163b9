//! Domain layer: the notification entity, channel strategies and the ports
//! the application layer depends on.

pub mod channel;
pub mod notification;
pub mod ports;
pub mod registry;
