use super::notification::{Notification, NotificationId, NotificationState};
use crate::error::Result;
use async_trait::async_trait;

/// Storage port consumed by the notification service.
///
/// Implementations own the concurrency discipline: a `save` must be visible
/// to any later `find_by_id` on the same id, and aggregate queries must
/// observe a consistent snapshot.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Upserts by id and returns the stored value.
    async fn save(&self, notification: Notification) -> Result<Notification>;
    async fn find_by_id(&self, id: NotificationId) -> Result<Option<Notification>>;
    async fn list_all(&self) -> Result<Vec<Notification>>;
    async fn filter_by_state(&self, state: NotificationState) -> Result<Vec<Notification>>;
    async fn count(&self) -> Result<usize>;
    async fn clear(&self) -> Result<()>;
}

pub type NotificationStoreBox = Box<dyn NotificationStore>;
