use crate::domain::notification::{Notification, NotificationId, NotificationState};
use crate::domain::ports::NotificationStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A thread-safe in-memory store for notifications.
///
/// Uses `Arc<RwLock<HashMap<NotificationId, Notification>>>` so clones share
/// the same data. Queries hold the read lock for their whole scan, so they
/// never observe a half-applied write.
#[derive(Default, Clone)]
pub struct InMemoryNotificationStore {
    notifications: Arc<RwLock<HashMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationStore {
    /// Creates a new, empty in-memory notification store.
    pub fn new() -> Self {
        Self::default()
    }
}

// Listing order is creation order; the map itself is unordered.
fn by_creation(mut notifications: Vec<Notification>) -> Vec<Notification> {
    notifications.sort_by_key(|n| (n.created_at(), n.id()));
    notifications
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn save(&self, notification: Notification) -> Result<Notification> {
        let mut notifications = self.notifications.write().await;
        debug!(id = %notification.id(), state = %notification.state(), "Storing notification");
        notifications.insert(notification.id(), notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: NotificationId) -> Result<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(by_creation(notifications.values().cloned().collect()))
    }

    async fn filter_by_state(&self, state: NotificationState) -> Result<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(by_creation(
            notifications
                .values()
                .filter(|n| n.state() == state)
                .cloned()
                .collect(),
        ))
    }

    async fn count(&self) -> Result<usize> {
        let notifications = self.notifications.read().await;
        Ok(notifications.len())
    }

    async fn clear(&self) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        notifications.clear();
        Ok(())
    }
}
