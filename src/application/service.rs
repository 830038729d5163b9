use crate::domain::channel::ChannelStrategy;
use crate::domain::notification::{
    Channel, Cost, Notification, NotificationId, NotificationState, Priority,
};
use crate::domain::ports::NotificationStoreBox;
use crate::domain::registry::StrategyRegistry;
use crate::error::{NotificationError, Result};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

/// Maximum message length, counted in characters.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Orchestrates the notification lifecycle.
///
/// `NotificationService` is the only place notifications are created. It
/// resolves the channel strategy, enforces the entity invariants and persists
/// every revision through the storage port it owns.
pub struct NotificationService {
    store: NotificationStoreBox,
    registry: StrategyRegistry,
}

impl NotificationService {
    /// Creates a new `NotificationService`.
    ///
    /// # Arguments
    ///
    /// * `store` - The storage port notifications are persisted to.
    /// * `registry` - Resolves each channel to its strategy.
    pub fn new(store: NotificationStoreBox, registry: StrategyRegistry) -> Self {
        Self { store, registry }
    }

    /// Creates a pending notification carrying its channel's cost.
    ///
    /// The recipient is checked before the message, so a request that is
    /// wrong on both counts reports the recipient.
    pub async fn create(
        &self,
        recipient: &str,
        message: &str,
        channel: Channel,
        priority: Priority,
    ) -> Result<Notification> {
        let strategy = self.registry.resolve(channel)?;
        strategy.validate_recipient(recipient)?;
        validate_message(message)?;

        let notification = Notification::pending(
            Uuid::new_v4(),
            recipient,
            message,
            channel,
            priority,
            Utc::now(),
        );
        let cost = strategy.calculate_cost(&notification);
        debug!(id = %notification.id(), %channel, %cost, "Computed notification cost");
        let notification = notification.with_cost(cost);

        let saved = self.store.save(notification).await?;
        info!(id = %saved.id(), %channel, %priority, "Created notification");
        Ok(saved)
    }

    /// Sends a stored notification through its channel.
    ///
    /// The recipient is validated again since stored notifications are not
    /// guaranteed to have gone through `create`. A rejected recipient leaves
    /// the stored notification unchanged.
    pub async fn send_by_id(&self, id: NotificationId) -> Result<Notification> {
        let notification = self.get_by_id(id).await?;
        let strategy = self.registry.resolve(notification.channel())?;
        strategy.validate_recipient(notification.recipient())?;

        let sent = strategy.send(&notification);
        self.store.save(sent).await
    }

    pub async fn get_by_id(&self, id: NotificationId) -> Result<Notification> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(NotificationError::NotFound(id))
    }

    pub async fn list_by_state(&self, state: NotificationState) -> Result<Vec<Notification>> {
        self.store.filter_by_state(state).await
    }

    /// Sum of the cost of every stored notification.
    pub async fn total_cost(&self) -> Result<Cost> {
        Ok(self
            .store
            .list_all()
            .await?
            .iter()
            .map(Notification::cost)
            .sum())
    }

    /// Number of stored notifications.
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }
}

fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(NotificationError::MessageInvalid(
            "Message cannot be empty".to_string(),
        ));
    }
    let length = message.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(NotificationError::MessageInvalid(format!(
            "Message cannot exceed {MAX_MESSAGE_LENGTH} characters (current: {length})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::{EmailStrategy, Strategy};
    use crate::domain::ports::NotificationStore;
    use crate::infrastructure::in_memory::InMemoryNotificationStore;
    use rust_decimal_macros::dec;

    fn service() -> NotificationService {
        NotificationService::new(
            Box::new(InMemoryNotificationStore::new()),
            StrategyRegistry::standard(),
        )
    }

    #[tokio::test]
    async fn test_create_persists_pending_with_cost() {
        let service = service();
        let created = service
            .create("juan@gmail.com", "Test message", Channel::Email, Priority::High)
            .await
            .unwrap();

        let stored = service.get_by_id(created.id()).await.unwrap();
        assert_eq!(stored, created);
        assert_eq!(stored.state(), NotificationState::Pending);
        assert_eq!(stored.cost().value(), dec!(0.10));
        assert!(stored.sent_at().is_none());
        assert_eq!(stored.recipient(), "juan@gmail.com");
        assert_eq!(stored.message(), "Test message");
        assert_eq!(stored.priority(), Priority::High);
    }

    #[tokio::test]
    async fn test_message_validation() {
        let service = service();
        for message in ["", "   ", "\n\t"] {
            let result = service
                .create("juan@gmail.com", message, Channel::Email, Priority::Low)
                .await;
            assert!(matches!(result, Err(NotificationError::MessageInvalid(_))));
        }

        let err = service
            .create("juan@gmail.com", &"a".repeat(501), Channel::Email, Priority::Low)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid message: Message cannot exceed 500 characters (current: 501)"
        );
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_message_length_counts_characters() {
        let service = service();
        // 500 multi-byte characters is more than 500 bytes but still valid.
        let message = "é".repeat(MAX_MESSAGE_LENGTH);
        assert!(
            service
                .create("device_1", &message, Channel::Push, Priority::Low)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_recipient_checked_before_message() {
        let service = service();
        let result = service
            .create("not-a-phone", "", Channel::Sms, Priority::Medium)
            .await;
        assert!(matches!(result, Err(NotificationError::RecipientInvalid(_))));
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let registry = StrategyRegistry::new([Strategy::Email(EmailStrategy)]).unwrap();
        let service =
            NotificationService::new(Box::new(InMemoryNotificationStore::new()), registry);

        let result = service
            .create("device_1", "hello", Channel::Push, Priority::Low)
            .await;
        assert!(matches!(
            result,
            Err(NotificationError::UnknownChannel(Channel::Push))
        ));
    }

    #[tokio::test]
    async fn test_send_by_id_transitions_to_sent() {
        let service = service();
        let created = service
            .create("1234567890", "OTP 0000", Channel::Sms, Priority::High)
            .await
            .unwrap();

        let sent = service.send_by_id(created.id()).await.unwrap();
        assert_eq!(sent.state(), NotificationState::Sent);
        assert!(sent.sent_at().unwrap() >= sent.created_at());
        assert_eq!(sent.cost(), created.cost());
        assert_eq!(service.get_by_id(created.id()).await.unwrap(), sent);
    }

    #[tokio::test]
    async fn test_resend_keeps_cost_and_sent_at() {
        let service = service();
        let created = service
            .create("device_x", "Payment due", Channel::Push, Priority::Low)
            .await
            .unwrap();

        let first = service.send_by_id(created.id()).await.unwrap();
        let second = service.send_by_id(created.id()).await.unwrap();
        assert_eq!(second.state(), NotificationState::Sent);
        assert_eq!(second.cost(), first.cost());
        assert_eq!(second.sent_at(), first.sent_at());
    }

    #[tokio::test]
    async fn test_not_found() {
        let service = service();
        let id = Uuid::new_v4();
        assert!(matches!(
            service.get_by_id(id).await,
            Err(NotificationError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(
            service.send_by_id(id).await,
            Err(NotificationError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_send_revalidates_stored_recipient() {
        let store = InMemoryNotificationStore::new();
        let service =
            NotificationService::new(Box::new(store.clone()), StrategyRegistry::standard());

        // Written straight to the store, bypassing `create`.
        let imported = Notification::pending(
            Uuid::new_v4(),
            "no-at-sign",
            "Imported",
            Channel::Email,
            Priority::Medium,
            Utc::now(),
        );
        store.save(imported.clone()).await.unwrap();

        let result = service.send_by_id(imported.id()).await;
        assert!(matches!(result, Err(NotificationError::RecipientInvalid(_))));

        // The failed send is reported, not recorded: no FAILED transition.
        let stored = service.get_by_id(imported.id()).await.unwrap();
        assert_eq!(stored.state(), NotificationState::Pending);
        assert!(stored.sent_at().is_none());
        assert!(
            service
                .list_by_state(NotificationState::Failed)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_total_cost_and_list_by_state() {
        let service = service();
        assert_eq!(service.total_cost().await.unwrap(), Cost::ZERO);
        assert!(
            service
                .list_by_state(NotificationState::Sent)
                .await
                .unwrap()
                .is_empty()
        );

        let email = service
            .create("juan@gmail.com", "a", Channel::Email, Priority::High)
            .await
            .unwrap();
        service
            .create("1234567890", "b", Channel::Sms, Priority::Medium)
            .await
            .unwrap();
        service
            .create("device_abc123", "c", Channel::Push, Priority::Low)
            .await
            .unwrap();
        service.send_by_id(email.id()).await.unwrap();

        assert_eq!(service.total_cost().await.unwrap().value(), dec!(0.65));

        let sent = service.list_by_state(NotificationState::Sent).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id(), email.id());
        assert_eq!(
            service
                .list_by_state(NotificationState::Pending)
                .await
                .unwrap()
                .len(),
            2
        );
    }
}
