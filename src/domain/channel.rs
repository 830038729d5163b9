use super::notification::{Channel, Cost, Notification};
use crate::error::{NotificationError, Result};
use chrono::Utc;
use rust_decimal_macros::dec;
use tracing::info;

pub const EMAIL_COST: Cost = Cost::fixed(dec!(0.10));
pub const SMS_COST: Cost = Cost::fixed(dec!(0.50));
pub const PUSH_COST: Cost = Cost::fixed(dec!(0.05));

const PHONE_DIGITS: usize = 10;
const DEVICE_PREFIX: &str = "device_";

/// Everything that differs between delivery channels: recipient format,
/// per-send cost and the (simulated) send itself.
pub trait ChannelStrategy {
    /// The channel this strategy serves.
    fn channel(&self) -> Channel;

    /// Fails with `RecipientInvalid` when `recipient` does not match the
    /// channel's format.
    fn validate_recipient(&self, recipient: &str) -> Result<()>;

    /// Fixed per-send cost; independent of the message and recipient.
    fn calculate_cost(&self, notification: &Notification) -> Cost;

    /// Returns the sent revision of `notification`. No I/O happens here, the
    /// delivery is simulated and always succeeds for a validated recipient.
    fn send(&self, notification: &Notification) -> Notification {
        info!(
            id = %notification.id(),
            channel = %self.channel(),
            recipient = notification.recipient(),
            "Sending notification"
        );
        let cost = self.calculate_cost(notification);
        notification.clone().into_sent(cost, Utc::now())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmailStrategy;

impl ChannelStrategy for EmailStrategy {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    fn validate_recipient(&self, recipient: &str) -> Result<()> {
        if recipient.contains('@') {
            Ok(())
        } else {
            Err(NotificationError::RecipientInvalid(
                "Email address must contain an @ symbol".to_string(),
            ))
        }
    }

    fn calculate_cost(&self, _notification: &Notification) -> Cost {
        EMAIL_COST
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SmsStrategy;

impl ChannelStrategy for SmsStrategy {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    fn validate_recipient(&self, recipient: &str) -> Result<()> {
        if recipient.len() == PHONE_DIGITS && recipient.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(NotificationError::RecipientInvalid(format!(
                "Phone number must have exactly {PHONE_DIGITS} numeric digits"
            )))
        }
    }

    fn calculate_cost(&self, _notification: &Notification) -> Cost {
        SMS_COST
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PushStrategy;

impl ChannelStrategy for PushStrategy {
    fn channel(&self) -> Channel {
        Channel::Push
    }

    fn validate_recipient(&self, recipient: &str) -> Result<()> {
        if recipient.starts_with(DEVICE_PREFIX) {
            Ok(())
        } else {
            Err(NotificationError::RecipientInvalid(format!(
                "Device ID must have the prefix '{DEVICE_PREFIX}'"
            )))
        }
    }

    fn calculate_cost(&self, _notification: &Notification) -> Cost {
        PUSH_COST
    }
}

/// The closed set of channel strategies, one variant per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Email(EmailStrategy),
    Sms(SmsStrategy),
    Push(PushStrategy),
}

impl Strategy {
    /// The built-in strategy for `channel`.
    pub fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::Email => Strategy::Email(EmailStrategy),
            Channel::Sms => Strategy::Sms(SmsStrategy),
            Channel::Push => Strategy::Push(PushStrategy),
        }
    }

    fn inner(&self) -> &dyn ChannelStrategy {
        match self {
            Strategy::Email(s) => s,
            Strategy::Sms(s) => s,
            Strategy::Push(s) => s,
        }
    }
}

impl ChannelStrategy for Strategy {
    fn channel(&self) -> Channel {
        self.inner().channel()
    }

    fn validate_recipient(&self, recipient: &str) -> Result<()> {
        self.inner().validate_recipient(recipient)
    }

    fn calculate_cost(&self, notification: &Notification) -> Cost {
        self.inner().calculate_cost(notification)
    }

    fn send(&self, notification: &Notification) -> Notification {
        self.inner().send(notification)
    }
}
