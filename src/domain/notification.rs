use crate::error::{NotificationError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier assigned to a notification when it is created.
pub type NotificationId = Uuid;

/// Represents the monetary cost of delivering notifications.
///
/// This is a wrapper around `rust_decimal::Decimal` so that totals over any
/// number of notifications stay exact.
///
/// Costs are only ever produced by the channel strategies, so the type can be
/// serialized but not read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Cost(Decimal);

impl Cost {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds a cost from a literal known to be non-negative.
    pub(crate) const fn fixed(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Cost> for Decimal {
    fn from(cost: Cost) -> Self {
        cost.0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Email, Channel::Sms, Channel::Push];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "EMAIL",
            Channel::Sms => "SMS",
            Channel::Push => "PUSH",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Lifecycle state of a notification.
///
/// `Failed` is part of the state set so stores can be filtered by it, but no
/// operation in this crate transitions a notification into it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum NotificationState {
    Pending,
    Sent,
    Failed,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        })
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationState::Pending => "PENDING",
            NotificationState::Sent => "SENT",
            NotificationState::Failed => "FAILED",
        })
    }
}

impl FromStr for NotificationState {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(NotificationState::Pending),
            "sent" => Ok(NotificationState::Sent),
            "failed" => Ok(NotificationState::Failed),
            other => Err(NotificationError::InvalidValue(format!(
                "unknown state '{other}'"
            ))),
        }
    }
}

/// A single notification and its current lifecycle state.
///
/// Values are never mutated in place: every transition consumes the current
/// revision and returns the next one. Only the crate can build a notification,
/// which keeps `sent_at` present exactly when the state is `Sent`.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Notification {
    id: NotificationId,
    recipient: String,
    message: String,
    channel: Channel,
    priority: Priority,
    state: NotificationState,
    cost: Cost,
    created_at: DateTime<Utc>,
    sent_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// First revision of a notification: pending, free, never sent.
    pub(crate) fn pending(
        id: NotificationId,
        recipient: impl Into<String>,
        message: impl Into<String>,
        channel: Channel,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            recipient: recipient.into(),
            message: message.into(),
            channel,
            priority,
            state: NotificationState::Pending,
            cost: Cost::ZERO,
            created_at,
            sent_at: None,
        }
    }

    pub(crate) fn with_cost(self, cost: Cost) -> Self {
        Self { cost, ..self }
    }

    /// Moves the notification to `Sent`. A notification that was already sent
    /// keeps its original `sent_at`.
    pub(crate) fn into_sent(self, cost: Cost, at: DateTime<Utc>) -> Self {
        let sent_at = self.sent_at.unwrap_or(at);
        Self {
            state: NotificationState::Sent,
            cost,
            sent_at: Some(sent_at),
            ..self
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn state(&self) -> NotificationState {
        self.state
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }
}
