use super::channel::{ChannelStrategy, Strategy};
use super::notification::Channel;
use crate::error::{NotificationError, Result};
use std::collections::HashMap;

/// Resolves a channel to the strategy serving it.
///
/// Built once from the full set of strategies and never changed afterwards.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<Channel, Strategy>,
}

impl StrategyRegistry {
    /// Builds a registry from `strategies`, failing on the first channel that
    /// is registered twice.
    pub fn new(strategies: impl IntoIterator<Item = Strategy>) -> Result<Self> {
        let mut map = HashMap::new();
        for strategy in strategies {
            let channel = strategy.channel();
            if map.insert(channel, strategy).is_some() {
                return Err(NotificationError::DuplicateChannel(channel));
            }
        }
        Ok(Self { strategies: map })
    }

    /// Registry holding the built-in strategy of every channel.
    pub fn standard() -> Self {
        Self {
            strategies: Channel::ALL
                .into_iter()
                .map(|channel| (channel, Strategy::for_channel(channel)))
                .collect(),
        }
    }

    pub fn resolve(&self, channel: Channel) -> Result<&Strategy> {
        self.strategies
            .get(&channel)
            .ok_or(NotificationError::UnknownChannel(channel))
    }

}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
