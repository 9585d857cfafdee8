use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::{ChainId, MarketId};

/// Identifies one market (epoch) of a market group contract on a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketKey {
    pub chain_id: ChainId,
    pub address: Address,
    pub market_id: MarketId,
}

impl MarketKey {
    pub fn new(chain_id: ChainId, address: Address, market_id: MarketId) -> Self {
        Self {
            chain_id,
            address,
            market_id,
        }
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.chain_id, self.address, self.market_id)
    }
}

/// A market known to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    #[serde(flatten)]
    pub key: MarketKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl Market {
    pub fn new(key: MarketKey) -> Self {
        Self {
            key,
            question: None,
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }
}
