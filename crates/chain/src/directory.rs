//! Per-chain provider wiring.

use crate::error::ChainError;
use crate::price::FoilReferencePrice;
use crate::simulator::FoilTradeSimulator;
use crate::throttle::ThrottledSimulator;
use alloy::providers::{Provider, ProviderBuilder};
use foil_core::ChainId;
use foil_ports::{ChainDirectory, ChainHandle, TradeSimulator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use url::Url;

/// RPC endpoint for one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: ChainId,
    pub rpc_url: String,
    /// Upper bound on simulation calls per second; unlimited when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calls_per_second: Option<u32>,
}

impl ChainConfig {
    pub fn new(chain_id: ChainId, rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id,
            rpc_url: rpc_url.into(),
            max_calls_per_second: None,
        }
    }

    pub fn with_rate_limit(mut self, calls_per_second: u32) -> Self {
        self.max_calls_per_second = Some(calls_per_second);
        self
    }

    fn url(&self) -> Result<Url, ChainError> {
        self.rpc_url.parse().map_err(|e: url::ParseError| ChainError::InvalidRpcUrl {
            chain_id: self.chain_id,
            reason: e.to_string(),
        })
    }

    fn rate_limit(&self) -> Result<Option<NonZeroU32>, ChainError> {
        match self.max_calls_per_second {
            None => Ok(None),
            Some(limit) => NonZeroU32::new(limit)
                .map(Some)
                .ok_or(ChainError::InvalidRateLimit(self.chain_id)),
        }
    }
}

/// Chain directory backed by HTTP JSON-RPC providers
#[derive(Debug, Default)]
pub struct FoilChainDirectory {
    chains: HashMap<ChainId, ChainHandle>,
}

impl FoilChainDirectory {
    /// Builds one provider per configured chain. No network traffic happens
    /// until the first quote.
    pub fn connect(configs: &[ChainConfig]) -> Result<Self, ChainError> {
        let mut handles = Vec::with_capacity(configs.len());

        for config in configs {
            let url = config.url()?;
            let rate_limit = config.rate_limit()?;
            let provider = ProviderBuilder::new().connect_http(url).erased();

            let simulator: Arc<dyn TradeSimulator> = match rate_limit {
                Some(limit) => Arc::new(ThrottledSimulator::new(
                    FoilTradeSimulator::new(provider.clone()),
                    limit,
                )),
                None => Arc::new(FoilTradeSimulator::new(provider.clone())),
            };
            let prices = Arc::new(FoilReferencePrice::new(provider));

            log::info!(
                "Chain {} wired to {} (rate limit: {:?})",
                config.chain_id,
                config.rpc_url,
                config.max_calls_per_second
            );
            handles.push(ChainHandle::new(config.chain_id, simulator, prices));
        }

        Self::from_handles(handles)
    }

    /// Builds a directory from ready-made handles.
    pub fn from_handles(handles: Vec<ChainHandle>) -> Result<Self, ChainError> {
        let mut chains = HashMap::with_capacity(handles.len());
        for handle in handles {
            let chain_id = handle.chain_id;
            if chains.insert(chain_id, handle).is_some() {
                return Err(ChainError::DuplicateChain(chain_id));
            }
        }
        Ok(Self { chains })
    }
}

impl ChainDirectory for FoilChainDirectory {
    fn chain(&self, chain_id: ChainId) -> Option<ChainHandle> {
        self.chains.get(&chain_id).cloned()
    }

    fn chain_ids(&self) -> Vec<ChainId> {
        let mut ids: Vec<_> = self.chains.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
