//! Client-side rate limiting of simulation calls.
//!
//! A search issues its probes back to back, and public RPC endpoints tend to
//! reject bursts. Wrapping a simulator in [`ThrottledSimulator`] spaces calls
//! out with a token bucket shared by every request on that chain.

use async_trait::async_trait;
use foil_core::{I256, MarketKey, SimulationOutcome};
use foil_ports::{SimulationResult, TradeSimulator};
use parking_lot::Mutex;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::Instant;

struct TokenBucket {
    tokens: f64,
    capacity: f64,
    refill_rate: f64, // tokens per second
    last_update: Instant,
}

impl TokenBucket {
    fn new(per_second: NonZeroU32) -> Self {
        let capacity = per_second.get() as f64;
        TokenBucket {
            tokens: capacity,
            capacity,
            refill_rate: capacity,
            last_update: Instant::now(),
        }
    }

    /// Takes one token, or returns how long until one is available.
    fn try_take(&mut self) -> Option<Duration> {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            let deficit = 1.0 - self.tokens;
            Some(Duration::from_secs_f64(deficit / self.refill_rate))
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_rate).min(self.capacity);
        self.last_update = now;
    }
}

/// Trade simulator that waits for a rate-limit token before each call
pub struct ThrottledSimulator<S> {
    inner: S,
    bucket: Mutex<TokenBucket>,
}

impl<S: TradeSimulator> ThrottledSimulator<S> {
    pub fn new(inner: S, calls_per_second: NonZeroU32) -> Self {
        Self {
            inner,
            bucket: Mutex::new(TokenBucket::new(calls_per_second)),
        }
    }

    async fn acquire(&self) {
        loop {
            let wait = self.bucket.lock().try_take();
            match wait {
                None => return,
                Some(wait) => {
                    log::trace!("{} throttled for {:?}", self.inner.name(), wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

#[async_trait]
impl<S: TradeSimulator> TradeSimulator for ThrottledSimulator<S> {
    async fn simulate(&self, market: &MarketKey, size: I256) -> SimulationResult<SimulationOutcome> {
        self.acquire().await;
        self.inner.simulate(market, size).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
