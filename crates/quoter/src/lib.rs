//! Foil Quoter
//!
//! Finds the largest trade size whose simulated execution keeps both the
//! required collateral within budget and the post-trade price inside a band,
//! spending a bounded number of calls to a [`foil_ports::TradeSimulator`].
//!
//! # Example
//!
//! ```ignore
//! let quoter = PositionSizeQuoter::new(simulator);
//! let request = QuoteRequest::new(dec!(10), dec!(12), collateral);
//! let result = quoter.quote(&market, &request, &QuoteCancellation::new()).await?;
//! ```

mod cancel;
mod error;
mod search;

pub use cancel::QuoteCancellation;
pub use error::{InvalidQuote, QuoteError};
pub use search::{BISECT_CONVERGENCE, PositionSizeQuoter, theoretical_max_size};
