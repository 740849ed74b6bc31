//! Seeded random quote streams.
//!
//! Each exchange follows its own random walk around a shared mid price, so
//! bids cross between exchanges often enough to produce opportunities.
//! Streams are fully determined by the seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::domain::quote_with_ask;
use crate::domain::Quote;

/// Parameters for [`random_quotes`].
#[derive(Debug, Clone)]
pub struct StreamSpec {
    pub symbol: String,
    pub exchanges: Vec<String>,
    /// Quotes per exchange.
    pub ticks: usize,
    pub start_price: f64,
    /// Maximum relative move per tick, e.g. `0.002` for 0.2%.
    pub volatility: f64,
    /// Probability that a tick is an empty book (zero bid and ask).
    pub empty_book_rate: f64,
}

impl Default for StreamSpec {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".into(),
            exchanges: vec!["Binance".into(), "Bybit".into(), "OKX".into()],
            ticks: 200,
            start_price: 100.0,
            volatility: 0.004,
            empty_book_rate: 0.02,
        }
    }
}

/// Generate a reproducible, unordered quote stream.
///
/// Timestamps advance by a random 1..=50 ms per tick and may collide across
/// exchanges. Quotes are interleaved across exchanges rather than grouped.
pub fn random_quotes(spec: &StreamSpec, seed: u64) -> Vec<Quote> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut quotes = Vec::with_capacity(spec.ticks * spec.exchanges.len());

    let mut state: Vec<(i64, f64)> = spec
        .exchanges
        .iter()
        .map(|_| (0, spec.start_price))
        .collect();
    for _ in 0..spec.ticks {
        for (exchange, (clock, price)) in spec.exchanges.iter().zip(state.iter_mut()) {
            *clock += rng.gen_range(1..=50);
            let step = rng.gen_range(-spec.volatility..=spec.volatility);
            *price = (*price * (1.0 + step)).max(0.01);
            if rng.gen_bool(spec.empty_book_rate) {
                quotes.push(quote_with_ask(exchange, &spec.symbol, *clock, 0.0, 0.0));
            } else {
                let spread = *price * rng.gen_range(0.0001..0.001);
                quotes.push(quote_with_ask(
                    exchange,
                    &spec.symbol,
                    *clock,
                    *price,
                    *price + spread,
                ));
            }
        }
    }
    quotes
}

/// Same quotes in a seeded random order.
pub fn shuffled(mut quotes: Vec<Quote>, seed: u64) -> Vec<Quote> {
    let mut rng = StdRng::seed_from_u64(seed);
    quotes.shuffle(&mut rng);
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let spec = StreamSpec::default();
        assert_eq!(random_quotes(&spec, 7), random_quotes(&spec, 7));
    }

    #[test]
    fn stream_covers_every_exchange() {
        let spec = StreamSpec {
            ticks: 10,
            ..StreamSpec::default()
        };
        let quotes = random_quotes(&spec, 1);
        assert_eq!(quotes.len(), 30);
    }
}
