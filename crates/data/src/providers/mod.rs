mod coingecko;

pub use coingecko::{COINGECKO_API_URL, CoingeckoConfig, CoingeckoProvider};
