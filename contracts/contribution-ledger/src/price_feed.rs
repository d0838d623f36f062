use soroban_sdk::{contractclient, contracttype, Env};

/// Latest answer reported by a price feed.
///
/// `price` is the amount of reference currency paid for one whole unit of the
/// ledger token, scaled by `10^decimals`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub decimals: u32,
}

/// Interface the ledger expects from its price oracle.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// Returns the current conversion rate.
    fn current_price(env: Env) -> PriceData;

    /// Returns the version of the feed implementation.
    fn version(env: Env) -> u32;
}
