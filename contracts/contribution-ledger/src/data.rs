use soroban_sdk::{contractevent, contracttype, Address};

#[contracttype]
pub struct LedgerParams {
    pub minimum_contribution: i128,
}

#[contracttype]
pub struct LedgerConfig {
    pub token: Address,
    pub price_feed: Address,
    /// Whole reference-currency units a single contribution must reach.
    pub minimum_contribution: i128,
}

impl LedgerConfig {
    pub fn from_ledger_params(params: &LedgerParams, token: Address, price_feed: Address) -> Self {
        LedgerConfig {
            token,
            price_feed,
            minimum_contribution: params.minimum_contribution,
        }
    }
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    LedgerConfig,
    LedgerBalance,
    Contributors,
    Contribution(Address),
}

#[contractevent(topics = ["CONTRIB"])]
pub struct ContributionReceived {
    pub contributor: Address,
    pub amount: i128,
    pub total: i128,
}

#[contractevent(topics = ["WITHDRAWN"])]
pub struct FundsWithdrawn {
    pub owner: Address,
    pub amount: i128,
    pub contributors: u32,
}
