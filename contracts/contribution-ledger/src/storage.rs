use crate::data::{DataKey, LedgerConfig};
use soroban_sdk::{Address, Env, Vec};

const DAY_IN_LEDGERS: u32 = 17280;

// Instance storage: accessed frequently, moderate TTL
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS; // ~30 days
const INSTANCE_LIFETIME_THRESHOLD: u32 = 15 * DAY_IN_LEDGERS; // ~15 days

// Persistent storage: contributor records, long TTL for safety
const PERSISTENT_BUMP_AMOUNT: u32 = 180 * DAY_IN_LEDGERS; // ~6 months
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 90 * DAY_IN_LEDGERS; // ~3 months

pub fn get_ledger_config(e: &Env) -> LedgerConfig {
    let config = e
        .storage()
        .instance()
        .get(&DataKey::LedgerConfig)
        .unwrap_or_else(|| panic!("Ledger config has expired"));

    bump_instance_ttl(e);
    config
}

pub fn set_ledger_config(e: &Env, config: &LedgerConfig) {
    e.storage().instance().set(&DataKey::LedgerConfig, config);
}

pub fn get_ledger_balance(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::LedgerBalance)
        .unwrap_or(0_i128)
}

pub fn set_ledger_balance(e: &Env, balance: i128) {
    e.storage().instance().set(&DataKey::LedgerBalance, &balance);
    bump_instance_ttl(e);
}

pub fn get_contribution(e: &Env, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(contributor.clone());
    let amount: Option<i128> = e.storage().persistent().get(&key);

    match amount {
        Some(amount) => {
            bump_persistent_ttl(e, &key);
            amount
        }
        None => 0_i128,
    }
}

pub fn set_contribution(e: &Env, contributor: &Address, amount: i128) {
    let key = DataKey::Contribution(contributor.clone());
    e.storage().persistent().set(&key, &amount);
    bump_persistent_ttl(e, &key);
}

/// A zeroed record is removed; reads of a missing record return 0.
pub fn reset_contribution(e: &Env, contributor: &Address) {
    e.storage()
        .persistent()
        .remove(&DataKey::Contribution(contributor.clone()));
}

pub fn get_contributors(e: &Env) -> Vec<Address> {
    let key = DataKey::Contributors;
    let contributors: Option<Vec<Address>> = e.storage().persistent().get(&key);

    match contributors {
        Some(contributors) => {
            bump_persistent_ttl(e, &key);
            contributors
        }
        None => Vec::new(e),
    }
}

pub fn contributor_count(e: &Env) -> u32 {
    get_contributors(e).len()
}

pub fn contributor_at(e: &Env, index: u32) -> Option<Address> {
    get_contributors(e).get(index)
}

pub fn push_contributor(e: &Env, contributor: &Address) {
    let mut contributors = get_contributors(e);
    contributors.push_back(contributor.clone());

    let key = DataKey::Contributors;
    e.storage().persistent().set(&key, &contributors);
    bump_persistent_ttl(e, &key);
}

pub fn clear_contributors(e: &Env) {
    e.storage().persistent().remove(&DataKey::Contributors);
}

fn bump_instance_ttl(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent_ttl(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
