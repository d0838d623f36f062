#![allow(dead_code)]

use contribution_ledger::contract::{ContributionLedger, ContributionLedgerClient};
use contribution_ledger::data::LedgerParams;
use contribution_ledger::price_feed::PriceData;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, token, Address, Env,
};

/// Reference units paid for one whole token.
pub const PRICE: i128 = 2000;
pub const PRICE_DECIMALS: u32 = 0;
pub const MINIMUM_CONTRIBUTION: i128 = 50;

/// Stellar asset contracts use 7 decimals.
pub const ONE_TOKEN: i128 = 10_000_000;
/// 0.025 tokens, exactly 50 reference units at `PRICE`.
pub const MINIMUM_AMOUNT: i128 = 250_000;

// ==================== Price feed double ====================

#[contracttype]
enum PriceFeedKey {
    Answer,
    Available,
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn __constructor(env: Env, price: i128, decimals: u32) {
        env.storage()
            .instance()
            .set(&PriceFeedKey::Answer, &PriceData { price, decimals });
        env.storage().instance().set(&PriceFeedKey::Available, &true);
    }

    pub fn update_answer(env: Env, price: i128) {
        let mut answer: PriceData = env.storage().instance().get(&PriceFeedKey::Answer).unwrap();
        answer.price = price;
        env.storage().instance().set(&PriceFeedKey::Answer, &answer);
    }

    pub fn set_available(env: Env, available: bool) {
        env.storage()
            .instance()
            .set(&PriceFeedKey::Available, &available);
    }

    pub fn current_price(env: Env) -> PriceData {
        let available: bool = env
            .storage()
            .instance()
            .get(&PriceFeedKey::Available)
            .unwrap_or(false);
        if !available {
            panic!("price feed is down");
        }
        env.storage().instance().get(&PriceFeedKey::Answer).unwrap()
    }

    pub fn version(_env: Env) -> u32 {
        4
    }
}

// ==================== Token double ====================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MockTokenError {
    InsufficientBalance = 1,
    RecipientRejected = 2,
}

#[contracttype]
enum MockTokenKey {
    Balance(Address),
    Rejected(Address),
}

/// Minimal token whose transfers to a chosen recipient can be made to fail.
#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&MockTokenKey::Balance(to), &(balance + amount));
    }

    pub fn set_rejecting(env: Env, recipient: Address, rejecting: bool) {
        env.storage()
            .persistent()
            .set(&MockTokenKey::Rejected(recipient), &rejecting);
    }

    pub fn decimals(_env: Env) -> u32 {
        7
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&MockTokenKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();

        let rejecting: bool = env
            .storage()
            .persistent()
            .get(&MockTokenKey::Rejected(to.clone()))
            .unwrap_or(false);
        if rejecting {
            panic_with_error!(&env, MockTokenError::RecipientRejected);
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic_with_error!(&env, MockTokenError::InsufficientBalance);
        }
        env.storage()
            .persistent()
            .set(&MockTokenKey::Balance(from), &(from_balance - amount));
        Self::mint(env, to, amount);
    }
}

// ==================== Fixtures ====================

pub struct TestData<'a> {
    pub client: ContributionLedgerClient<'a>,
    pub owner: Address,
    pub contributor: Address,
    pub token: token::Client<'a>,
    pub token_admin: token::StellarAssetClient<'a>,
    pub price_feed: MockPriceFeedClient<'a>,
}

pub struct MockTokenTestData<'a> {
    pub client: ContributionLedgerClient<'a>,
    pub owner: Address,
    pub contributor: Address,
    pub token: MockTokenClient<'a>,
}

pub fn create_price_feed<'a>(e: &Env, price: i128, decimals: u32) -> MockPriceFeedClient<'a> {
    let address = e.register(MockPriceFeed, (price, decimals));
    MockPriceFeedClient::new(e, &address)
}

pub fn register_ledger<'a>(
    e: &Env,
    owner: &Address,
    token: &Address,
    price_feed: &Address,
    minimum_contribution: i128,
) -> ContributionLedgerClient<'a> {
    let params = LedgerParams {
        minimum_contribution,
    };
    let address = e.register(ContributionLedger, (owner, token, price_feed, params));
    ContributionLedgerClient::new(e, &address)
}

pub fn create_ledger_contract<'a>(
    e: &Env,
    price: i128,
    price_decimals: u32,
    minimum_contribution: i128,
) -> TestData<'a> {
    e.mock_all_auths();

    let owner = Address::generate(e);
    let contributor = Address::generate(e);
    let issuer = Address::generate(e);

    let sac = e.register_stellar_asset_contract_v2(issuer);
    let token = token::Client::new(e, &sac.address());
    let token_admin = token::StellarAssetClient::new(e, &sac.address());
    let price_feed = create_price_feed(e, price, price_decimals);

    let client = register_ledger(
        e,
        &owner,
        &sac.address(),
        &price_feed.address,
        minimum_contribution,
    );

    TestData {
        client,
        owner,
        contributor,
        token,
        token_admin,
        price_feed,
    }
}

pub fn create_default_ledger<'a>(e: &Env) -> TestData<'a> {
    create_ledger_contract(e, PRICE, PRICE_DECIMALS, MINIMUM_CONTRIBUTION)
}

pub fn create_ledger_with_mock_token<'a>(e: &Env) -> MockTokenTestData<'a> {
    e.mock_all_auths();

    let owner = Address::generate(e);
    let contributor = Address::generate(e);

    let token_address = e.register(MockToken, ());
    let token = MockTokenClient::new(e, &token_address);
    let price_feed = create_price_feed(e, PRICE, PRICE_DECIMALS);

    let client = register_ledger(
        e,
        &owner,
        &token_address,
        &price_feed.address,
        MINIMUM_CONTRIBUTION,
    );

    MockTokenTestData {
        client,
        owner,
        contributor,
        token,
    }
}

/// Mints `amount` to a fresh address and contributes it.
pub fn fund_new_contributor(e: &Env, test_data: &TestData, amount: i128) -> Address {
    let contributor = Address::generate(e);
    test_data.token_admin.mint(&contributor, &amount);
    test_data.client.contribute(&contributor, &amount);
    contributor
}

/// Sum of every listed contributor's record.
pub fn sum_of_records(client: &ContributionLedgerClient) -> i128 {
    let mut sum = 0_i128;
    for index in 0..client.contributor_count() {
        let contributor = client.contributor_at(&index);
        sum += client.amount_contributed_by(&contributor);
    }
    sum
}
