use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, log, token, Address, Env};
use stellar_access::ownable::{self as ownable};
use stellar_contract_utils::pausable::{self as pausable, Pausable};
use stellar_macros::{only_owner, when_not_paused};

use crate::conversion;
use crate::data::{ContributionReceived, FundsWithdrawn, LedgerConfig, LedgerParams};
use crate::price_feed::{PriceData, PriceFeedClient};
use crate::validation::{self, Error};
use crate::withdrawal::{self, ContributorAccess};

use crate::storage as Storage;

fn get_token<'a>(env: &'a Env, config: &LedgerConfig) -> TokenClient<'a> {
    token::Client::new(env, &config.token)
}

fn get_price_feed<'a>(env: &'a Env, config: &LedgerConfig) -> PriceFeedClient<'a> {
    PriceFeedClient::new(env, &config.price_feed)
}

fn get_current_price(env: &Env, config: &LedgerConfig) -> Result<PriceData, Error> {
    let price = get_price_feed(env, config)
        .try_current_price()
        .map_err(|_| Error::PriceUnavailable)?
        .map_err(|_| Error::PriceUnavailable)?;

    validation::validate_price(&price)?;
    Ok(price)
}

fn get_owner(env: &Env) -> Address {
    ownable::get_owner(env).unwrap_or_else(|| panic!("Ledger owner has not been set"))
}

#[contract]
pub struct ContributionLedger;

#[contractimpl]
impl ContributionLedger {
    /// Initializes the ledger and binds its owner, token and price feed.
    ///
    /// The owner is fixed for the lifetime of the contract: ownership can be
    /// neither transferred nor renounced.
    ///
    /// # Parameters
    ///
    /// * `env` - The execution environment provided by Soroban.
    /// * `owner_addr` - The only address allowed to withdraw (requires authentication).
    /// * `token_addr` - The token contract contributions are paid in.
    /// * `price_feed_addr` - The oracle converting token amounts to the reference currency.
    /// * `params` - The minimum contribution in whole reference-currency units.
    ///
    /// # Errors
    ///
    /// * `MinimumContributionMustBeGreaterThanZero` if the minimum is not positive.
    pub fn __constructor(
        env: Env,
        owner_addr: Address,
        token_addr: Address,
        price_feed_addr: Address,
        params: LedgerParams,
    ) -> Result<(), Error> {
        owner_addr.require_auth();
        validation::validate_constructor_params(params.minimum_contribution)?;

        ownable::set_owner(&env, &owner_addr);
        let config = LedgerConfig::from_ledger_params(&params, token_addr, price_feed_addr);

        Storage::set_ledger_config(&env, &config);
        Storage::set_ledger_balance(&env, 0);
        Ok(())
    }

    /// Accepts a contribution from `contributor`.
    ///
    /// Converts `amount` to the reference currency at the current oracle price and
    /// rejects it below the configured minimum. On success the tokens are moved into
    /// the ledger, the contributor's cumulative record grows by `amount` and first-time
    /// contributors are appended to the contributor list.
    ///
    /// # Parameters
    ///
    /// * `env` - The execution environment.
    /// * `contributor` - The contributing address (requires authentication).
    /// * `amount` - The amount in token base units.
    ///
    /// # Returns
    ///
    /// * The contributor's cumulative contribution after this call.
    ///
    /// # Errors
    ///
    /// * `AmountMustBeGreaterThanZero` if amount is not positive.
    /// * `AddressInsufficientBalance` if the contributor cannot cover the amount.
    /// * `PriceUnavailable` or `InvalidPrice` if the oracle gives no usable price.
    /// * `InsufficientContribution` if the amount is worth less than the minimum.
    /// * `ConversionOverflow` if the conversion does not fit in 128 bits.
    /// * `TransferFailed` or `InvalidTransferData` if the token transfer fails.
    ///
    /// # Note
    ///
    /// * The `#[when_not_paused]` macro automatically rejects calls if the contract is paused.
    #[when_not_paused]
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<i128, Error> {
        contributor.require_auth();
        let config = Storage::get_ledger_config(&env);
        let tk = get_token(&env, &config);

        validation::validate_contribution(amount, tk.balance(&contributor))?;

        let price = get_current_price(&env, &config)?;
        validation::validate_minimum_contribution(
            amount,
            tk.decimals(),
            &price,
            config.minimum_contribution,
        )?;

        tk.try_transfer(&contributor, env.current_contract_address(), &amount)
            .map_err(|_| Error::TransferFailed)?
            .map_err(|_| Error::InvalidTransferData)?;

        let previous = Storage::get_contribution(&env, &contributor);
        let total = previous + amount;
        Storage::set_contribution(&env, &contributor, total);
        if previous == 0 {
            Storage::push_contributor(&env, &contributor);
        }
        Storage::set_ledger_balance(&env, Storage::get_ledger_balance(&env) + amount);

        ContributionReceived {
            contributor,
            amount,
            total,
        }
        .publish(&env);

        Ok(total)
    }

    /// Transfers the whole ledger balance to the owner and resets every record.
    ///
    /// # Parameters
    ///
    /// * `env` - The execution environment.
    /// * `caller` - Must be the owner (requires authentication).
    ///
    /// # Returns
    ///
    /// * The amount transferred to the owner.
    ///
    /// # Errors
    ///
    /// * `NotOwner` if the caller is not the owner.
    /// * `TransferFailed` or `InvalidTransferData` if the transfer to the owner fails,
    ///   in which case no record, list entry or balance is touched.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        Self::withdraw_with(&env, caller, ContributorAccess::Direct)
    }

    /// Same outcome as `withdraw`, reading the contributor list from storage once.
    pub fn withdraw_optimized(env: Env, caller: Address) -> Result<i128, Error> {
        Self::withdraw_with(&env, caller, ContributorAccess::Cached)
    }

    pub fn owner(env: Env) -> Address {
        get_owner(&env)
    }

    pub fn token(env: Env) -> Address {
        Storage::get_ledger_config(&env).token
    }

    pub fn price_feed(env: Env) -> Address {
        Storage::get_ledger_config(&env).price_feed
    }

    /// Version reported by the bound price feed.
    pub fn price_feed_version(env: Env) -> Result<u32, Error> {
        let config = Storage::get_ledger_config(&env);
        get_price_feed(&env, &config)
            .try_version()
            .map_err(|_| Error::PriceUnavailable)?
            .map_err(|_| Error::PriceUnavailable)
    }

    pub fn minimum_contribution(env: Env) -> i128 {
        Storage::get_ledger_config(&env).minimum_contribution
    }

    pub fn ledger_balance(env: Env) -> i128 {
        Storage::get_ledger_balance(&env)
    }

    pub fn amount_contributed_by(env: Env, contributor: Address) -> i128 {
        Storage::get_contribution(&env, &contributor)
    }

    /// # Errors
    ///
    /// * `IndexOutOfRange` if `index` is not below `contributor_count`.
    pub fn contributor_at(env: Env, index: u32) -> Result<Address, Error> {
        Storage::contributor_at(&env, index).ok_or(Error::IndexOutOfRange)
    }

    pub fn contributor_count(env: Env) -> u32 {
        Storage::contributor_count(&env)
    }

    /// Reference-currency value of `amount` at the current price, with
    /// `conversion::REFERENCE_DECIMALS` decimals.
    pub fn contribution_value(env: Env, amount: i128) -> Result<i128, Error> {
        let config = Storage::get_ledger_config(&env);
        let price = get_current_price(&env, &config)?;

        conversion::to_reference_value(amount, get_token(&env, &config).decimals(), &price)
            .ok_or(Error::ConversionOverflow)
    }
}

impl ContributionLedger {
    fn withdraw_with(env: &Env, caller: Address, access: ContributorAccess) -> Result<i128, Error> {
        caller.require_auth();
        let owner = get_owner(env);
        validation::validate_owner(&caller, &owner)?;

        let config = Storage::get_ledger_config(env);
        let tk = get_token(env, &config);

        // Bookkeeping is reset before any value leaves the ledger.
        let settlement = withdrawal::reset_ledger(env, access);

        if settlement.amount > 0 {
            let ledger = env.current_contract_address();
            validation::validate_withdrawal(&tk, &ledger, settlement.amount)?;
            tk.try_transfer(&ledger, &owner, &settlement.amount)
                .map_err(|_| Error::TransferFailed)?
                .map_err(|_| Error::InvalidTransferData)?;
        }

        log!(env, "ledger withdrawn", settlement.amount, settlement.contributors);
        FundsWithdrawn {
            owner,
            amount: settlement.amount,
            contributors: settlement.contributors,
        }
        .publish(env);

        Ok(settlement.amount)
    }
}

#[contractimpl]
impl Pausable for ContributionLedger {
    #[only_owner]
    fn paused(e: &Env) -> bool {
        pausable::paused(e)
    }

    #[only_owner]
    fn pause(e: &Env, _caller: Address) {
        pausable::pause(e);
    }

    #[only_owner]
    fn unpause(e: &Env, _caller: Address) {
        pausable::unpause(e);
    }
}
