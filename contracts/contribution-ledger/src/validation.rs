use crate::conversion;
use crate::price_feed::PriceData;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contracterror, Address};

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
#[contracterror]
pub enum Error {
    InsufficientContribution = 1,
    NotOwner = 2,
    TransferFailed = 3,
    IndexOutOfRange = 4,
    AmountMustBeGreaterThanZero = 5,
    AddressInsufficientBalance = 6,
    PriceUnavailable = 7,
    InvalidPrice = 8,
    ConversionOverflow = 9,
    MinimumContributionMustBeGreaterThanZero = 10,
    InvalidTransferData = 11,
}

/// Macro for validation checks with early return on error
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($($cond:expr, $err:expr),+) => {
        $(
            if !$cond {
                return Err($err);
            }
        )+
    };
}

/// Validates constructor parameters for contract initialization
pub fn validate_constructor_params(minimum_contribution: i128) -> Result<(), Error> {
    require!(
        minimum_contribution > 0,
        Error::MinimumContributionMustBeGreaterThanZero
    );
    Ok(())
}

/// Validates a contribution before any value is moved
pub fn validate_contribution(amount: i128, contributor_balance: i128) -> Result<(), Error> {
    require!(
        amount > 0, Error::AmountMustBeGreaterThanZero,
        contributor_balance >= amount, Error::AddressInsufficientBalance
    );
    Ok(())
}

/// Validates the answer reported by the price feed
pub fn validate_price(price: &PriceData) -> Result<(), Error> {
    require!(price.price > 0, Error::InvalidPrice);
    Ok(())
}

/// Validates that `amount` is worth at least `minimum` reference units at `price`
pub fn validate_minimum_contribution(
    amount: i128,
    token_decimals: u32,
    price: &PriceData,
    minimum: i128,
) -> Result<(), Error> {
    let value = conversion::to_reference_value(amount, token_decimals, price)
        .ok_or(Error::ConversionOverflow)?;
    let threshold =
        conversion::minimum_reference_value(minimum).ok_or(Error::ConversionOverflow)?;

    require!(value >= threshold, Error::InsufficientContribution);
    Ok(())
}

/// Validates that the caller is the ledger owner
pub fn validate_owner(caller: &Address, owner: &Address) -> Result<(), Error> {
    require!(caller == owner, Error::NotOwner);
    Ok(())
}

/// Validates that the ledger actually holds what it is about to release
pub fn validate_withdrawal(token: &TokenClient, ledger: &Address, amount: i128) -> Result<(), Error> {
    require!(token.balance(ledger) >= amount, Error::TransferFailed);
    Ok(())
}
