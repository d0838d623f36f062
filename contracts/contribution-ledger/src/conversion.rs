//! Fixed-point conversion from ledger token amounts to the reference currency.
//!
//! Reference values carry [`REFERENCE_DECIMALS`] decimals. A token amount with
//! `token_decimals` multiplied by a price with `price.decimals` has
//! `token_decimals + price.decimals` decimals and is rescaled from there.

use crate::price_feed::PriceData;

pub const REFERENCE_DECIMALS: u32 = 18;

/// Reference value of `amount` at `price`, or `None` on overflow.
///
/// When the source carries more than [`REFERENCE_DECIMALS`] decimals the
/// amount is split by the downscale factor before multiplying, so only a
/// result that does not fit in an `i128` is reported as overflow.
pub fn to_reference_value(amount: i128, token_decimals: u32, price: &PriceData) -> Option<i128> {
    let source_decimals = token_decimals.checked_add(price.decimals)?;

    if source_decimals <= REFERENCE_DECIMALS {
        amount
            .checked_mul(price.price)?
            .checked_mul(scale_factor(REFERENCE_DECIMALS - source_decimals)?)
    } else {
        let divisor = scale_factor(source_decimals - REFERENCE_DECIMALS)?;
        // amount = whole * divisor + rest, with |rest| < divisor
        let whole = amount.checked_div(divisor)?;
        let rest = amount.checked_rem(divisor)?;
        let fraction = rest.checked_mul(price.price)?.checked_div(divisor)?;
        whole.checked_mul(price.price)?.checked_add(fraction)
    }
}

/// `minimum` whole reference units expressed with [`REFERENCE_DECIMALS`].
pub fn minimum_reference_value(minimum: i128) -> Option<i128> {
    minimum.checked_mul(scale_factor(REFERENCE_DECIMALS)?)
}

fn scale_factor(decimals: u32) -> Option<i128> {
    10_i128.checked_pow(decimals)
}
