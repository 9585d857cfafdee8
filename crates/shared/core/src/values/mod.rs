use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// EVM chain identifier
pub type ChainId = u64;

/// Market (epoch) identifier within a market group contract
pub type MarketId = u64;

/// Decimal places of on-chain fixed-point quantities
pub const D18_DECIMALS: u32 = 18;

/// 1.0 at 18-decimal scale
pub fn wad() -> U256 {
    U256::from(10u64).pow(U256::from(D18_DECIMALS))
}

/// Convert an 18-decimal fixed-point integer into a decimal.
///
/// Exact for any value whose raw integer fits the 96-bit decimal mantissa
/// (roughly 79 billion whole units). Returns `None` beyond that.
pub fn from_d18(raw: U256) -> Option<Decimal> {
    let raw = u128::try_from(raw).ok()?;
    let raw = i128::try_from(raw).ok()?;
    Decimal::try_from_i128_with_scale(raw, D18_DECIMALS)
        .ok()
        .map(|d| d.normalize())
}

/// Convert a non-negative decimal into an 18-decimal fixed-point integer.
///
/// Digits beyond the 18th decimal place are truncated.
pub fn to_d18(value: Decimal) -> Option<U256> {
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }

    let mantissa = U256::from(value.mantissa().unsigned_abs());
    let scale = value.scale();
    let ten = U256::from(10u64);

    if scale <= D18_DECIMALS {
        mantissa.checked_mul(ten.pow(U256::from(D18_DECIMALS - scale)))
    } else {
        Some(mantissa / ten.pow(U256::from(scale - D18_DECIMALS)))
    }
}
