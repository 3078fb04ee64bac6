//! Integer amount scaling and display formatting.
//!
//! Scaling between human decimal amounts and base units is done entirely
//! with 256-bit integer arithmetic; floating point never touches amounts.

use alloy_primitives::U256;

use crate::tokens::AmountError;

/// Scales a decimal string like "1.5" to base units for a token with the
/// given number of decimals.
///
/// Rejects amounts with more fractional digits than the token can
/// represent rather than rounding, since silent truncation would change
/// the amount being authorized.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
	let (int_part, frac_part) = match amount.split_once('.') {
		Some((i, f)) => (i, f),
		None => (amount, ""),
	};

	if int_part.is_empty() && frac_part.is_empty() {
		return Err(AmountError::InvalidAmount(amount.to_string()));
	}
	if !int_part.bytes().all(|b| b.is_ascii_digit())
		|| !frac_part.bytes().all(|b| b.is_ascii_digit())
	{
		return Err(AmountError::InvalidAmount(amount.to_string()));
	}
	if frac_part.len() > decimals as usize {
		return Err(AmountError::PrecisionLoss(decimals));
	}

	let scale = U256::from(10u64)
		.checked_pow(U256::from(decimals))
		.ok_or(AmountError::Overflow)?;
	let int_value = parse_digits(int_part)?;
	let frac_scale = U256::from(10u64)
		.checked_pow(U256::from(decimals as usize - frac_part.len()))
		.ok_or(AmountError::Overflow)?;
	let frac_value = parse_digits(frac_part)?
		.checked_mul(frac_scale)
		.ok_or(AmountError::Overflow)?;

	int_value
		.checked_mul(scale)
		.and_then(|v| v.checked_add(frac_value))
		.ok_or(AmountError::Overflow)
}

/// Formats a base-unit amount back to a decimal string for display.
///
/// Trailing fractional zeros are trimmed; whole amounts render without a
/// decimal point.
pub fn format_units(amount: U256, decimals: u8) -> String {
	let scale = U256::from(10u64).pow(U256::from(decimals));
	let whole = amount / scale;
	let frac = amount % scale;
	if frac.is_zero() {
		return whole.to_string();
	}
	let frac_str = format!("{:0>width$}", frac, width = decimals as usize);
	format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

fn parse_digits(digits: &str) -> Result<U256, AmountError> {
	if digits.is_empty() {
		return Ok(U256::ZERO);
	}
	U256::from_str_radix(digits, 10).map_err(|_| AmountError::InvalidAmount(digits.to_string()))
}
