//! Decimal amount scaling.
//!
//! Converts between user-entered decimal strings and base-unit integers using
//! a mint's decimal count. Scaling is exact integer arithmetic; an amount with
//! more fractional digits than the mint supports is rejected rather than
//! rounded.

use crate::error::MintError;

/// Largest decimal count a mint may declare.
pub const MAX_DECIMALS: u8 = 9;

fn check_decimals(decimals: u8) -> Result<u128, MintError> {
    if decimals > MAX_DECIMALS {
        return Err(MintError::InvalidDecimals(decimals));
    }
    Ok(10u128.pow(decimals as u32))
}

fn invalid(input: &str, reason: &str) -> MintError {
    MintError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Convert a decimal string such as `"1.5"` into base units.
///
/// Accepts an optional integer part, an optional `.` and fractional part.
/// Trailing zeros in the fraction do not count against `decimals`.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<u128, MintError> {
    let scale = check_decimals(decimals)?;
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(invalid(amount, "empty amount"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid(amount, "no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid(amount, "only digits and one decimal point are allowed"));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(MintError::PrecisionLoss {
            amount: trimmed.to_string(),
            decimals,
        });
    }

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| invalid(amount, "integer part is too large"))?
    };

    let fraction_value = if fraction.is_empty() {
        0
    } else {
        // fraction.len() <= 9, always fits
        let digits = fraction
            .parse::<u128>()
            .map_err(|_| invalid(amount, "bad fractional part"))?;
        digits * 10u128.pow((decimals as usize - fraction.len()) as u32)
    };

    whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| invalid(amount, "amount overflows 128 bits"))
}

/// Like [`to_base_units`], but the result must fit the u64 the token program takes.
pub fn to_base_units_u64(amount: &str, decimals: u8) -> Result<u64, MintError> {
    let units = to_base_units(amount, decimals)?;
    u64::try_from(units).map_err(|_| invalid(amount, "amount exceeds u64 base units"))
}

/// Render base units as a decimal string with no trailing zeros.
pub fn to_display(base_units: u128, decimals: u8) -> Result<String, MintError> {
    let scale = check_decimals(decimals)?;
    let whole = base_units / scale;
    let fraction = base_units % scale;
    if fraction == 0 {
        return Ok(whole.to_string());
    }
    let padded = format!("{:0width$}", fraction, width = decimals as usize);
    Ok(format!("{}.{}", whole, padded.trim_end_matches('0')))
}
