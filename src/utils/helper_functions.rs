use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::error::{LaunchError, Result};

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64) as u64
}

/// Converts whole tokens into the mint's base units.
pub fn to_base_units(amount: u64, decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| amount.checked_mul(scale))
        .ok_or(LaunchError::Overflow { amount, decimals })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sol_conversions() {
        assert_eq!(sol_to_lamports(1.0), 1_000_000_000);
        assert_eq!(sol_to_lamports(0.5), 500_000_000);
        assert_eq!(lamports_to_sol(2_500_000_000), 2.5);
    }

    #[test]
    fn base_units_scale_by_decimals() {
        assert_eq!(to_base_units(1_000, 2).unwrap(), 100_000);
        assert_eq!(to_base_units(7, 0).unwrap(), 7);
        assert_eq!(to_base_units(0, 9).unwrap(), 0);
    }

    #[test]
    fn base_units_overflow_is_an_error() {
        assert!(matches!(
            to_base_units(u64::MAX, 2),
            Err(LaunchError::Overflow { amount: u64::MAX, decimals: 2 })
        ));
        assert!(to_base_units(1, 20).is_err());
    }
}
