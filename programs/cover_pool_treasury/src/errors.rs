// programs/cover_pool_treasury/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum PoolTreasuryError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Invalid parameter: amount must be positive and ratios at most 10000 bps")]
    InvalidParameter,

    #[msg("Insufficient funds: amount exceeds withdrawable pool funds")]
    InsufficientFunds,

    #[msg("Math overflow in calculation")]
    MathOverflow,

    #[msg("Token account mint does not match the pool mint")]
    InvalidMint,

    #[msg("Vault account does not match the pool vault")]
    InvalidVault,
}
