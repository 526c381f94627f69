// programs/cover_policy_manager/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum PolicyManagerError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Invalid state: policy is not active")]
    InvalidState,

    #[msg("Invalid parameter: coverage amount and duration must be positive")]
    InvalidParameter,

    #[msg("Math overflow in calculation")]
    MathOverflow,
}
