// programs/cover_claims_processor/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum ClaimsError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Invalid state: policy not active or claim already processed")]
    InvalidState,

    #[msg("Invalid parameter: claim amount must be positive and within coverage")]
    InvalidParameter,

    #[msg("Math overflow in calculation")]
    MathOverflow,

    #[msg("Payout account is not owned by the claimant")]
    InvalidRecipient,
}
