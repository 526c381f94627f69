// programs/cover_risk_registry/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum RiskRegistryError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Invalid parameter: risk type must be 1-32 bytes")]
    InvalidParameter,

    #[msg("Math overflow in calculation")]
    MathOverflow,
}
