// programs/cover_risk_registry/src/events.rs

use anchor_lang::prelude::*;

/// Emitted when the registry is initialized
#[event]
pub struct RegistryInitialized {
    pub authority: Pubkey,
    pub height: u64,
}

/// Emitted when a risk profile is added
#[event]
pub struct RiskProfileAdded {
    pub risk_id: u64,
    pub risk_type: String,
    pub base_premium: u64,
    pub risk_factor_bps: u64,
    pub height: u64,
}

/// Emitted when a risk profile is repriced
#[event]
pub struct RiskProfileUpdated {
    pub risk_id: u64,
    pub old_base_premium: u64,
    pub new_base_premium: u64,
    pub old_risk_factor_bps: u64,
    pub new_risk_factor_bps: u64,
    pub updater: Pubkey,
    pub height: u64,
}

/// Emitted when a premium is quoted
#[event]
pub struct PremiumQuoted {
    pub risk_id: u64,
    pub coverage_amount: u64,
    pub premium: u64,
    pub height: u64,
}

/// Emitted when registry authority changes hands
#[event]
pub struct RegistryAuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub height: u64,
}
