// programs/cover_pool_treasury/src/events.rs

use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub pool_vault: Pubkey,
    pub policy_manager_authority: Pubkey,
    pub claims_processor_authority: Pubkey,
    pub reserve_ratio_bps: u16,
    pub height: u64,
}

#[event]
pub struct FundsDeposited {
    pub depositor: Pubkey,
    pub amount: u64,
    pub total_funds: u64,
    pub height: u64,
}

#[event]
pub struct FundsWithdrawn {
    pub destination: Pubkey,
    pub amount: u64,
    pub total_funds: u64,
    pub height: u64,
}

#[event]
pub struct ReserveRatioUpdated {
    pub old_ratio_bps: u16,
    pub new_ratio_bps: u16,
    pub height: u64,
}

/// Premium received from the policy manager
#[event]
pub struct PremiumReceived {
    pub payer: Pubkey,
    pub amount: u64,
    pub total_funds: u64,
    pub height: u64,
}

/// Claim payout sent on behalf of the claims processor
#[event]
pub struct ClaimPayoutSent {
    pub recipient: Pubkey,
    pub amount: u64,
    pub total_funds: u64,
    pub withdrawable_after: u64,
    pub height: u64,
}
