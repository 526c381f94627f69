// programs/cover_policy_manager/src/events.rs

use anchor_lang::prelude::*;

#[event]
pub struct PolicyManagerInitialized {
    pub authority: Pubkey,
    pub claims_processor_authority: Pubkey,
    pub height: u64,
}

#[event]
pub struct PolicyCreated {
    pub policy_id: u64,
    pub policyholder: Pubkey,
    pub risk_id: u64,
    pub coverage_amount: u64,
    pub premium: u64,
    pub start_height: u64,
    pub end_height: u64,
}

#[event]
pub struct PolicyClaimed {
    pub policy_id: u64,
    pub policyholder: Pubkey,
    pub height: u64,
}

#[event]
pub struct PolicyExpired {
    pub policy_id: u64,
    pub end_height: u64,
    pub height: u64,
}
