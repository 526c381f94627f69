// programs/cover_claims_processor/src/events.rs

use anchor_lang::prelude::*;

#[event]
pub struct ClaimsProcessorInitialized {
    pub authority: Pubkey,
    pub cap_claims_at_coverage: bool,
    pub height: u64,
}

#[event]
pub struct ClaimFiled {
    pub claim_id: u64,
    pub policy_id: u64,
    pub claimant: Pubkey,
    pub amount: u64,
    pub height: u64,
}

#[event]
pub struct ClaimApproved {
    pub claim_id: u64,
    pub policy_id: u64,
    pub claimant: Pubkey,
    pub amount: u64,
    pub approver: Pubkey,
    pub height: u64,
}

#[event]
pub struct ClaimRejected {
    pub claim_id: u64,
    pub policy_id: u64,
    pub claimant: Pubkey,
    pub rejector: Pubkey,
    pub height: u64,
}

#[event]
pub struct CoverageCapToggled {
    pub enabled: bool,
    pub height: u64,
}
