// programs/cover_claims_processor/src/lib.rs
//
// Cover Claims Processor Program
// ==============================
// Intake and adjudication of claims against active policies:
// - Claims filed only by the policyholder of an active policy
// - Optional cap of claim amount at the policy's coverage (on by default)
// - Authority approval settles the policy and pays out from the pool in one
//   transaction; rejection touches only the claim
// - Each claim is processed at most once

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::Claim;

declare_id!("aNoLfcycyMgcERP83bokwtGP9mp9MR3PGqpwRNkZySo");

#[program]
pub mod cover_claims_processor {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the claims processor; the caller adjudicates claims
    pub fn initialize_claims_processor(
        ctx: Context<InitializeClaimsProcessor>,
        params: InitializeClaimsProcessorParams,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Enable or disable the claim-amount cap
    pub fn set_coverage_cap(ctx: Context<SetCoverageCap>, enabled: bool) -> Result<()> {
        instructions::initialize::set_coverage_cap(ctx, enabled)
    }

    // ==================== SUBMISSION ====================

    /// File a claim. Returns the new claim id.
    pub fn file_claim(ctx: Context<FileClaim>, policy_id: u64, amount: u64) -> Result<u64> {
        instructions::submission::file_claim(ctx, policy_id, amount)
    }

    /// Read a claim
    pub fn get_claim(ctx: Context<GetClaim>, _claim_id: u64) -> Result<Claim> {
        instructions::submission::get_claim(ctx)
    }

    // ==================== RESOLUTION ====================

    /// Approve or reject a pending claim
    pub fn process_claim(ctx: Context<ProcessClaim>, _claim_id: u64, approve: bool) -> Result<()> {
        instructions::resolution::process_claim(ctx, approve)
    }

    /// Reject a pending claim without touching the policy or the pool
    pub fn reject_claim(ctx: Context<RejectClaim>, _claim_id: u64) -> Result<()> {
        instructions::resolution::reject_claim(ctx)
    }
}
