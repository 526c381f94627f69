// programs/cover_policy_manager/src/lib.rs
//
// Cover Policy Manager Program
// ============================
// Issues and tracks coverage policies:
// - Prices each policy through the risk registry at creation
// - Forwards the premium to the pool treasury under its own authority PDA
// - Tracks policy status (Active -> Claimed / Expired)
// - Accepts claim settlement only from the claims processor authority
//
// Policy creation is all-or-nothing: if pricing or premium collection fails
// no policy account survives the transaction.

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::Policy;

declare_id!("CARcqEDRwgeGduNNWPvxAxiMz9KSQ26QKkCSmDex9DWa");

#[program]
pub mod cover_policy_manager {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the policy manager and wire the claims processor
    pub fn initialize_policy_manager(
        ctx: Context<InitializePolicyManager>,
        params: InitializePolicyManagerParams,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    // ==================== ISSUANCE ====================

    /// Buy coverage. Returns the new policy id.
    pub fn create_policy(
        ctx: Context<CreatePolicy>,
        risk_id: u64,
        coverage_amount: u64,
        duration: u64,
    ) -> Result<u64> {
        instructions::issuance::create_policy(ctx, risk_id, coverage_amount, duration)
    }

    // ==================== LIFECYCLE ====================

    /// Read a policy with its status as of the current height
    pub fn get_policy(ctx: Context<GetPolicy>, _policy_id: u64) -> Result<Policy> {
        instructions::lifecycle::get_policy(ctx)
    }

    /// Mark a policy claimed (called by the claims processor)
    pub fn mark_policy_claimed(ctx: Context<MarkPolicyClaimed>, _policy_id: u64) -> Result<()> {
        instructions::lifecycle::mark_policy_claimed(ctx)
    }

    /// Persist expiry once the window has closed (permissionless)
    pub fn expire_policy(ctx: Context<ExpirePolicy>, _policy_id: u64) -> Result<()> {
        instructions::lifecycle::expire_policy(ctx)
    }
}
