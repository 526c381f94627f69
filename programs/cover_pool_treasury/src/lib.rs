// programs/cover_pool_treasury/src/lib.rs
//
// Cover Pool Treasury Program
// ===========================
// Custodian of the shared capital pool and sole judge of solvency:
// - Open deposits, authority withdrawals above the reserve
// - Configurable reserve ratio (basis points of total funds)
// - Premium inflows accepted only from the policy manager authority
// - Claim payouts accepted only from the claims processor authority
// - Read-only pool figures for clients and peers

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::PoolStatus;

declare_id!("Crad7VdoxA6foCEetbmRB8TkhumLyfwhXRY3iToAzn8a");

#[program]
pub mod cover_pool_treasury {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Create the pool, its vault and the peer wiring
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        params: InitializePoolParams,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Set the reserve ratio (0..=10000 bps)
    pub fn update_reserve_ratio(ctx: Context<UpdateReserveRatio>, new_ratio_bps: u32) -> Result<()> {
        instructions::initialize::update_reserve_ratio(ctx, new_ratio_bps)
    }

    // ==================== CAPITAL ====================

    /// Deposit capital into the pool
    pub fn deposit_funds(ctx: Context<DepositFunds>, amount: u64) -> Result<()> {
        instructions::funds::deposit_funds(ctx, amount)
    }

    /// Withdraw capital, never touching the reserve
    pub fn withdraw_funds(ctx: Context<WithdrawFunds>, amount: u64) -> Result<()> {
        instructions::funds::withdraw_funds(ctx, amount)
    }

    // ==================== PEER FLOWS ====================

    /// Accept a premium (called by the policy manager)
    pub fn process_premium(ctx: Context<ProcessPremium>, amount: u64) -> Result<()> {
        instructions::flows::process_premium(ctx, amount)
    }

    /// Pay out an approved claim (called by the claims processor)
    pub fn process_claim_payout(ctx: Context<ProcessClaimPayout>, amount: u64) -> Result<()> {
        instructions::flows::process_claim_payout(ctx, amount)
    }

    // ==================== VIEWS ====================

    pub fn get_total_pool_funds(ctx: Context<GetPoolFigures>) -> Result<u64> {
        instructions::views::get_total_pool_funds(ctx)
    }

    pub fn get_reserve_amount(ctx: Context<GetPoolFigures>) -> Result<u64> {
        instructions::views::get_reserve_amount(ctx)
    }

    pub fn get_withdrawable_funds(ctx: Context<GetPoolFigures>) -> Result<u64> {
        instructions::views::get_withdrawable_funds(ctx)
    }

    /// All pool figures in one call
    pub fn get_pool_status(ctx: Context<GetPoolFigures>) -> Result<PoolStatus> {
        instructions::views::get_pool_status(ctx)
    }
}
