// programs/cover_pool_treasury/src/instructions/views.rs

use anchor_lang::prelude::*;
use crate::state::{PoolState, PoolStatus};

/// Read-only access to pool figures
#[derive(Accounts)]
pub struct GetPoolFigures<'info> {
    #[account(
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,
}

pub fn get_total_pool_funds(ctx: Context<GetPoolFigures>) -> Result<u64> {
    Ok(ctx.accounts.pool_state.total_funds)
}

pub fn get_reserve_amount(ctx: Context<GetPoolFigures>) -> Result<u64> {
    Ok(ctx.accounts.pool_state.reserve_amount())
}

pub fn get_withdrawable_funds(ctx: Context<GetPoolFigures>) -> Result<u64> {
    Ok(ctx.accounts.pool_state.withdrawable_funds())
}

pub fn get_pool_status(ctx: Context<GetPoolFigures>) -> Result<PoolStatus> {
    Ok(ctx.accounts.pool_state.status())
}
