// programs/cover_pool_treasury/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use cover_core::{bps, current_height, peers};
use crate::state::{PoolConfig, PoolState};
use crate::errors::PoolTreasuryError;
use crate::events::{PoolInitialized, ReserveRatioUpdated};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + PoolConfig::INIT_SPACE,
        seeds = [PoolConfig::SEED_PREFIX],
        bump
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    #[account(
        init,
        payer = authority,
        space = 8 + PoolState::INIT_SPACE,
        seeds = [PoolState::SEED_PREFIX],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// Pool vault, owned by the config PDA
    #[account(
        init,
        payer = authority,
        token::mint = token_mint,
        token::authority = pool_config,
        seeds = [PoolConfig::VAULT_SEED],
        bump
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    pub token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializePoolParams {
    pub policy_manager_program: Pubkey,
    pub claims_processor_program: Pubkey,
    pub reserve_ratio_bps: Option<u32>,
}

pub fn handler(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
    let height = current_height()?;

    let reserve_ratio = params
        .reserve_ratio_bps
        .map_or(Some(PoolState::DEFAULT_RESERVE_RATIO_BPS), bps::checked_ratio)
        .ok_or(PoolTreasuryError::InvalidParameter)?;

    let (policy_manager_authority, _) =
        peers::policy_manager_authority(&params.policy_manager_program);
    let (claims_processor_authority, _) =
        peers::claims_processor_authority(&params.claims_processor_program);

    let config = &mut ctx.accounts.pool_config;
    config.authority = ctx.accounts.authority.key();
    config.token_mint = ctx.accounts.token_mint.key();
    config.pool_vault = ctx.accounts.pool_vault.key();
    config.policy_manager_program = params.policy_manager_program;
    config.claims_processor_program = params.claims_processor_program;
    config.policy_manager_authority = policy_manager_authority;
    config.claims_processor_authority = claims_processor_authority;
    config.bump = ctx.bumps.pool_config;
    config.vault_bump = ctx.bumps.pool_vault;

    let state = &mut ctx.accounts.pool_state;
    state.total_funds = 0;
    state.reserve_ratio_bps = reserve_ratio;
    state.total_deposited = 0;
    state.total_premiums = 0;
    state.total_paid_out = 0;
    state.total_withdrawn = 0;
    state.last_updated_height = height;
    state.bump = ctx.bumps.pool_state;

    emit!(PoolInitialized {
        authority: config.authority,
        token_mint: config.token_mint,
        pool_vault: config.pool_vault,
        policy_manager_authority,
        claims_processor_authority,
        reserve_ratio_bps: reserve_ratio,
        height,
    });

    Ok(())
}

/// Change the reserve ratio (authority only)
#[derive(Accounts)]
pub struct UpdateReserveRatio<'info> {
    #[account(
        seeds = [PoolConfig::SEED_PREFIX],
        bump = pool_config.bump,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        constraint = pool_config.is_authority(&authority.key()) @ PoolTreasuryError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn update_reserve_ratio(ctx: Context<UpdateReserveRatio>, new_ratio_bps: u32) -> Result<()> {
    let height = current_height()?;
    let state = &mut ctx.accounts.pool_state;

    let old_ratio_bps = state.set_reserve_ratio(new_ratio_bps, height)?;

    emit!(ReserveRatioUpdated {
        old_ratio_bps,
        new_ratio_bps: state.reserve_ratio_bps,
        height,
    });

    Ok(())
}
