// programs/cover_policy_manager/src/instructions/issuance.rs

use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use cover_core::{current_height, peers};
use cover_pool_treasury::program::CoverPoolTreasury;
use cover_risk_registry::program::CoverRiskRegistry;
use cover_risk_registry::state::RiskProfile;
use crate::state::{ManagerConfig, Policy};
use crate::events::PolicyCreated;

/// Issue a policy: price it, record it, collect the premium
#[derive(Accounts)]
#[instruction(risk_id: u64)]
pub struct CreatePolicy<'info> {
    #[account(
        mut,
        seeds = [ManagerConfig::SEED_PREFIX],
        bump = manager_config.bump,
    )]
    pub manager_config: Box<Account<'info, ManagerConfig>>,

    #[account(
        init,
        payer = policyholder,
        space = 8 + Policy::INIT_SPACE,
        seeds = [Policy::SEED_PREFIX, manager_config.next_policy_id.to_le_bytes().as_ref()],
        bump
    )]
    pub policy: Box<Account<'info, Policy>>,

    /// Must exist in the registry
    #[account(
        seeds = [RiskProfile::SEED_PREFIX, &risk_id.to_le_bytes()],
        bump = risk_profile.bump,
        seeds::program = cover_risk_registry::ID,
    )]
    pub risk_profile: Box<Account<'info, RiskProfile>>,

    /// CHECK: signing PDA only, verified by seeds
    #[account(
        seeds = [peers::POLICY_MANAGER_AUTHORITY_SEED],
        bump = manager_config.authority_bump,
    )]
    pub manager_authority: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    pub pool_config: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    #[account(mut)]
    pub pool_state: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    #[account(mut)]
    pub pool_vault: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    #[account(mut)]
    pub policyholder_token_account: UncheckedAccount<'info>,

    #[account(mut)]
    pub policyholder: Signer<'info>,

    pub risk_registry_program: Program<'info, CoverRiskRegistry>,
    pub pool_treasury_program: Program<'info, CoverPoolTreasury>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn create_policy(
    ctx: Context<CreatePolicy>,
    risk_id: u64,
    coverage_amount: u64,
    duration: u64,
) -> Result<u64> {
    let height = current_height()?;
    Policy::validate_terms(coverage_amount, duration)?;

    // 1. Price against the registry
    let cpi_program = ctx.accounts.risk_registry_program.to_account_info();
    let cpi_accounts = cover_risk_registry::cpi::accounts::CalculatePremium {
        risk_profile: ctx.accounts.risk_profile.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    let premium =
        cover_risk_registry::cpi::calculate_premium(cpi_ctx, risk_id, coverage_amount)?.get();

    // 2. Record the policy
    let config = &mut ctx.accounts.manager_config;
    let policy = &mut ctx.accounts.policy;
    let policy_id = config.issue(
        policy,
        ctx.accounts.policyholder.key(),
        risk_id,
        coverage_amount,
        premium,
        height,
        duration,
        ctx.bumps.policy,
    )?;

    // 3. Collect the premium, signed by the manager authority
    let seeds = &[
        peers::POLICY_MANAGER_AUTHORITY_SEED,
        &[ctx.accounts.manager_config.authority_bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_program = ctx.accounts.pool_treasury_program.to_account_info();
    let cpi_accounts = cover_pool_treasury::cpi::accounts::ProcessPremium {
        pool_config: ctx.accounts.pool_config.to_account_info(),
        pool_state: ctx.accounts.pool_state.to_account_info(),
        pool_vault: ctx.accounts.pool_vault.to_account_info(),
        payer_token_account: ctx.accounts.policyholder_token_account.to_account_info(),
        payer: ctx.accounts.policyholder.to_account_info(),
        caller: ctx.accounts.manager_authority.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    cover_pool_treasury::cpi::process_premium(cpi_ctx, premium)?;

    let policy = &ctx.accounts.policy;
    emit!(PolicyCreated {
        policy_id,
        policyholder: policy.policyholder,
        risk_id,
        coverage_amount,
        premium,
        start_height: policy.start_height,
        end_height: policy.end_height,
    });

    Ok(policy_id)
}
