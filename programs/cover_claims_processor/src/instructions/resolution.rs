// programs/cover_claims_processor/src/instructions/resolution.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use cover_core::{current_height, peers};
use cover_policy_manager::program::CoverPolicyManager;
use cover_policy_manager::state::Policy;
use cover_pool_treasury::program::CoverPoolTreasury;
use crate::state::{ClaimsConfig, Claim};
use crate::errors::ClaimsError;
use crate::events::{ClaimApproved, ClaimRejected};

/// Approve or reject a pending claim (authority only)
///
/// Approval settles the policy and pays the claimant in the same transaction;
/// a failed payout reverts both status changes. `reject_claim` rejects with a
/// smaller account set.
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct ProcessClaim<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
    )]
    pub claims_config: Box<Account<'info, ClaimsConfig>>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim_id.to_le_bytes()],
        bump = claim.bump,
    )]
    pub claim: Box<Account<'info, Claim>>,

    /// Policy the claim was filed against; updated by the policy manager
    #[account(
        mut,
        seeds = [Policy::SEED_PREFIX, &claim.policy_id.to_le_bytes()],
        bump = policy.bump,
        seeds::program = cover_policy_manager::ID,
    )]
    pub policy: Box<Account<'info, Policy>>,

    /// CHECK: validated by the policy manager
    #[account(mut)]
    pub manager_config: UncheckedAccount<'info>,

    /// CHECK: signing PDA only, verified by seeds
    #[account(
        seeds = [peers::CLAIMS_PROCESSOR_AUTHORITY_SEED],
        bump = claims_config.authority_bump,
    )]
    pub claims_authority: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    pub pool_config: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    #[account(mut)]
    pub pool_state: UncheckedAccount<'info>,

    /// CHECK: validated by the pool treasury
    #[account(mut)]
    pub pool_vault: UncheckedAccount<'info>,

    /// Claimant's token account
    #[account(
        mut,
        constraint = recipient.owner == claim.claimant @ ClaimsError::InvalidRecipient
    )]
    pub recipient: Box<Account<'info, TokenAccount>>,

    #[account(
        constraint = claims_config.is_authority(&authority.key()) @ ClaimsError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub policy_manager_program: Program<'info, CoverPolicyManager>,
    pub pool_treasury_program: Program<'info, CoverPoolTreasury>,
    pub token_program: Program<'info, Token>,
}

pub fn process_claim(ctx: Context<ProcessClaim>, approve: bool) -> Result<()> {
    let height = current_height()?;

    if !approve {
        let config = &mut ctx.accounts.claims_config;
        let claim = &mut ctx.accounts.claim;
        config.dismiss(claim, height)?;
        return emit_rejected(claim, ctx.accounts.authority.key(), height);
    }

    let settlement = ctx.accounts.claims_config.plan_approval(
        &ctx.accounts.claim,
        &ctx.accounts.policy,
        height,
    )?;

    let seeds = &[
        peers::CLAIMS_PROCESSOR_AUTHORITY_SEED,
        &[ctx.accounts.claims_config.authority_bump],
    ];
    let signer_seeds = &[&seeds[..]];

    // Settle the policy; fails unless it is still active
    let cpi_program = ctx.accounts.policy_manager_program.to_account_info();
    let cpi_accounts = cover_policy_manager::cpi::accounts::MarkPolicyClaimed {
        manager_config: ctx.accounts.manager_config.to_account_info(),
        policy: ctx.accounts.policy.to_account_info(),
        caller: ctx.accounts.claims_authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    cover_policy_manager::cpi::mark_policy_claimed(cpi_ctx, settlement.policy_id)?;

    // Pay out of withdrawable funds
    let cpi_program = ctx.accounts.pool_treasury_program.to_account_info();
    let cpi_accounts = cover_pool_treasury::cpi::accounts::ProcessClaimPayout {
        pool_config: ctx.accounts.pool_config.to_account_info(),
        pool_state: ctx.accounts.pool_state.to_account_info(),
        pool_vault: ctx.accounts.pool_vault.to_account_info(),
        recipient: ctx.accounts.recipient.to_account_info(),
        caller: ctx.accounts.claims_authority.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    cover_pool_treasury::cpi::process_claim_payout(cpi_ctx, settlement.amount)?;

    let config = &mut ctx.accounts.claims_config;
    let claim = &mut ctx.accounts.claim;
    config.settle(claim, &settlement, height)?;

    emit!(ClaimApproved {
        claim_id: settlement.claim_id,
        policy_id: settlement.policy_id,
        claimant: claim.claimant,
        amount: settlement.amount,
        approver: ctx.accounts.authority.key(),
        height,
    });

    Ok(())
}

/// Reject a pending claim (authority only). Needs no policy, pool or token
/// accounts.
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct RejectClaim<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim_id.to_le_bytes()],
        bump = claim.bump,
    )]
    pub claim: Account<'info, Claim>,

    #[account(
        constraint = claims_config.is_authority(&authority.key()) @ ClaimsError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn reject_claim(ctx: Context<RejectClaim>) -> Result<()> {
    let height = current_height()?;
    let config = &mut ctx.accounts.claims_config;
    let claim = &mut ctx.accounts.claim;

    config.dismiss(claim, height)?;

    emit_rejected(claim, ctx.accounts.authority.key(), height)
}

fn emit_rejected(claim: &Claim, rejector: Pubkey, height: u64) -> Result<()> {
    emit!(ClaimRejected {
        claim_id: claim.id,
        policy_id: claim.policy_id,
        claimant: claim.claimant,
        rejector,
        height,
    });
    Ok(())
}
