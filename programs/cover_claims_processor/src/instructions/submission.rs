// programs/cover_claims_processor/src/instructions/submission.rs

use anchor_lang::prelude::*;
use cover_core::current_height;
use cover_policy_manager::state::Policy;
use crate::state::{ClaimsConfig, Claim, ClaimStatus};
use crate::events::ClaimFiled;

/// File a claim against one of the caller's policies
#[derive(Accounts)]
#[instruction(policy_id: u64)]
pub struct FileClaim<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        seeds = [Policy::SEED_PREFIX, &policy_id.to_le_bytes()],
        bump = policy.bump,
        seeds::program = cover_policy_manager::ID,
    )]
    pub policy: Account<'info, Policy>,

    #[account(
        init,
        payer = claimant,
        space = 8 + Claim::INIT_SPACE,
        seeds = [Claim::SEED_PREFIX, claims_config.next_claim_id.to_le_bytes().as_ref()],
        bump
    )]
    pub claim: Account<'info, Claim>,

    #[account(mut)]
    pub claimant: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn file_claim(ctx: Context<FileClaim>, policy_id: u64, amount: u64) -> Result<u64> {
    let height = current_height()?;
    let claimant = ctx.accounts.claimant.key();

    let config = &mut ctx.accounts.claims_config;
    config.validate_filing(&ctx.accounts.policy, &claimant, amount, height)?;
    let claim_id = config.allocate_claim_id()?;

    let claim = &mut ctx.accounts.claim;
    claim.id = claim_id;
    claim.policy_id = policy_id;
    claim.claimant = claimant;
    claim.amount = amount;
    claim.status = ClaimStatus::Pending;
    claim.filed_at_height = height;
    claim.resolved_at_height = 0;
    claim.bump = ctx.bumps.claim;

    emit!(ClaimFiled {
        claim_id,
        policy_id,
        claimant,
        amount,
        height,
    });

    Ok(claim_id)
}

/// Read a claim
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct GetClaim<'info> {
    #[account(
        seeds = [Claim::SEED_PREFIX, &claim_id.to_le_bytes()],
        bump = claim.bump,
    )]
    pub claim: Account<'info, Claim>,
}

pub fn get_claim(ctx: Context<GetClaim>) -> Result<Claim> {
    Ok((*ctx.accounts.claim).clone())
}
