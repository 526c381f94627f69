// programs/cover_claims_processor/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use cover_core::{current_height, peers};
use crate::state::ClaimsConfig;
use crate::errors::ClaimsError;
use crate::events::{ClaimsProcessorInitialized, CoverageCapToggled};

#[derive(Accounts)]
pub struct InitializeClaimsProcessor<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + ClaimsConfig::INIT_SPACE,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeClaimsProcessorParams {
    pub cap_claims_at_coverage: Option<bool>,
}

pub fn handler(
    ctx: Context<InitializeClaimsProcessor>,
    params: InitializeClaimsProcessorParams,
) -> Result<()> {
    let height = current_height()?;
    let (_, authority_bump) = peers::claims_processor_authority(ctx.program_id);

    let config = &mut ctx.accounts.claims_config;
    config.authority = ctx.accounts.authority.key();
    config.next_claim_id = ClaimsConfig::FIRST_CLAIM_ID;
    config.cap_claims_at_coverage = params
        .cap_claims_at_coverage
        .unwrap_or(ClaimsConfig::DEFAULT_CAP_CLAIMS_AT_COVERAGE);
    config.total_claims_approved = 0;
    config.total_claims_rejected = 0;
    config.total_paid_out = 0;
    config.bump = ctx.bumps.claims_config;
    config.authority_bump = authority_bump;

    emit!(ClaimsProcessorInitialized {
        authority: config.authority,
        cap_claims_at_coverage: config.cap_claims_at_coverage,
        height,
    });

    Ok(())
}

/// Toggle the claim-amount cap
#[derive(Accounts)]
pub struct SetCoverageCap<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        constraint = claims_config.is_authority(&authority.key()) @ ClaimsError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn set_coverage_cap(ctx: Context<SetCoverageCap>, enabled: bool) -> Result<()> {
    let height = current_height()?;
    ctx.accounts.claims_config.cap_claims_at_coverage = enabled;

    emit!(CoverageCapToggled { enabled, height });

    Ok(())
}
