// programs/cover_policy_manager/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use cover_core::{current_height, peers};
use crate::state::ManagerConfig;
use crate::events::PolicyManagerInitialized;

#[derive(Accounts)]
pub struct InitializePolicyManager<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + ManagerConfig::INIT_SPACE,
        seeds = [ManagerConfig::SEED_PREFIX],
        bump
    )]
    pub manager_config: Account<'info, ManagerConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializePolicyManagerParams {
    pub claims_processor_program: Pubkey,
}

pub fn handler(
    ctx: Context<InitializePolicyManager>,
    params: InitializePolicyManagerParams,
) -> Result<()> {
    let height = current_height()?;

    let (claims_processor_authority, _) =
        peers::claims_processor_authority(&params.claims_processor_program);
    let (_, authority_bump) = peers::policy_manager_authority(ctx.program_id);

    let config = &mut ctx.accounts.manager_config;
    config.claims_processor_program = params.claims_processor_program;
    config.claims_processor_authority = claims_processor_authority;
    config.next_policy_id = ManagerConfig::FIRST_POLICY_ID;
    config.total_premiums_collected = 0;
    config.total_policies_claimed = 0;
    config.total_policies_expired = 0;
    config.bump = ctx.bumps.manager_config;
    config.authority_bump = authority_bump;

    emit!(PolicyManagerInitialized {
        authority: ctx.accounts.authority.key(),
        claims_processor_authority,
        height,
    });

    Ok(())
}
