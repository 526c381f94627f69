// programs/cover_risk_registry/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use cover_core::current_height;
use crate::state::RegistryConfig;
use crate::errors::RiskRegistryError;
use crate::events::{RegistryInitialized, RegistryAuthorityTransferred};

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + RegistryConfig::INIT_SPACE,
        seeds = [RegistryConfig::SEED_PREFIX],
        bump
    )]
    pub registry_config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeRegistry>) -> Result<()> {
    let height = current_height()?;

    let config = &mut ctx.accounts.registry_config;
    config.authority = ctx.accounts.authority.key();
    config.next_profile_id = RegistryConfig::FIRST_PROFILE_ID;
    config.bump = ctx.bumps.registry_config;

    emit!(RegistryInitialized {
        authority: config.authority,
        height,
    });

    Ok(())
}

/// Hand registry administration to a new authority
#[derive(Accounts)]
pub struct TransferRegistryAuthority<'info> {
    #[account(
        mut,
        seeds = [RegistryConfig::SEED_PREFIX],
        bump = registry_config.bump,
    )]
    pub registry_config: Account<'info, RegistryConfig>,

    #[account(
        constraint = registry_config.is_authority(&authority.key()) @ RiskRegistryError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn transfer_registry_authority(
    ctx: Context<TransferRegistryAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let height = current_height()?;
    let config = &mut ctx.accounts.registry_config;

    let old_authority = config.authority;
    config.authority = new_authority;

    emit!(RegistryAuthorityTransferred {
        old_authority,
        new_authority,
        height,
    });

    Ok(())
}
