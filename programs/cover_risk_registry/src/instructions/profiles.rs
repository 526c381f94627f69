// programs/cover_risk_registry/src/instructions/profiles.rs

use anchor_lang::prelude::*;
use cover_core::current_height;
use crate::state::{RegistryConfig, RiskProfile};
use crate::errors::RiskRegistryError;
use crate::events::{RiskProfileAdded, RiskProfileUpdated};

/// Add a new risk profile
#[derive(Accounts)]
pub struct AddRiskProfile<'info> {
    #[account(
        mut,
        seeds = [RegistryConfig::SEED_PREFIX],
        bump = registry_config.bump,
    )]
    pub registry_config: Account<'info, RegistryConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + RiskProfile::INIT_SPACE,
        seeds = [RiskProfile::SEED_PREFIX, registry_config.next_profile_id.to_le_bytes().as_ref()],
        bump
    )]
    pub risk_profile: Account<'info, RiskProfile>,

    #[account(
        mut,
        constraint = registry_config.is_authority(&authority.key()) @ RiskRegistryError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_risk_profile(
    ctx: Context<AddRiskProfile>,
    risk_type: String,
    base_premium: u64,
    risk_factor_bps: u64,
) -> Result<u64> {
    let height = current_height()?;
    RiskProfile::validate_risk_type(&risk_type)?;

    let risk_id = ctx.accounts.registry_config.allocate_profile_id()?;

    let profile = &mut ctx.accounts.risk_profile;
    profile.id = risk_id;
    profile.risk_type = risk_type;
    profile.base_premium = base_premium;
    profile.risk_factor_bps = risk_factor_bps;
    profile.created_at_height = height;
    profile.updated_at_height = height;
    profile.bump = ctx.bumps.risk_profile;

    emit!(RiskProfileAdded {
        risk_id,
        risk_type: profile.risk_type.clone(),
        base_premium,
        risk_factor_bps,
        height,
    });

    Ok(risk_id)
}

/// Read a risk profile
#[derive(Accounts)]
#[instruction(risk_id: u64)]
pub struct GetRiskProfile<'info> {
    #[account(
        seeds = [RiskProfile::SEED_PREFIX, &risk_id.to_le_bytes()],
        bump = risk_profile.bump,
    )]
    pub risk_profile: Account<'info, RiskProfile>,
}

pub fn get_risk_profile(ctx: Context<GetRiskProfile>) -> Result<RiskProfile> {
    Ok((*ctx.accounts.risk_profile).clone())
}

/// Reprice an existing risk profile
#[derive(Accounts)]
#[instruction(risk_id: u64)]
pub struct UpdateRiskProfile<'info> {
    #[account(
        seeds = [RegistryConfig::SEED_PREFIX],
        bump = registry_config.bump,
    )]
    pub registry_config: Account<'info, RegistryConfig>,

    #[account(
        mut,
        seeds = [RiskProfile::SEED_PREFIX, &risk_id.to_le_bytes()],
        bump = risk_profile.bump,
    )]
    pub risk_profile: Account<'info, RiskProfile>,

    #[account(
        constraint = registry_config.is_authority(&authority.key()) @ RiskRegistryError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn update_risk_profile(
    ctx: Context<UpdateRiskProfile>,
    base_premium: u64,
    risk_factor_bps: u64,
) -> Result<()> {
    let height = current_height()?;
    let profile = &mut ctx.accounts.risk_profile;

    let old_base_premium = profile.base_premium;
    let old_risk_factor_bps = profile.risk_factor_bps;
    profile.reprice(base_premium, risk_factor_bps, height);

    emit!(RiskProfileUpdated {
        risk_id: profile.id,
        old_base_premium,
        new_base_premium: base_premium,
        old_risk_factor_bps,
        new_risk_factor_bps: risk_factor_bps,
        updater: ctx.accounts.authority.key(),
        height,
    });

    Ok(())
}
