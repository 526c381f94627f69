// programs/cover_policy_manager/src/instructions/lifecycle.rs

use anchor_lang::prelude::*;
use cover_core::current_height;
use crate::state::{ManagerConfig, Policy};
use crate::errors::PolicyManagerError;
use crate::events::{PolicyClaimed, PolicyExpired};

/// Read a policy
#[derive(Accounts)]
#[instruction(policy_id: u64)]
pub struct GetPolicy<'info> {
    #[account(
        seeds = [Policy::SEED_PREFIX, &policy_id.to_le_bytes()],
        bump = policy.bump,
    )]
    pub policy: Account<'info, Policy>,
}

pub fn get_policy(ctx: Context<GetPolicy>) -> Result<Policy> {
    let height = current_height()?;
    Ok(ctx.accounts.policy.view_at(height))
}

/// Flip a policy to Claimed (claims processor only)
#[derive(Accounts)]
#[instruction(policy_id: u64)]
pub struct MarkPolicyClaimed<'info> {
    #[account(
        mut,
        seeds = [ManagerConfig::SEED_PREFIX],
        bump = manager_config.bump,
    )]
    pub manager_config: Account<'info, ManagerConfig>,

    #[account(
        mut,
        seeds = [Policy::SEED_PREFIX, &policy_id.to_le_bytes()],
        bump = policy.bump,
    )]
    pub policy: Account<'info, Policy>,

    /// Claims processor authority PDA
    #[account(
        constraint = manager_config.is_claims_caller(&caller.key()) @ PolicyManagerError::Unauthorized
    )]
    pub caller: Signer<'info>,
}

pub fn mark_policy_claimed(ctx: Context<MarkPolicyClaimed>) -> Result<()> {
    let height = current_height()?;
    let policy = &mut ctx.accounts.policy;

    policy.mark_claimed(height)?;

    let config = &mut ctx.accounts.manager_config;
    config.total_policies_claimed = config.total_policies_claimed.saturating_add(1);

    emit!(PolicyClaimed {
        policy_id: policy.id,
        policyholder: policy.policyholder,
        height,
    });

    Ok(())
}

/// Persist expiry of a policy whose window has closed (permissionless)
#[derive(Accounts)]
#[instruction(policy_id: u64)]
pub struct ExpirePolicy<'info> {
    #[account(
        mut,
        seeds = [ManagerConfig::SEED_PREFIX],
        bump = manager_config.bump,
    )]
    pub manager_config: Account<'info, ManagerConfig>,

    #[account(
        mut,
        seeds = [Policy::SEED_PREFIX, &policy_id.to_le_bytes()],
        bump = policy.bump,
    )]
    pub policy: Account<'info, Policy>,

    pub caller: Signer<'info>,
}

pub fn expire_policy(ctx: Context<ExpirePolicy>) -> Result<()> {
    let height = current_height()?;
    let policy = &mut ctx.accounts.policy;

    policy.mark_expired(height)?;

    let config = &mut ctx.accounts.manager_config;
    config.total_policies_expired = config.total_policies_expired.saturating_add(1);

    emit!(PolicyExpired {
        policy_id: policy.id,
        end_height: policy.end_height,
        height,
    });

    Ok(())
}
