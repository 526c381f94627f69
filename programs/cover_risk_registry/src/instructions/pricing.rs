// programs/cover_risk_registry/src/instructions/pricing.rs

use anchor_lang::prelude::*;
use cover_core::current_height;
use crate::state::RiskProfile;
use crate::events::PremiumQuoted;

/// Quote a premium. Also the CPI target the policy manager prices with.
#[derive(Accounts)]
#[instruction(risk_id: u64)]
pub struct CalculatePremium<'info> {
    #[account(
        seeds = [RiskProfile::SEED_PREFIX, &risk_id.to_le_bytes()],
        bump = risk_profile.bump,
    )]
    pub risk_profile: Account<'info, RiskProfile>,
}

pub fn calculate_premium(ctx: Context<CalculatePremium>, coverage_amount: u64) -> Result<u64> {
    let height = current_height()?;
    let profile = &ctx.accounts.risk_profile;

    let premium = profile.calculate_premium(coverage_amount)?;

    emit!(PremiumQuoted {
        risk_id: profile.id,
        coverage_amount,
        premium,
        height,
    });

    Ok(premium)
}
