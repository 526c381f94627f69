// programs/cover_risk_registry/src/lib.rs
//
// Cover Risk Registry Program
// ===========================
// Catalog of insurable risk categories and the single source of premium
// pricing for the protocol:
// - Authority-managed risk profiles (base premium + risk factor in bps)
// - Deterministic, floor-rounded premium quotes
// - Quotes served to the policy manager over CPI return data

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::RiskProfile;

declare_id!("DihN44pWPdL9SqcRhqZX3CiLCf8AUvVaJbhaFsxrkQWq");

#[program]
pub mod cover_risk_registry {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the registry; the caller becomes its authority
    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Transfer registry authority
    pub fn transfer_registry_authority(
        ctx: Context<TransferRegistryAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::initialize::transfer_registry_authority(ctx, new_authority)
    }

    // ==================== RISK PROFILES ====================

    /// Add a risk profile, returning its id
    pub fn add_risk_profile(
        ctx: Context<AddRiskProfile>,
        risk_type: String,
        base_premium: u64,
        risk_factor_bps: u64,
    ) -> Result<u64> {
        instructions::profiles::add_risk_profile(ctx, risk_type, base_premium, risk_factor_bps)
    }

    /// Read a risk profile
    pub fn get_risk_profile(ctx: Context<GetRiskProfile>, _risk_id: u64) -> Result<RiskProfile> {
        instructions::profiles::get_risk_profile(ctx)
    }

    /// Reprice a risk profile. Issued policies are unaffected.
    pub fn update_risk_profile(
        ctx: Context<UpdateRiskProfile>,
        _risk_id: u64,
        base_premium: u64,
        risk_factor_bps: u64,
    ) -> Result<()> {
        instructions::profiles::update_risk_profile(ctx, base_premium, risk_factor_bps)
    }

    // ==================== PRICING ====================

    /// Quote the premium for a coverage amount
    pub fn calculate_premium(
        ctx: Context<CalculatePremium>,
        _risk_id: u64,
        coverage_amount: u64,
    ) -> Result<u64> {
        instructions::pricing::calculate_premium(ctx, coverage_amount)
    }
}
