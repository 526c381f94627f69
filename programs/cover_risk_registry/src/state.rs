// programs/cover_risk_registry/src/state.rs

use anchor_lang::prelude::*;
use cover_core::pricing;
use crate::errors::RiskRegistryError;

/// Registry configuration
/// PDA seeds: ["registry_config"]
#[account]
#[derive(InitSpace)]
pub struct RegistryConfig {
    /// Authority allowed to add and reprice risk profiles
    pub authority: Pubkey,

    /// Id the next risk profile will receive
    pub next_profile_id: u64,

    /// Bump seed
    pub bump: u8,
}

impl RegistryConfig {
    pub const SEED_PREFIX: &'static [u8] = b"registry_config";
    pub const FIRST_PROFILE_ID: u64 = 1;

    /// Hand out the next profile id. Ids are never reused.
    pub fn allocate_profile_id(&mut self) -> Result<u64> {
        let id = self.next_profile_id;
        self.next_profile_id = id
            .checked_add(1)
            .ok_or(RiskRegistryError::MathOverflow)?;
        Ok(id)
    }

    pub fn is_authority(&self, key: &Pubkey) -> bool {
        self.authority == *key
    }
}

/// Pricing profile for a category of risk
/// PDA seeds: ["risk_profile", risk_id]
#[account]
#[derive(InitSpace)]
pub struct RiskProfile {
    /// Sequential id (starts at 1)
    pub id: u64,

    /// Category tag, e.g. "fire", "flood"
    #[max_len(32)]
    pub risk_type: String,

    /// Base premium per unit of coverage
    pub base_premium: u64,

    /// Risk multiplier in basis points. Unbounded above.
    pub risk_factor_bps: u64,

    pub created_at_height: u64,

    pub updated_at_height: u64,

    /// Bump seed
    pub bump: u8,
}

impl RiskProfile {
    pub const SEED_PREFIX: &'static [u8] = b"risk_profile";
    pub const MAX_RISK_TYPE_LEN: usize = 32;

    pub fn validate_risk_type(risk_type: &str) -> Result<()> {
        require!(
            !risk_type.is_empty() && risk_type.len() <= Self::MAX_RISK_TYPE_LEN,
            RiskRegistryError::InvalidParameter
        );
        Ok(())
    }

    /// Premium = floor(base_premium * coverage_amount * risk_factor_bps / 10000)
    pub fn calculate_premium(&self, coverage_amount: u64) -> Result<u64> {
        let premium = pricing::premium(self.base_premium, coverage_amount, self.risk_factor_bps)
            .ok_or(RiskRegistryError::MathOverflow)?;
        Ok(premium)
    }

    /// Overwrite pricing fields. Policies already issued keep the premium they
    /// were charged.
    pub fn reprice(&mut self, base_premium: u64, risk_factor_bps: u64, height: u64) {
        self.base_premium = base_premium;
        self.risk_factor_bps = risk_factor_bps;
        self.updated_at_height = height;
    }
}
