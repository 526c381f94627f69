// programs/cover_core/src/lib.rs
//
// Cover Core - Shared Constants and Solvency Math
// ===============================================
//
// This module provides:
// - Basis-point arithmetic shared by pricing and reserve calculations
// - The premium formula used by the risk registry
// - Reserve / withdrawable computations used by the pool treasury
// - PDA seeds for the peer authorities that sign cross-program calls
// - Ledger height access (the protocol never reads wall-clock time)

use anchor_lang::prelude::*;

// =============================================================================
// BASIS POINTS
// =============================================================================

pub mod bps {
    /// 10000 bps = 1.0x
    pub const DENOMINATOR: u64 = 10_000;

    /// Largest ratio accepted wherever a fraction of a whole is configured
    pub const MAX_RATIO_BPS: u16 = 10_000;

    /// Floor of `amount * ratio_bps / 10000`.
    ///
    /// The 128-bit intermediate cannot overflow for u64 inputs, and the result
    /// never exceeds `amount` while `ratio_bps <= MAX_RATIO_BPS`.
    pub fn apply(amount: u64, ratio_bps: u16) -> u64 {
        let scaled = (amount as u128 * ratio_bps as u128) / DENOMINATOR as u128;
        scaled.min(u64::MAX as u128) as u64
    }

    /// Narrow a caller-supplied ratio. Anything above `MAX_RATIO_BPS` is
    /// rejected rather than clamped.
    pub fn checked_ratio(ratio_bps: u32) -> Option<u16> {
        if ratio_bps <= u32::from(MAX_RATIO_BPS) {
            u16::try_from(ratio_bps).ok()
        } else {
            None
        }
    }
}

// =============================================================================
// PRICING
// =============================================================================

pub mod pricing {
    use super::bps;

    /// Premium for a coverage amount under a risk profile:
    /// `floor(base_premium * coverage_amount * risk_factor_bps / 10000)`.
    ///
    /// Returns `None` when the product or the final premium does not fit the
    /// representable range. Floor division governs pool solvency, so callers
    /// must not round this value up.
    pub fn premium(base_premium: u64, coverage_amount: u64, risk_factor_bps: u64) -> Option<u64> {
        let numerator = (base_premium as u128)
            .checked_mul(coverage_amount as u128)?
            .checked_mul(risk_factor_bps as u128)?;
        let premium = numerator / bps::DENOMINATOR as u128;
        u64::try_from(premium).ok()
    }
}

// =============================================================================
// SOLVENCY
// =============================================================================

pub mod solvency {
    use super::bps;

    /// Portion of pooled funds that must stay in the pool
    pub fn reserve_amount(total_funds: u64, reserve_ratio_bps: u16) -> u64 {
        bps::apply(total_funds, reserve_ratio_bps.min(bps::MAX_RATIO_BPS))
    }

    /// Funds eligible for withdrawal or claim payout
    pub fn withdrawable(total_funds: u64, reserve_ratio_bps: u16) -> u64 {
        total_funds.saturating_sub(reserve_amount(total_funds, reserve_ratio_bps))
    }

    /// Whether an outflow of `amount` keeps the reserve intact
    pub fn can_release(total_funds: u64, reserve_ratio_bps: u16, amount: u64) -> bool {
        amount <= withdrawable(total_funds, reserve_ratio_bps)
    }
}

// =============================================================================
// PEER AUTHORITIES
// =============================================================================
//
// Programs that make privileged calls into a peer sign with a PDA derived from
// one of these seeds under their own program id. The callee stores the derived
// address at initialization and compares it on every privileged call.

pub mod peers {
    use super::*;

    /// Signs `process_premium` on behalf of the policy manager
    pub const POLICY_MANAGER_AUTHORITY_SEED: &[u8] = b"policy_manager_authority";

    /// Signs `mark_policy_claimed` and `process_claim_payout` on behalf of the
    /// claims processor
    pub const CLAIMS_PROCESSOR_AUTHORITY_SEED: &[u8] = b"claims_processor_authority";

    pub fn policy_manager_authority(policy_manager_program: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[POLICY_MANAGER_AUTHORITY_SEED], policy_manager_program)
    }

    pub fn claims_processor_authority(claims_processor_program: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[CLAIMS_PROCESSOR_AUTHORITY_SEED], claims_processor_program)
    }
}

// =============================================================================
// LEDGER HEIGHT
// =============================================================================

/// Current ledger height (slot). Policy validity windows are expressed in
/// heights, never in timestamps.
pub fn current_height() -> Result<u64> {
    Ok(Clock::get()?.slot)
}
