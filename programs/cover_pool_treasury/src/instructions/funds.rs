// programs/cover_pool_treasury/src/instructions/funds.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use cover_core::current_height;
use crate::state::{PoolConfig, PoolState};
use crate::errors::PoolTreasuryError;
use crate::events::{FundsDeposited, FundsWithdrawn};

/// Add capital to the pool (anyone)
#[derive(Accounts)]
pub struct DepositFunds<'info> {
    #[account(
        seeds = [PoolConfig::SEED_PREFIX],
        bump = pool_config.bump,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [PoolConfig::VAULT_SEED],
        bump = pool_config.vault_bump,
        constraint = pool_vault.key() == pool_config.pool_vault @ PoolTreasuryError::InvalidVault
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == pool_config.token_mint @ PoolTreasuryError::InvalidMint,
        constraint = depositor_token_account.owner == depositor.key() @ PoolTreasuryError::Unauthorized
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit_funds(ctx: Context<DepositFunds>, amount: u64) -> Result<()> {
    let height = current_height()?;
    let state = &mut ctx.accounts.pool_state;

    state.credit_deposit(amount, height)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                to: ctx.accounts.pool_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(FundsDeposited {
        depositor: ctx.accounts.depositor.key(),
        amount,
        total_funds: state.total_funds,
        height,
    });

    Ok(())
}

/// Withdraw capital above the reserve (authority only)
#[derive(Accounts)]
pub struct WithdrawFunds<'info> {
    #[account(
        seeds = [PoolConfig::SEED_PREFIX],
        bump = pool_config.bump,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [PoolConfig::VAULT_SEED],
        bump = pool_config.vault_bump,
        constraint = pool_vault.key() == pool_config.pool_vault @ PoolTreasuryError::InvalidVault
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == pool_config.token_mint @ PoolTreasuryError::InvalidMint
    )]
    pub destination: Account<'info, TokenAccount>,

    #[account(
        constraint = pool_config.is_authority(&authority.key()) @ PoolTreasuryError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw_funds(ctx: Context<WithdrawFunds>, amount: u64) -> Result<()> {
    let height = current_height()?;
    let state = &mut ctx.accounts.pool_state;

    state.debit_withdrawal(amount, height)?;

    if amount > 0 {
        let seeds = &[
            PoolConfig::SEED_PREFIX,
            &[ctx.accounts.pool_config.bump],
        ];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::Transfer {
                    from: ctx.accounts.pool_vault.to_account_info(),
                    to: ctx.accounts.destination.to_account_info(),
                    authority: ctx.accounts.pool_config.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(FundsWithdrawn {
        destination: ctx.accounts.destination.key(),
        amount,
        total_funds: state.total_funds,
        height,
    });

    Ok(())
}
