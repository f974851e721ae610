pub mod account_structs;
/// # Liquid-Staking Vault
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - The program upgrade authority initializes the vault with the wrapped
///      native asset (wSOL), a fresh share mint, and the pubkeys of the
///      external staking provider and its withdrawal queue
///    - Custody accounts (wrapped asset, provider receipt units) are created
///      as PDAs owned by the vault authority
///
/// 2. Deposit Flow:
///    a. User deposits wSOL (`deposit`) or asks for an exact share count
///       (`mint`)
///    b. The vault unwraps the deposit to lamports, reserves a fixed gas
///       buffer, and stakes the rest with the provider
///    c. Unused buffer and temp-account rent are refunded to the depositor
///    d. Shares are minted to the receiver at the pre-stake exchange rate
///
/// 3. Redemption Flow:
///    a. User burns shares (`redeem`) or names a gross asset amount
///       (`withdraw`)
///    b. The vault requests the value from the provider's withdrawal queue
///       and claims it in the same call (synchronous fulfillment assumed)
///    c. Claimed lamports are wrapped back to wSOL; the redemption fee is
///       deducted and the net amount transferred to the receiver
///
/// 4. Administration:
///    - Fee administrators adjust the redemption fee within [0, 10000] bps
///    - The upgrade authority can pause the vault, rotate administrators and
///      migrate the config schema; migrations must leave the share supply
///      and every holder balance untouched
///
/// The share mint's supply is the vault's total share count and per-holder
/// balances live in SPL token accounts, so share conservation is enforced by
/// the SPL Token program. All operations are atomic under Solana's
/// transaction model; a reentrancy lock additionally rejects nested entry
/// into the asset-moving instructions.
pub mod error;
pub mod events;
mod guard;
pub mod processor;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("69ZT8ChuQEodUkNk4j1xzAM2VfZntryMyWSScLzVG5ew");

#[program]
pub mod vault_liquid_stake {
    use super::*;

    /// One-time setup of the vault configuration:
    /// - fee_bps: redemption fee in basis points, at most 10000
    /// - fee_administrators: accounts allowed to change the fee later
    /// - max_deposit: upper bound for a single deposit/mint
    pub fn initialize(
        ctx: Context<Initialize>,
        fee_bps: u16,
        fee_administrators: Vec<Pubkey>,
        max_deposit: u64,
    ) -> Result<()> {
        processor::initialize(ctx, fee_bps, fee_administrators, max_deposit)
    }

    /// Deposits `assets` of the wrapped base asset, stakes the net amount
    /// and mints the proportional share count to the receiver. Returns the
    /// shares minted.
    pub fn deposit(ctx: Context<Deposit>, assets: u64) -> Result<u64> {
        processor::deposit(ctx, assets)
    }

    /// Mints exactly `shares` to the receiver, charging whatever asset
    /// amount that currently costs (gas buffer included). Returns the assets
    /// paid.
    pub fn mint(ctx: Context<Deposit>, shares: u64) -> Result<u64> {
        processor::mint(ctx, shares)
    }

    /// Unstakes `assets` gross, burns the corresponding shares from the
    /// owner, deducts the redemption fee and transfers the net amount to the
    /// receiver. Returns the shares burned.
    pub fn withdraw(ctx: Context<Redeem>, assets: u64) -> Result<u64> {
        processor::withdraw(ctx, assets)
    }

    /// Burns `shares` from the owner, unstakes their gross value through the
    /// withdrawal queue, deducts the redemption fee and transfers the net
    /// amount to the receiver. Returns the assets transferred.
    pub fn redeem(ctx: Context<Redeem>, shares: u64) -> Result<u64> {
        processor::redeem(ctx, shares)
    }

    /// Updates the redemption fee. Restricted to fee administrators.
    pub fn set_fee_basis_points(ctx: Context<SetFee>, fee_bps: u16) -> Result<()> {
        processor::set_fee_basis_points(ctx, fee_bps)
    }

    pub fn get_fee_basis_points(ctx: Context<FeeView>) -> Result<u64> {
        processor::get_fee_basis_points(ctx)
    }

    pub fn preview_deposit(ctx: Context<PreviewContext>, assets: u64) -> Result<u64> {
        processor::preview_deposit(ctx, assets)
    }

    pub fn preview_mint(ctx: Context<PreviewContext>, shares: u64) -> Result<u64> {
        processor::preview_mint(ctx, shares)
    }

    pub fn preview_withdraw(ctx: Context<PreviewContext>, assets: u64) -> Result<u64> {
        processor::preview_withdraw(ctx, assets)
    }

    pub fn preview_redeem(ctx: Context<PreviewContext>, shares: u64) -> Result<u64> {
        processor::preview_redeem(ctx, shares)
    }

    /// Pauses or unpauses the asset-moving instructions:
    /// - pause: true to pause, false to unpause
    pub fn pause(ctx: Context<Pause>, pause: bool) -> Result<()> {
        processor::pause(ctx, pause)
    }

    pub fn update_fee_administrators(
        ctx: Context<UpdateFeeAdministrators>,
        new_administrators: Vec<Pubkey>,
    ) -> Result<()> {
        processor::update_fee_administrators(ctx, new_administrators)
    }

    /// Brings the config account forward to the current schema version.
    pub fn migrate(ctx: Context<Migrate>) -> Result<()> {
        processor::migrate(ctx)
    }
}
