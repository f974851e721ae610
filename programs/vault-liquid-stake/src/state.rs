use crate::error::VaultError;
use anchor_lang::prelude::*;

/// Lamports reserved from every stake so the staking call itself can cover
/// its execution cost. 0.02 SOL. Any unused part is refunded to the payer.
pub const GAS_BUFFER_LAMPORTS: u64 = 20_000_000;

/// Fee denominator: 1 bps = 0.01%.
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Highest admissible fee (100%).
pub const MAX_FEE_BPS: u16 = 10_000;

/// Max number of fee administrators stored in the config.
pub const MAX_ADMINISTRATORS: usize = 5;

/// Current VaultConfig schema version. `migrate` brings older layouts here.
pub const SCHEMA_VERSION: u8 = 1;

#[account]
pub struct VaultConfig {
    pub version: u8,
    /// The wrapped base asset users deposit; must be the SPL native mint.
    pub base_asset_mint: Pubkey,
    /// The share token minted against the staked position.
    pub share_mint: Pubkey,
    /// Receipt-unit mint issued by the staking provider.
    pub receipt_mint: Pubkey,
    /// The opaque staking-provider program.
    pub staking_provider: Pubkey,
    /// Provider state account passed to its instructions.
    pub provider_state: Pubkey,
    /// The opaque withdrawal-queue program.
    pub withdrawal_queue: Pubkey,
    /// Queue state account passed to its instructions.
    pub queue_state: Pubkey,
    /// Redemption fee in basis points, <= MAX_FEE_BPS.
    pub fee_basis_points: u16,
    /// Upper bound on a single deposit, in lamport-denominated asset units.
    pub max_deposit: u64,
    pub fee_administrators: Vec<Pubkey>,
    pub paused: bool,
    /// Reentrancy lock around the asset-moving instructions.
    pub locked: bool,
    pub bump: u8,
}

impl VaultConfig {
    // Pubkeys, scalars, the bounded administrator vec with its 4-byte Borsh
    // length prefix, and the 8-byte discriminator.
    pub const LEN: usize =
        8 + 1 + (32 * 7) + 2 + 8 + (4 + (32 * MAX_ADMINISTRATORS)) + 1 + 1 + 1;
}

// ========== SHARE ACCOUNTING (pure, floor-rounded, u128 intermediates) ==========
//
// Total staked value is never cached: callers re-derive it per instruction
// from the live receipt balance and the provider's pricing view, then feed
// it into these helpers. Rounding is always floor so the vault never
// over-promises shares or assets; residue accrues to remaining holders.

/// Deposit-side conversion: asset lamports in, shares out.
///
/// Reserves the gas buffer first. The first depositor sets a 1:1 rate on the
/// net amount.
pub fn calculate_assets_to_shares(
    assets: u64,
    total_shares: u64,
    total_staked_value: u64,
) -> Result<u64> {
    require!(assets > GAS_BUFFER_LAMPORTS, VaultError::BufferTooSmall);
    let net_assets = assets - GAS_BUFFER_LAMPORTS;

    if total_shares == 0 {
        return Ok(net_assets);
    }
    require!(total_staked_value > 0, VaultError::DivisionByZero);

    let shares = (net_assets as u128)
        .checked_mul(total_shares as u128)
        .ok_or(VaultError::Overflow)?
        / total_staked_value as u128;
    u64::try_from(shares).map_err(|_| error!(VaultError::Overflow))
}

/// Redeem-side conversion, step one: the holder's proportional slice of the
/// vault's receipt-unit balance. Zero when no shares exist.
pub fn calculate_shares_to_stake_units(
    shares: u64,
    total_shares: u64,
    receipt_balance: u64,
) -> Result<u64> {
    if total_shares == 0 {
        return Ok(0);
    }
    let units = (shares as u128)
        .checked_mul(receipt_balance as u128)
        .ok_or(VaultError::Overflow)?
        / total_shares as u128;
    u64::try_from(units).map_err(|_| error!(VaultError::Overflow))
}

/// Redeem-side conversion, step two: deduct the redemption fee from the
/// gross unstaked value. Returns (net, fee).
pub fn apply_redemption_fee(gross_value: u64, fee_bps: u16) -> Result<(u64, u64)> {
    let fee = (gross_value as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(VaultError::Overflow)?
        / BPS_DENOMINATOR as u128;
    let fee = fee as u64; // fee_bps <= 10_000 keeps this within gross_value
    Ok((gross_value - fee, fee))
}

/// Inverse of the deposit-side conversion, used by `mint`: the asset amount
/// that buys exactly `shares`, gas buffer included.
pub fn calculate_required_assets(
    shares: u64,
    total_shares: u64,
    total_staked_value: u64,
) -> Result<u64> {
    let net = if total_shares == 0 {
        shares
    } else {
        let net = (shares as u128)
            .checked_mul(total_staked_value as u128)
            .ok_or(VaultError::Overflow)?
            / total_shares as u128;
        u64::try_from(net).map_err(|_| error!(VaultError::Overflow))?
    };
    net.checked_add(GAS_BUFFER_LAMPORTS)
        .ok_or_else(|| error!(VaultError::Overflow))
}

/// Fee bound enforcement shared by `initialize` and `set_fee_basis_points`.
pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_FEE_BPS, VaultError::InvalidFee);
    Ok(())
}

/// Bring a config forward to the current schema version in place.
///
/// Accounting-relevant fields (fee, references, administrators) must survive
/// unchanged; share supply and holder balances live in SPL accounts and are
/// not touched by migration at all.
pub fn migrate_schema(config: &mut VaultConfig) -> Result<(u8, u8)> {
    let from = config.version;
    require!(from <= SCHEMA_VERSION, VaultError::SchemaVersionAhead);
    config.version = SCHEMA_VERSION;
    Ok((from, SCHEMA_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SOL: u64 = 1_000_000_000;
    const ONE_E18: u64 = 1_000_000_000_000_000_000;

    fn assert_err_is(result: Result<u64>, name: &str) {
        let err = result.unwrap_err();
        assert!(err.to_string().contains(name), "expected {name}, got {err}");
    }

    #[test]
    fn bootstrap_deposit_mints_net_of_buffer() {
        let shares = calculate_assets_to_shares(ONE_E18, 0, 0).unwrap();
        assert_eq!(shares, ONE_E18 - GAS_BUFFER_LAMPORTS);
    }

    #[test]
    fn deposit_at_or_below_buffer_is_rejected() {
        assert_err_is(
            calculate_assets_to_shares(GAS_BUFFER_LAMPORTS, 0, 0),
            "BufferTooSmall",
        );
        assert_err_is(calculate_assets_to_shares(1, 100, 100), "BufferTooSmall");
    }

    #[test]
    fn proportional_deposit_floors() {
        // floor(net_assets 3 * total_shares 10 / total_staked_value 7) = 4
        let shares = calculate_assets_to_shares(GAS_BUFFER_LAMPORTS + 3, 10, 7).unwrap();
        assert_eq!(shares, 4);
    }

    #[test]
    fn deposit_with_shares_but_no_value_is_division_by_zero() {
        assert_err_is(calculate_assets_to_shares(ONE_SOL, 10, 0), "DivisionByZero");
    }

    #[test]
    fn deposit_and_withdraw_previews_share_one_conversion() {
        // Both asset-denominated previews delegate to this one conversion,
        // buffer reservation included:
        // floor(net 3_000_000_017 * total_shares 1_000 / value 2_000).
        let a = GAS_BUFFER_LAMPORTS + 3 * ONE_SOL + 17;
        assert_eq!(
            calculate_assets_to_shares(a, 1_000, 2_000).unwrap(),
            1_500_000_008
        );
    }

    #[test]
    fn mint_and_redeem_previews_share_one_conversion() {
        // Both share-denominated previews run the same pipeline: shares to
        // receipt units, units priced to gross value, fee netted out.
        // floor(shares 300 * receipt_balance 500 / total_shares 1_000) = 150
        // units; priced 1:2 that is 300 gross, and 50 bps nets 299.
        let units = calculate_shares_to_stake_units(300, 1_000, 500).unwrap();
        assert_eq!(units, 150);
        let gross = units * 2;
        let (net, fee) = apply_redemption_fee(gross, 50).unwrap();
        assert_eq!(fee, 1);
        assert_eq!(net, 299);
    }

    #[test]
    fn withdraw_retains_exact_fee_in_custody() {
        // A gross withdraw of g at fee f wraps the full claim, pays the net
        // amount out and keeps floor(g * f / 10_000) in wrapped custody.
        let gross = 7 * ONE_SOL + 123;
        let fee_bps = 250u16;
        let shares = calculate_assets_to_shares(gross, 2_000, 4_000).unwrap();
        assert!(shares > 0);
        let (net, fee) = apply_redemption_fee(gross, fee_bps).unwrap();
        let expected_fee = (gross as u128 * fee_bps as u128 / 10_000) as u64;
        assert_eq!(fee, expected_fee);
        assert_eq!(gross - net, expected_fee);
    }

    #[test]
    fn redeem_retains_exact_fee_in_custody() {
        // Redeem derives the gross value from the burned shares, unstakes it
        // in full and keeps floor(gross * f / 10_000) after the net payout.
        // floor(shares 250 * receipt_balance 4_000 / total_shares 1_000)
        // = 1_000 units; priced 1:3 that is 3_000 gross.
        let units = calculate_shares_to_stake_units(250, 1_000, 4_000).unwrap();
        assert_eq!(units, 1_000);
        let gross = units * 3;
        let (net, fee) = apply_redemption_fee(gross, 1_000).unwrap();
        assert_eq!(fee, 300);
        assert_eq!(gross - net, 300);
    }

    #[test]
    fn shares_to_units_is_zero_without_supply() {
        assert_eq!(calculate_shares_to_stake_units(50, 0, 1_000).unwrap(), 0);
    }

    #[test]
    fn shares_to_units_floors_proportionally() {
        // floor(shares 3 * receipt_balance 100 / total_shares 7) = 42
        assert_eq!(calculate_shares_to_stake_units(3, 7, 100).unwrap(), 42);
    }

    #[test]
    fn fee_bound_accepts_full_range_and_rejects_above() {
        validate_fee_bps(0).unwrap();
        validate_fee_bps(MAX_FEE_BPS).unwrap();
        let err = validate_fee_bps(10_001).unwrap_err();
        assert!(err.to_string().contains("InvalidFee"));
    }

    #[test]
    fn ten_percent_fee_on_1e18_gross() {
        let (net, fee) = apply_redemption_fee(ONE_E18, 1_000).unwrap();
        assert_eq!(net, 900_000_000_000_000_000);
        assert_eq!(fee, 100_000_000_000_000_000);
    }

    #[test]
    fn zero_fee_returns_gross() {
        let (net, fee) = apply_redemption_fee(ONE_E18, 0).unwrap();
        assert_eq!(net, ONE_E18);
        assert_eq!(fee, 0);
    }

    #[test]
    fn fee_floors_in_favor_of_redeemer() {
        // floor(999 * 1 / 10_000) = 0: dust redemptions pay no fee.
        let (net, fee) = apply_redemption_fee(999, 1).unwrap();
        assert_eq!(net, 999);
        assert_eq!(fee, 0);
    }

    #[test]
    fn required_assets_bootstrap_is_shares_plus_buffer() {
        assert_eq!(
            calculate_required_assets(ONE_SOL, 0, 0).unwrap(),
            ONE_SOL + GAS_BUFFER_LAMPORTS
        );
    }

    #[test]
    fn required_assets_inverts_the_rate() {
        // 5 shares at 2_000 value / 1_000 shares: floor(5 * 2000 / 1000) = 10
        assert_eq!(
            calculate_required_assets(5, 1_000, 2_000).unwrap(),
            10 + GAS_BUFFER_LAMPORTS
        );
    }

    #[test]
    fn bootstrap_round_trip_with_zero_fee() {
        // Deposit 1e18 at fee 0, no yield accrued: an immediate full
        // redemption recovers the net stake exactly.
        let shares = calculate_assets_to_shares(ONE_E18, 0, 0).unwrap();
        let staked = ONE_E18 - GAS_BUFFER_LAMPORTS;
        // Provider priced 1:1 at bootstrap: receipt balance == staked value.
        let units = calculate_shares_to_stake_units(shares, shares, staked).unwrap();
        assert_eq!(units, staked);
        let (net, fee) = apply_redemption_fee(staked, 0).unwrap();
        assert_eq!(net, staked);
        assert_eq!(fee, 0);
    }

    #[test]
    fn migration_preserves_accounting_fields() {
        let mut config = VaultConfig {
            version: 0,
            base_asset_mint: Pubkey::new_unique(),
            share_mint: Pubkey::new_unique(),
            receipt_mint: Pubkey::new_unique(),
            staking_provider: Pubkey::new_unique(),
            provider_state: Pubkey::new_unique(),
            withdrawal_queue: Pubkey::new_unique(),
            queue_state: Pubkey::new_unique(),
            fee_basis_points: 250,
            max_deposit: u64::MAX,
            fee_administrators: vec![Pubkey::new_unique()],
            paused: false,
            locked: false,
            bump: 254,
        };
        let snapshot_fee = config.fee_basis_points;
        let snapshot_admins = config.fee_administrators.clone();
        let snapshot_provider = config.staking_provider;

        let (from, to) = migrate_schema(&mut config).unwrap();
        assert_eq!((from, to), (0, SCHEMA_VERSION));
        assert_eq!(config.version, SCHEMA_VERSION);
        assert_eq!(config.fee_basis_points, snapshot_fee);
        assert_eq!(config.fee_administrators, snapshot_admins);
        assert_eq!(config.staking_provider, snapshot_provider);
    }

    #[test]
    fn migration_rejects_future_schema() {
        let mut config = VaultConfig {
            version: SCHEMA_VERSION + 1,
            base_asset_mint: Pubkey::default(),
            share_mint: Pubkey::default(),
            receipt_mint: Pubkey::default(),
            staking_provider: Pubkey::default(),
            withdrawal_queue: Pubkey::default(),
            provider_state: Pubkey::default(),
            queue_state: Pubkey::default(),
            fee_basis_points: 0,
            max_deposit: 0,
            fee_administrators: vec![],
            paused: false,
            locked: false,
            bump: 255,
        };
        let err = migrate_schema(&mut config).unwrap_err();
        assert!(err.to_string().contains("SchemaVersionAhead"));
    }
}
