use crate::error::VaultError;
use crate::state::VaultConfig;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

/// Validate that `signer` holds the program's upgrade authority.
///
/// The upgrade authority is the vault-admin capability: it gates
/// initialization, pause, administrator rotation and schema migration.
pub fn validate_program_update_authority(
    program_data: &UncheckedAccount,
    signer: &Signer,
) -> Result<()> {
    let data = program_data.try_borrow_data()?;
    let loader_state: UpgradeableLoaderState =
        bincode::deserialize(&data).map_err(|_| error!(VaultError::InvalidProgramData))?;

    match loader_state {
        UpgradeableLoaderState::ProgramData {
            upgrade_authority_address,
            ..
        } => {
            let authority =
                upgrade_authority_address.ok_or(VaultError::NoUpgradeAuthority)?;
            require_keys_eq!(
                authority,
                signer.key(),
                VaultError::InvalidUpgradeAuthority
            );
            Ok(())
        }
        _ => err!(VaultError::InvalidProgramData),
    }
}

// Reentrancy lock over the asset-moving instructions. The flag lives in the
// config account; a failed instruction reverts the whole transaction, flag
// included, so release is guaranteed on every exit path.

pub fn acquire_lock(config: &mut VaultConfig) -> Result<()> {
    require!(!config.locked, VaultError::ReentrantCall);
    config.locked = true;
    Ok(())
}

pub fn release_lock(config: &mut VaultConfig) {
    config.locked = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> VaultConfig {
        VaultConfig {
            version: 1,
            base_asset_mint: Pubkey::default(),
            share_mint: Pubkey::default(),
            receipt_mint: Pubkey::default(),
            staking_provider: Pubkey::default(),
            provider_state: Pubkey::default(),
            withdrawal_queue: Pubkey::default(),
            queue_state: Pubkey::default(),
            fee_basis_points: 0,
            max_deposit: u64::MAX,
            fee_administrators: vec![],
            paused: false,
            locked: false,
            bump: 255,
        }
    }

    #[test]
    fn nested_acquire_fails() {
        let mut config = test_config();
        acquire_lock(&mut config).unwrap();
        let err = acquire_lock(&mut config).unwrap_err();
        assert!(err.to_string().contains("ReentrantCall"));
    }

    #[test]
    fn release_allows_the_next_operation() {
        let mut config = test_config();
        acquire_lock(&mut config).unwrap();
        release_lock(&mut config);
        acquire_lock(&mut config).unwrap();
    }
}
