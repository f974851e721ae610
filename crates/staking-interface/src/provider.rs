//! Staking-provider instructions.
//!
//! The provider accepts native lamports through `submit` and mints receipt
//! tokens (its internal stake units) to a destination token account. Two
//! pricing views convert between receipt units and pooled lamport value.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program_error::ProgramError;

/// Discriminator for `submit(referral, value)`.
pub const SUBMIT: u8 = 0;
/// Discriminator for the units → lamport-value pricing view.
pub const POOLED_VALUE_BY_UNITS: u8 = 1;
/// Discriminator for the lamport-value → units pricing view.
pub const UNITS_BY_POOLED_VALUE: u8 = 2;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmitParams {
    /// Referral identity forwarded to the provider; `Pubkey::default()` for none.
    pub referral: Pubkey,
    /// Lamports to stake. The payer account funds this amount.
    pub value: u64,
}

/// Account order for `submit`:
/// 0. provider state (writable)
/// 1. provider reserve, receives the staked lamports (writable)
/// 2. payer, source of lamports (writable, signer)
/// 3. receipt mint (writable)
/// 4. destination receipt token account (writable)
/// 5. SPL Token program
/// 6. System program
pub fn submit(
    program_id: Pubkey,
    state: Pubkey,
    reserve: Pubkey,
    payer: Pubkey,
    receipt_mint: Pubkey,
    destination: Pubkey,
    token_program: Pubkey,
    system_program: Pubkey,
    params: SubmitParams,
) -> Result<Instruction> {
    let mut data = vec![SUBMIT];
    data.extend_from_slice(
        &params
            .try_to_vec()
            .map_err(|_| ProgramError::InvalidInstructionData)?,
    );
    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(state, false),
            AccountMeta::new(reserve, false),
            AccountMeta::new(payer, true),
            AccountMeta::new(receipt_mint, false),
            AccountMeta::new(destination, false),
            AccountMeta::new_readonly(token_program, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    })
}

/// Pricing view: lamport value of `units` receipt units.
///
/// Account order: 0. provider state (readonly). Answer via return data (u64 LE).
pub fn pooled_value_by_units(program_id: Pubkey, state: Pubkey, units: u64) -> Result<Instruction> {
    let mut data = vec![POOLED_VALUE_BY_UNITS];
    data.extend_from_slice(&units.to_le_bytes());
    Ok(Instruction {
        program_id,
        accounts: vec![AccountMeta::new_readonly(state, false)],
        data,
    })
}

/// Pricing view: receipt units corresponding to `value` lamports.
///
/// Account order: 0. provider state (readonly). Answer via return data (u64 LE).
pub fn units_by_pooled_value(program_id: Pubkey, state: Pubkey, value: u64) -> Result<Instruction> {
    let mut data = vec![UNITS_BY_POOLED_VALUE];
    data.extend_from_slice(&value.to_le_bytes());
    Ok(Instruction {
        program_id,
        accounts: vec![AccountMeta::new_readonly(state, false)],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_encodes_discriminator_and_params() {
        let ix = submit(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            SubmitParams {
                referral: Pubkey::default(),
                value: 1_000,
            },
        )
        .unwrap();
        assert_eq!(ix.data[0], SUBMIT);
        let params = SubmitParams::deserialize(&mut &ix.data[1..]).unwrap();
        assert_eq!(params.value, 1_000);
        assert_eq!(ix.accounts.len(), 7);
        // The payer must sign: it funds the stake.
        assert!(ix.accounts[2].is_signer);
    }

    #[test]
    fn pricing_views_are_readonly() {
        let ix = pooled_value_by_units(Pubkey::new_unique(), Pubkey::new_unique(), 7).unwrap();
        assert_eq!(ix.data[0], POOLED_VALUE_BY_UNITS);
        assert!(!ix.accounts[0].is_writable);
    }
}
