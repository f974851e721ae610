//! CPI instruction builders for the external staking stack.
//!
//! The vault program treats the staking provider and its withdrawal queue as
//! opaque programs: it only knows their pubkeys (stored in the vault config)
//! and the wire shape of a handful of instructions. This crate pins that wire
//! shape in one place so the vault and any off-chain tooling agree on it.
//!
//! Instruction data layout is `[discriminator: u8]` followed by the
//! Borsh-serialized parameter struct. View instructions answer through
//! `set_return_data`, which the caller reads back with `get_return_data`
//! after the CPI returns.

pub mod provider;
pub mod queue;

/// Read a little-endian u64 out of CPI return data.
///
/// Both the provider pricing views and the queue request instruction answer
/// with plain u64 payloads.
pub fn parse_u64_return(data: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = data.get(..8)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u64_return_reads_le_prefix() {
        let mut data = 42u64.to_le_bytes().to_vec();
        data.push(0xff); // trailing bytes are ignored
        assert_eq!(parse_u64_return(&data), Some(42));
    }

    #[test]
    fn parse_u64_return_rejects_short_payload() {
        assert_eq!(parse_u64_return(&[1, 2, 3]), None);
    }
}
