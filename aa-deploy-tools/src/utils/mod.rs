// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils::format_units, U256};
use color::Color;

pub mod color;

/// Pretty-prints the worst-case cost of a deployment.
pub fn format_max_cost(gas: u64, fee_per_gas: u128) -> String {
    let cost = U256::from(gas) * U256::from(fee_per_gas);
    match format_units(cost, "ether") {
        Ok(eth) => format!("{eth} ETH").mint(),
        Err(_) => "???".red(),
    }
}

/// Strips an optional `0x` prefix and surrounding whitespace, then decodes hex.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_prefixed_and_bare_hex() {
        assert_eq!(decode0x("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode0x("  beef\n").unwrap(), vec![0xbe, 0xef]);
        assert!(decode0x("0xzz").is_err());
    }

    #[test]
    fn max_cost_in_ether() {
        let text = format_max_cost(6_000_000, 1_000_000_000);
        assert!(text.contains("0.006"), "{text}");
    }
}
