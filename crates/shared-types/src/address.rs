// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Per-chain-family address grammar and validation
//!
//! Addresses enter the gateway as opaque strings and only become [`Address`]
//! values through [`validate`]. The tag records which family the address was
//! validated for, so a Solana address can never reach the EVM adapter and
//! vice versa. Validation is purely syntactic and performs no network I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ChainFamily;

/// Length in bytes of a Solana public key
const SOLANA_PUBKEY_LEN: usize = 32;
/// Number of hex digits in an EVM address (excluding the `0x` prefix)
const EVM_HEX_DIGITS: usize = 40;

/// A validated Solana address: a base58-encoded 32-byte public key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolanaAddress {
    base58: String,
}

impl SolanaAddress {
    /// The base58 form the address was validated from
    pub fn as_str(&self) -> &str {
        &self.base58
    }
}

impl fmt::Display for SolanaAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base58)
    }
}

/// A validated EVM address
pub type EvmAddress = alloy_primitives::Address;

/// An address tagged with the chain family it was validated for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Address {
    /// Validated for the Solana family
    Solana(SolanaAddress),
    /// Validated for the EVM family
    Evm(EvmAddress),
}

impl Address {
    /// The family this address was validated for
    pub const fn family(&self) -> ChainFamily {
        match self {
            Self::Solana(_) => ChainFamily::Solana,
            Self::Evm(_) => ChainFamily::Evm,
        }
    }

    /// The Solana form of this address, if it was validated for that family
    pub fn as_solana(&self) -> Option<&SolanaAddress> {
        match self {
            Self::Solana(address) => Some(address),
            Self::Evm(_) => None,
        }
    }

    /// The EVM form of this address, if it was validated for that family
    pub fn as_evm(&self) -> Option<&EvmAddress> {
        match self {
            Self::Evm(address) => Some(address),
            Self::Solana(_) => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solana(address) => write!(f, "{address}"),
            Self::Evm(address) => write!(f, "{address}"),
        }
    }
}

/// Error type for address validation
///
/// The `Display` form is the bare error kind so the HTTP layer can surface
/// it verbatim as the envelope `message`; [`ValidationError::detail`] carries
/// the human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Address does not match the family's grammar
    #[error("InvalidAddressFormat")]
    InvalidAddressFormat {
        /// Family the address was validated against
        family: ChainFamily,
        /// The offending input
        address: String,
    },
}

impl ValidationError {
    /// Human-readable explanation of the rejection
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidAddressFormat { family, address } => match family {
                ChainFamily::Solana => format!(
                    "'{address}' is not a base58-encoded 32-byte Solana public key"
                ),
                ChainFamily::Evm => format!(
                    "'{address}' is not a 0x-prefixed 40-hex-digit EVM address"
                ),
            },
        }
    }
}

/// Validate an address string against a chain family's grammar
///
/// - Solana: must decode as base58 into exactly 32 bytes.
/// - EVM: must be `0x` followed by 40 hex digits, case-insensitive. Checksum
///   casing is deliberately not enforced.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAddressFormat`] if the address does not
/// match the family's grammar.
pub fn validate(address: &str, family: ChainFamily) -> Result<Address, ValidationError> {
    let invalid = || ValidationError::InvalidAddressFormat {
        family,
        address: address.to_string(),
    };

    match family {
        ChainFamily::Solana => {
            let bytes = bs58::decode(address).into_vec().map_err(|_| invalid())?;
            if bytes.len() != SOLANA_PUBKEY_LEN {
                return Err(invalid());
            }
            Ok(Address::Solana(SolanaAddress {
                base58: address.to_string(),
            }))
        }
        ChainFamily::Evm => {
            let hex = address.strip_prefix("0x").ok_or_else(invalid)?;
            if hex.len() != EVM_HEX_DIGITS || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let parsed = address.parse::<EvmAddress>().map_err(|_| invalid())?;
            Ok(Address::Evm(parsed))
        }
    }
}
