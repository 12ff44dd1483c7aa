// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain family and network identifiers
//!
//! This module provides type-safe identifiers for the chain families the
//! gateway abstracts over: the Solana account-model family and EVM-style
//! contract chains. The family determines address grammar and adapter
//! selection; the EVM network additionally carries the numeric chain id.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// A class of blockchains sharing address and transaction semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// Account-model chains (Solana)
    Solana,
    /// EVM-style contract chains (Polygon, Ethereum)
    Evm,
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solana => write!(f, "solana"),
            Self::Evm => write!(f, "evm"),
        }
    }
}

/// Supported EVM network identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
pub enum EvmNetwork {
    /// Polygon - Chain ID: 137
    Polygon = 137,
    /// Ethereum Mainnet - Chain ID: 1
    Ethereum = 1,
}

impl EvmNetwork {
    /// Returns the numeric chain ID
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Polygon => 137,
            Self::Ethereum => 1,
        }
    }

    /// Returns the human-readable name of the network
    pub const fn name(self) -> &'static str {
        match self {
            Self::Polygon => "Polygon",
            Self::Ethereum => "Ethereum",
        }
    }

    /// Returns the symbol of the network's native currency
    pub const fn native_symbol(self) -> &'static str {
        match self {
            Self::Polygon => "MATIC",
            Self::Ethereum => "ETH",
        }
    }

    /// Returns all supported EVM networks
    pub const fn all() -> &'static [Self] {
        &[Self::Polygon, Self::Ethereum]
    }
}

impl fmt::Display for EvmNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EvmNetwork {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Numeric chain ids are accepted for configuration parsing
        if let Ok(id) = s.parse::<u64>() {
            return Self::try_from(id);
        }

        match s.to_lowercase().as_str() {
            "polygon" | "matic" => Ok(Self::Polygon),
            "ethereum" | "eth" => Ok(Self::Ethereum),
            _ => Err(ChainParseError::Unsupported(s.to_string())),
        }
    }
}

impl TryFrom<u64> for EvmNetwork {
    type Error = ChainParseError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        match id {
            137 => Ok(Self::Polygon),
            1 => Ok(Self::Ethereum),
            _ => Err(ChainParseError::UnsupportedId(id)),
        }
    }
}

impl Serialize for EvmNetwork {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.chain_id().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EvmNetwork {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NetworkVisitor;

        impl serde::de::Visitor<'_> for NetworkVisitor {
            type Value = EvmNetwork;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a supported EVM chain id (137, 1) or name (Polygon, Ethereum)"
                )
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                EvmNetwork::try_from(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Unsigned(value),
                        &"a supported chain id (137, 1)",
                    )
                })
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                EvmNetwork::from_str(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Str(value),
                        &"a supported network name (Polygon, Ethereum)",
                    )
                })
            }
        }

        deserializer.deserialize_any(NetworkVisitor)
    }
}

/// A concrete query target: either the Solana chain or one EVM network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Solana mainnet
    Solana,
    /// An EVM network carrying its chain id
    Evm(EvmNetwork),
}

impl Chain {
    /// The family this chain belongs to
    pub const fn family(self) -> ChainFamily {
        match self {
            Self::Solana => ChainFamily::Solana,
            Self::Evm(_) => ChainFamily::Evm,
        }
    }

    /// Returns the human-readable name of the chain
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solana => "Solana",
            Self::Evm(network) => network.name(),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Chain {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solana" => Ok(Self::Solana),
            "polygon" | "matic" => Ok(Self::Evm(EvmNetwork::Polygon)),
            "ethereum" | "eth" => Ok(Self::Evm(EvmNetwork::Ethereum)),
            _ => Err(ChainParseError::Unsupported(s.to_string())),
        }
    }
}

/// Error type for chain parsing
#[derive(Debug, thiserror::Error)]
pub enum ChainParseError {
    /// Chain name is not supported
    #[error("Unsupported chain: {0}. Use \"solana\", \"polygon\", or \"ethereum\"")]
    Unsupported(String),
    /// Numeric chain id is not supported
    #[error("Unsupported chain id: {0}. Supported chain ids are 137 (Polygon) and 1 (Ethereum)")]
    UnsupportedId(u64),
}
