// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query capabilities supported by the gateway

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One kind of query the gateway supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Native balance, recent activity, and token holdings for a wallet
    WalletInfo,
    /// Fungible token balance and metadata, with optional game extensions
    TokenInfo,
    /// NFT holdings of a wallet within one collection contract
    NftCollection,
    /// Aggregate game statistics
    GameStats,
    /// Confirmation status of a transaction hash
    VerifyTransaction,
}

impl Capability {
    /// All capabilities, in routing order
    pub const fn all() -> &'static [Self] {
        &[
            Self::WalletInfo,
            Self::TokenInfo,
            Self::NftCollection,
            Self::GameStats,
            Self::VerifyTransaction,
        ]
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WalletInfo => write!(f, "wallet_info"),
            Self::TokenInfo => write!(f, "token_info"),
            Self::NftCollection => write!(f, "nft_collection"),
            Self::GameStats => write!(f, "game_stats"),
            Self::VerifyTransaction => write!(f, "verify_transaction"),
        }
    }
}
