// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Unified response schema
//!
//! One stable payload shape per capability, identical across chain families
//! and across the authoritative/fallback divide. Every payload carries a
//! [`Provenance`] tag; consumers can treat live and synthetic data uniformly
//! except for that flag. Optional fields serialize as explicit `null` so the
//! JSON field set never varies with the value source.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Distinguishes live chain truth from synthetic placeholder data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Data was read from the chain
    Live,
    /// Data was synthesized because the live path was unavailable
    Fallback,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of a dispatched query before normalization into an envelope
///
/// Rejections never reach this type; validation short-circuits before any
/// adapter is invoked.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    /// The adapter answered; the payload is live chain truth
    Authoritative(T),
    /// The live path failed or is absent; the payload is synthetic
    Fallback {
        /// Schema-compatible synthetic payload
        data: T,
        /// Human-readable reason the live path was not used
        reason: String,
    },
}

impl<T> QueryResult<T> {
    /// The provenance tag for this result
    pub const fn provenance(&self) -> Provenance {
        match self {
            Self::Authoritative(_) => Provenance::Live,
            Self::Fallback { .. } => Provenance::Fallback,
        }
    }

    /// The fallback reason, if this result is synthetic
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Authoritative(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Unwrap into the payload and the optional fallback reason
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            Self::Authoritative(data) => (data, None),
            Self::Fallback { data, reason } => (data, Some(reason)),
        }
    }
}

/// The normalized envelope returned for every capability call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// Whether the request was served (fallback data still counts as served)
    pub success: bool,
    /// Capability payload; absent on rejection or internal error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable context: rejection kind, fallback reason, display notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Detailed error description; absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// UTC timestamp the envelope was produced, RFC 3339
    pub timestamp: String,
}

impl<T> Envelope<T> {
    /// Build a successful envelope
    pub fn success(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build a failure envelope (rejection or internal error)
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One token holding reported in a wallet read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    /// Token mint (Solana) or contract reference (EVM)
    pub mint: String,
    /// Decimal-adjusted balance
    pub balance: f64,
    /// Token decimals
    pub decimals: u8,
}

/// Unified wallet info payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfoData {
    /// Queried wallet address
    pub wallet_address: String,
    /// Native balance in the chain's display unit (SOL, MATIC, ETH)
    pub native_balance: f64,
    /// Token holdings of the wallet
    pub tokens: Vec<TokenHolding>,
    /// Number of transactions in the recent-activity window
    pub recent_transactions: u32,
    /// Network label
    pub network: String,
    /// Value source tag
    pub provenance: Provenance,
}

/// Game-specific contract reads, when the contract exposes them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameExtension {
    /// Accumulated reward points
    pub reward_points: String,
    /// Current player level
    pub player_level: String,
}

/// Unified token info payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoData {
    /// Queried wallet address
    pub wallet_address: String,
    /// Token contract address
    pub contract_address: String,
    /// Decimal-string token balance
    pub token_balance: String,
    /// Token symbol
    pub token_symbol: String,
    /// Decimal-string native balance of the wallet
    pub native_balance: String,
    /// Decimal-string total supply of the token
    pub total_supply: String,
    /// Game extension reads, `null` when the contract does not expose them
    pub game_data: Option<GameExtension>,
    /// Network label
    pub network: String,
    /// Numeric chain id
    pub chain_id: u64,
    /// Value source tag
    pub provenance: Provenance,
}

/// One NFT in a collection payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NftItemData {
    /// Token id
    pub token_id: String,
    /// Token URI
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    /// Metadata document, `null` when not resolved
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// Current owner
    pub owner: String,
}

/// Unified NFT collection payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NftCollectionData {
    /// Queried wallet address
    pub wallet_address: String,
    /// Collection contract address
    pub contract_address: String,
    /// True number of tokens the wallet holds in the collection
    pub nft_count: u32,
    /// Enumerated tokens, capped at the display limit
    pub nfts: Vec<NftItemData>,
    /// Network label
    pub network: String,
    /// Value source tag
    pub provenance: Provenance,
}

/// Unified game statistics payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStatsData {
    /// Total registered players
    pub total_players: u64,
    /// Total games played
    pub total_games_played: u64,
    /// Decimal-string total rewards distributed
    pub total_rewards_distributed: String,
    /// Highest recorded score
    pub top_score: u64,
    /// Daily active users
    pub daily_active_users: u64,
    /// Tournaments held this week
    pub weekly_tournaments: u32,
    /// Value source tag
    pub provenance: Provenance,
}

/// Unified transaction verification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    /// Queried transaction hash or signature
    pub tx_hash: String,
    /// Chain the lookup ran against
    pub chain: String,
    /// Whether the transaction is confirmed on-chain
    pub confirmed: bool,
    /// Slot (Solana), `null` on EVM chains
    pub slot: Option<u64>,
    /// Unix block time (Solana), `null` on EVM chains
    pub block_time: Option<i64>,
    /// Fee in native display units (Solana), `null` on EVM chains
    pub fee: Option<f64>,
    /// Block number (EVM), `null` on Solana
    pub block_number: Option<u64>,
    /// Gas used as a decimal string (EVM), `null` on Solana
    pub gas_used: Option<String>,
    /// Effective gas price as a decimal string (EVM), `null` on Solana
    pub gas_price: Option<String>,
    /// Sender address (EVM), `null` on Solana
    pub from: Option<String>,
    /// Recipient address (EVM), `null` on Solana or for contract creation
    pub to: Option<String>,
    /// On-chain outcome: "success" or "failed"; `null` when not found
    pub status: Option<String>,
    /// Value source tag
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(value: &serde_json::Value) -> Vec<String> {
        let mut names: Vec<String> = value
            .as_object()
            .expect("payload serializes to an object")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    #[test]
    fn provenance_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Provenance::Fallback).unwrap(),
            "\"fallback\""
        );
        assert_eq!(serde_json::to_string(&Provenance::Live).unwrap(), "\"live\"");
    }

    #[test]
    fn query_result_provenance() {
        let live = QueryResult::Authoritative(1u32);
        assert_eq!(live.provenance(), Provenance::Live);
        assert!(live.reason().is_none());

        let synthetic = QueryResult::Fallback {
            data: 1u32,
            reason: "upstream unreachable".to_string(),
        };
        assert_eq!(synthetic.provenance(), Provenance::Fallback);
        assert_eq!(synthetic.reason(), Some("upstream unreachable"));
    }

    #[test]
    fn failure_envelope_has_no_data() {
        let envelope: Envelope<WalletInfoData> =
            Envelope::failure("InvalidAddressFormat", Some("bad input".to_string()));
        assert!(!envelope.success);
        assert!(envelope.data.is_none());

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["message"], "InvalidAddressFormat");
    }

    #[test]
    fn optional_payload_fields_serialize_as_null() {
        // The JSON field set must not depend on which options are populated
        let with_game = TokenInfoData {
            wallet_address: "0xw".to_string(),
            contract_address: "0xc".to_string(),
            token_balance: "1".to_string(),
            token_symbol: "GTT".to_string(),
            native_balance: "1".to_string(),
            total_supply: "1000000".to_string(),
            game_data: Some(GameExtension {
                reward_points: "10".to_string(),
                player_level: "2".to_string(),
            }),
            network: "Polygon".to_string(),
            chain_id: 137,
            provenance: Provenance::Live,
        };
        let without_game = TokenInfoData {
            game_data: None,
            provenance: Provenance::Fallback,
            ..with_game.clone()
        };

        let a = serde_json::to_value(&with_game).unwrap();
        let b = serde_json::to_value(&without_game).unwrap();
        assert_eq!(field_names(&a), field_names(&b));
        assert!(b["gameData"].is_null());
    }

    #[test]
    fn transaction_payload_field_set_is_chain_independent() {
        let solana = TransactionData {
            tx_hash: "sig".to_string(),
            chain: "Solana".to_string(),
            confirmed: true,
            slot: Some(123),
            block_time: Some(1_700_000_000),
            fee: Some(0.000_005),
            block_number: None,
            gas_used: None,
            gas_price: None,
            from: None,
            to: None,
            status: Some("success".to_string()),
            provenance: Provenance::Live,
        };
        let evm = TransactionData {
            tx_hash: "0xabc".to_string(),
            chain: "Polygon".to_string(),
            confirmed: true,
            slot: None,
            block_time: None,
            fee: None,
            block_number: Some(50_000_000),
            gas_used: Some("21000".to_string()),
            gas_price: Some("30".to_string()),
            from: Some("0xf".to_string()),
            to: Some("0xt".to_string()),
            status: Some("success".to_string()),
            provenance: Provenance::Fallback,
        };

        let a = serde_json::to_value(&solana).unwrap();
        let b = serde_json::to_value(&evm).unwrap();
        assert_eq!(field_names(&a), field_names(&b));
    }
}
