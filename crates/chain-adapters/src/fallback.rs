// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Synthetic fallback payloads
//!
//! When the live path for a capability is unavailable the gateway serves
//! plausible synthetic data instead of an error. Payloads produced here are
//! schema-identical to their live counterparts; the only externally visible
//! difference is the `fallback` provenance tag.

use adapter_core::{
    GameExtension, GameStatsData, NftCollectionData, NftItemData, Provenance, TokenHolding,
    TransactionData, WalletInfoData,
};
use alloy_primitives::hex;
use rand::Rng;
use serde_json::json;
use shared_types::{Chain, EvmNetwork};

use crate::normalize::{NFT_DISPLAY_LIMIT, network_label};

/// Generator of schema-compatible synthetic payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

/// Round to `places` decimal places
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A random well-formed EVM address string
fn random_evm_address<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 20];
    rng.fill(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

impl FallbackGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self
    }

    /// Synthetic wallet info for any chain
    pub fn wallet_info(&self, wallet_address: &str, chain: Chain) -> WalletInfoData {
        let mut rng = rand::thread_rng();

        WalletInfoData {
            wallet_address: wallet_address.to_string(),
            native_balance: round_to(rng.gen_range(0.0..10.0), 4),
            tokens: Vec::<TokenHolding>::new(),
            recent_transactions: rng.gen_range(0..=5),
            network: network_label(chain).to_string(),
            provenance: Provenance::Fallback,
        }
    }

    /// Synthetic token info for an EVM network
    pub fn token_info(
        &self,
        wallet_address: &str,
        contract_address: &str,
        network: EvmNetwork,
    ) -> adapter_core::TokenInfoData {
        let mut rng = rand::thread_rng();

        adapter_core::TokenInfoData {
            wallet_address: wallet_address.to_string(),
            contract_address: contract_address.to_string(),
            token_balance: format!("{:.2}", round_to(rng.gen_range(0.0..10_000.0), 2)),
            token_symbol: "GTT".to_string(),
            native_balance: format!("{:.4}", round_to(rng.gen_range(0.0..10.0), 4)),
            total_supply: "1000000".to_string(),
            game_data: Some(GameExtension {
                reward_points: rng.gen_range(0..50_000u32).to_string(),
                player_level: rng.gen_range(1..=20u32).to_string(),
            }),
            network: network.name().to_string(),
            chain_id: network.chain_id(),
            provenance: Provenance::Fallback,
        }
    }

    /// Synthetic NFT collection for an EVM network
    ///
    /// The reported count may exceed the number of items, mirroring the
    /// display cap applied to live collections.
    pub fn nft_collection(
        &self,
        wallet_address: &str,
        contract_address: &str,
        network: EvmNetwork,
    ) -> NftCollectionData {
        let mut rng = rand::thread_rng();

        let count: u32 = rng.gen_range(1..=20);
        let shown = u64::from(count).min(NFT_DISPLAY_LIMIT);

        let nfts = (0..shown)
            .map(|i| {
                let token_id = 1000 + i;
                let rarity = ["Common", "Rare", "Epic", "Legendary"][rng.gen_range(0..4)];
                NftItemData {
                    token_id: token_id.to_string(),
                    token_uri: format!("ipfs://QmExample{i}/metadata.json"),
                    metadata: json!({
                        "name": format!("GameTip NFT #{token_id}"),
                        "description": "Rare gaming collectible",
                        "image": format!("ipfs://QmExample{i}/image.png"),
                        "attributes": [
                            { "trait_type": "Rarity", "value": rarity },
                            { "trait_type": "Level", "value": rng.gen_range(0..100) },
                            { "trait_type": "Power", "value": rng.gen_range(0..1000) },
                        ],
                    }),
                    owner: wallet_address.to_string(),
                }
            })
            .collect();

        NftCollectionData {
            wallet_address: wallet_address.to_string(),
            contract_address: contract_address.to_string(),
            nft_count: count,
            nfts,
            network: network.name().to_string(),
            provenance: Provenance::Fallback,
        }
    }

    /// Synthetic aggregate game statistics
    pub fn game_stats(&self) -> GameStatsData {
        let mut rng = rand::thread_rng();

        GameStatsData {
            total_players: rng.gen_range(0..10_000),
            total_games_played: rng.gen_range(0..50_000),
            total_rewards_distributed: format!(
                "{:.2}",
                round_to(rng.gen_range(0.0..1_000_000.0), 2)
            ),
            top_score: rng.gen_range(0..100_000),
            daily_active_users: rng.gen_range(0..1_000),
            weekly_tournaments: rng.gen_range(0..10),
            provenance: Provenance::Fallback,
        }
    }

    /// Synthetic transaction verification result
    pub fn transaction(&self, tx_hash: &str, chain: Chain) -> TransactionData {
        let mut rng = rand::thread_rng();

        match chain {
            Chain::Solana => TransactionData {
                tx_hash: tx_hash.to_string(),
                chain: "solana".to_string(),
                confirmed: rng.gen_bool(0.7),
                slot: Some(rng.gen_range(0..1_000_000)),
                block_time: Some(chrono::Utc::now().timestamp()),
                fee: Some(round_to(rng.gen_range(0.0..0.01), 6)),
                block_number: None,
                gas_used: None,
                gas_price: None,
                from: None,
                to: None,
                status: Some("success".to_string()),
                provenance: Provenance::Fallback,
            },
            Chain::Evm(network) => TransactionData {
                tx_hash: tx_hash.to_string(),
                chain: network.name().to_lowercase(),
                confirmed: rng.gen_bool(0.8),
                slot: None,
                block_time: None,
                fee: None,
                block_number: Some(rng.gen_range(0..50_000_000)),
                gas_used: Some(rng.gen_range(0..100_000u32).to_string()),
                gas_price: Some(format!("{:.2}", round_to(rng.gen_range(0.0..100.0), 2))),
                from: Some(random_evm_address(&mut rng)),
                to: Some(random_evm_address(&mut rng)),
                status: Some("success".to_string()),
                provenance: Provenance::Fallback,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_info_is_tagged_and_non_negative() {
        let generator = FallbackGenerator::new();
        for _ in 0..50 {
            let data = generator.wallet_info("DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK", Chain::Solana);
            assert_eq!(data.provenance, Provenance::Fallback);
            assert!(data.native_balance >= 0.0);
            assert!(data.native_balance < 10.0);
            assert!(data.recent_transactions <= 5);
        }
    }

    #[test]
    fn token_info_stays_in_documented_ranges() {
        let generator = FallbackGenerator::new();
        for _ in 0..50 {
            let data = generator.token_info("0xw", "0xc", EvmNetwork::Polygon);
            assert_eq!(data.token_symbol, "GTT");
            assert_eq!(data.total_supply, "1000000");
            assert_eq!(data.chain_id, 137);

            let game = data.game_data.expect("fallback always carries game data");
            let level: u32 = game.player_level.parse().expect("numeric level");
            assert!((1..=20).contains(&level));
            let points: u32 = game.reward_points.parse().expect("numeric points");
            assert!(points < 50_000);
        }
    }

    #[test]
    fn nft_collection_respects_display_cap() {
        let generator = FallbackGenerator::new();
        for _ in 0..100 {
            let data = generator.nft_collection("0xw", "0xc", EvmNetwork::Polygon);
            assert!((1..=20).contains(&data.nft_count));
            assert!(data.nfts.len() <= 10);
            assert_eq!(
                data.nfts.len() as u64,
                u64::from(data.nft_count).min(NFT_DISPLAY_LIMIT)
            );
            if let Some(first) = data.nfts.first() {
                assert_eq!(first.token_id, "1000");
                assert_eq!(first.owner, "0xw");
            }
        }
    }

    #[test]
    fn evm_transaction_shape() {
        let generator = FallbackGenerator::new();
        let data = generator.transaction("0xabc", Chain::Evm(EvmNetwork::Ethereum));
        assert_eq!(data.chain, "ethereum");
        assert!(data.block_number.is_some());
        assert!(data.slot.is_none());
        assert_eq!(data.provenance, Provenance::Fallback);
    }

    #[test]
    fn solana_transaction_shape() {
        let generator = FallbackGenerator::new();
        let data = generator.transaction("sig", Chain::Solana);
        assert_eq!(data.chain, "solana");
        assert!(data.slot.is_some());
        assert!(data.block_number.is_none());
    }
}
