// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain-native to unified-schema mapping
//!
//! Pure functions; no I/O. Unit conversion (lamports to SOL, wei to decimal
//! strings) and the NFT display cap live here so both adapters and the
//! fallback generator agree on the wire shape.

use adapter_core::{
    GameExtension, NativeNftCollection, NativeTokenInfo, NativeTransaction, NativeWalletInfo,
    NftCollectionData, NftItemData, Provenance, TokenHolding, TokenInfoData, TransactionData,
    WalletInfoData,
};
use alloy_primitives::U256;
use serde_json::Value;
use shared_types::Chain;

/// Maximum number of NFTs enumerated and returned per collection read
pub const NFT_DISPLAY_LIMIT: u64 = 10;

/// Lamports per SOL
const LAMPORTS_PER_SOL: f64 = 1e9;

/// Wei decimals for native EVM balances
const NATIVE_DECIMALS: u8 = 18;

/// Gwei decimals for gas prices
const GWEI_DECIMALS: u8 = 9;

/// Human-readable network label for a chain
pub fn network_label(chain: Chain) -> &'static str {
    match chain {
        Chain::Solana => "Solana Mainnet",
        Chain::Evm(network) => network.name(),
    }
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let lamports = lamports as f64;
    lamports / LAMPORTS_PER_SOL
}

/// Render a raw integer amount as a decimal string with the given decimals
///
/// Trailing fractional zeros are trimmed; whole values render without a
/// fractional part.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let divisor = U256::from(10u8).pow(U256::from(decimals));
    let integer = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return integer.to_string();
    }

    let fraction = format!("{remainder:0>width$}", width = usize::from(decimals));
    let fraction = fraction.trim_end_matches('0');
    format!("{integer}.{fraction}")
}

/// Display message accompanying an NFT collection payload
pub fn nft_display_message(total: u64, shown: usize) -> String {
    if total > NFT_DISPLAY_LIMIT {
        format!("Showing first {NFT_DISPLAY_LIMIT} of {total} NFTs")
    } else {
        format!("Showing all {shown} NFTs")
    }
}

/// Map a live wallet read onto the unified payload
pub fn wallet_info(native: NativeWalletInfo) -> WalletInfoData {
    match native {
        NativeWalletInfo::Solana(info) => WalletInfoData {
            wallet_address: info.address,
            native_balance: lamports_to_sol(info.lamports),
            tokens: info
                .token_accounts
                .into_iter()
                .map(|account| TokenHolding {
                    mint: account.mint,
                    balance: account.ui_amount,
                    decimals: account.decimals,
                })
                .collect(),
            recent_transactions: info.recent_signatures,
            network: network_label(Chain::Solana).to_string(),
            provenance: Provenance::Live,
        },
        NativeWalletInfo::Evm(info) => WalletInfoData {
            wallet_address: info.address.to_string(),
            native_balance: format_units(info.balance_wei, NATIVE_DECIMALS)
                .parse()
                .unwrap_or(0.0),
            tokens: Vec::new(),
            recent_transactions: u32::try_from(info.tx_count).unwrap_or(u32::MAX),
            network: info.network.name().to_string(),
            provenance: Provenance::Live,
        },
    }
}

/// Map a live token read onto the unified payload
pub fn token_info(native: NativeTokenInfo) -> TokenInfoData {
    match native {
        NativeTokenInfo::Evm(info) => {
            // Both game views must answer for the extension to be reported
            let game_data = match (info.reward_points, info.player_level) {
                (Some(points), Some(level)) => Some(GameExtension {
                    reward_points: points.to_string(),
                    player_level: level.to_string(),
                }),
                _ => None,
            };

            TokenInfoData {
                wallet_address: info.wallet.to_string(),
                contract_address: info.contract.to_string(),
                token_balance: format_units(info.balance, info.decimals),
                token_symbol: info.symbol,
                native_balance: format_units(info.native_balance_wei, NATIVE_DECIMALS),
                total_supply: format_units(info.total_supply, info.decimals),
                game_data,
                network: info.network.name().to_string(),
                chain_id: info.network.chain_id(),
                provenance: Provenance::Live,
            }
        }
    }
}

/// Map a live NFT collection read onto the unified payload and its message
pub fn nft_collection(native: NativeNftCollection) -> (NftCollectionData, String) {
    match native {
        NativeNftCollection::Evm(info) => {
            let shown = info.items.len();
            let message = nft_display_message(info.total, shown);

            let nfts = info
                .items
                .into_iter()
                .map(|item| NftItemData {
                    token_id: item.token_id.to_string(),
                    token_uri: item.token_uri,
                    metadata: Value::Null,
                    owner: item.owner.to_string(),
                })
                .collect();

            let data = NftCollectionData {
                wallet_address: info.wallet.to_string(),
                contract_address: info.contract.to_string(),
                nft_count: u32::try_from(info.total).unwrap_or(u32::MAX),
                nfts,
                network: info.network.name().to_string(),
                provenance: Provenance::Live,
            };
            (data, message)
        }
    }
}

/// Map a live transaction lookup onto the unified payload
///
/// Returns the payload plus an optional message for the not-found case.
pub fn transaction(
    tx_hash: &str,
    chain: Chain,
    native: NativeTransaction,
) -> (TransactionData, Option<String>) {
    let chain_label = chain.name().to_lowercase();

    let empty = |chain_label: String| TransactionData {
        tx_hash: tx_hash.to_string(),
        chain: chain_label,
        confirmed: false,
        slot: None,
        block_time: None,
        fee: None,
        block_number: None,
        gas_used: None,
        gas_price: None,
        from: None,
        to: None,
        status: None,
        provenance: Provenance::Live,
    };

    match native {
        NativeTransaction::Solana(None) | NativeTransaction::Evm(None) => (
            empty(chain_label),
            Some("Transaction not found".to_string()),
        ),
        NativeTransaction::Solana(Some(info)) => (
            TransactionData {
                confirmed: true,
                slot: Some(info.slot),
                block_time: info.block_time,
                fee: Some(lamports_to_sol(info.fee_lamports)),
                status: Some(if info.failed { "failed" } else { "success" }.to_string()),
                ..empty(chain_label)
            },
            None,
        ),
        NativeTransaction::Evm(Some(info)) => (
            TransactionData {
                confirmed: true,
                block_number: Some(info.block_number),
                gas_used: Some(info.gas_used.to_string()),
                gas_price: info
                    .effective_gas_price
                    .map(|price| format_units(price, GWEI_DECIMALS)),
                from: Some(info.from.to_string()),
                to: info.to.map(|to| to.to_string()),
                status: Some(if info.succeeded { "success" } else { "failed" }.to_string()),
                ..empty(chain_label)
            },
            None,
        ),
    }
}
