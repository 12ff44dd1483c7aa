// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain-native query results
//!
//! Adapters return results in the shape their chain reports them: lamports
//! and parsed SPL token accounts on Solana, wei and ABI words on EVM chains.
//! Each result is a tagged variant so the normalizer can map it onto the
//! unified schema without the adapters sharing any base state.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use shared_types::{EvmAddress, EvmNetwork};

/// Wallet-level read, tagged by chain family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeWalletInfo {
    /// Solana wallet read
    Solana(SolanaWalletInfo),
    /// EVM wallet read
    Evm(EvmWalletInfo),
}

/// Raw Solana wallet data at `confirmed` commitment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolanaWalletInfo {
    /// Wallet address in base58
    pub address: String,
    /// Native balance in lamports
    pub lamports: u64,
    /// Number of signatures in the recent-activity window
    pub recent_signatures: u32,
    /// SPL token accounts owned by the wallet
    pub token_accounts: Vec<SplTokenAccount>,
}

/// One parsed SPL token account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplTokenAccount {
    /// Mint address of the token
    pub mint: String,
    /// UI amount as reported by the RPC (already decimal-adjusted)
    pub ui_amount: f64,
    /// Token decimals
    pub decimals: u8,
}

/// Raw EVM wallet data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmWalletInfo {
    /// Wallet address
    pub address: EvmAddress,
    /// Native balance in wei
    pub balance_wei: U256,
    /// Transaction count (nonce)
    pub tx_count: u64,
    /// Network the read was performed against
    pub network: EvmNetwork,
}

/// Token-level read, tagged by chain family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeTokenInfo {
    /// EVM ERC-20 read with optional game extensions
    Evm(EvmTokenInfo),
}

/// Raw ERC-20 contract reads for one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmTokenInfo {
    /// Wallet the balance was read for
    pub wallet: EvmAddress,
    /// Token contract address
    pub contract: EvmAddress,
    /// Raw token balance
    pub balance: U256,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
    /// Wallet's native balance in wei
    pub native_balance_wei: U256,
    /// Raw total supply
    pub total_supply: U256,
    /// Reward points, if the contract exposes `getRewardPoints`
    pub reward_points: Option<U256>,
    /// Player level, if the contract exposes `getPlayerLevel`
    pub player_level: Option<U256>,
    /// Network the reads were performed against
    pub network: EvmNetwork,
}

/// NFT-collection read, tagged by chain family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeNftCollection {
    /// EVM ERC-721 enumerable read
    Evm(EvmNftCollection),
}

/// Raw ERC-721 holdings of one wallet within one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmNftCollection {
    /// Owning wallet
    pub wallet: EvmAddress,
    /// Collection contract address
    pub contract: EvmAddress,
    /// True number of tokens the wallet holds in the collection
    pub total: u64,
    /// Enumerated tokens, at most the display cap's worth
    pub items: Vec<EvmNftItem>,
    /// Network the reads were performed against
    pub network: EvmNetwork,
}

/// One enumerated ERC-721 token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmNftItem {
    /// Token id
    pub token_id: U256,
    /// Token URI as reported by the contract
    pub token_uri: String,
    /// Current owner as reported by the contract
    pub owner: EvmAddress,
}

/// Transaction lookup result, tagged by chain family
///
/// `None` payloads mean the chain was queried successfully and the
/// transaction does not exist, which is an authoritative negative rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeTransaction {
    /// Solana transaction lookup
    Solana(Option<SolanaTransactionInfo>),
    /// EVM receipt lookup
    Evm(Option<EvmReceiptInfo>),
}

/// A confirmed Solana transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolanaTransactionInfo {
    /// Slot the transaction was processed in
    pub slot: u64,
    /// Unix block time, if the RPC reported one
    pub block_time: Option<i64>,
    /// Fee paid in lamports
    pub fee_lamports: u64,
    /// Whether the transaction failed on-chain
    pub failed: bool,
}

/// A mined EVM transaction receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmReceiptInfo {
    /// Block number the transaction was mined in
    pub block_number: u64,
    /// Gas used by the transaction
    pub gas_used: U256,
    /// Effective gas price, if the RPC reported one
    pub effective_gas_price: Option<U256>,
    /// Whether the transaction succeeded (receipt status 0x1)
    pub succeeded: bool,
    /// Sender address
    pub from: EvmAddress,
    /// Recipient address, absent for contract creation
    pub to: Option<EvmAddress>,
}
