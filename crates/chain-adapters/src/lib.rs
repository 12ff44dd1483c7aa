// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain adapters and the query gateway
//!
//! This crate holds everything between the HTTP surface and the chains:
//!
//! - **Solana Adapter**: JSON-RPC reads at `confirmed` commitment
//! - **EVM Adapter**: `eth_call`-based ERC-20/ERC-721 reads plus native
//!   balance and receipt lookups
//! - **Fallback Generator**: schema-compatible synthetic payloads for when
//!   the live path is unavailable
//! - **Normalizer**: maps chain-native results onto the unified schema
//! - **Query Gateway**: validation, dispatch, timeout, and degradation
//!   policy for every capability

pub mod evm;
pub mod fallback;
pub mod gateway;
pub mod normalize;
pub mod solana;

pub use evm::{EvmAdapter, EvmConfig, EvmError};
pub use fallback::FallbackGenerator;
pub use gateway::{GatewayConfig, GatewayError, QueryGateway};
pub use solana::{SolanaAdapter, SolanaConfig, SolanaError};
