// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the chain query gateway
//!
//! This crate provides common types that are shared across multiple crates
//! in the gateway workspace, avoiding circular dependencies: chain family
//! and network identifiers, validated addresses, and query capabilities.

pub mod address;
pub mod capability;
pub mod chains;

pub use address::{Address, EvmAddress, SolanaAddress, ValidationError, validate};
pub use capability::Capability;
pub use chains::{Chain, ChainFamily, ChainParseError, EvmNetwork};
