// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain adapter contract and shared result types
//!
//! This crate provides the common abstractions the gateway dispatches over:
//!
//! - **`ChainAdapter` Trait**: one capability contract implemented per chain
//!   family, with async support via `impl Future`
//! - **Native Result Types**: chain-shaped query results as tagged variants,
//!   normalized later by the gateway
//! - **Unified Schema**: the stable per-capability response payloads and the
//!   provenance-tagged envelope consumers receive
//! - **Error Taxonomy**: `AdapterError` distinguishing recoverable upstream
//!   failures from programmer errors
//! - **Health Check System**: standardized health status reporting across
//!   adapters

use shared_types::{Address, ChainFamily};
use thiserror::Error;

pub mod health;
pub mod native;
pub mod schema;

pub use health::*;
pub use native::*;
pub use schema::*;

/// The capability contract implemented by each chain family's adapter
///
/// Adapters translate these unified operations into chain-specific RPC calls
/// and return chain-native results; they never substitute synthetic values,
/// since degradation is the gateway's decision. "No data" outcomes (a transaction
/// that does not exist) are successful results, not errors.
pub trait ChainAdapter: Send + Sync {
    /// Native balance, recent activity, and token holdings for a wallet
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream query fails or the address was
    /// validated for a different family.
    fn wallet_info(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<NativeWalletInfo, AdapterError>> + Send;

    /// Fungible token balance and metadata for a wallet against one contract
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream query or ABI decoding fails, or if
    /// either address was validated for a different family.
    fn token_info(
        &self,
        wallet: &Address,
        contract: &Address,
    ) -> impl Future<Output = Result<NativeTokenInfo, AdapterError>> + Send;

    /// NFT holdings of a wallet within one collection contract
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream query or ABI decoding fails, or if
    /// either address was validated for a different family.
    fn nft_collection(
        &self,
        wallet: &Address,
        contract: &Address,
    ) -> impl Future<Output = Result<NativeNftCollection, AdapterError>> + Send;

    /// Confirmation status of a transaction hash
    ///
    /// A transaction that cannot be found is a successful not-found result,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the upstream query itself fails.
    fn verify_transaction(
        &self,
        tx_hash: &str,
    ) -> impl Future<Output = Result<NativeTransaction, AdapterError>> + Send;

    /// Check the health of this adapter's upstream endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the health check cannot be performed.
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, AdapterError>> + Send;

    /// Get the name/identifier of this adapter
    fn name(&self) -> &'static str;

    /// The chain family this adapter serves
    fn family(&self) -> ChainFamily;
}

/// Errors that can occur during an adapter call
#[derive(Debug, Error)]
pub enum AdapterError {
    /// An address validated for another family reached this adapter
    ///
    /// Validation runs before dispatch, so this is a programmer error and is
    /// never converted into a fallback.
    #[error("address {address} was validated for {actual}, adapter serves {expected}")]
    AddressMismatch {
        /// Family the adapter serves
        expected: ChainFamily,
        /// Family the address was validated for
        actual: ChainFamily,
        /// The offending address
        address: String,
    },

    /// The upstream endpoint could not be reached (network error or timeout)
    #[error("upstream unavailable: {message}")]
    UpstreamUnavailable {
        /// What went wrong
        message: String,
    },

    /// The upstream endpoint returned an explicit error
    #[error("upstream rejected the request: {message}")]
    UpstreamRejected {
        /// JSON-RPC error code, if the upstream supplied one
        code: Option<i64>,
        /// Error message from the upstream
        message: String,
    },
}

impl AdapterError {
    /// Whether the gateway may degrade to the fallback path for this error
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::UpstreamRejected { .. }
        )
    }

    /// Build the mismatch error for an address from the wrong family
    pub fn mismatch(expected: ChainFamily, address: &Address) -> Self {
        Self::AddressMismatch {
            expected,
            actual: address.family(),
            address: address.to_string(),
        }
    }
}
