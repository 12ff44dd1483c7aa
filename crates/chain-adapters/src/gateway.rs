// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query gateway: validation, dispatch, and degradation policy
//!
//! Every capability call runs the same pipeline: validate inputs, pick the
//! adapter for the requested chain, run it under the dispatch timeout, and
//! normalize the result. Recoverable upstream failures degrade to the
//! fallback generator; validation failures and programmer errors never do.

use std::collections::HashMap;
use std::time::Duration;

use adapter_core::{
    AdapterError, ChainAdapter, Envelope, GameStatsData, HealthStatus, NftCollectionData,
    TokenInfoData, TransactionData, WalletInfoData,
};
use shared_types::{Chain, ChainParseError, EvmNetwork, ValidationError, validate};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::fallback::FallbackGenerator;
use crate::normalize;

/// Gateway dispatch configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upper bound on any single live dispatch, in seconds
    pub dispatch_timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            dispatch_timeout_seconds: 10,
        }
    }
}

/// Errors surfaced to the HTTP layer instead of a payload
///
/// Recoverable upstream trouble never appears here; it is absorbed by the
/// fallback path.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Input failed validation; no adapter was invoked
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    /// The requested chain is not recognized
    #[error("{0}")]
    UnsupportedChain(#[from] ChainParseError),

    /// The request is structurally incomplete
    #[error("{0}")]
    InvalidRequest(String),

    /// A non-recoverable internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

/// The query gateway, generic over its Solana and EVM adapters
#[derive(Debug)]
pub struct QueryGateway<S, E> {
    solana: Option<S>,
    polygon: Option<E>,
    ethereum: Option<E>,
    fallback: FallbackGenerator,
    config: GatewayConfig,
}

impl<S, E> Default for QueryGateway<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> QueryGateway<S, E> {
    /// Create a gateway with no adapters; every capability degrades
    pub fn new() -> Self {
        Self {
            solana: None,
            polygon: None,
            ethereum: None,
            fallback: FallbackGenerator::new(),
            config: GatewayConfig::default(),
        }
    }

    /// Create a gateway with the specified adapters
    pub fn with_adapters(
        solana: Option<S>,
        polygon: Option<E>,
        ethereum: Option<E>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            solana,
            polygon,
            ethereum,
            fallback: FallbackGenerator::new(),
            config,
        }
    }

    /// Number of configured adapters
    pub fn adapter_count(&self) -> usize {
        usize::from(self.solana.is_some())
            + usize::from(self.polygon.is_some())
            + usize::from(self.ethereum.is_some())
    }

    fn evm_adapter(&self, network: EvmNetwork) -> Option<&E> {
        match network {
            EvmNetwork::Polygon => self.polygon.as_ref(),
            EvmNetwork::Ethereum => self.ethereum.as_ref(),
        }
    }
}

/// Reason recorded when a chain has no configured adapter
fn no_adapter_reason(chain: Chain) -> String {
    format!("no adapter configured for {}", chain.name())
}

impl<S: ChainAdapter, E: ChainAdapter> QueryGateway<S, E> {
    /// Run one live dispatch under the timeout
    ///
    /// `Ok(Err(reason))` means the live path is unusable and the caller
    /// should degrade; `Err` means the request itself is broken.
    async fn run_live<T>(
        &self,
        adapter_name: &'static str,
        fut: impl Future<Output = Result<T, AdapterError>>,
    ) -> Result<Result<T, String>, GatewayError> {
        let budget = Duration::from_secs(self.config.dispatch_timeout_seconds);
        match timeout(budget, fut).await {
            Ok(Ok(native)) => Ok(Ok(native)),
            Ok(Err(error)) if error.is_recoverable() => {
                warn!(adapter = adapter_name, %error, "live path failed, degrading to fallback");
                Ok(Err(error.to_string()))
            }
            Ok(Err(error)) => Err(GatewayError::Internal(error.to_string())),
            Err(_) => {
                warn!(adapter = adapter_name, "live path timed out, degrading to fallback");
                Ok(Err(format!(
                    "live query timed out after {}s",
                    self.config.dispatch_timeout_seconds
                )))
            }
        }
    }

    /// Wallet info for any supported chain
    pub async fn wallet_info(
        &self,
        chain: Chain,
        wallet: &str,
    ) -> Result<Envelope<WalletInfoData>, GatewayError> {
        let address = validate(wallet, chain.family())?;

        let outcome = match chain {
            Chain::Solana => match &self.solana {
                Some(adapter) => {
                    self.run_live(adapter.name(), adapter.wallet_info(&address))
                        .await?
                }
                None => Err(no_adapter_reason(chain)),
            },
            Chain::Evm(network) => match self.evm_adapter(network) {
                Some(adapter) => {
                    self.run_live(adapter.name(), adapter.wallet_info(&address))
                        .await?
                }
                None => Err(no_adapter_reason(chain)),
            },
        };

        Ok(match outcome {
            Ok(native) => {
                info!(chain = chain.name(), "serving live wallet info");
                Envelope::success(normalize::wallet_info(native), None)
            }
            Err(reason) => {
                debug!(chain = chain.name(), reason, "serving fallback wallet info");
                Envelope::success(self.fallback.wallet_info(wallet, chain), Some(reason))
            }
        })
    }

    /// Fungible token info on an EVM network
    pub async fn token_info(
        &self,
        network: EvmNetwork,
        wallet: &str,
        contract: &str,
    ) -> Result<Envelope<TokenInfoData>, GatewayError> {
        let wallet_address = validate(wallet, Chain::Evm(network).family())?;
        let contract_address = validate(contract, Chain::Evm(network).family())?;

        let outcome = match self.evm_adapter(network) {
            Some(adapter) => {
                self.run_live(
                    adapter.name(),
                    adapter.token_info(&wallet_address, &contract_address),
                )
                .await?
            }
            None => Err(no_adapter_reason(Chain::Evm(network))),
        };

        Ok(match outcome {
            Ok(native) => {
                info!(network = network.name(), "serving live token info");
                Envelope::success(normalize::token_info(native), None)
            }
            Err(reason) => {
                debug!(network = network.name(), reason, "serving fallback token info");
                Envelope::success(
                    self.fallback.token_info(wallet, contract, network),
                    Some(reason),
                )
            }
        })
    }

    /// NFT holdings of a wallet within a collection, on an EVM network
    pub async fn nft_collection(
        &self,
        network: EvmNetwork,
        wallet: &str,
        contract: &str,
    ) -> Result<Envelope<NftCollectionData>, GatewayError> {
        let wallet_address = validate(wallet, Chain::Evm(network).family())?;
        let contract_address = validate(contract, Chain::Evm(network).family())?;

        let outcome = match self.evm_adapter(network) {
            Some(adapter) => {
                self.run_live(
                    adapter.name(),
                    adapter.nft_collection(&wallet_address, &contract_address),
                )
                .await?
            }
            None => Err(no_adapter_reason(Chain::Evm(network))),
        };

        Ok(match outcome {
            Ok(native) => {
                info!(network = network.name(), "serving live NFT collection");
                let (data, message) = normalize::nft_collection(native);
                Envelope::success(data, Some(message))
            }
            Err(reason) => {
                debug!(network = network.name(), reason, "serving fallback NFT collection");
                let data = self.fallback.nft_collection(wallet, contract, network);
                let shown = normalize::nft_display_message(u64::from(data.nft_count), data.nfts.len());
                Envelope::success(data, Some(format!("{shown}; {reason}")))
            }
        })
    }

    /// Aggregate game statistics
    ///
    /// No chain holds this aggregate, so the payload is always synthetic.
    pub fn game_stats(&self) -> Envelope<GameStatsData> {
        Envelope::success(self.fallback.game_stats(), None)
    }

    /// Verify a transaction hash on the named chain
    pub async fn verify_transaction(
        &self,
        chain: &str,
        tx_hash: &str,
    ) -> Result<Envelope<TransactionData>, GatewayError> {
        if tx_hash.trim().is_empty() || chain.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Transaction hash and chain are required".to_string(),
            ));
        }

        let chain: Chain = chain.parse()?;

        let outcome = match chain {
            Chain::Solana => match &self.solana {
                Some(adapter) => {
                    self.run_live(adapter.name(), adapter.verify_transaction(tx_hash))
                        .await?
                }
                None => Err(no_adapter_reason(chain)),
            },
            Chain::Evm(network) => match self.evm_adapter(network) {
                Some(adapter) => {
                    self.run_live(adapter.name(), adapter.verify_transaction(tx_hash))
                        .await?
                }
                None => Err(no_adapter_reason(chain)),
            },
        };

        Ok(match outcome {
            Ok(native) => {
                info!(chain = chain.name(), "serving live transaction status");
                let (data, message) = normalize::transaction(tx_hash, chain, native);
                Envelope::success(data, message)
            }
            Err(reason) => {
                debug!(chain = chain.name(), reason, "serving fallback transaction status");
                Envelope::success(self.fallback.transaction(tx_hash, chain), Some(reason))
            }
        })
    }

    /// Health of every configured adapter, checked concurrently
    pub async fn health(&self) -> HashMap<String, HealthStatus> {
        async fn check<A: ChainAdapter>(adapter: Option<&A>) -> Option<(String, HealthStatus)> {
            let adapter = adapter?;
            let status = match adapter.health_check().await {
                Ok(status) => status,
                Err(error) => HealthStatus::Down {
                    reason: format!("health check failed: {error}"),
                },
            };
            Some((adapter.name().to_string(), status))
        }

        let (solana, polygon, ethereum) = tokio::join!(
            check(self.solana.as_ref()),
            check(self.polygon.as_ref()),
            check(self.ethereum.as_ref()),
        );

        [solana, polygon, ethereum].into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use adapter_core::Provenance;

    use super::*;
    use crate::{EvmAdapter, SolanaAdapter};

    const SOLANA_WALLET: &str = "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK";
    const EVM_WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1";
    const EVM_CONTRACT: &str = "0x1234567890123456789012345678901234567890";

    fn empty_gateway() -> QueryGateway<SolanaAdapter, EvmAdapter> {
        QueryGateway::new()
    }

    #[tokio::test]
    async fn empty_gateway_serves_fallback_wallet_info() {
        let gateway = empty_gateway();
        let envelope = gateway
            .wallet_info(Chain::Solana, SOLANA_WALLET)
            .await
            .expect("fallback always succeeds");

        assert!(envelope.success);
        let data = envelope.data.expect("fallback payload");
        assert_eq!(data.provenance, Provenance::Fallback);
        assert!(data.native_balance >= 0.0);
        assert!(envelope.message.is_some());
    }

    #[tokio::test]
    async fn invalid_address_is_rejected_without_dispatch() {
        let gateway = empty_gateway();
        let error = gateway
            .wallet_info(Chain::Solana, "not-base58!")
            .await
            .expect_err("validation must reject");

        assert_eq!(error.to_string(), "InvalidAddressFormat");
    }

    #[tokio::test]
    async fn token_info_rejects_bad_contract_address() {
        let gateway = empty_gateway();
        let error = gateway
            .token_info(EvmNetwork::Polygon, EVM_WALLET, "0xZZZ")
            .await
            .expect_err("validation must reject");

        assert!(matches!(error, GatewayError::Rejected(_)));
    }

    #[tokio::test]
    async fn unknown_chain_is_unsupported() {
        let gateway = empty_gateway();
        let error = gateway
            .verify_transaction("bitcoin", "somehash")
            .await
            .expect_err("chain must be rejected");

        assert!(error.to_string().contains("Unsupported chain"));
        assert!(error.to_string().contains("\"solana\""));
    }

    #[tokio::test]
    async fn empty_hash_is_invalid() {
        let gateway = empty_gateway();
        let error = gateway
            .verify_transaction("solana", "  ")
            .await
            .expect_err("empty hash must be rejected");

        assert!(matches!(error, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn fallback_nft_message_reports_cap() {
        let gateway = empty_gateway();
        let envelope = gateway
            .nft_collection(EvmNetwork::Polygon, EVM_WALLET, EVM_CONTRACT)
            .await
            .expect("fallback always succeeds");

        let message = envelope.message.expect("display message present");
        assert!(message.starts_with("Showing"));
        let data = envelope.data.expect("fallback payload");
        if data.nft_count > 10 {
            assert!(message.contains(&format!("first 10 of {}", data.nft_count)));
        }
    }

    #[test]
    fn game_stats_are_always_fallback() {
        let gateway = empty_gateway();
        let envelope = gateway.game_stats();
        assert!(envelope.success);
        assert_eq!(
            envelope.data.expect("stats payload").provenance,
            Provenance::Fallback
        );
    }

    #[tokio::test]
    async fn health_of_empty_gateway_is_empty() {
        let gateway = empty_gateway();
        assert!(gateway.health().await.is_empty());
        assert_eq!(gateway.adapter_count(), 0);
    }
}
