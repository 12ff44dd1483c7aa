// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `QueryGateway`
//!
//! The gateway is exercised against an in-process spy adapter that records
//! invocations, so dispatch policy (validation short-circuits, degradation,
//! provenance tagging) can be asserted without any network traffic.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use adapter_core::{
    AdapterError, ChainAdapter, EvmNftCollection, EvmNftItem, EvmTokenInfo, EvmWalletInfo,
    HealthStatus, NativeNftCollection, NativeTokenInfo, NativeTransaction, NativeWalletInfo,
    Provenance, SolanaTransactionInfo, SolanaWalletInfo,
};
use alloy_primitives::U256;
use chain_adapters::{GatewayConfig, QueryGateway};
use shared_types::{Address, Chain, ChainFamily, EvmNetwork};

const SOLANA_WALLET: &str = "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK";
const EVM_WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1";
const EVM_CONTRACT: &str = "0x1234567890123456789012345678901234567890";

/// How the spy answers capability calls
#[derive(Debug, Clone, Copy)]
enum SpyMode {
    /// Answer with fixed live data
    Live,
    /// Fail every call with a recoverable upstream error
    Unavailable,
}

/// Test adapter that counts invocations
#[derive(Debug)]
struct SpyAdapter {
    family: ChainFamily,
    mode: SpyMode,
    nft_total: u64,
    calls: Arc<AtomicUsize>,
}

impl SpyAdapter {
    fn live(family: ChainFamily) -> (Self, Arc<AtomicUsize>) {
        Self::with_mode(family, SpyMode::Live, 17)
    }

    fn unavailable(family: ChainFamily) -> (Self, Arc<AtomicUsize>) {
        Self::with_mode(family, SpyMode::Unavailable, 0)
    }

    fn with_mode(family: ChainFamily, mode: SpyMode, nft_total: u64) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                family,
                mode,
                nft_total,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn record(&self) -> Result<(), AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            SpyMode::Live => Ok(()),
            SpyMode::Unavailable => Err(AdapterError::UpstreamUnavailable {
                message: "connection refused".to_string(),
            }),
        }
    }

    fn evm_wallet() -> shared_types::EvmAddress {
        EVM_WALLET.parse().expect("valid test address")
    }
}

impl ChainAdapter for SpyAdapter {
    async fn wallet_info(&self, address: &Address) -> Result<NativeWalletInfo, AdapterError> {
        self.record()?;
        Ok(match self.family {
            ChainFamily::Solana => NativeWalletInfo::Solana(SolanaWalletInfo {
                address: address.to_string(),
                lamports: 2_000_000_000,
                recent_signatures: 2,
                token_accounts: Vec::new(),
            }),
            ChainFamily::Evm => NativeWalletInfo::Evm(EvmWalletInfo {
                address: Self::evm_wallet(),
                balance_wei: U256::from(1_000_000_000_000_000_000u64),
                tx_count: 4,
                network: EvmNetwork::Polygon,
            }),
        })
    }

    async fn token_info(
        &self,
        _wallet: &Address,
        _contract: &Address,
    ) -> Result<NativeTokenInfo, AdapterError> {
        self.record()?;
        Ok(NativeTokenInfo::Evm(EvmTokenInfo {
            wallet: Self::evm_wallet(),
            contract: EVM_CONTRACT.parse().expect("valid test address"),
            balance: U256::from(1500u32),
            symbol: "GTT".to_string(),
            decimals: 2,
            native_balance_wei: U256::from(1_000_000_000_000_000_000u64),
            total_supply: U256::from(100_000_000u32),
            reward_points: Some(U256::from(777u32)),
            player_level: Some(U256::from(9u8)),
            network: EvmNetwork::Polygon,
        }))
    }

    async fn nft_collection(
        &self,
        _wallet: &Address,
        _contract: &Address,
    ) -> Result<NativeNftCollection, AdapterError> {
        self.record()?;
        let items = (0..self.nft_total.min(10))
            .map(|i| EvmNftItem {
                token_id: U256::from(1000 + i),
                token_uri: format!("ipfs://Qm{i}/metadata.json"),
                owner: Self::evm_wallet(),
            })
            .collect();
        Ok(NativeNftCollection::Evm(EvmNftCollection {
            wallet: Self::evm_wallet(),
            contract: EVM_CONTRACT.parse().expect("valid test address"),
            total: self.nft_total,
            items,
            network: EvmNetwork::Polygon,
        }))
    }

    async fn verify_transaction(&self, _tx_hash: &str) -> Result<NativeTransaction, AdapterError> {
        self.record()?;
        Ok(NativeTransaction::Solana(Some(SolanaTransactionInfo {
            slot: 123,
            block_time: Some(1_700_000_000),
            fee_lamports: 5000,
            failed: false,
        })))
    }

    async fn health_check(&self) -> Result<HealthStatus, AdapterError> {
        Ok(match self.mode {
            SpyMode::Live => HealthStatus::Up,
            SpyMode::Unavailable => HealthStatus::Down {
                reason: "connection refused".to_string(),
            },
        })
    }

    fn name(&self) -> &'static str {
        match self.family {
            ChainFamily::Solana => "solana",
            ChainFamily::Evm => "polygon",
        }
    }

    fn family(&self) -> ChainFamily {
        self.family
    }
}

fn gateway_with_solana(adapter: SpyAdapter) -> QueryGateway<SpyAdapter, SpyAdapter> {
    QueryGateway::with_adapters(Some(adapter), None, None, GatewayConfig::default())
}

fn gateway_with_polygon(adapter: SpyAdapter) -> QueryGateway<SpyAdapter, SpyAdapter> {
    QueryGateway::with_adapters(None, Some(adapter), None, GatewayConfig::default())
}

/// JSON field names of an envelope's data payload
fn payload_fields(envelope_json: &serde_json::Value) -> Vec<String> {
    let mut fields: Vec<String> = envelope_json["data"]
        .as_object()
        .expect("data payload is an object")
        .keys()
        .cloned()
        .collect();
    fields.sort();
    fields
}

#[tokio::test]
async fn invalid_address_never_reaches_the_adapter() {
    let (spy, calls) = SpyAdapter::live(ChainFamily::Solana);
    let gateway = gateway_with_solana(spy);

    let error = gateway
        .wallet_info(Chain::Solana, "definitely-not-an-address!")
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "InvalidAddressFormat");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_contract_never_reaches_the_adapter() {
    let (spy, calls) = SpyAdapter::live(ChainFamily::Evm);
    let gateway = gateway_with_polygon(spy);

    let error = gateway
        .token_info(EvmNetwork::Polygon, EVM_WALLET, "0xZZZZ")
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "InvalidAddressFormat");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn live_wallet_info_is_tagged_live() {
    let (spy, calls) = SpyAdapter::live(ChainFamily::Solana);
    let gateway = gateway_with_solana(spy);

    let envelope = gateway.wallet_info(Chain::Solana, SOLANA_WALLET).await.unwrap();

    assert!(envelope.success);
    assert!(envelope.message.is_none());
    let data = envelope.data.unwrap();
    assert_eq!(data.provenance, Provenance::Live);
    assert!((data.native_balance - 2.0).abs() < f64::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unavailable_adapter_degrades_to_fallback() {
    let (spy, calls) = SpyAdapter::unavailable(ChainFamily::Solana);
    let gateway = gateway_with_solana(spy);

    let envelope = gateway.wallet_info(Chain::Solana, SOLANA_WALLET).await.unwrap();

    assert!(envelope.success);
    assert!(envelope.message.is_some());
    let data = envelope.data.unwrap();
    assert_eq!(data.provenance, Provenance::Fallback);
    assert!(data.native_balance >= 0.0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fallback_and_live_payloads_share_a_field_set() {
    let (live_spy, _) = SpyAdapter::live(ChainFamily::Evm);
    let (down_spy, _) = SpyAdapter::unavailable(ChainFamily::Evm);

    let live = gateway_with_polygon(live_spy)
        .token_info(EvmNetwork::Polygon, EVM_WALLET, EVM_CONTRACT)
        .await
        .unwrap();
    let fallback = gateway_with_polygon(down_spy)
        .token_info(EvmNetwork::Polygon, EVM_WALLET, EVM_CONTRACT)
        .await
        .unwrap();

    let live_json = serde_json::to_value(&live).unwrap();
    let fallback_json = serde_json::to_value(&fallback).unwrap();

    assert_eq!(live_json["data"]["provenance"], "live");
    assert_eq!(fallback_json["data"]["provenance"], "fallback");
    assert_eq!(payload_fields(&live_json), payload_fields(&fallback_json));
}

#[tokio::test]
async fn nft_collection_caps_display_and_reports_true_total() {
    let (spy, _) = SpyAdapter::live(ChainFamily::Evm);
    let gateway = gateway_with_polygon(spy);

    let envelope = gateway
        .nft_collection(EvmNetwork::Polygon, EVM_WALLET, EVM_CONTRACT)
        .await
        .unwrap();

    let data = envelope.data.unwrap();
    assert_eq!(data.nft_count, 17);
    assert_eq!(data.nfts.len(), 10);
    assert_eq!(
        envelope.message.as_deref(),
        Some("Showing first 10 of 17 NFTs")
    );
}

#[tokio::test]
async fn empty_nft_collection_has_no_items() {
    let (spy, _) = SpyAdapter::with_mode(ChainFamily::Evm, SpyMode::Live, 0);
    let gateway = gateway_with_polygon(spy);

    let envelope = gateway
        .nft_collection(EvmNetwork::Polygon, EVM_WALLET, EVM_CONTRACT)
        .await
        .unwrap();

    let data = envelope.data.unwrap();
    assert_eq!(data.nft_count, 0);
    assert!(data.nfts.is_empty());
    assert_eq!(envelope.message.as_deref(), Some("Showing all 0 NFTs"));
}

#[tokio::test]
async fn verify_transaction_is_idempotent() {
    let (spy, calls) = SpyAdapter::live(ChainFamily::Solana);
    let gateway = gateway_with_solana(spy);

    let first = gateway.verify_transaction("solana", "sig").await.unwrap();
    let second = gateway.verify_transaction("solana", "sig").await.unwrap();

    // Repeated lookups of the same hash answer identically
    assert_eq!(first.data, second.data);
    assert!(first.data.unwrap().confirmed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unsupported_chain_is_rejected_before_dispatch() {
    let (spy, calls) = SpyAdapter::live(ChainFamily::Solana);
    let gateway = gateway_with_solana(spy);

    let error = gateway.verify_transaction("bitcoin", "hash").await.unwrap_err();

    assert!(error.to_string().contains("Unsupported chain"));
    assert!(error.to_string().contains("\"polygon\""));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_reports_each_configured_adapter() {
    let (solana_spy, _) = SpyAdapter::live(ChainFamily::Solana);
    let (polygon_spy, _) = SpyAdapter::unavailable(ChainFamily::Evm);
    let gateway: QueryGateway<SpyAdapter, SpyAdapter> = QueryGateway::with_adapters(
        Some(solana_spy),
        Some(polygon_spy),
        None,
        GatewayConfig::default(),
    );

    let health = gateway.health().await;
    assert_eq!(health.len(), 2);
    assert_eq!(health.get("solana"), Some(&HealthStatus::Up));
    assert!(health.get("polygon").is_some_and(HealthStatus::is_down));
}
