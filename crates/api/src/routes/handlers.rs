// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! One handler per gateway capability plus the health endpoint. Handlers
//! stay thin: resolve the chain, call the gateway, record metrics, and let
//! `ServerError` shape any failure response.

use std::time::Instant;

use adapter_core::{
    Envelope, GameStatsData, NftCollectionData, Provenance, TokenInfoData, TransactionData,
    WalletInfoData,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chain_adapters::GatewayError;
use serde::Deserialize;
use shared_types::{Capability, Chain, EvmNetwork};
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    extractors::JsonExtractor,
    metrics,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the gateway including version, environment information, and the status of every configured chain adapter.",
    responses(
        (status = 200, description = "Service health report", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check().await)
}

/// Chain selector for EVM endpoints
#[derive(Debug, Deserialize)]
pub struct ChainSelector {
    /// Chain name; defaults to polygon when absent
    pub chain: Option<String>,
}

/// Resolve an optional `?chain=` query value to an EVM network
fn resolve_evm_network(selector: &ChainSelector) -> Result<EvmNetwork, ServerError> {
    let Some(raw) = selector.chain.as_deref() else {
        return Ok(EvmNetwork::Polygon);
    };

    match raw.parse::<Chain>().map_err(GatewayError::from)? {
        Chain::Evm(network) => Ok(network),
        Chain::Solana => Err(GatewayError::InvalidRequest(
            "this endpoint serves EVM chains; use \"polygon\" or \"ethereum\"".to_string(),
        )
        .into()),
    }
}

/// Record the fallback counter when a payload carries fallback provenance
fn record_provenance(capability: Capability, chain: &str, provenance: Option<Provenance>) {
    if provenance == Some(Provenance::Fallback) {
        metrics::inc_fallback(capability, chain);
    }
}

/// Wallet info for a Solana address
#[utoipa::path(
    get,
    path = "/v1/solana/wallet/{walletAddress}",
    tag = "wallet",
    summary = "Solana wallet overview",
    description = "Returns native balance, SPL token holdings, and recent transaction count for a Solana wallet. Served live from the configured RPC endpoint when available, otherwise from schema-compatible fallback data tagged with fallback provenance.",
    params(
        ("walletAddress" = String, Path, description = "Base58-encoded Solana wallet address")
    ),
    responses(
        (status = 200, description = "Wallet info, live or fallback", body = Envelope<WalletInfoData>),
        (status = 400, description = "Invalid wallet address", body = Envelope<WalletInfoData>)
    )
)]
pub async fn wallet_info_handler(
    State(state): State<ServerState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<Envelope<WalletInfoData>>, ServerError> {
    metrics::inc_requests(Capability::WalletInfo, "solana");
    let started = Instant::now();

    let envelope = state
        .gateway()
        .wallet_info(Chain::Solana, &wallet_address)
        .await?;

    metrics::observe_dispatch_duration(Capability::WalletInfo, started.elapsed().as_secs_f64());
    record_provenance(
        Capability::WalletInfo,
        "solana",
        envelope.data.as_ref().map(|d| d.provenance),
    );
    Ok(Json(envelope))
}

/// Fungible token info for a wallet on an EVM chain
#[utoipa::path(
    get,
    path = "/v1/evm/token/{walletAddress}/{contractAddress}",
    tag = "token",
    summary = "ERC-20 token info",
    description = "Returns the wallet's token balance, the token symbol and supply, the wallet's native balance, and optional game extension reads for an ERC-20 contract. The chain query parameter selects polygon (default) or ethereum.",
    params(
        ("walletAddress" = String, Path, description = "0x-prefixed wallet address"),
        ("contractAddress" = String, Path, description = "0x-prefixed token contract address"),
        ("chain" = Option<String>, Query, description = "EVM chain name, polygon or ethereum")
    ),
    responses(
        (status = 200, description = "Token info, live or fallback", body = Envelope<TokenInfoData>),
        (status = 400, description = "Invalid address or chain", body = Envelope<TokenInfoData>)
    )
)]
pub async fn token_info_handler(
    State(state): State<ServerState>,
    Path((wallet_address, contract_address)): Path<(String, String)>,
    Query(selector): Query<ChainSelector>,
) -> Result<Json<Envelope<TokenInfoData>>, ServerError> {
    let network = resolve_evm_network(&selector)?;
    metrics::inc_requests(Capability::TokenInfo, network.name());
    let started = Instant::now();

    let envelope = state
        .gateway()
        .token_info(network, &wallet_address, &contract_address)
        .await?;

    metrics::observe_dispatch_duration(Capability::TokenInfo, started.elapsed().as_secs_f64());
    record_provenance(
        Capability::TokenInfo,
        network.name(),
        envelope.data.as_ref().map(|d| d.provenance),
    );
    Ok(Json(envelope))
}

/// NFT holdings of a wallet within one collection on an EVM chain
#[utoipa::path(
    get,
    path = "/v1/evm/nft/{walletAddress}/{contractAddress}",
    tag = "nft",
    summary = "NFT collection holdings",
    description = "Enumerates the NFTs a wallet holds within one ERC-721 collection, capped at ten items with the true total reported alongside. The chain query parameter selects polygon (default) or ethereum.",
    params(
        ("walletAddress" = String, Path, description = "0x-prefixed wallet address"),
        ("contractAddress" = String, Path, description = "0x-prefixed collection contract address"),
        ("chain" = Option<String>, Query, description = "EVM chain name, polygon or ethereum")
    ),
    responses(
        (status = 200, description = "NFT holdings, live or fallback", body = Envelope<NftCollectionData>),
        (status = 400, description = "Invalid address or chain", body = Envelope<NftCollectionData>)
    )
)]
pub async fn nft_collection_handler(
    State(state): State<ServerState>,
    Path((wallet_address, contract_address)): Path<(String, String)>,
    Query(selector): Query<ChainSelector>,
) -> Result<Json<Envelope<NftCollectionData>>, ServerError> {
    let network = resolve_evm_network(&selector)?;
    metrics::inc_requests(Capability::NftCollection, network.name());
    let started = Instant::now();

    let envelope = state
        .gateway()
        .nft_collection(network, &wallet_address, &contract_address)
        .await?;

    metrics::observe_dispatch_duration(Capability::NftCollection, started.elapsed().as_secs_f64());
    record_provenance(
        Capability::NftCollection,
        network.name(),
        envelope.data.as_ref().map(|d| d.provenance),
    );
    Ok(Json(envelope))
}

/// Aggregate game statistics
#[utoipa::path(
    get,
    path = "/v1/game/stats",
    tag = "game",
    summary = "Aggregate game statistics",
    description = "Returns aggregate game statistics. No chain holds this aggregate, so the payload always carries fallback provenance.",
    responses(
        (status = 200, description = "Game statistics", body = Envelope<GameStatsData>)
    )
)]
pub async fn game_stats_handler(State(state): State<ServerState>) -> Json<Envelope<GameStatsData>> {
    metrics::inc_requests(Capability::GameStats, "none");
    let envelope = state.gateway().game_stats();
    metrics::inc_fallback(Capability::GameStats, "none");
    Json(envelope)
}

/// Transaction verification request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyTransactionRequest {
    /// Transaction hash (EVM) or signature (Solana)
    #[serde(rename = "txHash")]
    #[schema(example = "5UfDu...signature")]
    pub tx_hash: String,
    /// Chain to verify against: solana, polygon, or ethereum
    #[schema(example = "solana")]
    pub chain: String,
}

/// Verify a transaction on the named chain
#[utoipa::path(
    post,
    path = "/v1/verify-transaction",
    tag = "transactions",
    summary = "Verify a transaction",
    description = "Looks up a transaction hash or signature on the named chain and reports its confirmation status. An unknown hash on a reachable chain is an authoritative negative result, not an error.",
    request_body = VerifyTransactionRequest,
    responses(
        (status = 200, description = "Verification result, live or fallback", body = Envelope<TransactionData>),
        (status = 400, description = "Missing fields or unsupported chain", body = Envelope<TransactionData>)
    )
)]
pub async fn verify_transaction_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<VerifyTransactionRequest>,
) -> Result<Json<Envelope<TransactionData>>, ServerError> {
    metrics::inc_requests(Capability::VerifyTransaction, &request.chain);
    let started = Instant::now();

    let envelope = state
        .gateway()
        .verify_transaction(&request.chain, &request.tx_hash)
        .await?;

    metrics::observe_dispatch_duration(
        Capability::VerifyTransaction,
        started.elapsed().as_secs_f64(),
    );
    record_provenance(
        Capability::VerifyTransaction,
        &request.chain,
        envelope.data.as_ref().map(|d| d.provenance),
    );
    Ok(Json(envelope))
}
