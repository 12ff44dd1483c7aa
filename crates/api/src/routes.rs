// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the gateway server.

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    game_stats_handler, health_handler, nft_collection_handler, token_info_handler,
    verify_transaction_handler, wallet_info_handler,
};

use crate::{
    metrics::metrics_handler,
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    // Health and metrics endpoints sit outside /v1 for monitoring purposes
    let monitoring_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let api_routes = Router::new()
        .route("/solana/wallet/{wallet_address}", get(wallet_info_handler))
        .route(
            "/evm/token/{wallet_address}/{contract_address}",
            get(token_info_handler),
        )
        .route(
            "/evm/nft/{wallet_address}/{contract_address}",
            get(nft_collection_handler),
        )
        .route("/game/stats", get(game_stats_handler))
        .route("/verify-transaction", post(verify_transaction_handler));

    let v1 = Router::new().nest("/v1", api_routes);

    Router::new()
        .merge(monitoring_routes)
        .merge(docs_routes)
        .merge(v1)
}
