// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` documentation module
//!
//! This module provides the `OpenAPI` specification and `Swagger UI` endpoints
//! for API documentation.

use adapter_core::{
    Envelope, GameExtension, GameStatsData, NftCollectionData, NftItemData, Provenance,
    TokenHolding, TokenInfoData, TransactionData, WalletInfoData,
};
use axum::{Json, http::StatusCode, response::Html};
use utoipa::OpenApi;

use crate::{
    routes::handlers::{self, VerifyTransactionRequest},
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` documentation for the gateway API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chain Query Gateway API",
        description = "Normalized multi-chain query gateway with provenance-tagged fallback"
    ),
    paths(
        handlers::health_handler,
        handlers::wallet_info_handler,
        handlers::token_info_handler,
        handlers::nft_collection_handler,
        handlers::game_stats_handler,
        handlers::verify_transaction_handler,
    ),
    components(schemas(
        Envelope<WalletInfoData>,
        Envelope<TokenInfoData>,
        Envelope<NftCollectionData>,
        Envelope<GameStatsData>,
        Envelope<TransactionData>,
        WalletInfoData,
        TokenInfoData,
        NftCollectionData,
        GameStatsData,
        TransactionData,
        TokenHolding,
        GameExtension,
        NftItemData,
        Provenance,
        VerifyTransactionRequest,
        HealthCheck,
        HealthStatus,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "wallet", description = "Wallet queries"),
        (name = "token", description = "Fungible token queries"),
        (name = "nft", description = "NFT collection queries"),
        (name = "game", description = "Game statistics"),
        (name = "transactions", description = "Transaction verification"),
    )
)]
pub struct ApiDoc;

/// `OpenAPI` specification endpoint
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Swagger UI endpoint
pub async fn swagger_ui() -> Result<Html<&'static str>, StatusCode> {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Chain Query Gateway API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css" />
    <style>
        html { box-sizing: border-box; overflow: -moz-scrollbars-vertical; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin:0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: '/api-doc/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            });
        }
    </script>
</body>
</html>
"#;
    Ok(Html(html))
}
