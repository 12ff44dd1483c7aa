// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! Error types for server operations, including the mapping of gateway
//! outcomes onto HTTP status codes and envelope-shaped JSON bodies.

use std::net::SocketAddr;

use adapter_core::Envelope;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chain_adapters::GatewayError;
use thiserror::Error;
use tracing::error;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON parsing errors with detailed context
    #[error("Invalid JSON request: {message}")]
    JsonError {
        /// Detailed error message
        message: String,
    },

    /// Errors surfaced by the query gateway
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            ServerError::Gateway(GatewayError::Rejected(validation)) => (
                StatusCode::BAD_REQUEST,
                Envelope::<()>::failure(validation.to_string(), Some(validation.detail())),
            ),
            ServerError::Gateway(
                GatewayError::UnsupportedChain(_) | GatewayError::InvalidRequest(_),
            ) => (
                StatusCode::BAD_REQUEST,
                Envelope::<()>::failure(self.to_string(), None),
            ),
            ServerError::Gateway(GatewayError::Internal(detail)) => {
                error!(detail, "gateway internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::<()>::failure("Internal server error", None),
                )
            }
            ServerError::JsonError { .. } => (
                StatusCode::BAD_REQUEST,
                Envelope::<()>::failure(self.to_string(), None),
            ),
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. } => {
                error!(error = %self, "server error reached a response path");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::<()>::failure("Internal server error", None),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}
