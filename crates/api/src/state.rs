// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! Shared application state for the gateway server, including configuration,
//! the query gateway, and coordinated cancellation.

use std::{collections::HashMap, sync::Arc};

use chain_adapters::{EvmAdapter, QueryGateway, SolanaAdapter};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// The gateway instantiated with the live adapters
pub type Gateway = QueryGateway<SolanaAdapter, EvmAdapter>;

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Query gateway dispatching capability calls
    gateway: Arc<Gateway>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    pub fn new(
        config: ServerConfig,
        gateway: Arc<Gateway>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            gateway,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The query gateway
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Perform health check operations
    ///
    /// The service itself stays healthy with no adapters configured since
    /// every capability degrades to fallback data; that state is reported
    /// as `Degraded` so operators can tell it apart from live service.
    pub async fn health_check(&self) -> HealthCheck {
        let adapter_health = self.gateway.health().await;

        let down_count = adapter_health
            .values()
            .filter(|status| !status.is_available())
            .count();

        let status = if self.gateway.adapter_count() == 0 {
            HealthStatus::Degraded {
                reason: Box::from("no chain adapters configured; serving fallback data"),
            }
        } else if down_count > 0 {
            HealthStatus::Degraded {
                reason: format!("{down_count} adapter(s) unavailable; affected capabilities serve fallback data")
                    .into_boxed_str(),
            }
        } else {
            HealthStatus::Up
        };

        let adapters = adapter_health
            .into_iter()
            .map(|(name, status)| (name, Self::convert_health_status(status)))
            .collect();

        HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            adapters,
        }
    }

    /// Convert adapter health status to the reportable health status
    fn convert_health_status(adapter_status: adapter_core::HealthStatus) -> HealthStatus {
        match adapter_status {
            adapter_core::HealthStatus::Up => HealthStatus::Up,
            adapter_core::HealthStatus::Degraded { reason } => HealthStatus::Degraded {
                reason: reason.into_boxed_str(),
            },
            adapter_core::HealthStatus::Down { reason } => HealthStatus::Down {
                reason: reason.into_boxed_str(),
            },
        }
    }
}

/// Health status of a service or dependency
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,

    /// Service is not operational or has critical failures
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },

    /// Service is operational but degraded; fallback data may be served
    Degraded {
        /// Human-readable explanation of the degradation condition
        reason: Box<str>,
    },
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Status of individual chain adapters
    #[schema(value_type = Object)]
    pub adapters: HashMap<String, HealthStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_state() -> ServerState {
        ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(Gateway::new()),
            CancellationToken::new(),
        )
    }

    #[test]
    fn server_state_creation() {
        let state = empty_state();
        assert!(!state.cancellation_token.is_cancelled());
        assert_eq!(state.gateway().adapter_count(), 0);
    }

    #[test]
    fn cancellation_tokens_are_linked() {
        let token = CancellationToken::new();
        let state = ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(Gateway::new()),
            token.clone(),
        );

        assert!(!state.cancellation_token.is_cancelled());
        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[tokio::test]
    async fn health_check_without_adapters_is_degraded() {
        let state = empty_state();
        let health = state.health_check().await;

        assert!(matches!(health.status, HealthStatus::Degraded { .. }));
        assert!(health.adapters.is_empty());
        assert_eq!(health.environment, Environment::Testing);
    }
}
