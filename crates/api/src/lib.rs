// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chain Query Gateway Server Implementation
//!
//! This crate provides the HTTP server for the chain query gateway, built
//! with Axum and designed for production use with comprehensive
//! configuration, middleware, and graceful shutdown capabilities.
//!
//! # Module Structure
//!
//! - [`config`]: Server and adapter configuration with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state management with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`extractors`]: JSON extraction with detailed parse error messages
//! - [`metrics`]: Prometheus metrics and text-format export handler
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints
//!
//! # Key Features
//!
//! - **Multi-Chain Dispatch**: Composes Solana and EVM adapters behind one
//!   query gateway with provenance-tagged fallback
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken`
//! - **Health Monitoring**: Aggregated health checks across all chain adapters
//! - **Comprehensive Middleware**: Request tracing, CORS, timeouts, and error handling

pub mod config;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{Gateway, HealthCheck, ServerState};
