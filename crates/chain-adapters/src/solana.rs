// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Solana JSON-RPC adapter
//!
//! Reads wallet state and transaction status from a Solana RPC endpoint at
//! `confirmed` commitment. Fungible-token and NFT-collection capabilities are
//! not served natively here; the adapter reports them as upstream rejections
//! so the gateway can degrade.

use std::time::Duration;

use adapter_core::{
    AdapterError, ChainAdapter, HealthStatus, NativeNftCollection, NativeTokenInfo,
    NativeTransaction, NativeWalletInfo, SolanaTransactionInfo, SolanaWalletInfo, SplTokenAccount,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use shared_types::{Address, ChainFamily};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// SPL Token program the token-account scan is filtered by
const SPL_TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Number of signatures fetched for the recent-activity window
const RECENT_SIGNATURE_LIMIT: u32 = 5;

/// Configuration for the Solana adapter
#[derive(Debug, Clone)]
pub struct SolanaConfig {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            timeout_seconds: 10,
            health_check_timeout_seconds: 5,
        }
    }
}

/// Errors specific to the Solana adapter
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SolanaError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed
    #[error("invalid RPC response: {0}")]
    Json(#[from] serde_json::Error),

    /// The RPC node returned an error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The RPC node answered with a non-success HTTP status
    #[error("RPC endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Request timed out
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl From<SolanaError> for AdapterError {
    fn from(value: SolanaError) -> Self {
        match value {
            SolanaError::Rpc { code, message } => AdapterError::UpstreamRejected {
                code: Some(code),
                message,
            },
            SolanaError::HttpStatus { status } => AdapterError::UpstreamRejected {
                code: None,
                message: format!("HTTP {status}"),
            },
            other => AdapterError::UpstreamUnavailable {
                message: other.to_string(),
            },
        }
    }
}

/// Solana JSON-RPC adapter
#[derive(Debug)]
pub struct SolanaAdapter {
    client: Client,
    config: SolanaConfig,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct TokenAccountsResult {
    value: Vec<TokenAccountEntry>,
}

#[derive(Debug, Deserialize)]
struct TokenAccountEntry {
    account: TokenAccount,
}

#[derive(Debug, Deserialize)]
struct TokenAccount {
    data: TokenAccountData,
}

#[derive(Debug, Deserialize)]
struct TokenAccountData {
    parsed: ParsedTokenData,
}

#[derive(Debug, Deserialize)]
struct ParsedTokenData {
    info: ParsedTokenInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedTokenInfo {
    mint: String,
    token_amount: TokenAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAmount {
    ui_amount: Option<f64>,
    decimals: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResult {
    slot: u64,
    block_time: Option<i64>,
    meta: Option<TransactionMeta>,
}

#[derive(Debug, Deserialize)]
struct TransactionMeta {
    fee: u64,
    err: Option<Value>,
}

impl SolanaAdapter {
    /// Create a new Solana adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the
    /// configuration is invalid
    pub fn new(config: SolanaConfig) -> Result<Self, SolanaError> {
        if config.rpc_url.trim().is_empty() {
            return Err(SolanaError::Config("RPC URL cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("chain-query-gateway/0.1.0")
            .build()
            .map_err(SolanaError::Http)?;

        Ok(Self { client, config })
    }

    /// Issue one JSON-RPC call and return its `result` field
    ///
    /// A `null` result is returned as `Value::Null`; the RPC uses it as an
    /// authoritative not-found for lookups like `getTransaction`.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, SolanaError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(url = %self.config.rpc_url, method, "issuing Solana RPC call");

        let request = self.client.post(&self.config.rpc_url).json(&body);

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| SolanaError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(SolanaError::Http)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(method, status = status.as_u16(), "Solana RPC returned non-OK status");
            return Err(SolanaError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let rpc_response: RpcResponse = response.json().await.map_err(SolanaError::Http)?;

        if let Some(error) = rpc_response.error {
            warn!(method, code = error.code, "Solana RPC returned an error object");
            return Err(SolanaError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(rpc_response.result.unwrap_or(Value::Null))
    }

    async fn get_balance(&self, address: &str) -> Result<u64, SolanaError> {
        let result = self
            .rpc_call("getBalance", json!([address, { "commitment": "confirmed" }]))
            .await?;
        let balance: BalanceResult = serde_json::from_value(result)?;
        Ok(balance.value)
    }

    async fn get_recent_signature_count(&self, address: &str) -> Result<u32, SolanaError> {
        let result = self
            .rpc_call(
                "getSignaturesForAddress",
                json!([address, { "limit": RECENT_SIGNATURE_LIMIT, "commitment": "confirmed" }]),
            )
            .await?;
        let signatures: Vec<Value> = serde_json::from_value(result)?;
        Ok(u32::try_from(signatures.len()).unwrap_or(RECENT_SIGNATURE_LIMIT))
    }

    async fn get_token_accounts(&self, address: &str) -> Result<Vec<SplTokenAccount>, SolanaError> {
        let result = self
            .rpc_call(
                "getTokenAccountsByOwner",
                json!([
                    address,
                    { "programId": SPL_TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed", "commitment": "confirmed" },
                ]),
            )
            .await?;
        let accounts: TokenAccountsResult = serde_json::from_value(result)?;

        Ok(accounts
            .value
            .into_iter()
            .map(|entry| {
                let info = entry.account.data.parsed.info;
                SplTokenAccount {
                    mint: info.mint,
                    ui_amount: info.token_amount.ui_amount.unwrap_or(0.0),
                    decimals: info.token_amount.decimals,
                }
            })
            .collect())
    }

    /// The base58 form of a validated address, or a mismatch error
    fn expect_solana<'a>(&self, address: &'a Address) -> Result<&'a str, AdapterError> {
        address
            .as_solana()
            .map(shared_types::SolanaAddress::as_str)
            .ok_or_else(|| AdapterError::mismatch(ChainFamily::Solana, address))
    }
}

impl ChainAdapter for SolanaAdapter {
    async fn wallet_info(&self, address: &Address) -> Result<NativeWalletInfo, AdapterError> {
        let base58 = self.expect_solana(address)?;

        info!(address = base58, "fetching Solana wallet info");

        let (lamports, recent_signatures, token_accounts) = tokio::try_join!(
            self.get_balance(base58),
            self.get_recent_signature_count(base58),
            self.get_token_accounts(base58),
        )?;

        Ok(NativeWalletInfo::Solana(SolanaWalletInfo {
            address: base58.to_string(),
            lamports,
            recent_signatures,
            token_accounts,
        }))
    }

    async fn token_info(
        &self,
        _wallet: &Address,
        _contract: &Address,
    ) -> Result<NativeTokenInfo, AdapterError> {
        Err(AdapterError::UpstreamRejected {
            code: None,
            message: "fungible token reads are not served by the Solana adapter".to_string(),
        })
    }

    async fn nft_collection(
        &self,
        _wallet: &Address,
        _contract: &Address,
    ) -> Result<NativeNftCollection, AdapterError> {
        Err(AdapterError::UpstreamRejected {
            code: None,
            message: "NFT collection reads are not served by the Solana adapter".to_string(),
        })
    }

    async fn verify_transaction(&self, tx_hash: &str) -> Result<NativeTransaction, AdapterError> {
        debug!(signature = tx_hash, "looking up Solana transaction");

        let result = self
            .rpc_call(
                "getTransaction",
                json!([
                    tx_hash,
                    { "commitment": "confirmed", "maxSupportedTransactionVersion": 0 },
                ]),
            )
            .await
            .map_err(AdapterError::from)?;

        if result.is_null() {
            return Ok(NativeTransaction::Solana(None));
        }

        let transaction: TransactionResult =
            serde_json::from_value(result).map_err(SolanaError::Json)?;
        let meta = transaction.meta;

        Ok(NativeTransaction::Solana(Some(SolanaTransactionInfo {
            slot: transaction.slot,
            block_time: transaction.block_time,
            fee_lamports: meta.as_ref().map_or(0, |m| m.fee),
            failed: meta.as_ref().is_some_and(|m| m.err.is_some()),
        })))
    }

    async fn health_check(&self) -> Result<HealthStatus, AdapterError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getHealth",
            "params": [],
        });

        let request = self.client.post(&self.config.rpc_url).json(&body);

        let response = timeout(
            Duration::from_secs(self.config.health_check_timeout_seconds),
            request.send(),
        )
        .await;

        let response = match response {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                return Ok(HealthStatus::Down {
                    reason: format!("RPC endpoint unreachable: {error}"),
                });
            }
            Err(_) => {
                return Ok(HealthStatus::Down {
                    reason: format!(
                        "health check timed out after {}s",
                        self.config.health_check_timeout_seconds
                    ),
                });
            }
        };

        if response.status() != StatusCode::OK {
            return Ok(HealthStatus::Degraded {
                reason: format!("RPC endpoint returned HTTP {}", response.status().as_u16()),
            });
        }

        let rpc_response: RpcResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(error) => {
                return Ok(HealthStatus::Degraded {
                    reason: format!("unparseable health response: {error}"),
                });
            }
        };

        match rpc_response.error {
            None => Ok(HealthStatus::Up),
            Some(error) => Ok(HealthStatus::Degraded {
                reason: format!("node reports unhealthy: {}", error.message),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "solana"
    }

    fn family(&self) -> ChainFamily {
        ChainFamily::Solana
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation_success() {
        let adapter = SolanaAdapter::new(SolanaConfig::default());
        assert!(adapter.is_ok());
    }

    #[test]
    fn default_endpoint_is_mainnet() {
        assert_eq!(
            SolanaConfig::default().rpc_url,
            "https://api.mainnet-beta.solana.com"
        );
    }

    #[test]
    fn adapter_creation_empty_url() {
        let config = SolanaConfig {
            rpc_url: String::new(),
            ..Default::default()
        };
        let adapter = SolanaAdapter::new(config);
        assert!(matches!(adapter, Err(SolanaError::Config(_))));
    }

    #[test]
    fn rpc_error_maps_to_rejection() {
        let error: AdapterError = SolanaError::Rpc {
            code: -32602,
            message: "invalid params".to_string(),
        }
        .into();
        assert!(matches!(
            error,
            AdapterError::UpstreamRejected {
                code: Some(-32602),
                ..
            }
        ));
    }

    #[test]
    fn timeout_maps_to_unavailable() {
        let error: AdapterError = SolanaError::Timeout { seconds: 10 }.into();
        assert!(matches!(error, AdapterError::UpstreamUnavailable { .. }));
        assert!(error.is_recoverable());
    }

    #[tokio::test]
    async fn token_info_is_rejected() {
        let adapter = SolanaAdapter::new(SolanaConfig::default()).expect("default config");
        let wallet = shared_types::validate(
            "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK",
            ChainFamily::Solana,
        )
        .expect("valid test address");

        let result = adapter.token_info(&wallet, &wallet).await;
        match result {
            Err(error) => assert!(error.is_recoverable()),
            Ok(_) => panic!("expected a rejection"),
        }
    }

    #[tokio::test]
    async fn evm_address_is_a_mismatch() {
        let adapter = SolanaAdapter::new(SolanaConfig::default()).expect("default config");
        let address = shared_types::validate(
            "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1",
            ChainFamily::Evm,
        )
        .expect("valid test address");

        let result = adapter.wallet_info(&address).await;
        match result {
            Err(error) => assert!(!error.is_recoverable()),
            Ok(_) => panic!("expected a mismatch"),
        }
    }
}
