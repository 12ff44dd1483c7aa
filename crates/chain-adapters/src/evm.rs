// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! EVM JSON-RPC adapter
//!
//! Serves Polygon and Ethereum through the standard `eth_*` RPC surface.
//! Contract reads go through `eth_call` with hand-encoded calldata; only
//! single-word and single-string returns are decoded, which covers the
//! ERC-20/ERC-721 subset the gateway needs.

use std::time::Duration;

use adapter_core::{
    AdapterError, ChainAdapter, EvmNftCollection, EvmNftItem, EvmReceiptInfo, EvmTokenInfo,
    EvmWalletInfo, HealthStatus, NativeNftCollection, NativeTokenInfo, NativeTransaction,
    NativeWalletInfo,
};
use alloy_primitives::{U256, hex, keccak256};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use shared_types::{Address, ChainFamily, EvmAddress, EvmNetwork};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::normalize::NFT_DISPLAY_LIMIT;

/// Configuration for an EVM adapter instance
#[derive(Debug, Clone)]
pub struct EvmConfig {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Network served by the endpoint
    pub network: EvmNetwork,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://polygon-rpc.com".to_string(),
            network: EvmNetwork::Polygon,
            timeout_seconds: 10,
            health_check_timeout_seconds: 5,
        }
    }
}

/// Errors specific to the EVM adapter
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum EvmError {
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

    /// Return data did not decode as the expected ABI type
    #[error("ABI decode failed: {0}")]
    AbiDecode(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Request timed out
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl From<EvmError> for AdapterError {
    fn from(value: EvmError) -> Self {
        match value {
            EvmError::Rpc { code, message } => AdapterError::UpstreamRejected {
                code: Some(code),
                message,
            },
            EvmError::HttpStatus { status } => AdapterError::UpstreamRejected {
                code: None,
                message: format!("HTTP {status}"),
            },
            EvmError::AbiDecode(message) => AdapterError::UpstreamRejected {
                code: None,
                message: format!("ABI decode failed: {message}"),
            },
            other => AdapterError::UpstreamUnavailable {
                message: other.to_string(),
            },
        }
    }
}

/// First four bytes of the keccak-256 hash of a function signature
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Calldata for a function taking a single `address` argument
fn encode_address_call(signature: &str, address: EvmAddress) -> String {
    let mut data = selector(signature).to_vec();
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(address.as_slice());
    format!("0x{}", hex::encode(data))
}

/// Calldata for a function taking no arguments
fn encode_plain_call(signature: &str) -> String {
    format!("0x{}", hex::encode(selector(signature)))
}

/// Calldata for a function taking `(address, uint256)`
fn encode_address_uint_call(signature: &str, address: EvmAddress, value: U256) -> String {
    let mut data = selector(signature).to_vec();
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(address.as_slice());
    data.extend_from_slice(&value.to_be_bytes::<32>());
    format!("0x{}", hex::encode(data))
}

/// Calldata for a function taking a single `uint256` argument
fn encode_uint_call(signature: &str, value: U256) -> String {
    let mut data = selector(signature).to_vec();
    data.extend_from_slice(&value.to_be_bytes::<32>());
    format!("0x{}", hex::encode(data))
}

/// Decode a single 32-byte word as an unsigned integer
fn decode_word(data: &[u8]) -> Result<U256, EvmError> {
    if data.is_empty() || data.len() > 32 {
        return Err(EvmError::AbiDecode(format!(
            "expected one word, got {} bytes",
            data.len()
        )));
    }
    Ok(U256::from_be_slice(data))
}

/// Decode an ABI-encoded dynamic string return value
fn decode_abi_string(data: &[u8]) -> Result<String, EvmError> {
    let offset: usize = decode_word(data.get(..32).ok_or_else(|| {
        EvmError::AbiDecode("string return shorter than one word".to_string())
    })?)?
    .try_into()
    .map_err(|_| EvmError::AbiDecode("string offset out of range".to_string()))?;

    let length_word = data
        .get(offset..offset + 32)
        .ok_or_else(|| EvmError::AbiDecode("string length out of bounds".to_string()))?;
    let length: usize = decode_word(length_word)?
        .try_into()
        .map_err(|_| EvmError::AbiDecode("string length out of range".to_string()))?;

    let bytes = data
        .get(offset + 32..offset + 32 + length)
        .ok_or_else(|| EvmError::AbiDecode("string body out of bounds".to_string()))?;

    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Parse a `0x`-prefixed hex quantity into a u64
fn parse_quantity(value: &str) -> Result<u64, EvmError> {
    u64::from_str_radix(value.trim_start_matches("0x"), 16)
        .map_err(|_| EvmError::AbiDecode(format!("invalid hex quantity: {value}")))
}

/// Parse a `0x`-prefixed hex quantity into a U256
fn parse_wide_quantity(value: &str) -> Result<U256, EvmError> {
    U256::from_str_radix(value.trim_start_matches("0x"), 16)
        .map_err(|_| EvmError::AbiDecode(format!("invalid hex quantity: {value}")))
}

/// Whether an RPC error object describes a contract revert
fn is_revert(code: i64, message: &str) -> bool {
    code == 3 || message.to_ascii_lowercase().contains("revert")
}

/// EVM JSON-RPC adapter
#[derive(Debug)]
pub struct EvmAdapter {
    client: Client,
    config: EvmConfig,
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
#[serde(rename_all = "camelCase")]
struct Receipt {
    block_number: String,
    gas_used: String,
    effective_gas_price: Option<String>,
    status: String,
    from: EvmAddress,
    to: Option<EvmAddress>,
}

impl EvmAdapter {
    /// Create a new EVM adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the
    /// configuration is invalid
    pub fn new(config: EvmConfig) -> Result<Self, EvmError> {
        if config.rpc_url.trim().is_empty() {
            return Err(EvmError::Config("RPC URL cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("chain-query-gateway/0.1.0")
            .build()
            .map_err(EvmError::Http)?;

        Ok(Self { client, config })
    }

    /// The network this adapter serves
    pub const fn network(&self) -> EvmNetwork {
        self.config.network
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, EvmError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(url = %self.config.rpc_url, method, "issuing EVM RPC call");

        let request = self.client.post(&self.config.rpc_url).json(&body);

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| EvmError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(EvmError::Http)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(method, status = status.as_u16(), "EVM RPC returned non-OK status");
            return Err(EvmError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let rpc_response: RpcResponse = response.json().await.map_err(EvmError::Http)?;

        if let Some(error) = rpc_response.error {
            warn!(method, code = error.code, "EVM RPC returned an error object");
            return Err(EvmError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(rpc_response.result.unwrap_or(Value::Null))
    }

    /// `eth_call` against a contract, returning the raw return data
    async fn eth_call(&self, contract: EvmAddress, data: String) -> Result<Vec<u8>, EvmError> {
        let result = self
            .rpc_call(
                "eth_call",
                json!([{ "to": contract, "data": data }, "latest"]),
            )
            .await?;

        let encoded = result
            .as_str()
            .ok_or_else(|| EvmError::AbiDecode("eth_call result is not a string".to_string()))?;

        hex::decode(encoded.trim_start_matches("0x"))
            .map_err(|error| EvmError::AbiDecode(format!("invalid return data: {error}")))
    }

    /// `eth_call` for functions a contract may legitimately not implement
    ///
    /// Reverts and empty return data become `Ok(None)`; everything else is
    /// reported as usual.
    async fn eth_call_optional(
        &self,
        contract: EvmAddress,
        data: String,
    ) -> Result<Option<Vec<u8>>, EvmError> {
        match self.eth_call(contract, data).await {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(EvmError::Rpc { code, message }) if is_revert(code, &message) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn native_balance(&self, address: EvmAddress) -> Result<U256, EvmError> {
        let result = self
            .rpc_call("eth_getBalance", json!([address, "latest"]))
            .await?;
        let encoded = result
            .as_str()
            .ok_or_else(|| EvmError::AbiDecode("eth_getBalance result is not a string".to_string()))?;
        parse_wide_quantity(encoded)
    }

    async fn transaction_count(&self, address: EvmAddress) -> Result<u64, EvmError> {
        let result = self
            .rpc_call("eth_getTransactionCount", json!([address, "latest"]))
            .await?;
        let encoded = result.as_str().ok_or_else(|| {
            EvmError::AbiDecode("eth_getTransactionCount result is not a string".to_string())
        })?;
        parse_quantity(encoded)
    }

    /// Read one uint-returning view function, erroring if it reverts
    async fn read_uint(
        &self,
        contract: EvmAddress,
        data: String,
    ) -> Result<U256, EvmError> {
        let bytes = self.eth_call(contract, data).await?;
        decode_word(&bytes)
    }

    /// Read one optional uint-returning view function
    async fn read_optional_uint(
        &self,
        contract: EvmAddress,
        data: String,
    ) -> Result<Option<U256>, EvmError> {
        match self.eth_call_optional(contract, data).await? {
            Some(bytes) => Ok(Some(decode_word(&bytes)?)),
            None => Ok(None),
        }
    }

    fn expect_evm(&self, address: &Address) -> Result<EvmAddress, AdapterError> {
        address
            .as_evm()
            .copied()
            .ok_or_else(|| AdapterError::mismatch(ChainFamily::Evm, address))
    }
}

impl ChainAdapter for EvmAdapter {
    async fn wallet_info(&self, address: &Address) -> Result<NativeWalletInfo, AdapterError> {
        let wallet = self.expect_evm(address)?;

        info!(address = %wallet, network = self.config.network.name(), "fetching EVM wallet info");

        let (balance_wei, tx_count) =
            tokio::try_join!(self.native_balance(wallet), self.transaction_count(wallet))?;

        Ok(NativeWalletInfo::Evm(EvmWalletInfo {
            address: wallet,
            balance_wei,
            tx_count,
            network: self.config.network,
        }))
    }

    async fn token_info(
        &self,
        wallet: &Address,
        contract: &Address,
    ) -> Result<NativeTokenInfo, AdapterError> {
        let wallet = self.expect_evm(wallet)?;
        let contract = self.expect_evm(contract)?;

        info!(
            wallet = %wallet,
            contract = %contract,
            network = self.config.network.name(),
            "fetching EVM token info"
        );

        // The reads are independent of each other, so issue them together.
        // Game contracts expose the two extension views; plain ERC-20s revert
        let (
            balance,
            symbol_bytes,
            raw_decimals,
            total_supply,
            native_balance_wei,
            reward_points,
            player_level,
        ) = tokio::try_join!(
            self.read_uint(contract, encode_address_call("balanceOf(address)", wallet)),
            self.eth_call_optional(contract, encode_plain_call("symbol()")),
            self.read_optional_uint(contract, encode_plain_call("decimals()")),
            self.read_optional_uint(contract, encode_plain_call("totalSupply()")),
            self.native_balance(wallet),
            self.read_optional_uint(
                contract,
                encode_address_call("getRewardPoints(address)", wallet),
            ),
            self.read_optional_uint(
                contract,
                encode_address_call("getPlayerLevel(address)", wallet),
            ),
        )?;

        let symbol = match symbol_bytes {
            Some(bytes) => decode_abi_string(&bytes)?,
            None => "UNKNOWN".to_string(),
        };

        let decimals = match raw_decimals {
            Some(value) => u8::try_from(value)
                .map_err(|_| EvmError::AbiDecode("decimals out of range".to_string()))?,
            None => 18,
        };

        let total_supply = total_supply.unwrap_or(U256::ZERO);

        Ok(NativeTokenInfo::Evm(EvmTokenInfo {
            wallet,
            contract,
            balance,
            symbol,
            decimals,
            native_balance_wei,
            total_supply,
            reward_points,
            player_level,
            network: self.config.network,
        }))
    }

    async fn nft_collection(
        &self,
        wallet: &Address,
        contract: &Address,
    ) -> Result<NativeNftCollection, AdapterError> {
        let wallet = self.expect_evm(wallet)?;
        let contract = self.expect_evm(contract)?;

        info!(
            wallet = %wallet,
            contract = %contract,
            network = self.config.network.name(),
            "fetching EVM NFT collection"
        );

        let total = self
            .read_uint(contract, encode_address_call("balanceOf(address)", wallet))
            .await?;
        let total = u64::try_from(total).unwrap_or(u64::MAX);

        let mut items = Vec::new();
        for index in 0..total.min(NFT_DISPLAY_LIMIT) {
            // Requires ERC-721 Enumerable; a revert here fails the whole read
            let token_id = self
                .read_uint(
                    contract,
                    encode_address_uint_call(
                        "tokenOfOwnerByIndex(address,uint256)",
                        wallet,
                        U256::from(index),
                    ),
                )
                .await?;

            let token_uri = match self
                .eth_call_optional(contract, encode_uint_call("tokenURI(uint256)", token_id))
                .await?
            {
                Some(bytes) => decode_abi_string(&bytes)?,
                None => String::new(),
            };

            let owner = match self
                .eth_call_optional(contract, encode_uint_call("ownerOf(uint256)", token_id))
                .await?
            {
                Some(bytes) => EvmAddress::from_slice(
                    bytes
                        .get(12..32)
                        .ok_or_else(|| EvmError::AbiDecode("ownerOf return too short".to_string()))?,
                ),
                None => wallet,
            };

            items.push(EvmNftItem {
                token_id,
                token_uri,
                owner,
            });
        }

        Ok(NativeNftCollection::Evm(EvmNftCollection {
            wallet,
            contract,
            total,
            items,
            network: self.config.network,
        }))
    }

    async fn verify_transaction(&self, tx_hash: &str) -> Result<NativeTransaction, AdapterError> {
        debug!(hash = tx_hash, "looking up EVM transaction receipt");

        let result = self
            .rpc_call("eth_getTransactionReceipt", json!([tx_hash]))
            .await
            .map_err(AdapterError::from)?;

        if result.is_null() {
            return Ok(NativeTransaction::Evm(None));
        }

        let receipt: Receipt = serde_json::from_value(result).map_err(EvmError::Json)?;

        Ok(NativeTransaction::Evm(Some(EvmReceiptInfo {
            block_number: parse_quantity(&receipt.block_number)?,
            gas_used: parse_wide_quantity(&receipt.gas_used)?,
            effective_gas_price: receipt
                .effective_gas_price
                .as_deref()
                .map(parse_wide_quantity)
                .transpose()?,
            succeeded: parse_quantity(&receipt.status)? == 1,
            from: receipt.from,
            to: receipt.to,
        })))
    }

    async fn health_check(&self) -> Result<HealthStatus, AdapterError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_blockNumber",
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

        if response.status() == StatusCode::OK {
            Ok(HealthStatus::Up)
        } else {
            Ok(HealthStatus::Degraded {
                reason: format!("RPC endpoint returned HTTP {}", response.status().as_u16()),
            })
        }
    }

    fn name(&self) -> &'static str {
        match self.config.network {
            EvmNetwork::Polygon => "polygon",
            EvmNetwork::Ethereum => "ethereum",
        }
    }

    fn family(&self) -> ChainFamily {
        ChainFamily::Evm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_selectors() {
        // Well-known ERC-20/ERC-721 selector values
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
        assert_eq!(hex::encode(selector("symbol()")), "95d89b41");
        assert_eq!(hex::encode(selector("decimals()")), "313ce567");
        assert_eq!(hex::encode(selector("totalSupply()")), "18160ddd");
        assert_eq!(hex::encode(selector("tokenURI(uint256)")), "c87b56dd");
        assert_eq!(hex::encode(selector("ownerOf(uint256)")), "6352211e");
        assert_eq!(
            hex::encode(selector("tokenOfOwnerByIndex(address,uint256)")),
            "2f745c59"
        );
    }

    #[test]
    fn address_call_encoding() {
        let wallet: EvmAddress = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1"
            .parse()
            .expect("valid test address");
        let data = encode_address_call("balanceOf(address)", wallet);
        assert_eq!(
            data,
            "0x70a08231000000000000000000000000742d35cc6634c0532925a3b844bc9e7595f0beb1"
        );
    }

    #[test]
    fn word_decoding() {
        let mut word = [0u8; 32];
        word[31] = 0x2a;
        assert_eq!(decode_word(&word).expect("one word"), U256::from(42));
        assert!(decode_word(&[]).is_err());
    }

    #[test]
    fn abi_string_decoding() {
        // offset 0x20, length 3, "GTT"
        let data = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "4754540000000000000000000000000000000000000000000000000000000000",
        ))
        .expect("valid hex");
        assert_eq!(decode_abi_string(&data).expect("valid string"), "GTT");
    }

    #[test]
    fn abi_string_decoding_rejects_truncated_data() {
        let data = hex::decode(
            "0000000000000000000000000000000000000000000000000000000000000020",
        )
        .expect("valid hex");
        assert!(decode_abi_string(&data).is_err());
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(parse_quantity("0x2a").expect("valid"), 42);
        assert_eq!(
            parse_wide_quantity("0xde0b6b3a7640000").expect("valid"),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn revert_detection() {
        assert!(is_revert(3, "execution reverted"));
        assert!(is_revert(-32000, "Execution Reverted: missing method"));
        assert!(!is_revert(-32601, "method not found"));
    }

    #[test]
    fn revert_maps_to_rejection() {
        let error: AdapterError = EvmError::Rpc {
            code: 3,
            message: "execution reverted".to_string(),
        }
        .into();
        assert!(error.is_recoverable());
    }

    #[tokio::test]
    async fn solana_address_is_a_mismatch() {
        let adapter = EvmAdapter::new(EvmConfig::default()).expect("default config");
        let address = shared_types::validate(
            "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK",
            ChainFamily::Solana,
        )
        .expect("valid test address");

        let result = adapter.wallet_info(&address).await;
        match result {
            Err(error) => assert!(!error.is_recoverable()),
            Ok(_) => panic!("expected a mismatch"),
        }
    }
}
