//! Shared HTTP fee-estimation client.
//!
//! Bitcoin rates come from a Bitcoin Core node (`estimatesmartfee`),
//! Ethereum gas prices from Infura (`eth_gasPrice`). Both speak JSON-RPC
//! over HTTP. Coins without a live source answer from the static fallback
//! table.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use coinbridge_chain::{FeeQueryError, FeeRateClient};
use coinbridge_types::{Coin, FeeRate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::FeeProviderConfig;

/// Confirmation target, in blocks, for Bitcoin fee estimates.
pub const BITCOIN_CONFIRMATION_TARGET: u32 = 6;

/// Fee-rate client backed by JSON-RPC endpoints.
pub struct HttpFeeRateClient {
    http: reqwest::Client,
    config: FeeProviderConfig,
}

impl HttpFeeRateClient {
    pub fn new(config: FeeProviderConfig) -> Result<Self, FeeQueryError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5).min(config.request_timeout()))
            .build()
            .map_err(|e| FeeQueryError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeeProviderConfig {
        &self.config
    }

    async fn bitcoin_fee_rate(&self, url: &str) -> Result<FeeRate, FeeQueryError> {
        let auth = self
            .config
            .btc_core_rpc_user
            .as_deref()
            .map(|user| (user, self.config.btc_core_rpc_password.as_deref()));
        let result = self
            .rpc_call(url, auth, "estimatesmartfee", json!([BITCOIN_CONFIRMATION_TARGET]))
            .await?;
        parse_smart_fee(&result)
    }

    async fn ethereum_gas_price(&self, url: &str) -> Result<FeeRate, FeeQueryError> {
        let auth = self
            .config
            .infura_project_secret
            .as_deref()
            .map(|secret| ("", Some(secret)));
        let result = self.rpc_call(url, auth, "eth_gasPrice", json!([])).await?;
        parse_gas_price(&result)
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        url: &str,
        auth: Option<(&str, Option<&str>)>,
        method: &str,
        params: Value,
    ) -> Result<Value, FeeQueryError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let mut request = self.http.post(url).json(&body);
        if let Some((user, password)) = auth {
            request = request.basic_auth(user, password);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeeQueryError::Network(format!("request failed: {e}")))?;

        // Bitcoin Core reports RPC errors with a non-2xx status and a JSON body.
        let status = response.status();
        let json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) if status.is_success() => {
                return Err(FeeQueryError::InvalidResponse(format!(
                    "invalid JSON response: {e}"
                )))
            }
            Err(_) => {
                return Err(FeeQueryError::Network(format!(
                    "endpoint returned HTTP {status}"
                )))
            }
        };

        rpc_result(json)
    }
}

#[async_trait]
impl FeeRateClient for HttpFeeRateClient {
    async fn fee_rate(&self, coin: Coin) -> Result<FeeRate, FeeQueryError> {
        match coin {
            Coin::Bitcoin => {
                if let Some(url) = self.config.btc_core_rpc_url.as_deref() {
                    return self.bitcoin_fee_rate(url).await;
                }
            }
            Coin::Ethereum => {
                if let Some(url) = self.config.infura_url() {
                    return self.ethereum_gas_price(&url).await;
                }
            }
            Coin::BitcoinCash | Coin::Litecoin | Coin::Dash => {}
        }

        let rate = self.config.fallback.rate(coin);
        debug!(%coin, %rate, "using static fallback fee rate");
        Ok(rate)
    }
}

// ── Response parsing ────────────────────────────────────────────────────

/// Extract `result` from a JSON-RPC response, surfacing `error`.
pub(crate) fn rpc_result(json: Value) -> Result<Value, FeeQueryError> {
    match json.get("error") {
        None | Some(Value::Null) => {}
        Some(err) => {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(FeeQueryError::Rpc(message));
        }
    }
    json.get("result")
        .cloned()
        .ok_or_else(|| FeeQueryError::InvalidResponse("response has no result".into()))
}

/// Parse an `estimatesmartfee` result into sat/byte.
pub(crate) fn parse_smart_fee(result: &Value) -> Result<FeeRate, FeeQueryError> {
    if let Some(feerate) = result.get("feerate") {
        return decimal_from_json(feerate).map(sat_per_byte);
    }

    let errors = result
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|joined| !joined.is_empty());

    Err(match errors {
        Some(message) => FeeQueryError::Rpc(message),
        None => FeeQueryError::InvalidResponse("estimatesmartfee returned no feerate".into()),
    })
}

/// Parse an `eth_gasPrice` result (hex wei).
pub(crate) fn parse_gas_price(result: &Value) -> Result<FeeRate, FeeQueryError> {
    let hex = result
        .as_str()
        .ok_or_else(|| FeeQueryError::InvalidResponse(format!("gas price is not a string: {result}")))?;
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    u64::from_str_radix(digits, 16)
        .map(FeeRate::new)
        .map_err(|e| FeeQueryError::InvalidResponse(format!("invalid gas price {hex:?}: {e}")))
}

/// BTC/kvB to sat/byte, rounded up, never below 1.
pub(crate) fn sat_per_byte(btc_per_kvb: Decimal) -> FeeRate {
    if btc_per_kvb <= Decimal::ZERO {
        return FeeRate::new(1);
    }
    let sats = btc_per_kvb
        .checked_mul(Decimal::from(100_000u64))
        .map(|d| d.ceil())
        .and_then(|d| d.to_u64())
        .unwrap_or(u64::MAX);
    FeeRate::new(sats.max(1))
}

fn decimal_from_json(value: &Value) -> Result<Decimal, FeeQueryError> {
    let Value::Number(n) = value else {
        return Err(FeeQueryError::InvalidResponse(format!(
            "feerate is not a number: {value}"
        )));
    };
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| FeeQueryError::InvalidResponse(format!("invalid feerate {text}: {e}")))
}
