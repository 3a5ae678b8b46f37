//! Reqwest implementation of the AMM backend contract.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::{
    AmmId, BundleQuote, ExclusiveMarketInfo, ExclusiveQuote, MarketId, OptionMarketInfo,
    OptionQuote, Position, TradeHistory,
};
use crate::error::{translate_backend_message, AuthError, Error, Result};

use super::traits::AmmBackend;
use super::types::{BackendErrorBody, BundleOrder, ExclusiveOrder, HistoryResponse, OptionOrder};

/// HTTP client for the AMM backend REST API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpBackend {
    /// Create a new backend client with the given base URL and optional
    /// bearer token.
    #[must_use]
    pub fn new(base_url: String, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "GET");
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "POST");
        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::Denied {
                status: status.as_u16(),
            }
            .into());
        }
        let message = response
            .json::<BackendErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());
        Err(Error::Backend {
            status: status.as_u16(),
            message: translate_backend_message(&message),
        })
    }
}

#[async_trait]
impl AmmBackend for HttpBackend {
    async fn option_markets(&self, market: &MarketId) -> Result<Vec<OptionMarketInfo>> {
        self.get(&format!("/option-markets/market/{market}")).await
    }

    async fn exclusive_market(&self, market: &MarketId) -> Result<ExclusiveMarketInfo> {
        self.get(&format!("/exclusive-markets/market/{market}"))
            .await
    }

    async fn option_quote(&self, amm: &AmmId, order: &OptionOrder) -> Result<OptionQuote> {
        self.post(&format!("/option-markets/{amm}/quote"), order)
            .await
    }

    async fn option_trade(&self, amm: &AmmId, order: &OptionOrder) -> Result<OptionQuote> {
        self.post(&format!("/option-markets/{amm}/trade"), order)
            .await
    }

    async fn exclusive_quote(&self, amm: &AmmId, order: &ExclusiveOrder) -> Result<ExclusiveQuote> {
        self.post(&format!("/exclusive-markets/{amm}/quote"), order)
            .await
    }

    async fn exclusive_trade(&self, amm: &AmmId, order: &ExclusiveOrder) -> Result<ExclusiveQuote> {
        self.post(&format!("/exclusive-markets/{amm}/trade"), order)
            .await
    }

    async fn bundle_quote(&self, order: &BundleOrder) -> Result<BundleQuote> {
        self.post("/option-markets/bundle/quote", order).await
    }

    async fn bundle_trade(&self, order: &BundleOrder) -> Result<BundleQuote> {
        self.post("/option-markets/bundle/trade", order).await
    }

    async fn option_positions(&self, market: &MarketId) -> Result<Vec<Position>> {
        self.get(&format!("/option-markets/market/{market}/positions"))
            .await
    }

    async fn exclusive_positions(&self, market: &MarketId) -> Result<Vec<Position>> {
        self.get(&format!("/exclusive-markets/market/{market}/positions"))
            .await
    }

    async fn option_trade_history(&self, market: &MarketId) -> Result<TradeHistory> {
        let response: HistoryResponse = self
            .get(&format!("/option-markets/market/{market}/all-trades"))
            .await?;
        Ok(response.into())
    }

    async fn exclusive_trade_history(&self, market: &MarketId) -> Result<TradeHistory> {
        let response: HistoryResponse = self
            .get(&format!("/exclusive-markets/market/{market}/all-trades"))
            .await?;
        Ok(response.into())
    }
}
