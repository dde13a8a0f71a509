// HTTP repository implementation over the market data REST backend
use crate::application::market_repository::MarketRepository;
use crate::domain::company::ListedCompany;
use crate::domain::envelope::ApiEnvelope;
use crate::domain::flow::CapitalFlow;
use crate::domain::hotspot::{Hotspot, HotspotStats};
use crate::domain::industry::{Industry, IndustryDetail, PlatformStats};
use crate::domain::market_index::{IndexPoint, WindIndustry};
use crate::domain::ranking::{RankingEntry, RankingKind};
use crate::domain::stock::{StockMapping, StockStats};
use crate::infrastructure::error::BackendError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpMarketRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMarketRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<ApiEnvelope<T>, BackendError> {
        let url = self.build_url(path);
        tracing::debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // The backend answers `success: false` with 4xx/5xx too; prefer its
        // message over the bare status when the body is an envelope.
        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
                if let Err(rejected) = envelope.into_ack() {
                    return Err(rejected.into());
                }
            }
            return Err(BackendError::Status {
                path: path.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| BackendError::Json {
            path: path.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let data = self
            .execute::<T>(Method::GET, path)
            .await
            .and_then(|envelope| envelope.into_result().map_err(BackendError::from))
            .with_context(|| format!("GET {path}"))?;
        Ok(data)
    }

    async fn mutate(&self, method: Method, path: &str) -> Result<Option<String>> {
        let message = self
            .execute::<serde_json::Value>(method.clone(), path)
            .await
            .and_then(|envelope| envelope.into_ack().map_err(BackendError::from))
            .with_context(|| format!("{method} {path}"))?;
        Ok(message)
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl MarketRepository for HttpMarketRepository {
    async fn platform_stats(&self) -> Result<PlatformStats> {
        self.get("/api/stats").await
    }

    async fn list_industries(&self) -> Result<Vec<Industry>> {
        self.get("/api/industries").await
    }

    async fn get_industry(&self, code: &str) -> Result<IndustryDetail> {
        self.get(&format!("/api/industries/{}", segment(code))).await
    }

    async fn list_stocks(&self) -> Result<Vec<StockMapping>> {
        self.get("/api/stocks").await
    }

    async fn stock_stats(&self) -> Result<StockStats> {
        self.get("/api/stocks/stats").await
    }

    async fn list_hotspots(&self) -> Result<Vec<Hotspot>> {
        self.get("/api/hotspots").await
    }

    async fn get_hotspot(&self, id: &str) -> Result<Hotspot> {
        self.get(&format!("/api/hotspots/{}", segment(id))).await
    }

    async fn delete_hotspot(&self, id: &str) -> Result<Option<String>> {
        self.mutate(Method::DELETE, &format!("/api/hotspots/{}", segment(id)))
            .await
    }

    async fn trigger_collect(&self) -> Result<Option<String>> {
        self.mutate(Method::POST, "/api/collect").await
    }

    async fn list_domestic_hotspots(&self) -> Result<Vec<Hotspot>> {
        self.get("/api/domestic-hotspot").await
    }

    async fn domestic_hotspot_stats(&self) -> Result<HotspotStats> {
        self.get("/api/domestic-hotspot/stats").await
    }

    async fn capital_flows(&self) -> Result<Vec<CapitalFlow>> {
        self.get("/api/global-capital-flow").await
    }

    async fn listed_companies(&self) -> Result<Vec<ListedCompany>> {
        self.get("/api/listed-companies").await
    }

    async fn wind_industries(&self) -> Result<Vec<WindIndustry>> {
        self.get("/api/wind-industries").await
    }

    async fn jian_index(&self) -> Result<Vec<IndexPoint>> {
        self.get("/api/tencent-jian-index").await
    }

    async fn rankings(&self, kind: RankingKind) -> Result<Vec<RankingEntry>> {
        self.get(&format!("/api/rankings/{}", kind.as_str())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let repo = HttpMarketRepository::new("http://market-api:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(repo.build_url("/api/stats"), "http://market-api:5000/api/stats");
    }

    #[test]
    fn test_segment_is_percent_encoded() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("801080"), "801080");
    }
}
