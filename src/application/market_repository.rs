// Repository trait for the market data backend
use crate::domain::company::ListedCompany;
use crate::domain::flow::CapitalFlow;
use crate::domain::hotspot::{Hotspot, HotspotStats};
use crate::domain::industry::{Industry, IndustryDetail, PlatformStats};
use crate::domain::market_index::{IndexPoint, WindIndustry};
use crate::domain::ranking::{RankingEntry, RankingKind};
use crate::domain::stock::{StockMapping, StockStats};
use async_trait::async_trait;

#[async_trait]
pub trait MarketRepository: Send + Sync {
    /// GET /api/stats
    async fn platform_stats(&self) -> anyhow::Result<PlatformStats>;

    /// GET /api/industries
    async fn list_industries(&self) -> anyhow::Result<Vec<Industry>>;

    /// GET /api/industries/{code}
    async fn get_industry(&self, code: &str) -> anyhow::Result<IndustryDetail>;

    /// GET /api/stocks
    async fn list_stocks(&self) -> anyhow::Result<Vec<StockMapping>>;

    /// GET /api/stocks/stats
    async fn stock_stats(&self) -> anyhow::Result<StockStats>;

    /// GET /api/hotspots
    async fn list_hotspots(&self) -> anyhow::Result<Vec<Hotspot>>;

    /// GET /api/hotspots/{id}
    async fn get_hotspot(&self, id: &str) -> anyhow::Result<Hotspot>;

    /// DELETE /api/hotspots/{id}
    async fn delete_hotspot(&self, id: &str) -> anyhow::Result<Option<String>>;

    /// POST /api/collect - asks the backend to ingest fresh hotspots
    async fn trigger_collect(&self) -> anyhow::Result<Option<String>>;

    /// GET /api/domestic-hotspot
    async fn list_domestic_hotspots(&self) -> anyhow::Result<Vec<Hotspot>>;

    /// GET /api/domestic-hotspot/stats
    async fn domestic_hotspot_stats(&self) -> anyhow::Result<HotspotStats>;

    /// GET /api/global-capital-flow
    async fn capital_flows(&self) -> anyhow::Result<Vec<CapitalFlow>>;

    /// GET /api/listed-companies
    async fn listed_companies(&self) -> anyhow::Result<Vec<ListedCompany>>;

    /// GET /api/wind-industries
    async fn wind_industries(&self) -> anyhow::Result<Vec<WindIndustry>>;

    /// GET /api/tencent-jian-index
    async fn jian_index(&self) -> anyhow::Result<Vec<IndexPoint>>;

    /// GET /api/rankings/{type}
    async fn rankings(&self, kind: RankingKind) -> anyhow::Result<Vec<RankingEntry>>;
}
