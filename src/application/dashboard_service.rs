// Dashboard service - Read-only panels over the market backend
use crate::application::fallback::{DataSource, FallbackPolicy, Sourced};
use crate::application::list_query::{ListQuery, Page, PageLimits, SortOrder};
use crate::application::market_repository::MarketRepository;
use crate::application::mock::MockGenerator;
use crate::domain::company::ListedCompany;
use crate::domain::flow::CapitalFlow;
use crate::domain::hotspot::Hotspot;
use crate::domain::industry::{Industry, IndustryDetail, PlatformStats};
use crate::domain::market_index::{IndexPoint, WindIndustry};
use crate::domain::ranking::{RankingEntry, RankingKind};
use crate::domain::stock::{StockMapping, StockStats};
use crate::infrastructure::config::MockSettings;
use crate::infrastructure::error::failure_message;
use std::sync::Arc;

const OVERVIEW_TOP_HOTSPOTS: usize = 5;

/// One overview card: the data, or the message explaining why it is missing.
pub type Section<T> = Result<Sourced<T>, String>;

#[derive(Debug, Clone)]
pub struct Overview {
    pub stats: Section<PlatformStats>,
    pub top_hotspots: Section<Vec<Hotspot>>,
    pub flows: Section<Vec<CapitalFlow>>,
}

#[derive(Debug, Clone)]
pub struct StockBoard {
    pub page: Page<StockMapping>,
    pub stats: StockStats,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn MarketRepository>,
    fallback: FallbackPolicy,
    mock: MockSettings,
    limits: PageLimits,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn MarketRepository>, mock: MockSettings, limits: PageLimits) -> Self {
        Self {
            repository,
            fallback: FallbackPolicy {
                enabled: mock.enabled,
            },
            mock,
            limits,
        }
    }

    fn mock_generator(&self) -> MockGenerator {
        MockGenerator::new(self.mock.seed)
    }

    /// Landing page: the three feeds are fetched concurrently and each one
    /// degrades independently.
    pub async fn overview(&self) -> Overview {
        let (stats, hotspots, flows) = futures::join!(
            self.platform_stats(),
            self.repository.list_hotspots(),
            self.capital_flows_all(),
        );

        let top_hotspots = self
            .fallback
            .resolve("hotspots", hotspots, || {
                self.mock_generator().hotspots(self.mock.hotspot_rows)
            })
            .map(|sourced| {
                sourced.map(|list| {
                    let query = ListQuery {
                        sort: Some("heat".to_string()),
                        order: SortOrder::Desc,
                        ..Default::default()
                    };
                    let mut top = query.select(list.into_iter().map(Hotspot::normalized).collect());
                    top.truncate(OVERVIEW_TOP_HOTSPOTS);
                    top
                })
            });

        Overview {
            stats: stats.map_err(|e| failure_message(&e)),
            top_hotspots: top_hotspots.map_err(|e| failure_message(&e)),
            flows: flows.map_err(|e| failure_message(&e)),
        }
    }

    pub async fn platform_stats(&self) -> anyhow::Result<Sourced<PlatformStats>> {
        let live = self.repository.platform_stats().await;
        self.fallback
            .resolve_one("stats", live, || self.mock_generator().platform_stats())
    }

    pub async fn industries(&self, query: &ListQuery) -> anyhow::Result<Sourced<Page<Industry>>> {
        let live = self.repository.list_industries().await;
        let sourced = self
            .fallback
            .resolve("industries", live, || self.mock_generator().industries())?;
        Ok(sourced.map(|list| query.apply(list, self.limits)))
    }

    pub async fn industry_detail(&self, code: &str) -> anyhow::Result<Sourced<IndustryDetail>> {
        let live = self.repository.get_industry(code).await;
        self.fallback
            .resolve_one("industry_detail", live, || self.mock_generator().industry_detail(code))
    }

    async fn stocks_all(&self) -> anyhow::Result<Sourced<Vec<StockMapping>>> {
        let live = self.repository.list_stocks().await;
        self.fallback.resolve("stocks", live, || {
            self.mock_generator().stock_mappings(self.mock.stock_rows)
        })
    }

    pub async fn stocks(&self, query: &ListQuery) -> anyhow::Result<Sourced<StockBoard>> {
        let (list, stats) = futures::join!(self.stocks_all(), self.repository.stock_stats());
        let list = list?;

        // Stats only come from the backend when the list did too.
        let stats = match (list.source, stats) {
            (DataSource::Live, Ok(stats)) => stats,
            (_, Err(e)) => {
                tracing::debug!("Stock stats unavailable, computing locally: {:#}", e);
                StockStats::from_mappings(&list.data)
            }
            (DataSource::Mock, Ok(_)) => StockStats::from_mappings(&list.data),
        };

        Ok(list.map(|rows| StockBoard {
            page: query.apply(rows, self.limits),
            stats,
        }))
    }

    pub async fn stocks_for_export(&self, query: &ListQuery) -> anyhow::Result<Vec<StockMapping>> {
        Ok(query.select(self.stocks_all().await?.data))
    }

    async fn companies_all(&self) -> anyhow::Result<Sourced<Vec<ListedCompany>>> {
        let live = self.repository.listed_companies().await;
        self.fallback.resolve("listed_companies", live, || {
            self.mock_generator().listed_companies(self.mock.company_rows)
        })
    }

    pub async fn companies(&self, query: &ListQuery) -> anyhow::Result<Sourced<Page<ListedCompany>>> {
        Ok(self
            .companies_all()
            .await?
            .map(|list| query.apply(list, self.limits)))
    }

    pub async fn companies_for_export(&self, query: &ListQuery) -> anyhow::Result<Vec<ListedCompany>> {
        Ok(query.select(self.companies_all().await?.data))
    }

    async fn capital_flows_all(&self) -> anyhow::Result<Sourced<Vec<CapitalFlow>>> {
        let live = self.repository.capital_flows().await;
        self.fallback
            .resolve("capital_flow", live, || self.mock_generator().capital_flows())
    }

    pub async fn capital_flows(&self, query: &ListQuery) -> anyhow::Result<Sourced<Page<CapitalFlow>>> {
        Ok(self
            .capital_flows_all()
            .await?
            .map(|list| query.apply(list, self.limits)))
    }

    pub async fn capital_flows_for_export(&self, query: &ListQuery) -> anyhow::Result<Vec<CapitalFlow>> {
        Ok(query.select(self.capital_flows_all().await?.data))
    }

    pub async fn wind_industries(&self, query: &ListQuery) -> anyhow::Result<Sourced<Page<WindIndustry>>> {
        let live = self.repository.wind_industries().await;
        let sourced = self
            .fallback
            .resolve("wind_industries", live, || self.mock_generator().wind_industries())?;
        Ok(sourced.map(|list| query.apply(list, self.limits)))
    }

    pub async fn jian_index(&self, query: &ListQuery) -> anyhow::Result<Sourced<Page<IndexPoint>>> {
        let live = self.repository.jian_index().await;
        let sourced = self.fallback.resolve("tencent_jian_index", live, || {
            self.mock_generator().jian_index(self.mock.index_days)
        })?;
        Ok(sourced.map(|list| query.apply(list, self.limits)))
    }

    pub async fn rankings(&self, kind: RankingKind) -> anyhow::Result<Sourced<Vec<RankingEntry>>> {
        let live = self.repository.rankings(kind).await;
        self.fallback.resolve(kind.as_str(), live, || {
            self.mock_generator().rankings(kind, self.mock.ranking_rows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::market_repository::fake::FakeRepository;
    use std::collections::BTreeMap;

    fn settings(enabled: bool) -> MockSettings {
        MockSettings {
            enabled,
            seed: Some(42),
            stock_rows: 30,
            ..Default::default()
        }
    }

    fn service(repo: FakeRepository, enabled: bool) -> DashboardService {
        DashboardService::new(Arc::new(repo), settings(enabled), PageLimits::default())
    }

    #[tokio::test]
    async fn test_offline_backend_serves_mock_stocks_with_local_stats() {
        let svc = service(FakeRepository::offline(), true);
        let board = svc.stocks(&ListQuery::default()).await.unwrap();
        assert_eq!(board.source, DataSource::Mock);
        assert_eq!(board.data.stats.total, 30);
        assert_eq!(board.data.page.total, 30);
        assert_eq!(board.data.page.items.len(), 20);
    }

    #[tokio::test]
    async fn test_offline_backend_without_fallback_is_an_error() {
        let svc = service(FakeRepository::offline(), false);
        assert!(svc.stocks(&ListQuery::default()).await.is_err());
        assert!(svc.platform_stats().await.is_err());
    }

    #[tokio::test]
    async fn test_live_stocks_use_backend_stats() {
        let stocks = MockGenerator::new(Some(1)).stock_mappings(4);
        let repo = FakeRepository {
            stocks,
            stock_stats: Some(StockStats {
                total: 4000,
                by_market: BTreeMap::new(),
            }),
            ..Default::default()
        };
        let board = service(repo, true).stocks(&ListQuery::default()).await.unwrap();
        assert_eq!(board.source, DataSource::Live);
        assert_eq!(board.data.stats.total, 4000);
        assert_eq!(board.data.page.total, 4);
    }

    #[tokio::test]
    async fn test_live_stocks_without_stats_endpoint_count_locally() {
        let repo = FakeRepository {
            stocks: MockGenerator::new(Some(1)).stock_mappings(4),
            ..Default::default()
        };
        let board = service(repo, true).stocks(&ListQuery::default()).await.unwrap();
        assert_eq!(board.source, DataSource::Live);
        assert_eq!(board.data.stats.total, 4);
    }

    #[tokio::test]
    async fn test_overview_degrades_per_section() {
        let overview = service(FakeRepository::offline(), false).overview().await;
        assert_eq!(overview.stats.unwrap_err(), "connection refused");
        assert!(overview.top_hotspots.is_err());
        assert!(overview.flows.is_err());

        let overview = service(FakeRepository::offline(), true).overview().await;
        let top = overview.top_hotspots.unwrap();
        assert_eq!(top.source, DataSource::Mock);
        assert_eq!(top.data.len(), OVERVIEW_TOP_HOTSPOTS);
        assert!(top.data.windows(2).all(|w| w[0].heat >= w[1].heat));
    }

    #[tokio::test]
    async fn test_empty_feed_falls_back_to_mock_rankings() {
        let svc = service(FakeRepository::default(), true);
        let ranking = svc.rankings(RankingKind::Gainers).await.unwrap();
        assert_eq!(ranking.source, DataSource::Mock);
        assert!(!ranking.data.is_empty());
    }
}
