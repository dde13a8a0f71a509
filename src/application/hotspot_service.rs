// Hotspot service - Hotspot listing, detail, deletion, collection and the
// large domestic feed
use crate::application::fallback::{DataSource, FallbackPolicy, Sourced};
use crate::application::list_query::{ListQuery, Page, PageLimits};
use crate::application::market_repository::MarketRepository;
use crate::application::mock::MockGenerator;
use crate::domain::hotspot::{Hotspot, HotspotStats};
use crate::infrastructure::config::MockSettings;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct HotspotBoard {
    pub page: Page<Hotspot>,
    /// Categories present in the unfiltered feed, for the filter dropdown.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DomesticBoard {
    pub page: Page<Hotspot>,
    pub stats: HotspotStats,
}

/// Generated rows shared across requests.
type MockRows = Arc<RwLock<Option<Arc<Vec<Hotspot>>>>>;

#[derive(Clone)]
pub struct HotspotService {
    repository: Arc<dyn MarketRepository>,
    fallback: FallbackPolicy,
    mock: MockSettings,
    limits: PageLimits,
    /// Mock rows reused across requests so list and detail agree; the
    /// domestic set is regenerated on refresh.
    hotspot_cache: MockRows,
    domestic_cache: MockRows,
}

/// Return the cached rows, generating them on the blocking pool when absent
/// or when `refresh` is set.
async fn cached_rows<F>(cache: &MockRows, feed: &str, refresh: bool, generate: F) -> anyhow::Result<Arc<Vec<Hotspot>>>
where
    F: FnOnce() -> Vec<Hotspot> + Send + 'static,
{
    if !refresh {
        if let Some(rows) = cache.read().await.as_ref() {
            return Ok(rows.clone());
        }
    }

    let mut cache = cache.write().await;
    if let (false, Some(rows)) = (refresh, cache.as_ref()) {
        // Another request filled it while we waited for the lock.
        return Ok(rows.clone());
    }

    let started = std::time::Instant::now();
    let rows = tokio::task::spawn_blocking(generate).await?;
    tracing::info!(
        "Generated {} mock {} rows in {:?}",
        rows.len(),
        feed,
        started.elapsed()
    );

    let rows = Arc::new(rows);
    *cache = Some(rows.clone());
    Ok(rows)
}

impl HotspotService {
    pub fn new(repository: Arc<dyn MarketRepository>, mock: MockSettings, limits: PageLimits) -> Self {
        Self {
            repository,
            fallback: FallbackPolicy {
                enabled: mock.enabled,
            },
            mock,
            limits,
            hotspot_cache: Arc::new(RwLock::new(None)),
            domestic_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn mock_hotspots(&self) -> anyhow::Result<Arc<Vec<Hotspot>>> {
        let (seed, count) = (self.mock.seed, self.mock.hotspot_rows);
        cached_rows(&self.hotspot_cache, "hotspot", false, move || {
            MockGenerator::new(seed).hotspots(count)
        })
        .await
    }

    async fn domestic_mock(&self, refresh: bool) -> anyhow::Result<Arc<Vec<Hotspot>>> {
        let (seed, count) = (self.mock.seed, self.mock.domestic_hotspot_rows);
        cached_rows(&self.domestic_cache, "domestic hotspot", refresh, move || {
            MockGenerator::new(seed).domestic_hotspots(count)
        })
        .await
    }

    /// The mock row a list panel showed under `id`, if any.
    async fn cached_mock(&self, id: &str) -> anyhow::Result<Option<Hotspot>> {
        if let Some(rows) = self.domestic_cache.read().await.as_ref() {
            if let Some(hotspot) = rows.iter().find(|h| h.id == id) {
                return Ok(Some(hotspot.clone()));
            }
        }
        let rows = self.mock_hotspots().await?;
        Ok(rows.iter().find(|h| h.id == id).cloned())
    }

    async fn hotspots_all(&self) -> anyhow::Result<Sourced<Vec<Hotspot>>> {
        let live = self.repository.list_hotspots().await;
        Ok(match self.fallback.accept("hotspots", live)? {
            Some(list) => Sourced::live(list.into_iter().map(Hotspot::normalized).collect()),
            None => Sourced::mock(self.mock_hotspots().await?.as_ref().clone()),
        })
    }

    pub async fn list(&self, query: &ListQuery) -> anyhow::Result<Sourced<HotspotBoard>> {
        Ok(self.hotspots_all().await?.map(|list| {
            let categories = HotspotStats::from_hotspots(&list)
                .by_category
                .into_keys()
                .collect();
            HotspotBoard {
                page: query.apply(list, self.limits),
                categories,
            }
        }))
    }

    pub async fn list_for_export(&self, query: &ListQuery) -> anyhow::Result<Vec<Hotspot>> {
        Ok(query.select(self.hotspots_all().await?.data))
    }

    /// On fallback the record comes from the mock rows already listed, so
    /// the detail matches the row clicked; unknown ids get a fresh record.
    pub async fn detail(&self, id: &str) -> anyhow::Result<Sourced<Hotspot>> {
        let live = self.repository.get_hotspot(id).await;
        let known = match &live {
            Err(_) if self.fallback.enabled => self.cached_mock(id).await?,
            _ => None,
        };
        let sourced = self.fallback.resolve_one("hotspot_detail", live, || {
            known.unwrap_or_else(|| MockGenerator::new(self.mock.seed).hotspot(id))
        })?;
        Ok(sourced.map(Hotspot::normalized))
    }

    /// Deletion never falls back: the caller must see the real outcome.
    pub async fn delete(&self, id: &str) -> anyhow::Result<String> {
        let message = self.repository.delete_hotspot(id).await?;
        tracing::info!("Deleted hotspot {}", id);
        Ok(message.unwrap_or_else(|| "删除成功".to_string()))
    }

    pub async fn collect(&self) -> anyhow::Result<String> {
        let message = self.repository.trigger_collect().await?;
        tracing::info!("Triggered hotspot collection");
        Ok(message.unwrap_or_else(|| "采集任务已启动".to_string()))
    }

    async fn domestic_all(&self, refresh: bool) -> anyhow::Result<Sourced<Vec<Hotspot>>> {
        let live = self.repository.list_domestic_hotspots().await;
        Ok(match self.fallback.accept("domestic_hotspot", live)? {
            Some(list) => Sourced::live(list.into_iter().map(Hotspot::normalized).collect()),
            None => Sourced::mock(self.domestic_mock(refresh).await?.as_ref().clone()),
        })
    }

    pub async fn domestic(&self, query: &ListQuery, refresh: bool) -> anyhow::Result<Sourced<DomesticBoard>> {
        let sourced = self.domestic_all(refresh).await?;

        let stats = match sourced.source {
            DataSource::Live => match self.repository.domestic_hotspot_stats().await {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::debug!("Domestic stats unavailable, computing locally: {:#}", e);
                    HotspotStats::from_hotspots(&sourced.data)
                }
            },
            DataSource::Mock => HotspotStats::from_hotspots(&sourced.data),
        };

        Ok(sourced.map(|rows| DomesticBoard {
            page: query.apply(rows, self.limits),
            stats,
        }))
    }

    pub async fn domestic_for_export(&self, query: &ListQuery) -> anyhow::Result<Vec<Hotspot>> {
        Ok(query.select(self.domestic_all(false).await?.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::market_repository::fake::FakeRepository;
    use std::sync::atomic::Ordering;

    fn settings(enabled: bool) -> MockSettings {
        MockSettings {
            enabled,
            seed: Some(7),
            hotspot_rows: 12,
            domestic_hotspot_rows: 50,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_live_hotspots_are_normalized_and_paged() {
        let mut rows = MockGenerator::new(Some(3)).hotspots(3);
        rows[0].heat = 250.0;
        let repo = FakeRepository {
            hotspots: rows,
            ..Default::default()
        };
        let svc = HotspotService::new(Arc::new(repo), settings(true), PageLimits::default());
        let board = svc.list(&ListQuery::default()).await.unwrap();
        assert_eq!(board.source, DataSource::Live);
        assert_eq!(board.data.page.total, 3);
        assert!(board.data.page.items.iter().all(|h| h.heat <= 100.0));
        assert!(!board.data.categories.is_empty());
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_mock_with_same_id() {
        let svc = HotspotService::new(Arc::new(FakeRepository::offline()), settings(true), PageLimits::default());
        let detail = svc.detail("abc").await.unwrap();
        assert_eq!(detail.source, DataSource::Mock);
        assert_eq!(detail.data.id, "abc");
    }

    #[tokio::test]
    async fn test_mock_detail_matches_listed_row() {
        let unseeded = MockSettings {
            seed: None,
            ..settings(true)
        };
        let svc = HotspotService::new(Arc::new(FakeRepository::offline()), unseeded, PageLimits::default());
        let board = svc.list(&ListQuery::default()).await.unwrap();
        let listed = board.data.page.items.iter().find(|h| h.id == "mock-3").unwrap().clone();

        let detail = svc.detail("mock-3").await.unwrap();
        assert_eq!(detail.source, DataSource::Mock);
        assert_eq!(detail.data.title, listed.title);
        assert_eq!(detail.data.heat, listed.heat);
        assert_eq!(detail.data.category, listed.category);
        assert_eq!(detail.data.published_at, listed.published_at);
    }

    #[tokio::test]
    async fn test_mock_detail_matches_domestic_row() {
        let svc = HotspotService::new(Arc::new(FakeRepository::offline()), settings(true), PageLimits::default());
        let board = svc.domestic(&ListQuery::default(), false).await.unwrap();
        let listed = board.data.page.items[4].clone();

        let detail = svc.detail(&listed.id).await.unwrap();
        assert_eq!(detail.data.id, listed.id);
        assert_eq!(detail.data.title, listed.title);
        assert_eq!(detail.data.region, listed.region);
    }

    #[tokio::test]
    async fn test_delete_never_falls_back() {
        let repo = Arc::new(FakeRepository::offline());
        let svc = HotspotService::new(repo.clone(), settings(true), PageLimits::default());
        assert!(svc.delete("mock-1").await.is_err());
        assert_eq!(repo.delete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_and_collect_messages() {
        let svc = HotspotService::new(Arc::new(FakeRepository::default()), settings(true), PageLimits::default());
        assert_eq!(svc.delete("1").await.unwrap(), "删除成功");
        assert_eq!(svc.collect().await.unwrap(), "已提交");
    }

    #[tokio::test]
    async fn test_domestic_mock_is_cached_until_refresh() {
        let svc = HotspotService::new(Arc::new(FakeRepository::default()), settings(true), PageLimits::default());
        let first = svc.domestic_mock(false).await.unwrap();
        let second = svc.domestic_mock(false).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 50);

        let refreshed = svc.domestic_mock(true).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &refreshed));
    }

    #[tokio::test]
    async fn test_domestic_board_stats_cover_whole_dataset() {
        let svc = HotspotService::new(Arc::new(FakeRepository::offline()), settings(true), PageLimits::default());
        let board = svc.domestic(&ListQuery::default(), false).await.unwrap();
        assert_eq!(board.source, DataSource::Mock);
        assert_eq!(board.data.stats.total, 50);
        assert_eq!(board.data.page.items.len(), 20);
        assert!(board.data.page.items.iter().all(|h| h.region.is_some()));
    }

    #[tokio::test]
    async fn test_domestic_without_fallback_surfaces_error() {
        let svc = HotspotService::new(Arc::new(FakeRepository::offline()), settings(false), PageLimits::default());
        assert!(svc.domestic(&ListQuery::default(), false).await.is_err());
    }
}
