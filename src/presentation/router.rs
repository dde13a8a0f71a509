use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    capital_flow, collect_hotspots, delete_hotspot, domestic_hotspots, export_feed, health_check,
    hotspot_detail, industry_detail, jian_index, list_hotspots, list_industries, list_stocks,
    listed_companies, overview, rankings, sector_rotation, wind_industries,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(overview))
        // Industry classification and stock mapping
        .route("/panels/industries", get(list_industries))
        .route("/panels/industries/:code", get(industry_detail))
        .route("/panels/stocks", get(list_stocks))
        // Hotspots; HTML forms cannot send DELETE, so deletion also has a POST route
        .route("/panels/hotspots", get(list_hotspots))
        .route("/panels/hotspots/collect", post(collect_hotspots))
        .route(
            "/panels/hotspots/:id",
            get(hotspot_detail).delete(delete_hotspot),
        )
        .route("/panels/hotspots/:id/delete", post(delete_hotspot))
        .route("/panels/domestic-hotspots", get(domestic_hotspots))
        // Market feeds
        .route("/panels/capital-flow", get(capital_flow))
        .route("/panels/companies", get(listed_companies))
        .route("/panels/wind-industries", get(wind_industries))
        .route("/panels/jian-index", get(jian_index))
        .route("/panels/rankings/:kind", get(rankings))
        .route("/panels/rotation", get(sector_rotation))
        .route("/export/:feed", get(export_feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::hotspot_service::HotspotService;
    use crate::application::list_query::PageLimits;
    use crate::application::market_repository::fake::FakeRepository;
    use crate::application::mock::MockGenerator;
    use crate::application::rotation_service::RotationService;
    use crate::infrastructure::config::{MockSettings, RotationSettings};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    fn app(repo: Arc<FakeRepository>, fallback: bool) -> Router {
        let mock = MockSettings {
            enabled: fallback,
            seed: Some(3),
            hotspot_rows: 10,
            domestic_hotspot_rows: 40,
            ..Default::default()
        };
        let limits = PageLimits::default();
        let state = AppState {
            dashboard_service: DashboardService::new(repo.clone(), mock.clone(), limits),
            hotspot_service: HotspotService::new(repo, mock, limits),
            rotation_service: RotationService::new(RotationSettings::default()),
        };
        build_router(Arc::new(state))
    }

    fn live_hotspots() -> Arc<FakeRepository> {
        Arc::new(FakeRepository {
            hotspots: MockGenerator::new(Some(1)).hotspots(2),
            ..Default::default()
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, htmx: bool) -> (StatusCode, HeaderMap, String) {
        let mut request = Request::builder().method(method).uri(uri);
        if htmx {
            request = request.header("HX-Request", "true");
        }
        let response = app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app(Arc::new(FakeRepository::default()), true);
        let (status, _, body) = send(&app, Method::GET, "/healthz", false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_hotspot_detail_page_or_fragment() {
        let repo = live_hotspots();
        let title = repo.hotspots[0].title.clone();
        let app = app(repo, true);

        let (status, _, page) = send(&app, Method::GET, "/panels/hotspots/mock-1", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(&title));

        let (status, _, fragment) = send(&app, Method::GET, "/panels/hotspots/mock-1", true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!fragment.contains("<!DOCTYPE html>"));
        assert!(fragment.contains("hotspot-detail"));
        assert!(fragment.contains(&title));
    }

    #[tokio::test]
    async fn test_hotspot_fragment_failure_is_a_bare_notice() {
        let app = app(Arc::new(FakeRepository::offline()), false);
        let (status, _, body) = send(&app, Method::GET, "/panels/hotspots/mock-1", true).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(!body.contains("<nav>"));
        assert!(body.contains("加载失败：connection refused"));
    }

    #[tokio::test]
    async fn test_failure_without_fallback_renders_502_notice() {
        let app = app(Arc::new(FakeRepository::offline()), false);
        let (status, _, body) = send(&app, Method::GET, "/panels/stocks", false).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("加载失败：connection refused"));
    }

    #[tokio::test]
    async fn test_failure_with_fallback_renders_mock_panel() {
        let app = app(Arc::new(FakeRepository::offline()), true);
        let (status, _, body) = send(&app, Method::GET, "/panels/stocks", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("模拟数据"));
    }

    #[tokio::test]
    async fn test_rankings_reject_unknown_kind() {
        let app = app(Arc::new(FakeRepository::default()), true);
        let (status, _, body) = send(&app, Method::GET, "/panels/rankings/volatility", false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("未找到"));

        let (status, _, _) = send(&app, Method::GET, "/panels/rankings/gainers", false).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_export_feeds() {
        let app = app(live_hotspots(), true);
        let (status, _, _) = send(&app, Method::GET, "/export/orders", false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, headers, body) = send(&app, Method::GET, "/export/hotspots?sort=heat&order=desc", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("hotspots-"));
        assert!(body.contains("标题"));
        assert_eq!(body.trim_end().lines().count(), 3);
    }

    #[tokio::test]
    async fn test_post_delete_mirrors_delete() {
        let repo = Arc::new(FakeRepository::default());
        let app = app(repo.clone(), true);

        let (status, _, body) = send(&app, Method::POST, "/panels/hotspots/mock-1/delete", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("删除成功"));

        let (status, _, body) = send(&app, Method::DELETE, "/panels/hotspots/mock-1", false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("删除成功"));
        assert_eq!(repo.delete_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let app = app(Arc::new(FakeRepository::offline()), true);
        let (status, _, body) = send(&app, Method::POST, "/panels/hotspots/mock-1/delete", false).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("删除失败：connection refused"));
    }
}
