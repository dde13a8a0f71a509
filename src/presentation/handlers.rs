// HTTP request handlers
use crate::application::csv_export::to_csv;
use crate::application::list_query::ListQuery;
use crate::domain::ranking::RankingKind;
use crate::infrastructure::error::failure_message;
use crate::infrastructure::http_response::{accepts_brotli, csv_response, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::views::{self, hotspots, market, rotation};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use maud::Markup;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Deserialize)]
pub struct RotationQuery {
    pub sector: Option<String>,
}

async fn render(headers: &HeaderMap, status: StatusCode, markup: Markup) -> Response {
    match html_response(status, markup.into_string(), accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Render a panel, or an inline "加载失败" page when the feed failed and no
/// fallback was allowed.
async fn render_panel(headers: &HeaderMap, title: &str, result: anyhow::Result<Markup>) -> Response {
    match result {
        Ok(markup) => render(headers, StatusCode::OK, markup).await,
        Err(e) => {
            tracing::error!("Error rendering panel {}: {:#}", title, e);
            let page = views::layout(title, views::error_notice(&failure_message(&e)));
            render(headers, StatusCode::BAD_GATEWAY, page).await
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn overview(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let overview = state.dashboard_service.overview().await;
    render(&headers, StatusCode::OK, market::overview_page(&overview)).await
}

pub async fn list_industries(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .industries(&query)
        .await
        .map(|data| market::industries_page(&data, &query));
    render_panel(&headers, "行业分类", result).await
}

pub async fn industry_detail(
    Path(code): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .industry_detail(&code)
        .await
        .map(|data| market::industry_detail_page(&data));
    render_panel(&headers, "行业详情", result).await
}

pub async fn list_stocks(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .stocks(&query)
        .await
        .map(|data| market::stocks_page(&data, &query));
    render_panel(&headers, "股票映射", result).await
}

pub async fn list_hotspots(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .hotspot_service
        .list(&query)
        .await
        .map(|data| hotspots::hotspots_page(&data, &query));
    render_panel(&headers, "热点资讯", result).await
}

/// Full page for direct navigation; just the modal body for htmx requests,
/// failures included.
pub async fn hotspot_detail(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state.hotspot_service.detail(&id).await;
    if !headers.contains_key("hx-request") {
        let result = result.map(|data| hotspots::hotspot_detail_page(&data));
        return render_panel(&headers, "热点详情", result).await;
    }

    match result {
        Ok(data) => render(&headers, StatusCode::OK, hotspots::hotspot_detail(&data)).await,
        Err(e) => {
            tracing::error!("Error loading hotspot {}: {:#}", id, e);
            let notice = views::error_notice(&failure_message(&e));
            render(&headers, StatusCode::BAD_GATEWAY, notice).await
        }
    }
}

pub async fn delete_hotspot(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (status, page) = match state.hotspot_service.delete(&id).await {
        Ok(message) => (
            StatusCode::OK,
            hotspots::action_result_page("删除热点", &message, true),
        ),
        Err(e) => {
            tracing::error!("Error deleting hotspot {}: {:#}", id, e);
            (
                StatusCode::BAD_GATEWAY,
                hotspots::action_result_page("删除热点", &format!("删除失败：{}", failure_message(&e)), false),
            )
        }
    };
    render(&headers, status, page).await
}

pub async fn collect_hotspots(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let (status, page) = match state.hotspot_service.collect().await {
        Ok(message) => (
            StatusCode::OK,
            hotspots::action_result_page("热点采集", &message, true),
        ),
        Err(e) => {
            tracing::error!("Error triggering collection: {:#}", e);
            (
                StatusCode::BAD_GATEWAY,
                hotspots::action_result_page("热点采集", &format!("采集失败：{}", failure_message(&e)), false),
            )
        }
    };
    render(&headers, status, page).await
}

pub async fn domestic_hotspots(
    Query(query): Query<ListQuery>,
    Query(refresh): Query<RefreshQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .hotspot_service
        .domestic(&query, refresh.refresh)
        .await
        .map(|data| hotspots::domestic_page(&data, &query));
    render_panel(&headers, "国内热点", result).await
}

pub async fn capital_flow(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .capital_flows(&query)
        .await
        .map(|data| market::capital_flow_page(&data, &query));
    render_panel(&headers, "全球资金流向", result).await
}

pub async fn listed_companies(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .companies(&query)
        .await
        .map(|data| market::companies_page(&data, &query));
    render_panel(&headers, "上市公司", result).await
}

pub async fn wind_industries(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .wind_industries(&query)
        .await
        .map(|data| market::wind_industries_page(&data, &query));
    render_panel(&headers, "Wind行业", result).await
}

pub async fn jian_index(
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let result = state
        .dashboard_service
        .jian_index(&query)
        .await
        .map(|data| market::jian_index_page(&data, &query));
    render_panel(&headers, "腾讯见指数", result).await
}

pub async fn rankings(
    Path(kind): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let kind = match kind.parse::<RankingKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!("{}", e);
            let page = views::layout("排行榜", views::not_found(&format!("排行榜类型 {kind}")));
            return render(&headers, StatusCode::NOT_FOUND, page).await;
        }
    };

    let result = state
        .dashboard_service
        .rankings(kind)
        .await
        .map(|data| market::rankings_page(kind, &data));
    render_panel(&headers, kind.title(), result).await
}

pub async fn sector_rotation(
    Query(query): Query<RotationQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let board = state.rotation_service.board();
    let focus = query
        .sector
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| state.rotation_service.sector(s));
    render(
        &headers,
        StatusCode::OK,
        rotation::rotation_page(&board, focus.as_ref()),
    )
    .await
}

/// CSV download of a table feed with the panel's filter and sort applied.
pub async fn export_feed(
    Path(feed): Path<String>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let csv = match feed.as_str() {
        "hotspots" => state.hotspot_service.list_for_export(&query).await.map(|r| to_csv(&r)),
        "domestic-hotspots" => state
            .hotspot_service
            .domestic_for_export(&query)
            .await
            .map(|r| to_csv(&r)),
        "stocks" => state
            .dashboard_service
            .stocks_for_export(&query)
            .await
            .map(|r| to_csv(&r)),
        "companies" => state
            .dashboard_service
            .companies_for_export(&query)
            .await
            .map(|r| to_csv(&r)),
        "capital-flow" => state
            .dashboard_service
            .capital_flows_for_export(&query)
            .await
            .map(|r| to_csv(&r)),
        _ => return (StatusCode::NOT_FOUND, format!("unknown export feed: {feed}")).into_response(),
    };

    match csv {
        Ok(csv) => {
            let filename = format!("{feed}-{}.csv", chrono::Local::now().format("%Y%m%d"));
            match csv_response(&filename, csv, accepts_brotli(&headers)).await {
                Ok(response) => response,
                Err(status) => status.into_response(),
            }
        }
        Err(e) => {
            tracing::error!("Error exporting {}: {:#}", feed, e);
            (StatusCode::BAD_GATEWAY, format!("导出失败：{}", failure_message(&e))).into_response()
        }
    }
}
