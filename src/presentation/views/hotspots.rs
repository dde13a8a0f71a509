// Hotspot panels: news list, detail modal body, domestic feed
use super::{filter_form, layout, pagination, result_notice, sort_header, source_badge};
use crate::application::fallback::Sourced;
use crate::application::hotspot_service::{DomesticBoard, HotspotBoard};
use crate::application::list_query::{ListQuery, Page};
use crate::domain::hotspot::{Hotspot, HotspotStats};
use maud::{html, Markup};

fn categories(stats: &HotspotStats) -> Vec<String> {
    stats.by_category.keys().cloned().collect()
}

fn hotspot_table(base: &str, query: &ListQuery, page: &Page<Hotspot>, with_region: bool) -> Markup {
    html! {
        table {
            thead {
                tr {
                    (sort_header(base, query, "title", "标题"))
                    (sort_header(base, query, "category", "分类"))
                    (sort_header(base, query, "heat", "热度"))
                    th { "情绪" }
                    @if with_region { th { "地区" } }
                    th { "来源" }
                    (sort_header(base, query, "published_at", "发布时间"))
                    th { "操作" }
                }
            }
            tbody {
                @for h in &page.items {
                    tr id=(format!("hotspot-{}", h.id)) {
                        td { a href=(format!("/panels/hotspots/{}", urlencoding::encode(&h.id))) { (h.title) } }
                        td { (h.category) }
                        td class=(h.heat_level().css_class()) { (format!("{:.1}", h.heat)) }
                        td { (h.sentiment.label()) }
                        @if with_region { td { (h.region.as_deref().unwrap_or("-")) } }
                        td { (h.source) }
                        td { (h.published_at.format("%Y-%m-%d %H:%M")) }
                        td {
                            @if !with_region {
                                form method="post" action=(format!("/panels/hotspots/{}/delete", urlencoding::encode(&h.id))) {
                                    button type="submit" { "删除" }
                                }
                            }
                        }
                    }
                }
                @if page.items.is_empty() {
                    tr { td colspan="8" { "暂无数据" } }
                }
            }
        }
    }
}

pub fn hotspots_page(data: &Sourced<HotspotBoard>, query: &ListQuery) -> Markup {
    let base = "/panels/hotspots";
    let board = &data.data;
    layout(
        "热点资讯",
        html! {
            h1 { "热点资讯" (source_badge(data.source)) }
            form method="post" action="/panels/hotspots/collect" {
                button type="submit" { "采集最新热点" }
            }
            (filter_form(base, query, &board.categories, Some("/export/hotspots")))
            (hotspot_table(base, query, &board.page, false))
            (pagination(base, query, &board.page))
        },
    )
}

/// Body of the detail modal.
pub fn hotspot_detail(data: &Sourced<Hotspot>) -> Markup {
    let h = &data.data;
    html! {
        div class="hotspot-detail" {
            h2 { (h.title) (source_badge(data.source)) }
            p {
                span { "分类：" (h.category) }
                " · "
                span class=(h.heat_level().css_class()) { "热度：" (format!("{:.1}", h.heat)) }
                " · "
                span { "情绪：" (h.sentiment.label()) }
            }
            p { "来源：" (h.source) " · " (h.published_at.format("%Y-%m-%d %H:%M")) }
            @if !h.summary.is_empty() {
                p { (h.summary) }
            }
            @if !h.related_stocks.is_empty() {
                p { "相关股票：" (h.related_stocks.join("、")) }
            }
        }
    }
}

pub fn hotspot_detail_page(data: &Sourced<Hotspot>) -> Markup {
    layout(
        "热点详情",
        html! {
            (hotspot_detail(data))
            a href="/panels/hotspots" { "返回列表" }
        },
    )
}

pub fn action_result_page(title: &str, message: &str, ok: bool) -> Markup {
    layout(
        title,
        html! {
            h1 { (title) }
            (result_notice(message, ok))
            a href="/panels/hotspots" { "返回列表" }
        },
    )
}

pub fn domestic_page(data: &Sourced<DomesticBoard>, query: &ListQuery) -> Markup {
    let base = "/panels/domestic-hotspots";
    let board = &data.data;
    let positive = board.stats.by_sentiment.get("positive").copied().unwrap_or(0);
    let negative = board.stats.by_sentiment.get("negative").copied().unwrap_or(0);
    layout(
        "国内热点",
        html! {
            h1 { "国内热点" (source_badge(data.source)) }
            div class="cards" {
                div class="card" { div { "热点总数" } div class="value" { (board.stats.total) } }
                div class="card" { div { "平均热度" } div class="value" { (format!("{:.1}", board.stats.average_heat)) } }
                div class="card" { div { "利好" } div class="value up" { (positive) } }
                div class="card" { div { "利空" } div class="value down" { (negative) } }
            }
            a href=(format!("{base}?refresh=true")) { "刷新数据" }
            (filter_form(base, query, &categories(&board.stats), Some("/export/domestic-hotspots")))
            (hotspot_table(base, query, &board.page, true))
            (pagination(base, query, &board.page))
        },
    )
}
