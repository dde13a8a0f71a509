// HTML views - page layout and shared table components
pub mod hotspots;
pub mod market;
pub mod rotation;

use crate::application::fallback::DataSource;
use crate::application::list_query::{ListQuery, Page, SortOrder};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: -apple-system, "PingFang SC", "Microsoft YaHei", sans-serif; margin: 0; background: #f5f6fa; color: #222; }
nav { background: #1f2d3d; padding: 0 16px; display: flex; flex-wrap: wrap; gap: 4px; }
nav a { color: #cfd8e3; text-decoration: none; padding: 12px 10px; font-size: 14px; }
nav a:hover { color: #fff; }
main { padding: 20px; }
h1 { font-size: 20px; margin: 0 0 12px; }
table { width: 100%; border-collapse: collapse; background: #fff; font-size: 13px; }
th, td { padding: 8px 10px; border-bottom: 1px solid #eef0f4; text-align: left; }
th a { color: inherit; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 12px; margin-left: 8px; }
.badge.live { background: #e6f7ee; color: #1a7f45; }
.badge.mock { background: #fff4e0; color: #b26a00; }
.notice { padding: 10px 14px; border-radius: 4px; margin: 10px 0; }
.notice.error { background: #fdecea; color: #b3261e; }
.notice.ok { background: #e6f7ee; color: #1a7f45; }
.up { color: #d9363e; } .down { color: #1a9c5b; }
.heat-hot { color: #d9363e; font-weight: bold; } .heat-warm { color: #e68a00; } .heat-mild { color: #7a8599; }
.cards { display: flex; gap: 12px; margin-bottom: 16px; flex-wrap: wrap; }
.card { background: #fff; padding: 12px 16px; border-radius: 6px; min-width: 140px; }
.card .value { font-size: 22px; font-weight: bold; }
.pager { margin: 12px 0; display: flex; gap: 8px; align-items: center; font-size: 13px; }
.toolbar { margin-bottom: 12px; display: flex; gap: 8px; align-items: center; }
"#;

const NAV: &[(&str, &str)] = &[
    ("/", "总览"),
    ("/panels/industries", "行业分类"),
    ("/panels/stocks", "股票映射"),
    ("/panels/hotspots", "热点资讯"),
    ("/panels/domestic-hotspots", "国内热点"),
    ("/panels/capital-flow", "全球资金流向"),
    ("/panels/companies", "上市公司"),
    ("/panels/wind-industries", "Wind行业"),
    ("/panels/jian-index", "腾讯见指数"),
    ("/panels/rankings/gainers", "排行榜"),
    ("/panels/rotation", "板块轮动"),
];

pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-CN" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - 金融数据管理平台" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    @for (href, label) in NAV {
                        a href=(href) { (label) }
                    }
                }
                main { (body) }
            }
        }
    }
}

pub fn source_badge(source: DataSource) -> Markup {
    let class = match source {
        DataSource::Live => "badge live",
        DataSource::Mock => "badge mock",
    };
    html! { span class=(class) { (source.label()) } }
}

/// Inline failure notice rendered in place of a table.
pub fn error_notice(message: &str) -> Markup {
    html! { div class="notice error" { "加载失败：" (message) } }
}

pub fn result_notice(message: &str, ok: bool) -> Markup {
    let class = if ok { "notice ok" } else { "notice error" };
    html! { div class=(class) { (message) } }
}

pub fn not_found(what: &str) -> Markup {
    html! { div class="notice error" { "未找到：" (what) } }
}

pub fn change_class(value: f64) -> &'static str {
    if value > 0.0 {
        "up"
    } else if value < 0.0 {
        "down"
    } else {
        ""
    }
}

pub fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// Column header that toggles sort direction on the given field.
pub fn sort_header(base: &str, query: &ListQuery, field: &str, label: &str) -> Markup {
    let active = query.sort.as_deref() == Some(field);
    let next = ListQuery {
        sort: Some(field.to_string()),
        order: if active && query.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        },
        ..query.clone()
    };
    let arrow = match (active, query.order) {
        (true, SortOrder::Asc) => " ↑",
        (true, SortOrder::Desc) => " ↓",
        _ => "",
    };
    html! {
        th { a href=(format!("{base}?{}", next.to_query_string(1))) { (label) (arrow) } }
    }
}

pub fn pagination<T>(base: &str, query: &ListQuery, page: &Page<T>) -> Markup {
    html! {
        div class="pager" {
            @if page.has_prev() {
                a href=(format!("{base}?{}", query.to_query_string(1))) { "首页" }
                a href=(format!("{base}?{}", query.to_query_string(page.page - 1))) { "上一页" }
            }
            span { "第 " (page.page) " / " (page.total_pages) " 页，共 " (page.total) " 条" }
            @if page.has_next() {
                a href=(format!("{base}?{}", query.to_query_string(page.page + 1))) { "下一页" }
                a href=(format!("{base}?{}", query.to_query_string(page.total_pages))) { "末页" }
            }
        }
    }
}

/// Keyword / category filter form; sort survives as hidden fields.
pub fn filter_form(base: &str, query: &ListQuery, categories: &[String], export: Option<&str>) -> Markup {
    let selected = query.category.clone().unwrap_or_default();
    html! {
        form class="toolbar" method="get" action=(base) {
            input type="search" name="keyword" placeholder="搜索关键词"
                value=(query.keyword.clone().unwrap_or_default());
            @if !categories.is_empty() {
                select name="category" {
                    option value="all" { "全部分类" }
                    @for c in categories {
                        option value=(c) selected[*c == selected] { (c) }
                    }
                }
            }
            @if let Some(sort) = &query.sort {
                input type="hidden" name="sort" value=(sort);
                @if query.order == SortOrder::Desc {
                    input type="hidden" name="order" value="desc";
                }
            }
            button type="submit" { "筛选" }
            @if let Some(href) = export {
                a href=(format!("{href}?{}", query.to_query_string(1))) { "导出CSV" }
            }
        }
    }
}

/// Inline SVG line chart, scaled to the value range.
pub fn sparkline(values: &[f64], width: u32, height: u32) -> Markup {
    if values.len() < 2 {
        return html! {};
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if (max - min).abs() < f64::EPSILON { 1.0 } else { max - min };
    let step = f64::from(width) / (values.len() - 1) as f64;

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = i as f64 * step;
            let y = f64::from(height) - (v - min) / span * f64::from(height);
            format!("{x:.1},{y:.1}")
        })
        .collect();

    html! {
        svg width=(width) height=(height) viewBox=(format!("0 0 {width} {height}")) {
            polyline fill="none" stroke="#3b7ddd" stroke-width="1.5" points=(points.join(" ")) {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_is_escaped() {
        let html = error_notice("<script>alert(1)</script>").into_string();
        assert!(html.contains("加载失败"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_sort_header_toggles_order() {
        let query = ListQuery {
            sort: Some("heat".to_string()),
            ..Default::default()
        };
        let html = sort_header("/panels/hotspots", &query, "heat", "热度").into_string();
        assert!(html.contains("sort=heat&amp;order=desc"));
        assert!(html.contains("↑"));

        let other = sort_header("/panels/hotspots", &query, "title", "标题").into_string();
        assert!(other.contains("sort=title"));
        assert!(!other.contains("order=desc"));
    }

    #[test]
    fn test_pagination_links() {
        let page = Page {
            items: vec![1, 2],
            page: 2,
            page_size: 2,
            total: 6,
            total_pages: 3,
        };
        let html = pagination("/panels/stocks", &ListQuery::default(), &page).into_string();
        assert!(html.contains("/panels/stocks?page=1"));
        assert!(html.contains("/panels/stocks?page=3"));
        assert!(html.contains("第 2 / 3 页"));
    }

    #[test]
    fn test_sparkline() {
        assert!(sparkline(&[1.0], 100, 20).into_string().is_empty());
        let svg = sparkline(&[1.0, 3.0, 2.0], 100, 20).into_string();
        assert!(svg.contains("0.0,20.0 50.0,0.0 100.0,10.0"));
    }
}
