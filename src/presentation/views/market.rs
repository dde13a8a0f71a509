// Market panels: overview, industries, stocks, companies, flows, indices, rankings
use super::{
    change_class, error_notice, filter_form, layout, pagination, signed, sort_header, source_badge,
    sparkline,
};
use crate::application::dashboard_service::{Overview, StockBoard};
use crate::application::fallback::Sourced;
use crate::application::list_query::{ListQuery, Page};
use crate::domain::company::ListedCompany;
use crate::domain::flow::CapitalFlow;
use crate::domain::industry::{Industry, IndustryDetail};
use crate::domain::market_index::{IndexPoint, WindIndustry};
use crate::domain::ranking::{RankingEntry, RankingKind};
use crate::domain::stock::StockMapping;
use maud::{html, Markup};

fn ratio(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".to_string())
}

fn flow_rows(flows: &[CapitalFlow]) -> Markup {
    html! {
        @for f in flows {
            tr {
                td { (f.region) }
                td { (format!("{:.2}", f.inflow)) }
                td { (format!("{:.2}", f.outflow)) }
                td class=(change_class(f.net())) { (signed(f.net())) }
                td { (f.date) }
            }
        }
    }
}

pub fn overview_page(overview: &Overview) -> Markup {
    layout(
        "总览",
        html! {
            h1 { "平台总览" }
            @match &overview.stats {
                Ok(stats) => {
                    div class="cards" {
                        div class="card" { div { "行业数" (source_badge(stats.source)) } div class="value" { (stats.data.industry_count) } }
                        div class="card" { div { "股票数" } div class="value" { (stats.data.stock_count) } }
                        div class="card" { div { "热点数" } div class="value" { (stats.data.hotspot_count) } }
                    }
                    @if let Some(updated) = stats.data.updated_at {
                        p { "更新时间：" (updated.format("%Y-%m-%d %H:%M:%S")) }
                    }
                }
                Err(message) => (error_notice(message)),
            }

            h2 { "热门资讯" }
            @match &overview.top_hotspots {
                Ok(hotspots) => {
                    (source_badge(hotspots.source))
                    table {
                        thead { tr { th { "标题" } th { "分类" } th { "热度" } th { "情绪" } } }
                        tbody {
                            @for h in &hotspots.data {
                                tr {
                                    td { a href=(format!("/panels/hotspots/{}", urlencoding::encode(&h.id))) { (h.title) } }
                                    td { (h.category) }
                                    td class=(h.heat_level().css_class()) { (format!("{:.1}", h.heat)) }
                                    td { (h.sentiment.label()) }
                                }
                            }
                        }
                    }
                }
                Err(message) => (error_notice(message)),
            }

            h2 { "全球资金流向" }
            @match &overview.flows {
                Ok(flows) => {
                    (source_badge(flows.source))
                    table {
                        thead { tr { th { "地区" } th { "流入" } th { "流出" } th { "净流入" } th { "日期" } } }
                        tbody { (flow_rows(&flows.data)) }
                    }
                }
                Err(message) => (error_notice(message)),
            }
        },
    )
}

pub fn industries_page(data: &Sourced<Page<Industry>>, query: &ListQuery) -> Markup {
    let base = "/panels/industries";
    let page = &data.data;
    layout(
        "行业分类",
        html! {
            h1 { "行业分类" (source_badge(data.source)) }
            (filter_form(base, query, &[], None))
            table {
                thead {
                    tr {
                        (sort_header(base, query, "code", "行业代码"))
                        (sort_header(base, query, "name", "行业名称"))
                        th { "级别" }
                        (sort_header(base, query, "stock_count", "成分股数"))
                        (sort_header(base, query, "avg_change_pct", "平均涨跌幅(%)"))
                    }
                }
                tbody {
                    @for i in &page.items {
                        tr {
                            td { (i.code) }
                            td { a href=(format!("{base}/{}", urlencoding::encode(&i.code))) { (i.name) } }
                            td { (i.level) }
                            td { (i.stock_count) }
                            td class=(change_class(i.avg_change_pct)) { (signed(i.avg_change_pct)) }
                        }
                    }
                }
            }
            (pagination(base, query, page))
        },
    )
}

fn stock_table(stocks: &[StockMapping], sortable: Option<(&str, &ListQuery)>) -> Markup {
    html! {
        table {
            thead {
                tr {
                    @if let Some((base, query)) = sortable {
                        (sort_header(base, query, "code", "代码"))
                        (sort_header(base, query, "name", "名称"))
                        (sort_header(base, query, "market", "市场"))
                        (sort_header(base, query, "industry_name", "所属行业"))
                    } @else {
                        th { "代码" } th { "名称" } th { "市场" } th { "所属行业" }
                    }
                }
            }
            tbody {
                @for s in stocks {
                    tr {
                        td { (s.code) }
                        td { (s.name) }
                        td { (s.market) }
                        td { (s.industry_name) }
                    }
                }
                @if stocks.is_empty() {
                    tr { td colspan="4" { "暂无数据" } }
                }
            }
        }
    }
}

pub fn industry_detail_page(data: &Sourced<IndustryDetail>) -> Markup {
    let detail = &data.data;
    layout(
        &detail.industry.name,
        html! {
            h1 { (detail.industry.name) " (" (detail.industry.code) ")" (source_badge(data.source)) }
            p {
                "成分股：" (detail.industry.stock_count)
                " · 平均涨跌幅："
                span class=(change_class(detail.industry.avg_change_pct)) { (signed(detail.industry.avg_change_pct)) "%" }
            }
            (stock_table(&detail.stocks, None))
            a href="/panels/industries" { "返回行业列表" }
        },
    )
}

pub fn stocks_page(data: &Sourced<StockBoard>, query: &ListQuery) -> Markup {
    let base = "/panels/stocks";
    let board = &data.data;
    layout(
        "股票映射",
        html! {
            h1 { "股票映射" (source_badge(data.source)) }
            div class="cards" {
                div class="card" { div { "股票总数" } div class="value" { (board.stats.total) } }
                @for (market, count) in &board.stats.by_market {
                    div class="card" { div { (market) } div class="value" { (count) } }
                }
            }
            (filter_form(base, query, &[], Some("/export/stocks")))
            (stock_table(&board.page.items, Some((base, query))))
            (pagination(base, query, &board.page))
        },
    )
}

pub fn companies_page(data: &Sourced<Page<ListedCompany>>, query: &ListQuery) -> Markup {
    let base = "/panels/companies";
    let page = &data.data;
    layout(
        "上市公司",
        html! {
            h1 { "上市公司" (source_badge(data.source)) }
            (filter_form(base, query, &[], Some("/export/companies")))
            table {
                thead {
                    tr {
                        (sort_header(base, query, "code", "代码"))
                        th { "名称" }
                        th { "行业" }
                        (sort_header(base, query, "price", "股价"))
                        (sort_header(base, query, "change_pct", "涨跌幅(%)"))
                        (sort_header(base, query, "pe", "市盈率"))
                        (sort_header(base, query, "pb", "市净率"))
                        (sort_header(base, query, "market_cap", "总市值(亿)"))
                    }
                }
                tbody {
                    @for c in &page.items {
                        tr {
                            td { (c.code) }
                            td { (c.name) }
                            td { (c.industry) }
                            td { (format!("{:.2}", c.price)) }
                            td class=(change_class(c.change_pct)) { (signed(c.change_pct)) }
                            td { (ratio(c.pe)) }
                            td { (ratio(c.pb)) }
                            td { (format!("{:.2}", c.market_cap)) }
                        }
                    }
                }
            }
            (pagination(base, query, page))
        },
    )
}

pub fn capital_flow_page(data: &Sourced<Page<CapitalFlow>>, query: &ListQuery) -> Markup {
    let base = "/panels/capital-flow";
    let page = &data.data;
    let total_net: f64 = page.items.iter().map(CapitalFlow::net).sum();
    layout(
        "全球资金流向",
        html! {
            h1 { "全球资金流向" (source_badge(data.source)) }
            p { "本页净流入合计：" span class=(change_class(total_net)) { (signed(total_net)) } " 亿美元" }
            (filter_form(base, query, &[], Some("/export/capital-flow")))
            table {
                thead {
                    tr {
                        (sort_header(base, query, "region", "地区"))
                        (sort_header(base, query, "inflow", "流入"))
                        (sort_header(base, query, "outflow", "流出"))
                        (sort_header(base, query, "net", "净流入"))
                        (sort_header(base, query, "date", "日期"))
                    }
                }
                tbody { (flow_rows(&page.items)) }
            }
            (pagination(base, query, page))
        },
    )
}

pub fn wind_industries_page(data: &Sourced<Page<WindIndustry>>, query: &ListQuery) -> Markup {
    let base = "/panels/wind-industries";
    let page = &data.data;
    let levels: Vec<String> = ["一级行业", "二级行业", "三级行业", "四级行业"]
        .into_iter()
        .map(String::from)
        .collect();
    layout(
        "Wind行业",
        html! {
            h1 { "Wind行业分类" (source_badge(data.source)) }
            (filter_form(base, query, &levels, None))
            table {
                thead {
                    tr {
                        (sort_header(base, query, "code", "代码"))
                        (sort_header(base, query, "name", "名称"))
                        (sort_header(base, query, "level", "级别"))
                        (sort_header(base, query, "constituents", "成分股数"))
                    }
                }
                tbody {
                    @for w in &page.items {
                        tr {
                            td { (w.code) }
                            td { (w.name) }
                            td { (w.level_label()) }
                            td { (w.constituents) }
                        }
                    }
                }
            }
            (pagination(base, query, page))
        },
    )
}

pub fn jian_index_page(data: &Sourced<Page<IndexPoint>>, query: &ListQuery) -> Markup {
    let base = "/panels/jian-index";
    let page = &data.data;
    let values: Vec<f64> = page.items.iter().map(|p| p.value).collect();
    layout(
        "腾讯见指数",
        html! {
            h1 { "腾讯见指数" (source_badge(data.source)) }
            (sparkline(&values, 600, 120))
            table {
                thead {
                    tr {
                        (sort_header(base, query, "date", "日期"))
                        (sort_header(base, query, "value", "指数"))
                        (sort_header(base, query, "change_pct", "涨跌幅(%)"))
                    }
                }
                tbody {
                    @for p in &page.items {
                        tr {
                            td { (p.date) }
                            td { (format!("{:.2}", p.value)) }
                            td class=(change_class(p.change_pct)) { (signed(p.change_pct)) }
                        }
                    }
                }
            }
            (pagination(base, query, page))
        },
    )
}

pub fn rankings_page(kind: RankingKind, data: &Sourced<Vec<RankingEntry>>) -> Markup {
    layout(
        kind.title(),
        html! {
            h1 { (kind.title()) (source_badge(data.source)) }
            div class="toolbar" {
                @for k in RankingKind::ALL {
                    a href=(format!("/panels/rankings/{k}")) { (k.title()) }
                }
            }
            table {
                thead { tr { th { "排名" } th { "代码" } th { "名称" } th { (kind.value_label()) } } }
                tbody {
                    @for e in &data.data {
                        tr {
                            td { (e.rank) }
                            td { (e.code) }
                            td { (e.name) }
                            @match kind {
                                RankingKind::Gainers | RankingKind::Losers => {
                                    td class=(change_class(e.value)) { (signed(e.value)) }
                                }
                                _ => {
                                    td { (format!("{:.2}", e.value)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::list_query::{paginate, PageLimits};
    use crate::application::mock::MockGenerator;

    #[test]
    fn test_overview_degrades_per_section() {
        let overview = Overview {
            stats: Err("无法连接数据服务".to_string()),
            top_hotspots: Ok(Sourced::live(vec![])),
            flows: Ok(Sourced::mock(MockGenerator::new(Some(1)).capital_flows())),
        };
        let html = overview_page(&overview).into_string();
        assert!(html.contains("加载失败：无法连接数据服务"));
        assert!(html.contains("北美"));
        assert!(html.contains("模拟数据"));
    }

    #[test]
    fn test_companies_page_marks_missing_ratio() {
        let mut companies = MockGenerator::new(Some(4)).listed_companies(1);
        companies[0].pe = None;
        let page = paginate(companies, 1, None, PageLimits::default());
        let html = companies_page(&Sourced::live(page), &ListQuery::default()).into_string();
        assert!(html.contains("<td>-</td>"));
        assert!(html.contains("/export/companies"));
    }

    #[test]
    fn test_rankings_page_links_every_board() {
        let entries = MockGenerator::new(Some(4)).rankings(RankingKind::Losers, 3);
        let html = rankings_page(RankingKind::Losers, &Sourced::mock(entries)).into_string();
        for k in RankingKind::ALL {
            assert!(html.contains(&format!("/panels/rankings/{k}")));
        }
        assert!(html.contains("class=\"down\""));
    }
}
