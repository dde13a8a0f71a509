// Sector rotation board
use super::{change_class, layout, signed, sparkline};
use crate::domain::rotation::SectorForecast;
use maud::{html, Markup};

fn curve(forecast: &SectorForecast, width: u32, height: u32) -> Markup {
    let values: Vec<f64> = forecast.points.iter().map(|p| p.value).collect();
    sparkline(&values, width, height)
}

pub fn rotation_page(board: &[SectorForecast], focus: Option<&SectorForecast>) -> Markup {
    layout(
        "板块轮动",
        html! {
            h1 { "板块轮动" }
            p class="notice ok" { "曲线为模拟走势，仅供展示，不构成投资建议。" }
            form class="toolbar" method="get" action="/panels/rotation" {
                input type="search" name="sector" placeholder="输入板块名称";
                button type="submit" { "查看走势" }
            }
            @if let Some(f) = focus {
                h2 { (f.sector) " · " (f.trend_label()) }
                (curve(f, 600, 160))
                p {
                    "动量：" span class=(change_class(f.momentum)) { (signed(f.momentum)) }
                    " · 强度评分：" (format!("{:.0}", f.score))
                }
            }
            table {
                thead { tr { th { "排名" } th { "板块" } th { "走势" } th { "动量" } th { "评分" } th { "信号" } } }
                tbody {
                    @for (i, f) in board.iter().enumerate() {
                        tr {
                            td { (i + 1) }
                            td { a href=(format!("/panels/rotation?sector={}", urlencoding::encode(&f.sector))) { (f.sector) } }
                            td { (curve(f, 160, 32)) }
                            td class=(change_class(f.momentum)) { (signed(f.momentum)) }
                            td { (format!("{:.0}", f.score)) }
                            td { (f.trend_label()) }
                        }
                    }
                }
            }
        },
    )
}
