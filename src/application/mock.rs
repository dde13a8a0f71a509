// Mock data generation - placeholder rows used when the backend is unavailable
use crate::domain::company::ListedCompany;
use crate::domain::flow::CapitalFlow;
use crate::domain::hotspot::{Hotspot, Sentiment};
use crate::domain::industry::{Industry, IndustryDetail, PlatformStats};
use crate::domain::market_index::{IndexPoint, WindIndustry};
use crate::domain::ranking::{RankingEntry, RankingKind};
use crate::domain::stock::StockMapping;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const INDUSTRIES: &[(&str, &str)] = &[
    ("801010", "农林牧渔"),
    ("801030", "基础化工"),
    ("801040", "钢铁"),
    ("801050", "有色金属"),
    ("801080", "电子"),
    ("801110", "家用电器"),
    ("801120", "食品饮料"),
    ("801150", "医药生物"),
    ("801160", "公用事业"),
    ("801180", "房地产"),
    ("801730", "电力设备"),
    ("801740", "国防军工"),
    ("801750", "计算机"),
    ("801760", "传媒"),
    ("801770", "通信"),
    ("801780", "银行"),
    ("801790", "非银金融"),
    ("801880", "汽车"),
];

const WIND_INDUSTRIES: &[(&str, &str, u8)] = &[
    ("10", "能源", 1),
    ("15", "材料", 1),
    ("20", "工业", 1),
    ("25", "可选消费", 1),
    ("30", "日常消费", 1),
    ("35", "医疗保健", 1),
    ("40", "金融", 1),
    ("45", "信息技术", 1),
    ("50", "电信服务", 1),
    ("55", "公用事业", 1),
    ("60", "房地产", 1),
    ("4510", "软件与服务", 2),
    ("4520", "技术硬件与设备", 2),
    ("4530", "半导体产品与设备", 2),
    ("4010", "银行", 2),
    ("3510", "医疗保健设备与服务", 2),
];

const HOTSPOT_CATEGORIES: &[&str] = &["宏观", "政策", "行业", "公司", "科技", "国际"];

const HOTSPOT_TOPICS: &[&str] = &[
    "央行宣布降准0.25个百分点",
    "新能源汽车月度销量创新高",
    "人工智能大模型迎来新一轮融资潮",
    "半导体设备国产化进程加速",
    "房地产支持政策持续加码",
    "光伏组件价格企稳回升",
    "创新药出海授权交易频现",
    "低空经济试点城市扩容",
    "消费电子旺季备货启动",
    "稀土出口管制细则落地",
    "跨境资本流动监测加强",
    "券商并购重组提速",
];

const SOURCES: &[&str] = &["新华社", "财联社", "证券时报", "第一财经", "上海证券报", "21世纪经济报道"];

const PROVINCES: &[&str] = &[
    "北京", "上海", "广东", "浙江", "江苏", "山东", "四川", "湖北", "福建", "安徽",
];

const REGIONS: &[&str] = &[
    "北美", "欧洲", "日本", "中国内地", "中国香港", "东南亚", "印度", "中东", "拉美",
];

const NAME_PREFIXES: &[&str] = &["华", "中", "东方", "国泰", "长江", "海", "天", "新", "恒", "金"];
const NAME_SUFFIXES: &[&str] = &["科技", "电子", "医药", "能源", "银行", "证券", "汽车", "材料", "电气", "食品"];

pub struct MockGenerator {
    rng: StdRng,
}

const STOCK_CODE_SPAN: usize = 10_000;

impl MockGenerator {
    /// A fixed seed gives reproducible output; `None` draws from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn company_name(&mut self) -> String {
        format!("{}{}", self.pick(NAME_PREFIXES), self.pick(NAME_SUFFIXES))
    }

    /// Six-digit exchange-style code. Distinct `index` values below
    /// `STOCK_CODE_SPAN` give distinct codes.
    fn stock_code(&mut self, index: usize) -> (String, &'static str) {
        let (prefix, market) = match self.rng.gen_range(0..4) {
            0 => ("60", "SH"),
            1 => ("00", "SZ"),
            2 => ("30", "SZ"),
            _ => ("68", "SH"),
        };
        (format!("{prefix}{:04}", index % STOCK_CODE_SPAN), market)
    }

    pub fn platform_stats(&mut self) -> PlatformStats {
        PlatformStats {
            industry_count: INDUSTRIES.len() as u32,
            stock_count: self.rng.gen_range(4800..5400),
            hotspot_count: self.rng.gen_range(200..1200),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn industries(&mut self) -> Vec<Industry> {
        INDUSTRIES
            .iter()
            .map(|(code, name)| Industry {
                code: code.to_string(),
                name: name.to_string(),
                level: 1,
                parent_code: None,
                stock_count: self.rng.gen_range(20..480),
                avg_change_pct: Self::round2(self.rng.gen_range(-4.0..4.0)),
            })
            .collect()
    }

    pub fn industry_detail(&mut self, code: &str) -> IndustryDetail {
        let name = INDUSTRIES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, n)| n.to_string())
            .unwrap_or_else(|| format!("行业{code}"));
        let count = self.rng.gen_range(8..20);
        let stocks = (0..count)
            .map(|i| {
                let (stock_code, market) = self.stock_code(i);
                StockMapping {
                    code: stock_code,
                    name: self.company_name(),
                    market: market.to_string(),
                    industry_code: code.to_string(),
                    industry_name: name.clone(),
                }
            })
            .collect::<Vec<_>>();

        IndustryDetail {
            industry: Industry {
                code: code.to_string(),
                name,
                level: 1,
                parent_code: None,
                stock_count: stocks.len() as u32,
                avg_change_pct: Self::round2(self.rng.gen_range(-4.0..4.0)),
            },
            stocks,
        }
    }

    pub fn stock_mappings(&mut self, count: usize) -> Vec<StockMapping> {
        (0..count)
            .map(|i| {
                let (code, market) = self.stock_code(i);
                let (industry_code, industry_name) =
                    INDUSTRIES[self.rng.gen_range(0..INDUSTRIES.len())];
                StockMapping {
                    code,
                    name: self.company_name(),
                    market: market.to_string(),
                    industry_code: industry_code.to_string(),
                    industry_name: industry_name.to_string(),
                }
            })
            .collect()
    }

    pub fn hotspot(&mut self, id: &str) -> Hotspot {
        let sentiment = match self.rng.gen_range(0..10) {
            0..=4 => Sentiment::Positive,
            5..=7 => Sentiment::Neutral,
            _ => Sentiment::Negative,
        };
        let topic = self.pick(HOTSPOT_TOPICS);
        let related = (0..self.rng.gen_range(0..4))
            .map(|i| self.stock_code(i + 100).0)
            .collect();

        Hotspot {
            id: id.to_string(),
            title: topic.to_string(),
            summary: format!("{topic}，市场关注度持续升温。"),
            source: self.pick(SOURCES).to_string(),
            category: self.pick(HOTSPOT_CATEGORIES).to_string(),
            heat: Self::round2(self.rng.gen_range(0.0..=100.0)),
            sentiment,
            region: None,
            published_at: Utc::now() - Duration::minutes(self.rng.gen_range(0..72 * 60)),
            related_stocks: related,
        }
    }

    pub fn hotspots(&mut self, count: usize) -> Vec<Hotspot> {
        (1..=count).map(|i| self.hotspot(&format!("mock-{i}"))).collect()
    }

    /// The domestic feed additionally tags each row with a province.
    pub fn domestic_hotspots(&mut self, count: usize) -> Vec<Hotspot> {
        (1..=count)
            .map(|i| {
                let mut hotspot = self.hotspot(&format!("dom-{i}"));
                hotspot.region = Some(self.pick(PROVINCES).to_string());
                hotspot
            })
            .collect()
    }

    pub fn capital_flows(&mut self) -> Vec<CapitalFlow> {
        let today = Utc::now().date_naive();
        REGIONS
            .iter()
            .map(|region| CapitalFlow {
                region: region.to_string(),
                inflow: Self::round2(self.rng.gen_range(10.0..500.0)),
                outflow: Self::round2(self.rng.gen_range(10.0..500.0)),
                date: today,
            })
            .collect()
    }

    pub fn listed_companies(&mut self, count: usize) -> Vec<ListedCompany> {
        (0..count)
            .map(|i| {
                let (code, _) = self.stock_code(i);
                // Roughly one in eight companies is loss-making and has no PE.
                let pe = if self.rng.gen_bool(0.125) {
                    None
                } else {
                    Some(Self::round2(self.rng.gen_range(5.0..80.0)))
                };
                ListedCompany {
                    code,
                    name: self.company_name(),
                    industry: INDUSTRIES[self.rng.gen_range(0..INDUSTRIES.len())].1.to_string(),
                    price: Self::round2(self.rng.gen_range(2.0..300.0)),
                    change_pct: Self::round2(self.rng.gen_range(-10.0..10.0)),
                    pe,
                    pb: Some(Self::round2(self.rng.gen_range(0.5..12.0))),
                    market_cap: Self::round2(self.rng.gen_range(20.0..5000.0)),
                }
            })
            .collect()
    }

    pub fn wind_industries(&mut self) -> Vec<WindIndustry> {
        WIND_INDUSTRIES
            .iter()
            .map(|(code, name, level)| WindIndustry {
                code: code.to_string(),
                name: name.to_string(),
                level: *level,
                constituents: self.rng.gen_range(15..600),
            })
            .collect()
    }

    /// Random walk ending today, oldest first.
    pub fn jian_index(&mut self, days: usize) -> Vec<IndexPoint> {
        let today = Utc::now().date_naive();
        let mut value = 1000.0;
        let mut points = Vec::with_capacity(days);
        for offset in (0..days).rev() {
            let change_pct: f64 = self.rng.gen_range(-2.5..2.5);
            value *= 1.0 + change_pct / 100.0;
            points.push(IndexPoint {
                date: today - Duration::days(offset as i64),
                value: Self::round2(value),
                change_pct: Self::round2(change_pct),
            });
        }
        points
    }

    pub fn rankings(&mut self, kind: RankingKind, count: usize) -> Vec<RankingEntry> {
        let mut values: Vec<f64> = (0..count)
            .map(|_| {
                let v = match kind {
                    RankingKind::Gainers => self.rng.gen_range(0.0..20.0),
                    RankingKind::Losers => self.rng.gen_range(-20.0..0.0),
                    RankingKind::Turnover => self.rng.gen_range(5.0..300.0),
                    RankingKind::Heat => self.rng.gen_range(0.0..=100.0),
                };
                Self::round2(v)
            })
            .collect();

        // Losers rank most negative first, every other board descending.
        match kind {
            RankingKind::Losers => values.sort_by(|a, b| a.total_cmp(b)),
            _ => values.sort_by(|a, b| b.total_cmp(a)),
        }

        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| RankingEntry {
                rank: i as u32 + 1,
                code: self.stock_code(i).0,
                name: self.company_name(),
                value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_requested_counts_are_exact() {
        let mut mock = MockGenerator::new(Some(7));
        assert_eq!(mock.hotspots(37).len(), 37);
        assert_eq!(mock.domestic_hotspots(5000).len(), 5000);
        assert_eq!(mock.stock_mappings(120).len(), 120);
        assert_eq!(mock.listed_companies(64).len(), 64);
        assert_eq!(mock.jian_index(30).len(), 30);
        assert_eq!(mock.rankings(RankingKind::Heat, 10).len(), 10);
        assert!(mock.hotspots(0).is_empty());
    }

    #[test]
    fn test_stock_codes_are_unique_past_a_thousand_rows() {
        let stocks = MockGenerator::new(Some(5)).stock_mappings(2500);
        let codes: HashSet<_> = stocks.iter().map(|s| s.code.clone()).collect();
        assert_eq!(codes.len(), 2500);
        assert!(stocks.iter().all(|s| s.code.len() == 6));
    }

    #[test]
    fn test_hotspots_are_well_formed() {
        let mut mock = MockGenerator::new(Some(11));
        let hotspots = mock.domestic_hotspots(500);
        let ids: HashSet<_> = hotspots.iter().map(|h| h.id.clone()).collect();
        assert_eq!(ids.len(), 500);
        for h in &hotspots {
            assert!(!h.title.is_empty());
            assert!(!h.category.is_empty());
            assert!(!h.source.is_empty());
            assert!((0.0..=100.0).contains(&h.heat));
            assert!(h.region.is_some());
        }
    }

    #[test]
    fn test_catalogue_generators() {
        let mut mock = MockGenerator::new(Some(3));
        assert_eq!(mock.industries().len(), INDUSTRIES.len());
        assert_eq!(mock.wind_industries().len(), WIND_INDUSTRIES.len());
        let flows = mock.capital_flows();
        assert_eq!(flows.len(), REGIONS.len());
        assert!(flows.iter().all(|f| f.inflow > 0.0 && f.outflow > 0.0));
    }

    #[test]
    fn test_industry_detail_uses_catalogue_name() {
        let mut mock = MockGenerator::new(Some(3));
        let detail = mock.industry_detail("801080");
        assert_eq!(detail.industry.name, "电子");
        assert!(!detail.stocks.is_empty());
        assert!(detail.stocks.iter().all(|s| s.industry_code == "801080"));
        assert_eq!(mock.industry_detail("999999").industry.name, "行业999999");
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let a = MockGenerator::new(Some(42)).listed_companies(20);
        let b = MockGenerator::new(Some(42)).listed_companies(20);
        let codes = |v: &[ListedCompany]| v.iter().map(|c| (c.code.clone(), c.price)).collect::<Vec<_>>();
        assert_eq!(codes(&a), codes(&b));
    }

    #[test]
    fn test_rankings_are_ordered() {
        let mut mock = MockGenerator::new(Some(5));
        let gainers = mock.rankings(RankingKind::Gainers, 15);
        assert!(gainers.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(gainers[0].rank, 1);
        let losers = mock.rankings(RankingKind::Losers, 15);
        assert!(losers.windows(2).all(|w| w[0].value <= w[1].value));
        assert!(losers.iter().all(|e| e.value <= 0.0));
    }

    #[test]
    fn test_jian_index_ends_today() {
        let mut mock = MockGenerator::new(Some(9));
        let series = mock.jian_index(10);
        assert_eq!(series.last().map(|p| p.date), Some(Utc::now().date_naive()));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }
}
