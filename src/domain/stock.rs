// Stock-to-industry mapping models
use crate::application::csv_export::CsvRecord;
use crate::application::list_query::Listable;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct StockMapping {
    #[serde(deserialize_with = "super::string_or_number")]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub market: String,
    #[serde(default, alias = "industryCode")]
    pub industry_code: String,
    #[serde(default, alias = "industryName")]
    pub industry_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockStats {
    #[serde(default)]
    pub total: usize,
    #[serde(default, alias = "byMarket")]
    pub by_market: BTreeMap<String, usize>,
}

impl StockStats {
    pub fn from_mappings(stocks: &[StockMapping]) -> Self {
        let mut by_market = BTreeMap::new();
        for s in stocks {
            *by_market.entry(s.market.clone()).or_insert(0) += 1;
        }
        Self {
            total: stocks.len(),
            by_market,
        }
    }
}

impl Listable for StockMapping {
    const SORT_FIELDS: &'static [&'static str] = &["code", "name", "industry_name", "market"];

    fn category(&self) -> Option<&str> {
        Some(&self.industry_code)
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.code, self.name, self.industry_name)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => self.code.cmp(&other.code),
            "name" => self.name.cmp(&other.name),
            "industry_name" => self.industry_name.cmp(&other.industry_name),
            "market" => self.market.cmp(&other.market),
            _ => Ordering::Equal,
        }
    }
}

impl CsvRecord for StockMapping {
    const HEADERS: &'static [&'static str] = &["代码", "名称", "市场", "行业代码", "行业名称"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.name.clone(),
            self.market.clone(),
            self.industry_code.clone(),
            self.industry_name.clone(),
        ]
    }
}
