// Industry classification domain models
use super::stock::StockMapping;
use crate::application::list_query::Listable;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Deserialize)]
pub struct Industry {
    #[serde(deserialize_with = "super::string_or_number")]
    pub code: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default, alias = "parentCode")]
    pub parent_code: Option<String>,
    #[serde(default, alias = "stockCount")]
    pub stock_count: u32,
    #[serde(default, alias = "avgChange", alias = "avg_change")]
    pub avg_change_pct: f64,
}

fn default_level() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryDetail {
    pub industry: Industry,
    #[serde(default)]
    pub stocks: Vec<StockMapping>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformStats {
    #[serde(default, alias = "industryCount")]
    pub industry_count: u32,
    #[serde(default, alias = "stockCount")]
    pub stock_count: u32,
    #[serde(default, alias = "hotspotCount")]
    pub hotspot_count: u32,
    #[serde(default, deserialize_with = "super::optional_datetime", alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listable for Industry {
    const SORT_FIELDS: &'static [&'static str] = &["code", "name", "stock_count", "avg_change_pct"];

    fn category(&self) -> Option<&str> {
        self.parent_code.as_deref()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.code, self.name)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => self.code.cmp(&other.code),
            "name" => self.name.cmp(&other.name),
            "stock_count" => self.stock_count.cmp(&other.stock_count),
            "avg_change_pct" => self.avg_change_pct.total_cmp(&other.avg_change_pct),
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_defaults() {
        let industry: Industry =
            serde_json::from_str(r#"{"code": 801010, "name": "农林牧渔"}"#).unwrap();
        assert_eq!(industry.code, "801010");
        assert_eq!(industry.level, 1);
        assert_eq!(industry.stock_count, 0);
        assert!(industry.parent_code.is_none());
    }

    #[test]
    fn test_detail_without_stocks() {
        let detail: IndustryDetail =
            serde_json::from_str(r#"{"industry": {"code": "801080", "name": "电子", "stockCount": 12}}"#)
                .unwrap();
        assert_eq!(detail.industry.stock_count, 12);
        assert!(detail.stocks.is_empty());
    }

    #[test]
    fn test_platform_stats_updated_at_formats() {
        let stats: PlatformStats =
            serde_json::from_str(r#"{"industryCount": 31, "updatedAt": "2024-05-01 16:30:00"}"#).unwrap();
        assert_eq!(stats.industry_count, 31);
        assert_eq!(
            stats.updated_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T08:30:00+00:00".to_string())
        );

        let stats: PlatformStats = serde_json::from_str(r#"{"updatedAt": ""}"#).unwrap();
        assert!(stats.updated_at.is_none());
    }
}
