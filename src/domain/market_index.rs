// Index-style feeds: Wind industry classification and the Tencent Jian index
use crate::application::list_query::Listable;
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Deserialize)]
pub struct WindIndustry {
    #[serde(deserialize_with = "super::string_or_number")]
    pub code: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub constituents: u32,
}

fn default_level() -> u8 {
    1
}

impl WindIndustry {
    pub fn level_label(&self) -> &'static str {
        match self.level {
            1 => "一级行业",
            2 => "二级行业",
            3 => "三级行业",
            _ => "四级行业",
        }
    }
}

impl Listable for WindIndustry {
    const SORT_FIELDS: &'static [&'static str] = &["code", "name", "level", "constituents"];

    fn category(&self) -> Option<&str> {
        Some(self.level_label())
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.code, self.name)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => self.code.cmp(&other.code),
            "name" => self.name.cmp(&other.name),
            "level" => self.level.cmp(&other.level),
            "constituents" => self.constituents.cmp(&other.constituents),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default, alias = "changePercent", alias = "change")]
    pub change_pct: f64,
}

impl Listable for IndexPoint {
    const SORT_FIELDS: &'static [&'static str] = &["date", "value", "change_pct"];

    fn search_text(&self) -> String {
        self.date.to_string()
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "date" => self.date.cmp(&other.date),
            "value" => self.value.total_cmp(&other.value),
            "change_pct" => self.change_pct.total_cmp(&other.change_pct),
            _ => Ordering::Equal,
        }
    }
}
