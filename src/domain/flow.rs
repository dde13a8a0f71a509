// Global capital flow rows
use crate::application::csv_export::CsvRecord;
use crate::application::list_query::Listable;
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Ordering;

/// Amounts are in 100 million USD.
#[derive(Debug, Clone, Deserialize)]
pub struct CapitalFlow {
    pub region: String,
    #[serde(default)]
    pub inflow: f64,
    #[serde(default)]
    pub outflow: f64,
    pub date: NaiveDate,
}

impl CapitalFlow {
    pub fn net(&self) -> f64 {
        self.inflow - self.outflow
    }
}

impl Listable for CapitalFlow {
    const SORT_FIELDS: &'static [&'static str] = &["region", "inflow", "outflow", "net", "date"];

    fn search_text(&self) -> String {
        self.region.clone()
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "region" => self.region.cmp(&other.region),
            "inflow" => self.inflow.total_cmp(&other.inflow),
            "outflow" => self.outflow.total_cmp(&other.outflow),
            "net" => self.net().total_cmp(&other.net()),
            "date" => self.date.cmp(&other.date),
            _ => Ordering::Equal,
        }
    }
}

impl CsvRecord for CapitalFlow {
    const HEADERS: &'static [&'static str] = &["地区", "流入", "流出", "净流入", "日期"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.region.clone(),
            format!("{:.2}", self.inflow),
            format!("{:.2}", self.outflow),
            format!("{:.2}", self.net()),
            self.date.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_flow() {
        let flow: CapitalFlow = serde_json::from_str(
            r#"{"region": "北美", "inflow": 120.5, "outflow": 150.0, "date": "2024-06-03"}"#,
        )
        .unwrap();
        assert!((flow.net() + 29.5).abs() < 1e-9);
        assert_eq!(flow.fields()[3], "-29.50");
    }
}
