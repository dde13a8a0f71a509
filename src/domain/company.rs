// Listed company quote rows
use crate::application::csv_export::CsvRecord;
use crate::application::list_query::Listable;
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Deserialize)]
pub struct ListedCompany {
    #[serde(deserialize_with = "super::string_or_number")]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, alias = "changePercent", alias = "change_percent")]
    pub change_pct: f64,
    #[serde(default)]
    pub pe: Option<f64>,
    #[serde(default)]
    pub pb: Option<f64>,
    /// In units of 100 million CNY (亿元).
    #[serde(default, alias = "marketCap")]
    pub market_cap: f64,
}

fn cmp_ratio(a: Option<f64>, b: Option<f64>) -> Ordering {
    // Missing ratios (loss-making companies) sort below any value.
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

impl Listable for ListedCompany {
    const SORT_FIELDS: &'static [&'static str] =
        &["code", "price", "change_pct", "pe", "pb", "market_cap"];

    fn category(&self) -> Option<&str> {
        Some(&self.industry)
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.code, self.name, self.industry)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => self.code.cmp(&other.code),
            "price" => self.price.total_cmp(&other.price),
            "change_pct" => self.change_pct.total_cmp(&other.change_pct),
            "pe" => cmp_ratio(self.pe, other.pe),
            "pb" => cmp_ratio(self.pb, other.pb),
            "market_cap" => self.market_cap.total_cmp(&other.market_cap),
            _ => Ordering::Equal,
        }
    }
}

impl CsvRecord for ListedCompany {
    const HEADERS: &'static [&'static str] =
        &["代码", "名称", "行业", "股价", "涨跌幅(%)", "市盈率", "市净率", "总市值(亿)"];

    fn fields(&self) -> Vec<String> {
        let ratio = |r: Option<f64>| r.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string());
        vec![
            self.code.clone(),
            self.name.clone(),
            self.industry.clone(),
            format!("{:.2}", self.price),
            format!("{:.2}", self.change_pct),
            ratio(self.pe),
            ratio(self.pb),
            format!("{:.2}", self.market_cap),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(pe: Option<f64>) -> ListedCompany {
        ListedCompany {
            code: "600519".to_string(),
            name: "贵州茅台".to_string(),
            industry: "食品饮料".to_string(),
            price: 1700.0,
            change_pct: 1.2,
            pe,
            pb: None,
            market_cap: 21000.0,
        }
    }

    #[test]
    fn test_missing_pe_sorts_lowest() {
        assert_eq!(company(None).compare_by(&company(Some(-3.0)), "pe"), Ordering::Less);
        assert_eq!(company(Some(30.0)).compare_by(&company(Some(20.0)), "pe"), Ordering::Greater);
        assert_eq!(company(None).compare_by(&company(None), "pe"), Ordering::Equal);
    }

    #[test]
    fn test_csv_fields_render_missing_ratio() {
        let fields = company(Some(28.456)).fields();
        assert_eq!(fields.len(), ListedCompany::HEADERS.len());
        assert_eq!(fields[5], "28.46");
        assert_eq!(fields[6], "-");
    }
}
