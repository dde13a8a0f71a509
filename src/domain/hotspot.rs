// Hotspot domain model - news/event records with heat and sentiment
use crate::application::csv_export::CsvRecord;
use crate::application::list_query::Listable;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "利好",
            Sentiment::Neutral => "中性",
            Sentiment::Negative => "利空",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    Hot,
    Warm,
    Mild,
}

impl HeatLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            HeatLevel::Hot => "heat-hot",
            HeatLevel::Warm => "heat-warm",
            HeatLevel::Mild => "heat-mild",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hotspot {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "heatScore", alias = "heat_score")]
    pub heat: f64,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(
        default = "Utc::now",
        deserialize_with = "super::datetime_or_now",
        alias = "publishTime",
        alias = "publish_time"
    )]
    pub published_at: DateTime<Utc>,
    #[serde(default, alias = "relatedStocks")]
    pub related_stocks: Vec<String>,
}

impl Hotspot {
    /// Heat is clamped into 0..=100 so colouring and sorting stay sane even
    /// when the backend emits out-of-range scores.
    pub fn normalized(mut self) -> Self {
        self.heat = if self.heat.is_nan() {
            0.0
        } else {
            self.heat.clamp(0.0, 100.0)
        };
        self
    }

    pub fn heat_level(&self) -> HeatLevel {
        if self.heat >= 80.0 {
            HeatLevel::Hot
        } else if self.heat >= 50.0 {
            HeatLevel::Warm
        } else {
            HeatLevel::Mild
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotspotStats {
    #[serde(default)]
    pub total: usize,
    #[serde(default, alias = "averageHeat", alias = "avg_heat")]
    pub average_heat: f64,
    #[serde(default, alias = "byCategory")]
    pub by_category: BTreeMap<String, usize>,
    #[serde(default, alias = "bySentiment")]
    pub by_sentiment: BTreeMap<String, usize>,
}

impl HotspotStats {
    pub fn from_hotspots(hotspots: &[Hotspot]) -> Self {
        let mut stats = HotspotStats {
            total: hotspots.len(),
            ..Default::default()
        };

        for h in hotspots {
            *stats.by_category.entry(h.category.clone()).or_insert(0) += 1;
            *stats
                .by_sentiment
                .entry(h.sentiment.as_str().to_string())
                .or_insert(0) += 1;
        }

        if !hotspots.is_empty() {
            stats.average_heat =
                hotspots.iter().map(|h| h.heat).sum::<f64>() / hotspots.len() as f64;
        }

        stats
    }
}

impl Listable for Hotspot {
    const SORT_FIELDS: &'static [&'static str] = &["heat", "published_at", "title", "category"];

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.summary,
            self.source,
            self.related_stocks.join(" ")
        )
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "heat" => self.heat.total_cmp(&other.heat),
            "published_at" => self.published_at.cmp(&other.published_at),
            "title" => self.title.cmp(&other.title),
            "category" => self.category.cmp(&other.category),
            _ => Ordering::Equal,
        }
    }
}

impl CsvRecord for Hotspot {
    const HEADERS: &'static [&'static str] = &[
        "ID", "标题", "分类", "热度", "情绪", "地区", "来源", "发布时间", "相关股票",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.category.clone(),
            format!("{:.1}", self.heat),
            self.sentiment.label().to_string(),
            self.region.clone().unwrap_or_default(),
            self.source.clone(),
            self.published_at.format("%Y-%m-%d %H:%M").to_string(),
            self.related_stocks.join(";"),
        ]
    }
}
