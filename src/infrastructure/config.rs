use crate::application::list_query::PageLimits;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
    #[serde(default)]
    pub mock: MockSettings,
    #[serde(default)]
    pub rotation: RotationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationSettings {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PaginationSettings {
    pub fn limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MockSettings {
    /// Fall back to generated rows when a feed fails or comes back empty.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_domestic_rows")]
    pub domestic_hotspot_rows: usize,
    #[serde(default = "default_hotspot_rows")]
    pub hotspot_rows: usize,
    #[serde(default = "default_stock_rows")]
    pub stock_rows: usize,
    #[serde(default = "default_company_rows")]
    pub company_rows: usize,
    #[serde(default = "default_ranking_rows")]
    pub ranking_rows: usize,
    #[serde(default = "default_index_days")]
    pub index_days: usize,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: None,
            domestic_hotspot_rows: default_domestic_rows(),
            hotspot_rows: default_hotspot_rows(),
            stock_rows: default_stock_rows(),
            company_rows: default_company_rows(),
            ranking_rows: default_ranking_rows(),
            index_days: default_index_days(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RotationSettings {
    #[serde(default = "default_sectors")]
    pub sectors: Vec<String>,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            sectors: default_sectors(),
            horizon_days: default_horizon_days(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    200
}

fn default_true() -> bool {
    true
}

fn default_domestic_rows() -> usize {
    5000
}

fn default_hotspot_rows() -> usize {
    60
}

fn default_stock_rows() -> usize {
    300
}

fn default_company_rows() -> usize {
    300
}

fn default_ranking_rows() -> usize {
    20
}

fn default_index_days() -> usize {
    60
}

fn default_sectors() -> Vec<String> {
    ["半导体", "新能源", "医药生物", "银行", "白酒", "军工", "传媒", "有色金属"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_horizon_days() -> usize {
    30
}

/// Load `config/dashboard.*`, overridden by `DASHBOARD__SECTION__KEY`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
