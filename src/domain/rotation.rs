// Sector rotation projections (synthetic curves, not forecasts)
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct SectorForecast {
    pub sector: String,
    /// Last projected value minus first.
    pub momentum: f64,
    /// 0-100 strength score derived from momentum.
    pub score: f64,
    pub points: Vec<ForecastPoint>,
}

impl SectorForecast {
    pub fn trend_label(&self) -> &'static str {
        if self.momentum > 0.5 {
            "轮入"
        } else if self.momentum < -0.5 {
            "轮出"
        } else {
            "震荡"
        }
    }
}
