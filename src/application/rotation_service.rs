// Rotation service - Synthetic sector rotation curves keyed on sector name.
// These are display curves, not forecasts.
use crate::domain::rotation::{ForecastPoint, SectorForecast};
use crate::infrastructure::config::RotationSettings;
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

const BASELINE: f64 = 100.0;

/// FNV-1a, so the same sector name maps to the same curve across builds.
fn name_seed(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

pub fn project_sector(name: &str, horizon_days: usize, start: NaiveDate) -> SectorForecast {
    let seed = name_seed(name);
    let mut rng = StdRng::seed_from_u64(seed);

    let phase = (seed % 628) as f64 / 100.0;
    let amplitude = 2.0 + ((seed >> 12) % 600) as f64 / 100.0;
    let period = 10.0 + ((seed >> 24) % 20) as f64;

    let points: Vec<ForecastPoint> = (0..horizon_days)
        .map(|day| {
            let wave = amplitude * (TAU * day as f64 / period + phase).sin();
            let noise = rng.gen_range(-0.5..0.5);
            ForecastPoint {
                date: start + Duration::days(day as i64),
                value: ((BASELINE + wave + noise) * 100.0).round() / 100.0,
            }
        })
        .collect();

    let momentum = match (points.first(), points.last()) {
        (Some(first), Some(last)) => last.value - first.value,
        _ => 0.0,
    };

    SectorForecast {
        sector: name.to_string(),
        momentum,
        score: (50.0 + momentum * 5.0).clamp(0.0, 100.0),
        points,
    }
}

/// Project every sector and rank by momentum, strongest first.
pub fn rotation_board(sectors: &[String], horizon_days: usize, start: NaiveDate) -> Vec<SectorForecast> {
    let mut board: Vec<SectorForecast> = sectors
        .iter()
        .map(|s| project_sector(s, horizon_days, start))
        .collect();
    board.sort_by(|a, b| b.momentum.total_cmp(&a.momentum));
    board
}

#[derive(Clone)]
pub struct RotationService {
    settings: RotationSettings,
}

impl RotationService {
    pub fn new(settings: RotationSettings) -> Self {
        Self { settings }
    }

    pub fn board(&self) -> Vec<SectorForecast> {
        rotation_board(
            &self.settings.sectors,
            self.settings.horizon_days,
            Utc::now().date_naive(),
        )
    }

    pub fn sector(&self, name: &str) -> SectorForecast {
        project_sector(name.trim(), self.settings.horizon_days, Utc::now().date_naive())
    }
}
