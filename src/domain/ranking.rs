// Ranking boards (/api/rankings/{type})
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingKind {
    Gainers,
    Losers,
    Turnover,
    Heat,
}

impl RankingKind {
    pub const ALL: [RankingKind; 4] = [
        RankingKind::Gainers,
        RankingKind::Losers,
        RankingKind::Turnover,
        RankingKind::Heat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKind::Gainers => "gainers",
            RankingKind::Losers => "losers",
            RankingKind::Turnover => "turnover",
            RankingKind::Heat => "heat",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RankingKind::Gainers => "涨幅榜",
            RankingKind::Losers => "跌幅榜",
            RankingKind::Turnover => "成交额榜",
            RankingKind::Heat => "热度榜",
        }
    }

    pub fn value_label(&self) -> &'static str {
        match self {
            RankingKind::Gainers | RankingKind::Losers => "涨跌幅(%)",
            RankingKind::Turnover => "成交额(亿)",
            RankingKind::Heat => "热度",
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ranking type: {0}")]
pub struct UnknownRankingKind(pub String);

impl FromStr for RankingKind {
    type Err = UnknownRankingKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankingKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRankingKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    #[serde(deserialize_with = "super::string_or_number")]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("gainers".parse::<RankingKind>(), Ok(RankingKind::Gainers));
        assert_eq!("HEAT".parse::<RankingKind>(), Ok(RankingKind::Heat));
        assert_eq!(
            "volume".parse::<RankingKind>(),
            Err(UnknownRankingKind("volume".to_string()))
        );
    }
}
