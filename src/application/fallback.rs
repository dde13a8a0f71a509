// Live-or-mock fallback for read feeds

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Mock,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "实时数据",
            DataSource::Mock => "模拟数据",
        }
    }
}

/// Data tagged with where it came from.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    pub fn mock(data: T) -> Self {
        Self {
            data,
            source: DataSource::Mock,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            source: self.source,
        }
    }
}

/// Things that can come back "empty" from the backend.
pub trait Emptiable {
    fn is_empty_feed(&self) -> bool;
}

impl<T> Emptiable for Vec<T> {
    fn is_empty_feed(&self) -> bool {
        self.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FallbackPolicy {
    pub enabled: bool,
}

impl FallbackPolicy {
    /// Use the live list unless it failed or is empty; then substitute mock
    /// data if enabled, otherwise surface the failure (an empty list stays
    /// an empty live list).
    pub fn resolve<T, F>(&self, feed: &str, live: anyhow::Result<T>, mock: F) -> anyhow::Result<Sourced<T>>
    where
        T: Emptiable,
        F: FnOnce() -> T,
    {
        Ok(match self.accept(feed, live)? {
            Some(data) => Sourced::live(data),
            None => Sourced::mock(mock()),
        })
    }

    /// Decide whether a live list can be shown. `Ok(None)` means mock data
    /// should stand in; used directly when the mock rows come from a cache.
    pub fn accept<T: Emptiable>(&self, feed: &str, live: anyhow::Result<T>) -> anyhow::Result<Option<T>> {
        match live {
            Ok(data) if data.is_empty_feed() && self.enabled => {
                tracing::warn!("Feed {} returned no rows, using mock data", feed);
                Ok(None)
            }
            Ok(data) => Ok(Some(data)),
            Err(e) if self.enabled => {
                tracing::warn!("Feed {} failed ({:#}), using mock data", feed, e);
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Feed {} failed: {:#}", feed, e);
                Err(e)
            }
        }
    }

    /// Same as `resolve` for single records, where "empty" has no meaning.
    pub fn resolve_one<T, F>(&self, feed: &str, live: anyhow::Result<T>, mock: F) -> anyhow::Result<Sourced<T>>
    where
        F: FnOnce() -> T,
    {
        match live {
            Ok(data) => Ok(Sourced::live(data)),
            Err(e) if self.enabled => {
                tracing::warn!("Feed {} failed ({:#}), using mock data", feed, e);
                Ok(Sourced::mock(mock()))
            }
            Err(e) => {
                tracing::error!("Feed {} failed: {:#}", feed, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENABLED: FallbackPolicy = FallbackPolicy { enabled: true };
    const DISABLED: FallbackPolicy = FallbackPolicy { enabled: false };

    #[test]
    fn test_live_data_passes_through() {
        let result = ENABLED.resolve("stocks", Ok(vec![1, 2]), || vec![9]).unwrap();
        assert_eq!(result.source, DataSource::Live);
        assert_eq!(result.data, vec![1, 2]);
    }

    #[test]
    fn test_failure_falls_back_to_mock() {
        let result = ENABLED
            .resolve("stocks", Err(anyhow::anyhow!("connection refused")), || vec![9])
            .unwrap();
        assert_eq!(result.source, DataSource::Mock);
        assert_eq!(result.data, vec![9]);
    }

    #[test]
    fn test_empty_falls_back_to_mock() {
        let result = ENABLED.resolve("stocks", Ok(Vec::new()), || vec![9]).unwrap();
        assert_eq!(result.source, DataSource::Mock);
    }

    #[test]
    fn test_disabled_surfaces_error_and_keeps_empty() {
        let err = DISABLED
            .resolve::<Vec<i32>, _>("stocks", Err(anyhow::anyhow!("boom")), || vec![9])
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");

        let empty = DISABLED.resolve("stocks", Ok(Vec::<i32>::new()), || vec![9]).unwrap();
        assert_eq!(empty.source, DataSource::Live);
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_accept_signals_mock_without_building_it() {
        assert_eq!(ENABLED.accept("stocks", Ok(vec![1])).unwrap(), Some(vec![1]));
        assert_eq!(ENABLED.accept("stocks", Ok(Vec::<i32>::new())).unwrap(), None);
        assert_eq!(
            ENABLED.accept::<Vec<i32>>("stocks", Err(anyhow::anyhow!("down"))).unwrap(),
            None
        );
        assert!(DISABLED.accept::<Vec<i32>>("stocks", Err(anyhow::anyhow!("down"))).is_err());
    }

    #[test]
    fn test_resolve_one() {
        let mocked = ENABLED
            .resolve_one("stats", Err::<u32, _>(anyhow::anyhow!("timeout")), || 7)
            .unwrap();
        assert_eq!((mocked.data, mocked.source), (7, DataSource::Mock));
        assert!(DISABLED.resolve_one("stats", Err::<u32, _>(anyhow::anyhow!("timeout")), || 7).is_err());
    }
}
