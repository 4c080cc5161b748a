//! Simulated network latency

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("Invalid latency range: {min}ms is above {max}ms")]
    InvertedRange { min: u64, max: u64 },
}

/// Source of suspension for simulated latency
///
/// Abstracted so tests can run without real elapsed time.
pub trait Sleeper: Send + Sync {
    /// Suspends the calling task for the given duration
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Closed range of simulated latency, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLatency")]
pub struct Latency {
    min: u64,
    max: u64,
}

/// Unchecked latency range as it appears in configuration
#[derive(Deserialize)]
struct RawLatency {
    min: u64,
    max: u64,
}

impl TryFrom<RawLatency> for Latency {
    type Error = Error;

    fn try_from(raw: RawLatency) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl Latency {
    /// Login round-trip simulation
    pub const LOGIN: Latency = Latency {
        min: 500,
        max: 2000,
    };

    /// Token verification round-trip simulation
    pub const VERIFY: Latency = Latency { min: 100, max: 500 };

    /// No latency at all
    pub const NONE: Latency = Latency { min: 0, max: 0 };

    pub fn new(min: u64, max: u64) -> Result<Self, Error> {
        if min > max {
            return Err(Error::InvertedRange { min, max });
        }

        Ok(Self { min, max })
    }

    /// Lower bound
    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min)
    }

    /// Upper bound
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max)
    }

    /// Picks a uniformly distributed duration from the range
    pub fn sample(&self) -> Duration {
        let millis = rand::rng().random_range(self.min..=self.max);
        Duration::from_millis(millis)
    }

    /// Suspends for a random duration from the range
    pub async fn simulate(&self, sleeper: &impl Sleeper) {
        let duration = self.sample();
        tracing::trace!(?duration, "Simulating latency");
        sleeper.sleep(duration).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    /// Sleeper returning immediately, remembering requested durations
    #[derive(Debug, Clone, Default)]
    pub(crate) struct RecordingSleeper {
        pub(crate) slept: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        pub(crate) fn slept(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn samples_stay_in_range() {
        let latency = Latency::new(10, 20).unwrap();
        for _ in 0..1000 {
            let sample = latency.sample();
            assert!(sample >= latency.min() && sample <= latency.max(), "{sample:?}");
        }
    }

    #[test]
    fn degenerate_range() {
        let latency = Latency::new(7, 7).unwrap();
        assert_eq!(latency.sample(), Duration::from_millis(7));
        assert_eq!(Latency::NONE.sample(), Duration::ZERO);
    }

    #[test]
    fn inverted_range_rejected() {
        assert_eq!(
            Latency::new(20, 10),
            Err(Error::InvertedRange { min: 20, max: 10 })
        );

        let err = serde_json::from_str::<Latency>(r#"{ "min": 20, "max": 10 }"#).unwrap_err();
        assert!(err.to_string().contains("20ms is above 10ms"), "{err}");
    }

    #[test]
    fn deserialize_range() {
        let latency: Latency = serde_json::from_str(r#"{ "min": 100, "max": 500 }"#).unwrap();
        assert_eq!(latency, Latency::VERIFY);
    }

    #[tokio::test]
    async fn simulate_uses_sleeper() {
        let sleeper = RecordingSleeper::default();
        Latency::LOGIN.simulate(&sleeper).await;
        Latency::VERIFY.simulate(&sleeper).await;

        let slept = sleeper.slept();
        assert_eq!(slept.len(), 2);
        assert!(slept[0] >= Latency::LOGIN.min() && slept[0] <= Latency::LOGIN.max());
        assert!(slept[1] >= Latency::VERIFY.min() && slept[1] <= Latency::VERIFY.max());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_suspends() {
        let start = tokio::time::Instant::now();
        Latency::new(300, 300).unwrap().simulate(&TokioSleeper).await;
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }
}
