mod frequency;
mod remote;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
pub use frequency::FrequencyPredictor;
pub use remote::RemotePredictor;
use tracing::warn;

/// Predictions never carry more than this many numbers.
pub const MAX_PREDICTIONS: usize = 7;

#[async_trait]
pub trait PredictorEngine: Send + Sync {
    async fn predict(&self, history: &[u32], wrong: &[u32]) -> Result<Vec<u32>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub numbers: Vec<u32>,
    pub source: PredictionSource,
}

impl Prediction {
    pub fn empty(source: PredictionSource) -> Self {
        Self {
            numbers: Vec::new(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Frequency,
    Ai,
}

/// Routes prediction requests: frequency ranking is always local; the ai
/// prediction goes to the remote engine when one is configured and falls
/// back to the frequency ranking on any remote failure.
pub struct PredictorRouter {
    remote: Option<Arc<dyn PredictorEngine>>,
    frequency: FrequencyPredictor,
}

impl PredictorRouter {
    pub fn new(remote: Option<Arc<dyn PredictorEngine>>) -> Self {
        Self {
            remote,
            frequency: FrequencyPredictor::new(),
        }
    }

    pub fn frequency(&self, history: &[u32], wrong: &[u32]) -> Prediction {
        Prediction {
            numbers: self.frequency.rank(history, wrong),
            source: PredictionSource::Frequency,
        }
    }

    pub fn table(&self, history: &[u32]) -> Vec<(u32, usize)> {
        self.frequency.table(history)
    }

    pub async fn ai(&self, history: &[u32], wrong: &[u32]) -> Prediction {
        let Some(remote) = &self.remote else {
            return Prediction::empty(PredictionSource::Ai);
        };
        if history.is_empty() {
            return Prediction::empty(PredictionSource::Ai);
        }

        match remote.predict(history, wrong).await {
            Ok(numbers) => Prediction {
                numbers,
                source: PredictionSource::Ai,
            },
            Err(error) => {
                warn!("remote predictor failed, falling back to frequency ranking: {error:#}");
                self.frequency(history, wrong)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;

    use super::*;

    struct FixedEngine(Vec<u32>);

    #[async_trait]
    impl PredictorEngine for FixedEngine {
        async fn predict(&self, _history: &[u32], _wrong: &[u32]) -> Result<Vec<u32>> {
            Ok(self.0.clone())
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl PredictorEngine for FailingEngine {
        async fn predict(&self, _history: &[u32], _wrong: &[u32]) -> Result<Vec<u32>> {
            Err(anyhow!("service unavailable"))
        }
    }

    struct CountingEngine {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PredictorEngine for CountingEngine {
        async fn predict(&self, _history: &[u32], _wrong: &[u32]) -> Result<Vec<u32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![9])
        }
    }

    #[tokio::test]
    async fn ai_uses_remote_engine() {
        let router = PredictorRouter::new(Some(Arc::new(FixedEngine(vec![4, 5, 6]))));
        let prediction = router.ai(&[1, 2], &[]).await;
        assert_eq!(prediction.numbers, vec![4, 5, 6]);
        assert_eq!(prediction.source, PredictionSource::Ai);
    }

    #[tokio::test]
    async fn ai_falls_back_to_frequency_on_failure() {
        let router = PredictorRouter::new(Some(Arc::new(FailingEngine)));
        let prediction = router.ai(&[1, 2, 2, 3], &[]).await;
        assert_eq!(prediction.numbers, vec![2, 1, 3]);
        assert_eq!(prediction.source, PredictionSource::Frequency);
    }

    #[tokio::test]
    async fn ai_is_empty_without_an_engine() {
        let router = PredictorRouter::new(None);
        let prediction = router.ai(&[1, 2, 3], &[]).await;
        assert!(prediction.numbers.is_empty());
        assert_eq!(prediction.source, PredictionSource::Ai);
    }

    #[tokio::test]
    async fn empty_history_skips_the_remote_call() {
        let engine = Arc::new(CountingEngine {
            calls: AtomicUsize::new(0),
        });
        let router = PredictorRouter::new(Some(engine.clone()));
        let prediction = router.ai(&[], &[]).await;
        assert!(prediction.numbers.is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }
}
