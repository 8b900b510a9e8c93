use anyhow::Result;
use tracing::info;

use crate::parse;
use crate::predictor::{Prediction, PredictorRouter};
use crate::store::{PersistedState, Store};

/// Everything the controller tracks for one session. Durable fields mirror
/// [`PersistedState`]; the predictions are transient.
#[derive(Debug, Default)]
pub struct SessionState {
    pub numbers: Vec<u32>,
    pub wrong_predictions: Vec<u32>,
    pub last_frequency: Option<Prediction>,
    pub last_ai: Option<Prediction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Ignored,
}

/// Session controller: a PIN gate in front of the submit / mark-wrong /
/// correct / reset actions. All side effects go through the store and the
/// predictor router.
pub struct Session {
    store: Store,
    router: PredictorRouter,
    pin: String,
    unlocked: bool,
    state: SessionState,
}

impl Session {
    pub async fn open(store: Store, router: PredictorRouter, pin: String) -> Result<Self> {
        let persisted = store.load().await?;
        Ok(Self {
            store,
            router,
            pin,
            unlocked: false,
            state: SessionState {
                numbers: persisted.numbers,
                wrong_predictions: persisted.wrong_predictions,
                last_frequency: None,
                last_ai: None,
            },
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Exact match against the configured PIN. No lockout, no attempt
    /// counting; a restart always starts locked.
    pub fn authenticate(&mut self, pin: &str) -> bool {
        let matched = pin == self.pin;
        if matched {
            self.unlocked = true;
        }
        matched
    }

    pub fn frequency_table(&self) -> Vec<(u32, usize)> {
        self.router.table(&self.state.numbers)
    }

    /// Appends parsed numbers to the history, recomputes both predictions
    /// and persists. Input with zero valid numbers is ignored outright:
    /// no state change, no write.
    pub async fn submit_numbers(&mut self, raw: &str) -> Result<ActionOutcome> {
        let values = parse::numbers(raw);
        if values.is_empty() {
            return Ok(ActionOutcome::Ignored);
        }

        self.state.numbers.extend(values);
        self.recompute().await;
        self.persist().await?;
        Ok(ActionOutcome::Applied)
    }

    pub async fn submit_correction(&mut self, raw: &str) -> Result<ActionOutcome> {
        self.submit_numbers(raw).await
    }

    /// Flags every number in the current predictions as wrong. Only the
    /// frequency prediction is recomputed; no remote call is made here.
    pub async fn mark_wrong(&mut self) -> Result<ActionOutcome> {
        let mut flagged: Vec<u32> = Vec::new();
        if let Some(prediction) = &self.state.last_frequency {
            flagged.extend(&prediction.numbers);
        }
        if let Some(prediction) = &self.state.last_ai {
            flagged.extend(&prediction.numbers);
        }
        if flagged.is_empty() {
            return Ok(ActionOutcome::Ignored);
        }

        self.state.wrong_predictions.extend(flagged);
        self.state.last_frequency = Some(
            self.router
                .frequency(&self.state.numbers, &self.state.wrong_predictions),
        );
        self.persist().await?;
        Ok(ActionOutcome::Applied)
    }

    /// Clears history, the wrong set and both cached predictions, and
    /// persists the cleared state.
    pub async fn reset(&mut self) -> Result<()> {
        self.state = SessionState::default();
        self.persist().await?;
        info!("session state reset");
        Ok(())
    }

    async fn recompute(&mut self) {
        self.state.last_frequency = Some(
            self.router
                .frequency(&self.state.numbers, &self.state.wrong_predictions),
        );
        self.state.last_ai = Some(
            self.router
                .ai(&self.state.numbers, &self.state.wrong_predictions)
                .await,
        );
    }

    async fn persist(&self) -> Result<()> {
        let state = PersistedState {
            numbers: self.state.numbers.clone(),
            wrong_predictions: self.state.wrong_predictions.clone(),
        };
        self.store.save(&state).await
    }
}
