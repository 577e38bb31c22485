//! Delay prediction seam.
//!
//! The scenario engine only reads `predicted_delay`; filling it in is the
//! job of an upstream predictor that runs once per train before the engine
//! starts. Prediction failures never abort the run: the configured fallback
//! delay is used and the observer is told.

use crate::error::Result;
use crate::models::TrainRecord;
use crate::observer::DispatchObserver;

/// Estimates a train's delay in minutes.
pub trait DelayPredictor: Send + Sync {
    fn predict_delay(&self, train: &TrainRecord) -> Result<f64>;
}

/// Predicts the same delay for every train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDelay(pub f64);

impl DelayPredictor for ConstantDelay {
    fn predict_delay(&self, _train: &TrainRecord) -> Result<f64> {
        Ok(self.0)
    }
}

impl<F> DelayPredictor for F
where
    F: Fn(&TrainRecord) -> Result<f64> + Send + Sync,
{
    fn predict_delay(&self, train: &TrainRecord) -> Result<f64> {
        self(train)
    }
}

/// Returns copies of `trains` with `predicted_delay` filled in.
///
/// Errors and non-finite predictions are replaced by `fallback`.
pub fn apply_predictions<P: DelayPredictor + ?Sized>(
    trains: &[TrainRecord],
    predictor: &P,
    fallback: f64,
    observer: &dyn DispatchObserver,
) -> Vec<TrainRecord> {
    trains
        .iter()
        .map(|train| {
            let delay = match predictor.predict_delay(train) {
                Ok(delay) if delay.is_finite() => delay,
                Ok(delay) => {
                    observer.on_prediction_fallback(
                        &train.train_no,
                        &format!("non-finite prediction {delay}"),
                        fallback,
                    );
                    fallback
                }
                Err(e) => {
                    observer.on_prediction_fallback(&train.train_no, &e.to_string(), fallback);
                    fallback
                }
            };
            train.clone().with_delay(delay)
        })
        .collect()
}
