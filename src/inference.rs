use std::path::Path;

use anyhow::{anyhow, bail, Result};
use tract_onnx::prelude::*;

use crate::models::{
    CustomerRecord, ModelInfo, PredictionResult, FEATURE_COUNT, NUMERIC_COLUMNS,
};

/// An opaque binary classifier over customer records. Implementations are
/// loaded once at startup and shared read-only across requests.
pub trait Classifier: Send + Sync {
    /// Predicted class label, 0 (stayed) or 1 (exited).
    fn predict(&self, record: &CustomerRecord) -> Result<u8>;

    /// Probability per class, aligned by class index. Sums to 1.
    fn predict_proba(&self, record: &CustomerRecord) -> Result<[f32; 2]>;

    fn model_info(&self) -> ModelInfo;
}

/// Run both classifier operations on one normalized record. The result's
/// probability is the entry of the distribution at the predicted label.
pub fn run_prediction(model: &dyn Classifier, record: &CustomerRecord) -> Result<PredictionResult> {
    let label = model.predict(record)?;
    let probabilities = model.predict_proba(record)?;
    Ok(PredictionResult::new(label, probabilities, record.clone()))
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Classifier backed by a serialized ONNX artifact. The artifact takes the
/// encoded `(1, 12)` feature row and emits one churn logit; the sigmoid and
/// the class distribution are derived here.
#[derive(Debug)]
pub struct OnnxClassifier {
    plan: OnnxPlan,
}

impl OnnxClassifier {
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();
        if !path.exists() {
            bail!("Model not found at {}", path.display());
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_COUNT)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, record: &CustomerRecord) -> Result<u8> {
        let probabilities = self.predict_proba(record)?;
        Ok(u8::from(probabilities[1] >= probabilities[0]))
    }

    fn predict_proba(&self, record: &CustomerRecord) -> Result<[f32; 2]> {
        let features = record.to_features();
        let input = Tensor::from_shape(&[1, FEATURE_COUNT], &features)?;
        let outputs = self.plan.run(tvec!(input.into()))?;

        let logit = outputs[0]
            .to_array_view::<f32>()?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| anyhow!("model produced no output"))?;

        let p = sigmoid(logit);
        Ok([1.0 - p, p])
    }

    fn model_info(&self) -> ModelInfo {
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push("Geography".to_string());
        columns.push("Gender".to_string());
        ModelInfo {
            input_shape: vec![1, FEATURE_COUNT],
            columns,
            outcomes: vec!["Stayed".to_string(), "Exited".to_string()],
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
