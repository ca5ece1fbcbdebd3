use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of features the model consumes: the eight numeric columns,
/// Geography one-hot over (France, Germany, Spain), Gender as Male=1.
pub const FEATURE_COUNT: usize = 12;

pub const NUMERIC_COLUMNS: [&str; 8] = [
    "CreditScore",
    "Age",
    "Tenure",
    "Balance",
    "NumOfProducts",
    "HasCrCard",
    "IsActiveMember",
    "EstimatedSalary",
];

pub const GEOGRAPHIES: [&str; 3] = ["France", "Germany", "Spain"];

/// A customer record as submitted by the form. Numeric columns arrive as
/// arbitrary JSON values and are coerced downstream; categoricals are
/// passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "CreditScore", default)]
    pub credit_score: Value,
    #[serde(rename = "Age", default)]
    pub age: Value,
    #[serde(rename = "Tenure", default)]
    pub tenure: Value,
    #[serde(rename = "Balance", default)]
    pub balance: Value,
    #[serde(rename = "NumOfProducts", default)]
    pub num_of_products: Value,
    #[serde(rename = "HasCrCard", default)]
    pub has_cr_card: Value,
    #[serde(rename = "IsActiveMember", default)]
    pub is_active_member: Value,
    #[serde(rename = "EstimatedSalary", default)]
    pub estimated_salary: Value,
    #[serde(rename = "Geography", default)]
    pub geography: String,
    #[serde(rename = "Gender", default)]
    pub gender: String,
}

/// A normalized record: every numeric column holds a finite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "CreditScore")]
    pub credit_score: f32,
    #[serde(rename = "Age")]
    pub age: f32,
    #[serde(rename = "Tenure")]
    pub tenure: f32,
    #[serde(rename = "Balance")]
    pub balance: f32,
    #[serde(rename = "NumOfProducts")]
    pub num_of_products: f32,
    #[serde(rename = "HasCrCard")]
    pub has_cr_card: f32,
    #[serde(rename = "IsActiveMember")]
    pub is_active_member: f32,
    #[serde(rename = "EstimatedSalary")]
    pub estimated_salary: f32,
    #[serde(rename = "Geography")]
    pub geography: String,
    #[serde(rename = "Gender")]
    pub gender: String,
}

impl CustomerRecord {
    /// Encode the record as the model's input row. Layout: the eight numeric
    /// columns in order, Geography one-hot (unknown values encode all-zero),
    /// then Gender (Male=1).
    pub fn to_features(&self) -> [f32; FEATURE_COUNT] {
        let mut features = [0.0; FEATURE_COUNT];
        features[..8].copy_from_slice(&[
            self.credit_score,
            self.age,
            self.tenure,
            self.balance,
            self.num_of_products,
            self.has_cr_card,
            self.is_active_member,
            self.estimated_salary,
        ]);
        if let Some(idx) = GEOGRAPHIES.iter().position(|g| *g == self.geography) {
            features[8 + idx] = 1.0;
        }
        if self.gender == "Male" {
            features[11] = 1.0;
        }
        features
    }
}

/// Text shown for each class label.
pub fn outcome_label(label: u8) -> &'static str {
    if label == 1 {
        "Exited"
    } else {
        "Stayed"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: u8,
    pub outcome: String,
    pub probability: f32,
    pub probabilities: [f32; 2],
    pub input: CustomerRecord,
    pub message: String,
}

impl PredictionResult {
    pub fn new(label: u8, probabilities: [f32; 2], input: CustomerRecord) -> Self {
        let outcome = outcome_label(label).to_string();
        let probability = probabilities[label as usize];
        let message = format!(
            "Prediction: {} with probability {:.2}%",
            outcome,
            probability * 100.0
        );
        PredictionResult {
            label,
            outcome,
            probability,
            probabilities,
            input,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub input_shape: Vec<usize>,
    pub columns: Vec<String>,
    pub outcomes: Vec<String>,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
    pub execution_time_ms: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }

    pub fn error(message: &str) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CustomerRecord {
        CustomerRecord {
            credit_score: 650.0,
            age: 35.0,
            tenure: 3.0,
            balance: 50000.0,
            num_of_products: 1.0,
            has_cr_card: 1.0,
            is_active_member: 1.0,
            estimated_salary: 50000.0,
            geography: "France".to_string(),
            gender: "Male".to_string(),
        }
    }

    #[test]
    fn outcome_label_mapping_is_exact() {
        assert_eq!(outcome_label(0), "Stayed");
        assert_eq!(outcome_label(1), "Exited");
    }

    #[test]
    fn features_start_with_numeric_columns_in_order() {
        let features = record().to_features();
        assert_eq!(
            &features[..8],
            &[650.0, 35.0, 3.0, 50000.0, 1.0, 1.0, 1.0, 50000.0]
        );
    }

    #[test]
    fn geography_is_one_hot_encoded() {
        let mut r = record();
        assert_eq!(&record().to_features()[8..11], &[1.0, 0.0, 0.0]);
        r.geography = "Germany".to_string();
        assert_eq!(&r.to_features()[8..11], &[0.0, 1.0, 0.0]);
        r.geography = "Spain".to_string();
        assert_eq!(&r.to_features()[8..11], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_geography_encodes_all_zero() {
        let mut r = record();
        r.geography = "Atlantis".to_string();
        assert_eq!(&r.to_features()[8..11], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn gender_encodes_male_as_one() {
        let mut r = record();
        assert_eq!(record().to_features()[11], 1.0);
        r.gender = "Female".to_string();
        assert_eq!(r.to_features()[11], 0.0);
    }

    #[test]
    fn result_message_formats_probability_as_percentage() {
        let result = PredictionResult::new(1, [0.2081, 0.7919], record());
        assert_eq!(result.outcome, "Exited");
        assert_eq!(result.message, "Prediction: Exited with probability 79.19%");
    }

    #[test]
    fn result_probability_matches_label_entry() {
        let result = PredictionResult::new(0, [0.6, 0.4], record());
        assert_eq!(result.probability, 0.6);
        assert_eq!(result.outcome, "Stayed");
    }

    #[test]
    fn error_envelope_has_no_data() {
        let response = ApiResponse::<PredictionResult>::error("boom");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("boom"));
    }
}
