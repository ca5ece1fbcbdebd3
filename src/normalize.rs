//! Numeric coercion of incoming records.
//!
//! Every numeric column is coerced to a number and anything unparsable
//! becomes 0, matching the cleaning the model was trained with. Categorical
//! columns pass through untouched. Coercion never fails and never warns, so
//! an out-of-domain value like a CreditScore of "abc" silently turns into 0.

use serde_json::Value;

use crate::models::{CustomerRecord, RawRecord};

/// Coerce one field value. Strings are trimmed and parsed; a parse that
/// yields a non-finite value (e.g. "NaN", "inf") counts as a failure and
/// falls back to 0 like everything else.
fn coerce(value: &Value) -> f32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Produce a record whose eight numeric columns all hold finite values.
pub fn normalize(raw: RawRecord) -> CustomerRecord {
    CustomerRecord {
        credit_score: coerce(&raw.credit_score),
        age: coerce(&raw.age),
        tenure: coerce(&raw.tenure),
        balance: coerce(&raw.balance),
        num_of_products: coerce(&raw.num_of_products),
        has_cr_card: coerce(&raw.has_cr_card),
        is_active_member: coerce(&raw.is_active_member),
        estimated_salary: coerce(&raw.estimated_salary),
        geography: raw.geography,
        gender: raw.gender,
    }
}
