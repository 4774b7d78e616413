use optional::Optioned;
use serde_json::Value;

/// Interpret a scalar leaf as a number, anything else is a missing value.
pub(crate) fn json_to_optioned(val: &Value) -> Optioned<f64> {
    match val {
        Value::Number(num) => Optioned::from(num.as_f64()),
        Value::String(text) => Optioned::from(text.trim().parse::<f64>().ok()),
        _ => optional::none(),
    }
}

/// Text representation of a scalar leaf, `None` for null.
pub(crate) fn json_to_text(val: &Value) -> Option<String> {
    match val {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
