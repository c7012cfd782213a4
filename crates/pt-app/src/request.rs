//! Simulation request parsing and validation.
//!
//! Requests arrive as loosely typed JSON bodies. Field names follow
//! `inlet` / `ambient` / `interval_s`; the older `temperaturas` /
//! `temperaturasAmbiente` / `dt` names are accepted as aliases.

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Interval used when neither the request nor the project sets one (s).
pub const DEFAULT_INTERVAL_S: f64 = 5.0;

const INLET_KEYS: &[&str] = &["inlet", "temperaturas"];
const AMBIENT_KEYS: &[&str] = &["ambient", "temperaturasAmbiente"];
const INTERVAL_KEYS: &[&str] = &["interval_s", "dt"];

/// Validated simulation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateRequest {
    pub inlet: Vec<f64>,
    pub ambient: Option<Vec<f64>>,
    /// `None` lets the service apply its default interval
    pub interval_s: Option<f64>,
}

impl SimulateRequest {
    pub fn new(inlet: Vec<f64>, ambient: Option<Vec<f64>>, interval_s: Option<f64>) -> Self {
        Self {
            inlet,
            ambient,
            interval_s,
        }
    }

    /// Parse a request body, rejecting malformed fields before any simulation.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::InvalidInput("request body must be a JSON object".into()))?;

        let inlet = match lookup(obj, INLET_KEYS) {
            Some(v) => parse_series(v, "inlet")?,
            None => return Err(AppError::InvalidInput("inlet must be an array".into())),
        };

        let ambient = match lookup(obj, AMBIENT_KEYS) {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_series(v, "ambient")?),
        };

        let interval_s = match lookup(obj, INTERVAL_KEYS) {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_interval(v)?),
        };

        Ok(Self {
            inlet,
            ambient,
            interval_s,
        })
    }

    pub fn from_json_str(body: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| AppError::InvalidInput(format!("request body is not valid JSON: {e}")))?;
        Self::from_json(&value)
    }

    /// Interval to simulate with, falling back to `default_s`.
    pub fn interval_or(&self, default_s: f64) -> f64 {
        self.interval_s.unwrap_or(default_s)
    }
}

/// Check an interval coming from any caller.
pub fn validate_interval(interval_s: f64) -> AppResult<f64> {
    if interval_s.is_finite() && interval_s > 0.0 {
        Ok(interval_s)
    } else {
        Err(AppError::InvalidInput(format!(
            "interval must be a finite number greater than 0 (got {interval_s})"
        )))
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn parse_series(value: &Value, name: &str) -> AppResult<Vec<f64>> {
    let items = value
        .as_array()
        .ok_or_else(|| AppError::InvalidInput(format!("{name} must be an array")))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            coerce_number(item).ok_or_else(|| {
                AppError::InvalidInput(format!("{name}[{i}] is not a finite number: {item}"))
            })
        })
        .collect()
}

fn parse_interval(value: &Value) -> AppResult<f64> {
    let interval = coerce_number(value).ok_or_else(|| {
        AppError::InvalidInput(format!("interval must be a number greater than 0 (got {value})"))
    })?;
    validate_interval(interval)
}

/// JSON numbers and numeric strings; never booleans, nulls or containers.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => pt_core::parse_real(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_request() {
        let req = SimulateRequest::from_json(&json!({
            "inlet": [80, 80.5, "81"],
            "ambient": [20, 19, 18],
            "interval_s": 60
        }))
        .unwrap();
        assert_eq!(req.inlet, vec![80.0, 80.5, 81.0]);
        assert_eq!(req.ambient, Some(vec![20.0, 19.0, 18.0]));
        assert_eq!(req.interval_s, Some(60.0));
    }

    #[test]
    fn accepts_legacy_field_names() {
        let req = SimulateRequest::from_json(&json!({
            "temperaturas": [1, 2],
            "temperaturasAmbiente": [3, 4],
            "dt": "2,5"
        }))
        .unwrap();
        assert_eq!(req.inlet, vec![1.0, 2.0]);
        assert_eq!(req.ambient, Some(vec![3.0, 4.0]));
        assert_eq!(req.interval_s, Some(2.5));
    }

    #[test]
    fn optional_fields_may_be_absent_or_null() {
        let req = SimulateRequest::from_json(&json!({
            "inlet": [10],
            "ambient": null,
            "interval_s": null
        }))
        .unwrap();
        assert!(req.ambient.is_none());
        assert_eq!(req.interval_or(DEFAULT_INTERVAL_S), 5.0);
    }

    #[test]
    fn rejects_non_array_series() {
        let err = SimulateRequest::from_json(&json!({ "inlet": 5 })).unwrap_err();
        assert!(err.to_string().contains("inlet must be an array"));

        let err = SimulateRequest::from_json(&json!({ "inlet": [1], "ambient": "x" })).unwrap_err();
        assert!(err.to_string().contains("ambient must be an array"));

        assert!(SimulateRequest::from_json(&json!({})).is_err());
        assert!(SimulateRequest::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn rejects_uncoercible_samples() {
        for bad in [json!(["abc"]), json!([true]), json!([null]), json!([[1]])] {
            let err = SimulateRequest::from_json(&json!({ "inlet": bad })).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[test]
    fn rejects_bad_intervals() {
        for bad in [json!(0), json!(-1.5), json!("soon"), json!(false)] {
            let body = json!({ "inlet": [1], "interval_s": bad });
            assert!(SimulateRequest::from_json(&body).is_err(), "{body}");
        }
        assert!(validate_interval(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_malformed_json_text() {
        assert!(SimulateRequest::from_json_str("{ inlet: ").is_err());
        let req = SimulateRequest::from_json_str(r#"{"inlet": []}"#).unwrap();
        assert!(req.inlet.is_empty());
    }
}
