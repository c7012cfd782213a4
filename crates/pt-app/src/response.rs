//! Simulation response and result export.

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Result of one simulation request, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulateResponse {
    pub interval_s: f64,
    /// Number of inlet samples received
    pub n_points: usize,
    pub time: Vec<f64>,
    pub inlet: Vec<f64>,
    /// Ambient series actually used (the first-inlet fallback when none was sent)
    pub ambient: Vec<f64>,
    pub outlet: Vec<f64>,
    pub final_temperature: Option<f64>,
    pub final_wall: Vec<f64>,
    pub substeps_per_sample: usize,
    pub substep_s: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SimulateResponse {
    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One row per simulated sample.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("time_s,inlet_c,ambient_c,outlet_c\n");
        for (t, inlet, ambient, out) in self.rows() {
            csv.push_str(&format!("{},{},{},{}\n", t, inlet, ambient, out));
        }
        csv
    }

    /// `(time, inlet, ambient, outlet)` per simulated sample, stopping at
    /// the shortest series.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(&self.inlet)
            .zip(&self.ambient)
            .zip(&self.outlet)
            .map(|(((&t, &inlet), &ambient), &out)| (t, inlet, ambient, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulateResponse {
        SimulateResponse {
            interval_s: 60.0,
            n_points: 3,
            time: vec![0.0, 60.0],
            inlet: vec![80.0, 80.0, 80.0],
            ambient: vec![20.0, 19.0],
            outlet: vec![79.5, 79.25],
            final_temperature: Some(79.25),
            final_wall: vec![39.0, 70.0],
            substeps_per_sample: 3209,
            substep_s: 0.0187,
            warnings: vec!["length mismatch".to_string()],
        }
    }

    #[test]
    fn csv_has_one_row_per_simulated_sample() {
        let csv = sample().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "time_s,inlet_c,ambient_c,outlet_c");
        assert_eq!(lines[2], "60,80,19,79.25");
    }

    #[test]
    fn json_uses_snake_case_fields() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"final_temperature\": 79.25"));
        assert!(json.contains("\"substeps_per_sample\": 3209"));
        let back: SimulateResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn csv_tolerates_short_series() {
        let mut r = sample();
        r.inlet = vec![80.0];
        let csv = r.to_csv();
        assert_eq!(csv.lines().count(), 2);

        let truncated: SimulateResponse = serde_json::from_str(
            r#"{"interval_s": 1.0, "n_points": 2, "time": [0.0, 1.0], "inlet": [50.0, 50.0],
                "ambient": [], "outlet": [49.0, 48.5], "final_temperature": 48.5,
                "final_wall": [], "substeps_per_sample": 1, "substep_s": 1.0}"#,
        )
        .unwrap();
        assert_eq!(truncated.to_csv(), "time_s,inlet_c,ambient_c,outlet_c\n");
    }

    #[test]
    fn empty_warnings_are_omitted() {
        let mut r = sample();
        r.warnings.clear();
        let json = r.to_json_pretty().unwrap();
        assert!(!json.contains("warnings"));
    }
}
