//! Sensor packages
//!
//! A sensor package pairs an activity kind code with the raw readings of one
//! workout, bound by position:
//!
//! ```json
//! {"kind": "SWM", "data": [720, 1, 80, 25, 40]}
//! ```
//!
//! Packages arrive either one per line (NDJSON) or as a JSON array.

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};

/// One `(kind_code, raw_field_list)` reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPackage {
    /// Activity kind code ("RUN", "WLK", "SWM")
    pub kind: String,
    /// Raw readings in the kind's positional order
    pub data: Vec<f64>,
}

impl SensorPackage {
    pub fn new(kind: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Parse a JSON string containing an array of packages
    pub fn parse_array(json: &str) -> Result<Vec<SensorPackage>, ComputeError> {
        let packages: Vec<SensorPackage> = serde_json::from_str(json)?;
        Ok(packages)
    }

    /// Parse NDJSON (newline-delimited JSON) containing packages
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<SensorPackage>, ComputeError> {
        let mut packages = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorPackage>(trimmed) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(packages)
    }
}

/// Reference packages: one swim, one run, one walk
pub fn sample_packages() -> Vec<SensorPackage> {
    vec![
        SensorPackage::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
        SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}
