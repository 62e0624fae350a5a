//! Core types for Workout Report
//!
//! This module defines the data that flows through a computation: the activity
//! kind selected by a package code, the raw readings of one workout, and the
//! report derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity kind, selected by the three-letter code of a sensor package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "SWM")]
    Swimming,
    #[serde(rename = "RUN")]
    Running,
    #[serde(rename = "WLK")]
    SportsWalking,
}

impl ActivityKind {
    /// Every recognized kind, in lookup order
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Swimming,
        ActivityKind::Running,
        ActivityKind::SportsWalking,
    ];

    /// Package code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ActivityKind::Swimming => "SWM",
            ActivityKind::Running => "RUN",
            ActivityKind::SportsWalking => "WLK",
        }
    }

    /// Name shown in the rendered report
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Swimming => "Swimming",
            ActivityKind::Running => "Running",
            ActivityKind::SportsWalking => "SportsWalking",
        }
    }

    /// Positional field names expected in a package of this kind
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            ActivityKind::Swimming => &[
                "action_count",
                "duration_hours",
                "weight_kg",
                "pool_length_m",
                "pool_laps",
            ],
            ActivityKind::Running => &["action_count", "duration_hours", "weight_kg"],
            ActivityKind::SportsWalking => {
                &["action_count", "duration_hours", "weight_kg", "height_cm"]
            }
        }
    }

    /// Number of raw fields a package of this kind carries
    pub fn field_count(&self) -> usize {
        self.field_names().len()
    }

    /// Look up a kind by its package code (case-sensitive)
    pub fn from_code(code: &str) -> Option<ActivityKind> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Recognized codes joined for diagnostics, e.g. "SWM, RUN, WLK"
    pub fn recognized_codes() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw readings of one workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    /// Steps (running, walking) or strokes (swimming)
    pub action_count: u64,
    /// Workout duration (hours)
    pub duration_hours: f64,
    /// Athlete weight (kg)
    pub weight_kg: f64,
    /// Athlete height (cm), walking only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Pool length (m), swimming only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_length_m: Option<f64>,
    /// Number of pool laps, swimming only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_laps: Option<u64>,
}

impl ActivityInput {
    pub fn new(action_count: u64, duration_hours: f64, weight_kg: f64) -> Self {
        Self {
            action_count,
            duration_hours,
            weight_kg,
            height_cm: None,
            pool_length_m: None,
            pool_laps: None,
        }
    }

    pub fn with_height(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    pub fn with_pool(mut self, pool_length_m: f64, pool_laps: u64) -> Self {
        self.pool_length_m = Some(pool_length_m);
        self.pool_laps = Some(pool_laps);
        self
    }
}

/// Summary computed from one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutReport {
    pub kind_label: String,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories_kcal: f64,
}
