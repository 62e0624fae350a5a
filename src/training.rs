//! Calculation strategies
//!
//! Each activity kind converts raw readings into distance, mean speed and
//! spent calories with its own closed-form formulas:
//! - Running: step-based distance, speed-driven calorie estimate
//! - SportsWalking: step-based distance, weight/height calorie estimate
//! - Swimming: stroke-based distance, pool-based speed

use crate::types::{ActivityInput, ActivityKind, WorkoutReport};

/// Step length shared by running and walking (m)
pub const LEN_STEP: f64 = 0.65;
/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

/// Capability set shared by every activity kind.
///
/// `distance` and `mean_speed` have default formulas; calories have none, so
/// only a concrete activity can estimate them.
pub trait Training {
    /// Kind of activity this strategy computes
    fn kind(&self) -> ActivityKind;

    /// Raw readings the strategy was built from
    fn input(&self) -> ActivityInput;

    /// Distance covered by one step or stroke (m)
    fn step_length(&self) -> f64 {
        LEN_STEP
    }

    /// Distance covered (km)
    fn distance(&self) -> f64 {
        self.input().action_count as f64 * self.step_length() / M_IN_KM
    }

    /// Mean speed over the whole workout (km/h)
    fn mean_speed(&self) -> f64 {
        self.distance() / self.input().duration_hours
    }

    /// Estimated energy spent (kcal)
    fn spent_calories(&self) -> f64;

    /// Compute every metric and collect them into a report
    fn show_training_info(&self) -> WorkoutReport {
        let report = WorkoutReport {
            kind_label: self.kind().label().to_string(),
            duration_hours: self.input().duration_hours,
            distance_km: self.distance(),
            mean_speed_kmh: self.mean_speed(),
            calories_kcal: self.spent_calories(),
        };

        tracing::trace!(
            kind = report.kind_label.as_str(),
            distance_km = report.distance_km,
            mean_speed_kmh = report.mean_speed_kmh,
            calories_kcal = report.calories_kcal,
            "computed workout metrics"
        );

        report
    }
}

/// Running workout
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    input: ActivityInput,
}

impl Running {
    pub const CALORIES_MEAN_SPEED_MULTIPLIER: f64 = 18.0;
    pub const CALORIES_MEAN_SPEED_SHIFT: f64 = 20.0;

    pub fn new(action_count: u64, duration_hours: f64, weight_kg: f64) -> Self {
        Self {
            input: ActivityInput::new(action_count, duration_hours, weight_kg),
        }
    }
}

impl Training for Running {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Running
    }

    fn input(&self) -> ActivityInput {
        self.input
    }

    fn spent_calories(&self) -> f64 {
        (Self::CALORIES_MEAN_SPEED_MULTIPLIER * self.mean_speed() - Self::CALORIES_MEAN_SPEED_SHIFT)
            * self.input.weight_kg
            / M_IN_KM
            * self.input.duration_hours
            * MIN_IN_H
    }
}

/// Sports walking workout
#[derive(Debug, Clone, PartialEq)]
pub struct SportsWalking {
    base: ActivityInput,
    height_cm: f64,
}

impl SportsWalking {
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    pub const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;

    pub fn new(action_count: u64, duration_hours: f64, weight_kg: f64, height_cm: f64) -> Self {
        Self {
            base: ActivityInput::new(action_count, duration_hours, weight_kg),
            height_cm,
        }
    }
}

impl Training for SportsWalking {
    fn kind(&self) -> ActivityKind {
        ActivityKind::SportsWalking
    }

    fn input(&self) -> ActivityInput {
        self.base.with_height(self.height_cm)
    }

    /// The speed/height term is floor-divided, so it stays 0 until the squared
    /// speed reaches the height in centimeters.
    fn spent_calories(&self) -> f64 {
        let weight = self.base.weight_kg;
        (Self::CALORIES_WEIGHT_MULTIPLIER * weight
            + floor_div(self.mean_speed().powi(2), self.height_cm)
                * Self::CALORIES_SPEED_HEIGHT_MULTIPLIER
                * weight)
            * self.base.duration_hours
            * MIN_IN_H
    }
}

/// Swimming workout
#[derive(Debug, Clone, PartialEq)]
pub struct Swimming {
    base: ActivityInput,
    pool_length_m: f64,
    pool_laps: u64,
}

impl Swimming {
    pub const LEN_STROKE: f64 = 1.38;
    pub const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.1;
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;

    pub fn new(
        action_count: u64,
        duration_hours: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_laps: u64,
    ) -> Self {
        Self {
            base: ActivityInput::new(action_count, duration_hours, weight_kg),
            pool_length_m,
            pool_laps,
        }
    }
}

impl Training for Swimming {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Swimming
    }

    fn input(&self) -> ActivityInput {
        self.base.with_pool(self.pool_length_m, self.pool_laps)
    }

    fn step_length(&self) -> f64 {
        Self::LEN_STROKE
    }

    /// Speed comes from the laps swum, not from the stroke count.
    fn mean_speed(&self) -> f64 {
        self.pool_length_m * self.pool_laps as f64 / M_IN_KM / self.base.duration_hours
    }

    fn spent_calories(&self) -> f64 {
        (self.mean_speed() + Self::CALORIES_MEAN_SPEED_SHIFT)
            * Self::CALORIES_WEIGHT_MULTIPLIER
            * self.base.weight_kg
    }
}

/// Floored float division, rounding toward negative infinity.
///
/// The quotient is taken from `a - a mod b` so results sitting right at an
/// integer boundary floor to the lower value instead of rounding up.
pub(crate) fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }

    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }

    let mut floored = div.floor();
    if div - floored > 0.5 {
        floored += 1.0;
    }
    floored
}
