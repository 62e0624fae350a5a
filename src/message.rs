//! Report rendering
//!
//! Renders a computed report into its fixed one-line message. Numbers are shown
//! with exactly three fractional digits; the report keeps full precision.

use crate::types::WorkoutReport;
use std::fmt;

impl WorkoutReport {
    /// One-line human-readable summary of the workout
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorkoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Activity type: {}; Duration: {:.3} h; Distance: {:.3} km; Avg speed: {:.3} km/h; Calories spent: {:.3}.",
            self.kind_label,
            self.duration_hours,
            self.distance_km,
            self.mean_speed_kmh,
            self.calories_kcal
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::compute_report;
    use crate::types::WorkoutReport;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_messages() {
        let swimming = compute_report("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
        assert_eq!(
            swimming.message(),
            "Activity type: Swimming; Duration: 1.000 h; Distance: 0.994 km; Avg speed: 1.000 km/h; Calories spent: 336.000."
        );

        let running = compute_report("RUN", &[15000.0, 1.0, 75.0]).unwrap();
        assert_eq!(
            running.message(),
            "Activity type: Running; Duration: 1.000 h; Distance: 9.750 km; Avg speed: 9.750 km/h; Calories spent: 699.750."
        );

        let walking = compute_report("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        assert_eq!(
            walking.message(),
            "Activity type: SportsWalking; Duration: 1.000 h; Distance: 5.850 km; Avg speed: 5.850 km/h; Calories spent: 157.500."
        );
    }

    #[test]
    fn test_values_kept_unrounded() {
        let report = WorkoutReport {
            kind_label: "Running".to_string(),
            duration_hours: 0.75,
            distance_km: 1.23456,
            mean_speed_kmh: 1.64608,
            calories_kcal: 12.0,
        };

        assert_eq!(
            report.to_string(),
            "Activity type: Running; Duration: 0.750 h; Distance: 1.235 km; Avg speed: 1.646 km/h; Calories spent: 12.000."
        );
        assert_eq!(report.distance_km, 1.23456);
    }
}
