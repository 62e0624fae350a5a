//! Package dispatch
//!
//! This module provides the public API for Workout Report.
//! It resolves a package code to a calculation strategy and runs it.

use crate::error::ComputeError;
use crate::package::SensorPackage;
use crate::training::{Running, SportsWalking, Swimming, Training};
use crate::types::{ActivityKind, WorkoutReport};

type Constructor = fn(&[f64]) -> Result<Box<dyn Training>, ComputeError>;

/// Strategy constructors, indexed by activity kind
const REGISTRY: [(ActivityKind, Constructor); 3] = [
    (ActivityKind::Swimming, build_swimming),
    (ActivityKind::Running, build_running),
    (ActivityKind::SportsWalking, build_walking),
];

/// Build the calculation strategy for one sensor package.
///
/// # Arguments
/// * `code` - Activity kind code ("RUN", "WLK" or "SWM")
/// * `fields` - Raw readings, bound by position to the kind's field layout
///
/// # Errors
/// * `InvalidActivityKind` if the code is empty or unrecognized
/// * `ArityMismatch` if the field count does not match the kind
/// * `InvalidField` if a reading is outside its domain
pub fn read_package(code: &str, fields: &[f64]) -> Result<Box<dyn Training>, ComputeError> {
    let kind = resolve_kind(code)?;

    let expected = kind.field_count();
    if fields.len() != expected {
        return Err(ComputeError::ArityMismatch {
            kind: kind.label(),
            expected,
            actual: fields.len(),
        });
    }

    let (_, construct) = REGISTRY
        .iter()
        .find(|(registered, _)| *registered == kind)
        .ok_or_else(|| invalid_kind(code))?;

    tracing::debug!(code, fields = ?fields, "reading sensor package");
    construct(fields)
}

/// Compute the workout report for one sensor package.
///
/// # Example
/// ```
/// let report = workout_report::compute_report("RUN", &[15000.0, 1.0, 75.0])?;
/// assert_eq!(report.kind_label, "Running");
/// # Ok::<(), workout_report::ComputeError>(())
/// ```
pub fn compute_report(code: &str, fields: &[f64]) -> Result<WorkoutReport, ComputeError> {
    let training = read_package(code, fields)?;
    Ok(training.show_training_info())
}

/// Compute reports for a sequence of packages, in input order.
///
/// Stops at the first package that fails; no partial batch is returned.
pub fn compute_reports(packages: &[SensorPackage]) -> Result<Vec<WorkoutReport>, ComputeError> {
    packages
        .iter()
        .enumerate()
        .map(|(index, package)| {
            compute_report(&package.kind, &package.data).inspect_err(|e| {
                tracing::debug!(
                    index,
                    kind = package.kind.as_str(),
                    error = %e,
                    "package rejected"
                );
            })
        })
        .collect()
}

fn resolve_kind(code: &str) -> Result<ActivityKind, ComputeError> {
    ActivityKind::from_code(code).ok_or_else(|| invalid_kind(code))
}

fn invalid_kind(code: &str) -> ComputeError {
    ComputeError::InvalidActivityKind {
        code: code.to_string(),
        expected: ActivityKind::recognized_codes(),
    }
}

fn build_running(fields: &[f64]) -> Result<Box<dyn Training>, ComputeError> {
    Ok(Box::new(Running::new(
        whole_number("action_count", fields[0])?,
        positive("duration_hours", fields[1])?,
        positive("weight_kg", fields[2])?,
    )))
}

fn build_walking(fields: &[f64]) -> Result<Box<dyn Training>, ComputeError> {
    Ok(Box::new(SportsWalking::new(
        whole_number("action_count", fields[0])?,
        positive("duration_hours", fields[1])?,
        positive("weight_kg", fields[2])?,
        positive("height_cm", fields[3])?,
    )))
}

fn build_swimming(fields: &[f64]) -> Result<Box<dyn Training>, ComputeError> {
    Ok(Box::new(Swimming::new(
        whole_number("action_count", fields[0])?,
        positive("duration_hours", fields[1])?,
        positive("weight_kg", fields[2])?,
        positive("pool_length_m", fields[3])?,
        whole_number("pool_laps", fields[4])?,
    )))
}

fn whole_number(field: &'static str, value: f64) -> Result<u64, ComputeError> {
    let value = non_negative(field, value)?;
    if value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(ComputeError::InvalidField {
            field,
            value,
            reason: "must be a whole number",
        });
    }
    Ok(value as u64)
}

fn positive(field: &'static str, value: f64) -> Result<f64, ComputeError> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(ComputeError::InvalidField {
            field,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ComputeError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ComputeError::InvalidField {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

fn finite(field: &'static str, value: f64) -> Result<f64, ComputeError> {
    if !value.is_finite() {
        return Err(ComputeError::InvalidField {
            field,
            value,
            reason: "must be a finite number",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_package_selects_strategy() {
        let running = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap();
        assert_eq!(running.kind(), ActivityKind::Running);

        let walking = read_package("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        assert_eq!(walking.kind(), ActivityKind::SportsWalking);
        assert_eq!(walking.input().height_cm, Some(180.0));

        let swimming = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
        assert_eq!(swimming.kind(), ActivityKind::Swimming);
        assert_eq!(swimming.input().pool_laps, Some(40));
    }

    #[test]
    fn test_registry_covers_every_kind() {
        for kind in ActivityKind::ALL {
            assert!(REGISTRY.iter().any(|(registered, _)| *registered == kind));
        }
    }

    #[test]
    fn test_invalid_kind() {
        for code in ["", "XYZ", "run", "RUNNING"] {
            let err = compute_report(code, &[15000.0, 1.0, 75.0]).unwrap_err();
            match err {
                ComputeError::InvalidActivityKind { code: got, expected } => {
                    assert_eq!(got, code);
                    assert_eq!(expected, "SWM, RUN, WLK");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_kind_checked_before_fields() {
        // Fields would also be invalid; the kind must be reported first
        let err = compute_report("XYZ", &[]).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidActivityKind { .. }));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = compute_report("RUN", &[15000.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::ArityMismatch {
                kind: "Running",
                expected: 3,
                actual: 2
            }
        ));

        let err = compute_report("WLK", &[9000.0, 1.0, 75.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::ArityMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));

        let err = compute_report("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::ArityMismatch {
                expected: 5,
                actual: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_fields() {
        let err = compute_report("RUN", &[15000.0, 0.0, 75.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidField {
                field: "duration_hours",
                ..
            }
        ));

        let err = compute_report("RUN", &[-1.0, 1.0, 75.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidField {
                field: "action_count",
                ..
            }
        ));

        let err = compute_report("RUN", &[100.5, 1.0, 75.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidField {
                field: "action_count",
                reason: "must be a whole number",
                ..
            }
        ));

        let err = compute_report("SWM", &[720.0, 1.0, 80.0, 25.0, 40.5]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidField {
                field: "pool_laps",
                reason: "must be a whole number",
                ..
            }
        ));

        let err = compute_report("SWM", &[720.0, 1.0, 80.0, 25.0, -1.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidField {
                field: "pool_laps",
                ..
            }
        ));

        let err = compute_report("WLK", &[9000.0, 1.0, 75.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidField {
                field: "height_cm",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_actions_is_valid() {
        let report = compute_report("SWM", &[0.0, 1.0, 80.0, 25.0, 0.0]).unwrap();
        assert_eq!(report.distance_km, 0.0);
        assert_eq!(report.mean_speed_kmh, 0.0);
    }

    #[test]
    fn test_compute_reports_keeps_order() {
        let packages = vec![
            SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
            SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
        ];
        let reports = compute_reports(&packages).unwrap();

        let labels: Vec<_> = reports.iter().map(|r| r.kind_label.as_str()).collect();
        assert_eq!(labels, vec!["SportsWalking", "Running"]);
    }

    #[test]
    fn test_compute_reports_fails_fast() {
        let packages = vec![
            SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
            SensorPackage::new("XYZ", vec![1.0]),
            SensorPackage::new("SWM", vec![720.0, 1.0]),
        ];
        let err = compute_reports(&packages).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidActivityKind { .. }));
    }
}
