//! Workout Report - Summaries of raw workout sensor readings
//!
//! Turns a sensor package (an activity kind code plus positional readings) into
//! a workout report through a deterministic pipeline: kind dispatch → strategy
//! construction → distance → mean speed → calories → message rendering.
//!
//! ## Activities
//!
//! - **Running** (`RUN`): steps, duration, weight
//! - **Sports walking** (`WLK`): steps, duration, weight, height
//! - **Swimming** (`SWM`): strokes, duration, weight, pool length, pool laps

pub mod dispatch;
pub mod error;
pub mod message;
pub mod package;
pub mod training;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use dispatch::{compute_report, compute_reports, read_package};
pub use error::ComputeError;
pub use package::{sample_packages, SensorPackage};
pub use training::{Running, SportsWalking, Swimming, Training};
pub use types::{ActivityInput, ActivityKind, WorkoutReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
