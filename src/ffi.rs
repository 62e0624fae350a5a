//! FFI bindings for Workout Report
//!
//! This module provides C-compatible functions for calling the report computation
//! from other languages. Kind codes are C strings (null-terminated), readings are
//! passed as a pointer/length pair of doubles, and returned strings are allocated
//! memory that must be freed by the caller using `workout_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::dispatch::compute_report;
use crate::types::WorkoutReport;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Read the kind code and readings, then compute the report.
///
/// Records the failure in the last-error slot and returns None on error.
unsafe fn report_from_raw(
    kind: *const c_char,
    fields: *const f64,
    len: usize,
) -> Option<WorkoutReport> {
    let Some(kind_str) = cstr_to_string(kind) else {
        set_last_error("Invalid kind string pointer");
        return None;
    };

    let readings: &[f64] = if len == 0 {
        &[]
    } else if fields.is_null() {
        set_last_error("Invalid fields pointer");
        return None;
    } else {
        std::slice::from_raw_parts(fields, len)
    };

    match compute_report(&kind_str, readings) {
        Ok(report) => Some(report),
        Err(e) => {
            set_last_error(&e.to_string());
            None
        }
    }
}

// ============================================================================
// Report API
// ============================================================================

/// Compute a workout report and return it as a JSON object.
///
/// # Safety
/// - `kind` must be a valid null-terminated C string.
/// - `fields` must point to `len` readable doubles (may be NULL when `len` is 0).
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_compute_report(
    kind: *const c_char,
    fields: *const f64,
    len: usize,
) -> *mut c_char {
    clear_last_error();

    let Some(report) = report_from_raw(kind, fields, len) else {
        return ptr::null_mut();
    };

    match serde_json::to_string(&report) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Compute a workout report and return its rendered one-line message.
///
/// # Safety
/// Same contract as `workout_compute_report`.
#[no_mangle]
pub unsafe extern "C" fn workout_report_message(
    kind: *const c_char,
    fields: *const f64,
    len: usize,
) -> *mut c_char {
    clear_last_error();

    match report_from_raw(kind, fields, len) {
        Some(report) => string_to_cstr(&report.message()),
        None => ptr::null_mut(),
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by a workout function.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a workout function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn workout_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next workout function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn workout_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn workout_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_compute_report() {
        let kind = CString::new("RUN").unwrap();
        let fields = [15000.0, 1.0, 75.0];

        unsafe {
            let result = workout_compute_report(kind.as_ptr(), fields.as_ptr(), fields.len());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let report: WorkoutReport = serde_json::from_str(result_str).unwrap();
            assert_eq!(report.kind_label, "Running");
            assert!((report.distance_km - 9.75).abs() < 1e-9);

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_report_message() {
        let kind = CString::new("SWM").unwrap();
        let fields = [720.0, 1.0, 80.0, 25.0, 40.0];

        unsafe {
            let result = workout_report_message(kind.as_ptr(), fields.as_ptr(), fields.len());
            assert!(!result.is_null());

            let message = CStr::from_ptr(result).to_str().unwrap();
            assert!(message.starts_with("Activity type: Swimming;"));
            assert!(message.ends_with("Calories spent: 336.000."));

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let kind = CString::new("XYZ").unwrap();
        let fields = [1.0];

        unsafe {
            let result = workout_compute_report(kind.as_ptr(), fields.as_ptr(), fields.len());
            assert!(result.is_null());

            let error = workout_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("SWM, RUN, WLK"));
        }
    }

    #[test]
    fn test_ffi_null_fields() {
        let kind = CString::new("RUN").unwrap();

        unsafe {
            let result = workout_compute_report(kind.as_ptr(), ptr::null(), 3);
            assert!(result.is_null());

            let error_str = CStr::from_ptr(workout_last_error()).to_str().unwrap();
            assert_eq!(error_str, "Invalid fields pointer");
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = workout_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
