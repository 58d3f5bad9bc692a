use atmos_core::AtmosError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
///
/// # Example
/// ```ignore
/// // Simple error code wrapped in DefaultAtmosFfiError
/// let err = DefaultAtmosFfiError::null_pointer("out_result");
/// assert_eq!(err.code(), AtmosErrorCode::NullPointer);
/// assert_eq!(err.msg(), "Parameter 'out_result' cannot be null");
/// ```
pub(crate) trait AtmosFfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> AtmosErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `AtmosFfiError` for FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultAtmosFfiError {
    code: AtmosErrorCode,
    msg: String,
}

impl DefaultAtmosFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_result"`, `"from"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: AtmosErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string argument that is not valid UTF-8.
    pub fn invalid_string(param_name: &str) -> Self {
        Self {
            code: AtmosErrorCode::InvalidString,
            msg: format!("Parameter '{param_name}' is not a valid UTF-8 string"),
        }
    }

    /// Create error for an output buffer that cannot hold every sample.
    ///
    /// # Arguments
    /// * `required` - Number of samples the request produces
    /// * `capacity` - Number of samples the caller's buffer holds
    pub fn buffer_too_small(required: usize, capacity: usize) -> Self {
        Self {
            code: AtmosErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {capacity} samples, {required} required"),
        }
    }
}

impl From<&AtmosError> for DefaultAtmosFfiError {
    fn from(error: &AtmosError) -> Self {
        let code = match error {
            AtmosError::UnknownUnit { .. } => AtmosErrorCode::UnknownUnit,
            AtmosError::InvalidStep(_) => AtmosErrorCode::InvalidStep,
            AtmosError::InvalidRange { .. } => AtmosErrorCode::InvalidRange,
            AtmosError::TooManySamples { .. } => AtmosErrorCode::TooManySamples,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl From<AtmosError> for DefaultAtmosFfiError {
    fn from(error: AtmosError) -> Self {
        Self::from(&error)
    }
}

impl AtmosFfiError for DefaultAtmosFfiError {
    fn code(&self) -> AtmosErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by atmosphere functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmosErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Unit identifier not present in the conversion table.
    UnknownUnit = 2,

    /// Profile step is zero, negative, or not finite.
    InvalidStep = 3,

    /// Profile start or end is not finite.
    InvalidRange = 4,

    /// Profile request exceeds the sample limit.
    TooManySamples = 5,

    /// Caller-provided buffer is smaller than the number of samples produced.
    BufferTooSmall = 6,

    /// String argument is not valid UTF-8.
    InvalidString = 7,
}

impl From<DefaultAtmosFfiError> for AtmosErrorCode {
    fn from(error: DefaultAtmosFfiError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, AtmosErrorCode)> = const { RefCell::new((None, AtmosErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, AtmosErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, AtmosErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// double meters = 0.0;
/// if (atmos_convert_altitude(1000.0, "ft", "yd", &meters) != Ok) {
///     const char* error = atmos_get_last_error();
///     if (error) {
///         printf("Conversion failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn atmos_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `AtmosErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn atmos_get_last_error_code() -> AtmosErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
