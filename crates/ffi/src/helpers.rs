use crate::error::{with_last_error_mut, AtmosErrorCode, AtmosFfiError, DefaultAtmosFfiError};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
/// Accepts any type implementing `AtmosFfiError` trait.
pub(crate) fn set_last_error(error: &impl AtmosFfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl AtmosFfiError) -> AtmosErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = AtmosErrorCode::Ok;
    });
}

/// Run `f`, recording its error (or clearing the last error on success).
pub(crate) fn handle_ffi_result_error<F, E>(f: F) -> AtmosErrorCode
where
    F: FnOnce() -> Result<(), E>,
    E: AtmosFfiError,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            AtmosErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow a C string argument as `&str`.
///
/// # Safety
/// `ptr` must be null or point to a valid null-terminated string that outlives `'a`.
pub(crate) unsafe fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultAtmosFfiError> {
    if ptr.is_null() {
        return Err(DefaultAtmosFfiError::null_pointer(param_name));
    }
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map_err(|_| DefaultAtmosFfiError::invalid_string(param_name))
}
