//! nodemsg-ffi: C-ABI exports for the nodemsg header codec.

mod error;
mod header;
mod types;

use std::panic::AssertUnwindSafe;

pub use header::{nm_header_decode, nm_header_encode, nm_header_encoded_size};
pub use types::{
    NmHeader, NmResult, NM_ERR_INTERNAL, NM_ERR_INVALID_ARGUMENT, NM_ERR_VERSION_MISMATCH, NM_OK,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn nm_clear_error() {
    ffi_boundary((), error::clear_error_state);
}

#[no_mangle]
pub extern "C" fn nm_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}
