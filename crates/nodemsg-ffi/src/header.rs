use nodemsg_header::{decode, encode, encoded_size, MessageHeader};

use crate::error;
use crate::types::{NmHeader, NmResult};

/// Encoded size of `header` in bytes, or 0 if `header` is null.
///
/// # Safety
/// `header` must be null or point to a valid `NmHeader`.
#[no_mangle]
pub unsafe extern "C" fn nm_header_encoded_size(header: *const NmHeader) -> usize {
    crate::ffi_boundary(0, || {
        error::clear_error_state();

        if header.is_null() {
            let _ = error::set_invalid_argument("header cannot be null");
            return 0;
        }
        let header = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &*header }
        };
        encoded_size(&MessageHeader::from(header))
    })
}

/// Decode the header at the front of `data[..size]` into `out_header`.
///
/// `out_header` is left untouched on failure.
///
/// # Safety
/// `data` must be readable for `size` bytes (or null when `size` is 0).
/// `out_header` must be null or point to writable `NmHeader` storage.
#[no_mangle]
pub unsafe extern "C" fn nm_header_decode(
    data: *const u8,
    size: usize,
    out_header: *mut NmHeader,
) -> NmResult {
    crate::ffi_boundary(NmResult::Internal, || {
        error::clear_error_state();

        if out_header.is_null() {
            return error::set_invalid_argument("out_header cannot be null");
        }
        let src = {
            // SAFETY: Pointer and length are the caller's contract; null is checked in helper.
            match unsafe { bytes_arg(data, size) } {
                Some(src) => src,
                None => return NmResult::InvalidArgument,
            }
        };

        match decode(src) {
            Ok(header) => {
                // SAFETY: Checked non-null above; validity is guaranteed by the caller.
                unsafe { *out_header = NmHeader::from(&header) };
                NmResult::Ok
            }
            Err(err) => error::map_header_error(&err),
        }
    })
}

/// Encode `header` into `data[..size]` and store the written length in
/// `out_size`.
///
/// Nothing is written to `data` on failure.
///
/// # Safety
/// `header` must point to a valid `NmHeader`, `data` must be writable for
/// `size` bytes, and `out_size` must be null or point to writable storage.
#[no_mangle]
pub unsafe extern "C" fn nm_header_encode(
    header: *const NmHeader,
    data: *mut u8,
    size: usize,
    out_size: *mut usize,
) -> NmResult {
    crate::ffi_boundary(NmResult::Internal, || {
        error::clear_error_state();

        if header.is_null() {
            return error::set_invalid_argument("header cannot be null");
        }
        if data.is_null() {
            return error::set_invalid_argument("data cannot be null");
        }

        let header = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            MessageHeader::from(unsafe { &*header })
        };
        let dst = {
            // SAFETY: Non-null checked above; the caller owns `size` writable bytes.
            unsafe { std::slice::from_raw_parts_mut(data, size) }
        };

        match encode(&header, dst) {
            Ok(written) => {
                if !out_size.is_null() {
                    // SAFETY: Checked non-null; validity is guaranteed by the caller.
                    unsafe { *out_size = written };
                }
                NmResult::Ok
            }
            Err(err) => error::map_header_error(&err),
        }
    })
}

/// Convert a byte pointer + length into a slice.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
unsafe fn bytes_arg<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        let _ = error::set_invalid_argument("data cannot be null when size > 0");
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;
    use crate::nm_last_error;

    fn last_error() -> String {
        let ptr = nm_last_error();
        // SAFETY: nm_last_error returns a pointer to a thread-local CString.
        unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() }
    }

    #[test]
    fn encode_and_decode_through_c_abi() {
        let header = NmHeader {
            message_id: 0x0102_0304,
            has_source_node_id: 1,
            source_node_id: 0x1122_3344_5566_7788,
            ..NmHeader::default()
        };
        let mut buf = [0u8; 32];
        let mut written = 0usize;

        let rc = unsafe { nm_header_encode(&header, buf.as_mut_ptr(), buf.len(), &mut written) };
        assert_eq!(rc, NmResult::Ok);
        assert_eq!(written, 14);
        assert_eq!(unsafe { nm_header_encoded_size(&header) }, 14);
        assert_eq!(
            &buf[..written],
            &[0x00, 0x12, 0x04, 0x03, 0x02, 0x01, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]
        );

        let mut out = NmHeader::default();
        let rc = unsafe { nm_header_decode(buf.as_ptr(), written, &mut out) };
        assert_eq!(rc, NmResult::Ok);
        assert_eq!(out, header);
    }

    #[test]
    fn decode_version_mismatch_sets_error() {
        let buf = [0x00u8, 0x20, 0, 0, 0, 0];
        let mut out = NmHeader {
            message_id: 77,
            ..NmHeader::default()
        };

        let rc = unsafe { nm_header_decode(buf.as_ptr(), buf.len(), &mut out) };
        assert_eq!(rc, NmResult::VersionMismatch);
        assert_eq!(out.message_id, 77);
        assert!(last_error().contains("version mismatch"));
    }

    #[test]
    fn decode_empty_is_invalid_argument() {
        let mut out = NmHeader::default();
        let rc = unsafe { nm_header_decode(std::ptr::null(), 0, &mut out) };
        assert_eq!(rc, NmResult::InvalidArgument);
        assert!(last_error().contains("truncated"));
    }

    #[test]
    fn encode_too_small_is_invalid_argument() {
        let header = NmHeader {
            has_destination_node_id: 1,
            ..NmHeader::default()
        };
        let mut buf = [0xAAu8; 8];
        let mut written = 123usize;

        let rc = unsafe { nm_header_encode(&header, buf.as_mut_ptr(), buf.len(), &mut written) };
        assert_eq!(rc, NmResult::InvalidArgument);
        assert_eq!(written, 123);
        assert!(buf.iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn encoded_size_clears_previous_error() {
        let mut out = NmHeader::default();
        let rc = unsafe { nm_header_decode([0x00u8, 0x10].as_ptr(), 2, &mut out) };
        assert_eq!(rc, NmResult::InvalidArgument);
        assert!(!last_error().is_empty());

        let size = unsafe { nm_header_encoded_size(&NmHeader::default()) };
        assert_eq!(size, 6);
        assert!(last_error().is_empty());
    }

    #[test]
    fn null_pointers_rejected() {
        let mut out = NmHeader::default();
        let rc = unsafe { nm_header_decode([0u8; 6].as_ptr(), 6, std::ptr::null_mut()) };
        assert_eq!(rc, NmResult::InvalidArgument);

        let rc = unsafe { nm_header_decode(std::ptr::null(), 6, &mut out) };
        assert_eq!(rc, NmResult::InvalidArgument);

        let rc = unsafe { nm_header_encode(std::ptr::null(), [0u8; 6].as_mut_ptr(), 6, std::ptr::null_mut()) };
        assert_eq!(rc, NmResult::InvalidArgument);

        assert_eq!(unsafe { nm_header_encoded_size(std::ptr::null()) }, 0);
    }
}
