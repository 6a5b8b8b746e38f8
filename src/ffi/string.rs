//! Transient `CXString` conversion
//!
//! A `CXString` is copied into a `String` and released before the copy is
//! returned. Nothing else runs between acquiring and releasing it.

use std::ffi::{CStr, c_char};

use clang_sys::{CXString, clang_disposeString, clang_getCString};

use super::resource::{Disposable, Owned};

pub(crate) enum CxStringResource {}

unsafe impl Disposable for CxStringResource {
    type Raw = CXString;
    const NAME: &'static str = "CXString";

    unsafe fn dispose(raw: CXString) {
        unsafe { clang_disposeString(raw) }
    }
}

/// Copy the bytes behind an owned string handle, then release it
///
/// A null pointer from `read` is treated as the empty string. Invalid UTF-8 is
/// replaced rather than rejected, since libclang does not promise an encoding
/// for file names or comment text.
///
/// # Safety
/// The pointer returned by `read` must be null or point to a NUL-terminated
/// buffer that stays valid until `owned` is dropped.
pub(crate) unsafe fn copy_out<R, F>(owned: Owned<R>, read: F) -> String
where
    R: Disposable,
    F: FnOnce(R::Raw) -> *const c_char,
{
    let ptr = read(owned.as_raw());
    let text = if ptr.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(ptr) }
            .to_string_lossy()
            .into_owned()
    };
    drop(owned);
    text
}

/// Convert and release a `CXString` returned by libclang
pub(crate) fn cx_string(raw: CXString) -> String {
    // SAFETY: every CXString handed to this function comes straight from a
    // libclang call and is released exactly once by copy_out.
    unsafe {
        let owned = Owned::<CxStringResource>::from_raw(raw);
        copy_out(owned, |s| clang_getCString(s))
    }
}

/// Like [`cx_string`], mapping libclang's "empty string means no value" to `None`
pub(crate) fn cx_string_opt(raw: CXString) -> Option<String> {
    non_empty(cx_string(raw))
}

pub(crate) fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

/// Copy a borrowed NUL-terminated string owned by libclang
///
/// # Safety
/// `ptr` must be null or valid for the duration of the call.
pub(crate) unsafe fn borrowed_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let text = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
    non_empty(text)
}
