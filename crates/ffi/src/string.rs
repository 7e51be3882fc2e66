// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::{CStr, CString, c_char},
	ptr::null_mut,
};

use tracing::debug;

use crate::{
	guard::guard,
	ledger::{self, Allocation},
};

/// Borrow a NUL-terminated string owned by the caller, None if null
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid for `'a`.
pub(crate) unsafe fn borrow_cstr<'a>(ptr: *const c_char) -> Option<&'a CStr> {
	if ptr.is_null() {
		None
	} else {
		// SAFETY: Caller guarantees a valid NUL-terminated string
		Some(unsafe { CStr::from_ptr(ptr) })
	}
}

/// Hand an owned copy of `s` to the caller, who releases it with `free_cstring`
///
/// Returns null if `s` contains an interior NUL byte.
pub(crate) fn into_raw(s: &str) -> *mut c_char {
	match CString::new(s) {
		Ok(c) => {
			let ptr = c.into_raw();
			ledger::track(ptr.cast_const(), Allocation::CString);
			ptr
		}
		Err(_) => null_mut(),
	}
}

/// Hand a message to the caller, never null
pub(crate) fn message_into_raw(msg: &str) -> *mut c_char {
	let ptr = into_raw(msg);
	if ptr.is_null() {
		into_raw(&msg.replace('\0', "\\0"))
	} else {
		ptr
	}
}

/// Take back a string formerly handed out by [`into_raw`]
///
/// # Safety
/// `ptr` must be null or come from [`into_raw`] and not have been released yet.
pub(crate) unsafe fn release(ptr: *mut c_char) {
	if ptr.is_null() || !ledger::release(ptr.cast_const(), Allocation::CString) {
		return;
	}
	// SAFETY: Caller guarantees ptr came from CString::into_raw
	drop(unsafe { CString::from_raw(ptr) });
}

/// Frees strings formerly allocated by this library
///
/// # Safety
/// `s` must be null or a string returned by this library that has not been
/// released yet. Never pass memory allocated by the caller.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_cstring(s: *mut c_char) {
	guard("free_cstring", || {
		debug!(null = s.is_null(), "free_cstring");
		// SAFETY: Forwarded caller guarantee
		unsafe { release(s) }
	})
}
