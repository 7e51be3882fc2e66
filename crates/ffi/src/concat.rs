// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ffi::c_char, ptr::null_mut};

use tracing::debug;

use crate::{
	guard::guard,
	string::{borrow_cstr, into_raw},
};

/// Concatenates two strings, or null on error
///
/// Both inputs must be valid UTF-8. The returned string is owned by the
/// caller and released with `free_cstring`.
///
/// # Safety
/// `a` and `b` must be null or NUL-terminated strings, valid until the call returns.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn concat_strs(a: *const c_char, b: *const c_char) -> *mut c_char {
	guard("concat_strs", || {
		// SAFETY: Forwarded caller guarantee
		let (a, b) = match unsafe { (borrow_cstr(a), borrow_cstr(b)) } {
			(Some(a), Some(b)) => (a, b),
			_ => {
				debug!("concat_strs called with a null input");
				return null_mut();
			}
		};
		let (Ok(a), Ok(b)) = (a.to_str(), b.to_str()) else {
			debug!("concat_strs called with invalid UTF-8");
			return null_mut();
		};

		let mut joined = String::with_capacity(a.len() + b.len());
		joined.push_str(a);
		joined.push_str(b);
		into_raw(&joined)
	})
}

#[cfg(test)]
mod tests {
	use std::{
		ffi::{CStr, CString},
		ptr::null,
	};

	use super::*;
	use crate::{
		free_cstring,
		ledger::{outstanding, reset, violations},
	};

	fn concat(a: &CStr, b: &CStr) -> *mut c_char {
		unsafe { concat_strs(a.as_ptr(), b.as_ptr()) }
	}

	#[test]
	fn test_concat_a_and_b() {
		reset();
		let a = CString::new("a").unwrap();
		let b = CString::new("b").unwrap();

		let actual = concat(&a, &b);
		assert_eq!(unsafe { CStr::from_ptr(actual) }, c"ab", "a and b concatenated should yield 'ab'");
		assert_eq!(outstanding(), 1);

		unsafe { free_cstring(actual) };
		assert_eq!(outstanding(), 0);
		assert!(violations().is_empty());
	}

	#[test]
	fn test_concat_empty() {
		reset();
		let actual = concat(c"", c"");
		assert_eq!(unsafe { CStr::from_ptr(actual) }, c"");
		unsafe { free_cstring(actual) };
		assert_eq!(outstanding(), 0);
	}

	#[test]
	fn test_concat_multibyte() {
		reset();
		let actual = concat(c"grüße, ", c"世界");
		assert_eq!(unsafe { CStr::from_ptr(actual) }.to_str().unwrap(), "grüße, 世界");
		unsafe { free_cstring(actual) };
	}

	#[test]
	fn test_null_input_yields_null() {
		reset();
		let b = CString::new("b").unwrap();
		assert!(unsafe { concat_strs(null(), b.as_ptr()) }.is_null());
		assert!(unsafe { concat_strs(b.as_ptr(), null()) }.is_null());
		assert_eq!(outstanding(), 0);
	}

	#[test]
	fn test_invalid_utf8_yields_null() {
		reset();
		let invalid = CString::new(vec![0xff, 0xfe]).unwrap();
		assert!(concat(&invalid, c"b").is_null());
		assert_eq!(outstanding(), 0);
	}
}
