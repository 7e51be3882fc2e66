// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Cow,
	ffi::{CStr, c_char},
	fmt,
	ptr::NonNull,
	str::Utf8Error,
};

use crate::boundary::Boundary;

/// A string allocated by the library and owned by the caller
///
/// Released through the library's `free_cstring` when dropped. Deliberately
/// not `Clone`: a copy would be a second owner.
pub struct OwnedCString<'b> {
	ptr: NonNull<c_char>,
	boundary: &'b Boundary,
}

impl<'b> OwnedCString<'b> {
	/// Take ownership of a string returned by the library
	///
	/// # Safety
	/// `ptr` must have been allocated by the library behind `boundary`, must be
	/// released through `free_cstring` and must not be owned by anything else.
	pub(crate) unsafe fn from_raw(boundary: &'b Boundary, ptr: NonNull<c_char>) -> Self {
		Self {
			ptr,
			boundary,
		}
	}

	pub fn as_c_str(&self) -> &CStr {
		// SAFETY: ptr is a live NUL-terminated string until drop
		unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
	}

	pub fn to_str(&self) -> Result<&str, Utf8Error> {
		self.as_c_str().to_str()
	}

	pub fn to_string_lossy(&self) -> Cow<'_, str> {
		self.as_c_str().to_string_lossy()
	}
}

impl Drop for OwnedCString<'_> {
	fn drop(&mut self) {
		// SAFETY: ptr was allocated by this library and is released exactly once, here
		unsafe { (self.boundary.vtable().free_cstring)(self.ptr.as_ptr()) }
	}
}

impl fmt::Debug for OwnedCString<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self.as_c_str(), f)
	}
}

impl fmt::Display for OwnedCString<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_string_lossy())
	}
}

impl PartialEq<str> for OwnedCString<'_> {
	fn eq(&self, other: &str) -> bool {
		self.as_c_str().to_bytes() == other.as_bytes()
	}
}

impl PartialEq<&str> for OwnedCString<'_> {
	fn eq(&self, other: &&str) -> bool {
		self.as_c_str().to_bytes() == other.as_bytes()
	}
}
