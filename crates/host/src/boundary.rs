// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ffi::CString, fmt, path::Path, ptr::NonNull};

use libloading::Library;
use licensor_abi::LicensorVTableFFI;
use tracing::{debug, instrument};

use crate::{
	config::BoundarySource,
	error::{Error, Result},
	evaluator::Evaluator,
	loader,
	string::OwnedCString,
};

/// Entry points of the licensor library
pub struct Boundary {
	vtable: LicensorVTableFFI,
	/// Keeps every vtable entry valid; handles borrow the boundary, so they are gone before it unloads
	_library: Option<Library>,
}

impl Boundary {
	/// The library linked into this binary
	pub fn linked() -> Self {
		Self {
			vtable: licensor_ffi::vtable(),
			_library: None,
		}
	}

	/// Load the library from a shared object at runtime
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let (library, vtable) = loader::load(path.as_ref())?;
		Ok(Self {
			vtable,
			_library: Some(library),
		})
	}

	pub fn open(source: &BoundarySource) -> Result<Self> {
		match source {
			BoundarySource::Linked => Ok(Self::linked()),
			BoundarySource::Library(path) => Self::load(path),
		}
	}

	pub(crate) fn vtable(&self) -> &LicensorVTableFFI {
		&self.vtable
	}

	pub fn abi_version(&self) -> u32 {
		// SAFETY: abi_version takes no arguments and touches no state
		unsafe { (self.vtable.abi_version)() }
	}

	/// Create an evaluator for `key`, to be validated against `domain`
	///
	/// A rejected key is reported as [`Error::Callee`] carrying the library's message.
	#[instrument(name = "boundary::create_from_license_key", level = "debug", skip_all)]
	pub fn create_from_license_key(&self, key: &str, domain: &str) -> Result<Evaluator<'_>> {
		let key = CString::new(key)?;
		let domain = CString::new(domain)?;

		// SAFETY: both inputs are NUL-terminated and outlive the call
		let raw = unsafe { (self.vtable.create_from_license_key)(key.as_ptr(), domain.as_ptr()) };

		// SAFETY: raw was just returned by create_from_license_key and has no other owner
		unsafe { Evaluator::from_raw(self, raw) }
	}

	/// Concatenate `a` and `b` in the library
	#[instrument(name = "boundary::concat", level = "debug", skip_all)]
	pub fn concat(&self, a: &str, b: &str) -> Result<OwnedCString<'_>> {
		let a = CString::new(a)?;
		let b = CString::new(b)?;

		// SAFETY: both inputs are NUL-terminated and outlive the call
		let raw = unsafe { (self.vtable.concat_strs)(a.as_ptr(), b.as_ptr()) };
		let ptr = NonNull::new(raw).ok_or(Error::NullString("concat_strs"))?;
		debug!("concat_strs returned an owned string");

		// SAFETY: ptr was just returned by concat_strs and has no other owner
		Ok(unsafe { OwnedCString::from_raw(self, ptr) })
	}
}

impl fmt::Debug for Boundary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Boundary").field("loaded", &self._library.is_some()).finish()
	}
}
