// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::{CStr, c_char},
	fmt,
	ptr::NonNull,
};

use licensor_abi::{BoolResultFFI, EvaluatorFFI, EvaluatorResultFFI};
use tracing::instrument;

use crate::{
	boundary::Boundary,
	error::{Error, Result},
	string::OwnedCString,
};

/// Outcome of [`Evaluator::validate_detailed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
	Valid,
	Invalid {
		reason: String,
	},
}

impl Validation {
	pub fn is_valid(&self) -> bool {
		matches!(self, Validation::Valid)
	}
}

/// Releases a tagged result exactly once, whichever payload it carries
struct ResultGuard<'b> {
	raw: EvaluatorResultFFI,
	boundary: &'b Boundary,
}

impl Drop for ResultGuard<'_> {
	fn drop(&mut self) {
		// SAFETY: the guard is the single owner of raw
		unsafe { (self.boundary.vtable().free_result)(self.raw) }
	}
}

/// Evaluator created by the library, owned by the caller
///
/// Dropping it releases the result it came from through `free_result`.
pub struct Evaluator<'b> {
	guard: ResultGuard<'b>,
}

impl<'b> Evaluator<'b> {
	/// Take ownership of a result, turning its tag into a Rust result
	///
	/// The result is released exactly once: right here when it carries an
	/// error (after copying the message), otherwise when the evaluator drops.
	///
	/// # Safety
	/// `raw` must have been returned by `create_from_license_key` of the library
	/// behind `boundary` and must not be owned by anything else.
	pub(crate) unsafe fn from_raw(boundary: &'b Boundary, raw: EvaluatorResultFFI) -> Result<Self> {
		let guard = ResultGuard {
			raw,
			boundary,
		};

		// SAFETY: result_is_ok only reads the tag
		if unsafe { (boundary.vtable().result_is_ok)(&guard.raw) } {
			return Ok(Evaluator {
				guard,
			});
		}

		// SAFETY: the tag selects err, which stays valid until the guard drops
		let message = unsafe { copy_message(guard.raw.err) };
		Err(Error::Callee(message))
	}

	fn handle(&self) -> *const EvaluatorFFI {
		self.guard.raw.evaluator
	}

	/// Returns true if the license is valid for the domain
	#[instrument(name = "evaluator::validate", level = "debug", skip_all)]
	pub fn validate(&self) -> bool {
		// SAFETY: the handle stays valid while self is alive; validate only borrows it
		unsafe { (self.guard.boundary.vtable().validate)(self.handle()) }
	}

	/// Like [`validate`](Self::validate), with the reason on failure
	#[instrument(name = "evaluator::validate_detailed", level = "debug", skip_all)]
	pub fn validate_detailed(&self) -> Validation {
		let vtable = self.guard.boundary.vtable();

		// SAFETY: the handle stays valid while self is alive
		let raw = unsafe { (vtable.validate_detailed)(self.handle()) };
		let guard = BoolResultGuard {
			raw,
			boundary: self.guard.boundary,
		};

		// SAFETY: bool_result_is_ok only reads the err slot
		if unsafe { (vtable.bool_result_is_ok)(&guard.raw) } {
			if guard.raw.result {
				Validation::Valid
			} else {
				Validation::Invalid {
					reason: "license is not valid".to_string(),
				}
			}
		} else {
			Validation::Invalid {
				// SAFETY: err is set and stays valid until the guard drops
				reason: unsafe { copy_message(guard.raw.err) },
			}
		}
	}

	/// The license as JSON, for debugging
	pub fn inspect(&self) -> Result<OwnedCString<'b>> {
		// SAFETY: the handle stays valid while self is alive
		let raw = unsafe { (self.guard.boundary.vtable().evaluator_inspect)(self.handle()) };
		let ptr = NonNull::new(raw).ok_or(Error::NullString("evaluator_inspect"))?;
		// SAFETY: ptr was just returned by evaluator_inspect and has no other owner
		Ok(unsafe { OwnedCString::from_raw(self.guard.boundary, ptr) })
	}
}

impl fmt::Debug for Evaluator<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Evaluator").field("handle", &self.handle()).finish()
	}
}

struct BoolResultGuard<'b> {
	raw: BoolResultFFI,
	boundary: &'b Boundary,
}

impl Drop for BoolResultGuard<'_> {
	fn drop(&mut self) {
		// SAFETY: the guard is the single owner of raw
		unsafe { (self.boundary.vtable().free_bool_result)(self.raw) }
	}
}

/// Copy a message out of a library-owned string, which stays owned by the library
///
/// # Safety
/// `ptr` must be null or a live NUL-terminated string.
unsafe fn copy_message(ptr: *const c_char) -> String {
	if ptr.is_null() {
		return "unknown error".to_string();
	}
	// SAFETY: Forwarded caller guarantee
	unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
