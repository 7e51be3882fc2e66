// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{ffi::c_char, ptr::null_mut};

use crate::{
	constants::{RESULT_ERR, RESULT_OK},
	evaluator::EvaluatorFFI,
};

/// Tagged result of `create_from_license_key`
///
/// Exactly one payload slot is meaningful, selected by `tag`:
/// - [`RESULT_OK`]: `evaluator` is populated, `err` is null
/// - [`RESULT_ERR`]: `err` holds a NUL-terminated message, `evaluator` is null
///
/// The slot not selected by the tag must never be dereferenced or freed. The
/// whole result is released with a single `free_result` call once the tag has
/// been inspected.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorResultFFI {
	/// Discriminant, one of [`RESULT_OK`] or [`RESULT_ERR`]
	pub tag: u8,
	/// Evaluator handle, owned by the caller until `free_result`
	pub evaluator: *mut EvaluatorFFI,
	/// Error message, owned by the caller until `free_result`
	pub err: *mut c_char,
}

impl EvaluatorResultFFI {
	/// Create a successful result carrying `evaluator`
	pub const fn ok(evaluator: *mut EvaluatorFFI) -> Self {
		Self {
			tag: RESULT_OK,
			evaluator,
			err: null_mut(),
		}
	}

	/// Create a failed result carrying the message `err`
	pub const fn err(err: *mut c_char) -> Self {
		Self {
			tag: RESULT_ERR,
			evaluator: null_mut(),
			err,
		}
	}

	pub const fn is_ok(&self) -> bool {
		self.tag == RESULT_OK
	}
}

/// Result of `validate_detailed`
///
/// `err` is null when `result` is the outcome of a successful validation.
/// Otherwise it holds the reason, owned by the caller until `free_bool_result`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BoolResultFFI {
	pub result: bool,
	pub err: *mut c_char,
}

impl BoolResultFFI {
	pub const fn ok(result: bool) -> Self {
		Self {
			result,
			err: null_mut(),
		}
	}

	pub const fn err(err: *mut c_char) -> Self {
		Self {
			result: false,
			err,
		}
	}

	pub fn is_ok(&self) -> bool {
		self.err.is_null()
	}
}
