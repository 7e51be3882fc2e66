// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_char;

use crate::{BoolResultFFI, EvaluatorFFI, EvaluatorResultFFI};

/// Function table of the licensor library
///
/// A caller either fills this table from the statically linked library or
/// resolves every entry from a shared library at runtime. All function
/// pointers must be valid (non-null).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct LicensorVTableFFI {
	/// ABI version implemented by the library, see
	/// [`LICENSOR_ABI_VERSION`](crate::constants::LICENSOR_ABI_VERSION)
	pub abi_version: unsafe extern "C" fn() -> u32,

	/// Create an evaluator for a license key and the domain to check against
	///
	/// # Parameters
	/// - `key`: NUL-terminated license key, borrowed for the duration of the call
	/// - `domain`: NUL-terminated domain, borrowed for the duration of the call
	///
	/// # Returns
	/// - A tagged result which must be released with `free_result` exactly once
	pub create_from_license_key: unsafe extern "C" fn(key: *const c_char, domain: *const c_char) -> EvaluatorResultFFI,

	/// Check the tag of a result, never touches either payload
	pub result_is_ok: unsafe extern "C" fn(result: *const EvaluatorResultFFI) -> bool,

	/// Validate the license held by an evaluator (borrowed, not consumed)
	pub validate: unsafe extern "C" fn(evaluator: *const EvaluatorFFI) -> bool,

	/// Validate the license and report the reason on failure
	///
	/// # Returns
	/// - A bool result which must be released with `free_bool_result` exactly once
	pub validate_detailed: unsafe extern "C" fn(evaluator: *const EvaluatorFFI) -> BoolResultFFI,

	/// Check whether a bool result carries an error
	pub bool_result_is_ok: unsafe extern "C" fn(result: *const BoolResultFFI) -> bool,

	/// Render the license held by an evaluator as JSON
	///
	/// # Returns
	/// - An owned string to release with `free_cstring`, or null on failure
	pub evaluator_inspect: unsafe extern "C" fn(evaluator: *const EvaluatorFFI) -> *mut c_char,

	/// Release the payload selected by the tag of a result
	///
	/// # Safety
	/// - The result must have been returned by `create_from_license_key`
	/// - This function must be called exactly once per result
	pub free_result: unsafe extern "C" fn(result: EvaluatorResultFFI),

	/// Release the error string of a bool result, if any
	pub free_bool_result: unsafe extern "C" fn(result: BoolResultFFI),

	/// Concatenate two NUL-terminated strings
	///
	/// # Returns
	/// - An owned string to release with `free_cstring`, or null on invalid input
	pub concat_strs: unsafe extern "C" fn(a: *const c_char, b: *const c_char) -> *mut c_char,

	/// Release a string allocated by the library
	///
	/// # Safety
	/// - The string must have been allocated by the library, never by the caller
	/// - This function must be called exactly once per string
	pub free_cstring: unsafe extern "C" fn(s: *mut c_char),
}
