// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! C ABI of the licensor library
//!
//! Ownership rules:
//! - Input strings are borrowed for the duration of a call and copied.
//! - Every string returned by this library is released with `free_cstring`,
//!   except the ones inside a result, which the matching `free_result` /
//!   `free_bool_result` releases together with the rest of the result.
//! - Results are released exactly once, after their tag has been inspected.
//!
//! A panic never unwinds across the boundary: it is logged and the process aborts.

mod concat;
mod evaluator;
mod guard;
pub mod ledger;
mod string;

pub use concat::concat_strs;
pub use evaluator::{
	bool_result_is_ok, create_from_license_key, evaluator_inspect, free_bool_result, free_result, result_is_ok,
	validate, validate_detailed,
};
use licensor_abi::{LicensorVTableFFI, constants::LICENSOR_ABI_VERSION};
pub use string::free_cstring;

/// ABI version implemented by this library
#[unsafe(no_mangle)]
pub extern "C" fn licensor_abi_version() -> u32 {
	LICENSOR_ABI_VERSION
}

/// Function table of the statically linked library
pub fn vtable() -> LicensorVTableFFI {
	LicensorVTableFFI {
		abi_version: licensor_abi_version,
		create_from_license_key,
		result_is_ok,
		validate,
		validate_detailed,
		bool_result_is_ok,
		evaluator_inspect,
		free_result,
		free_bool_result,
		concat_strs,
		free_cstring,
	}
}
