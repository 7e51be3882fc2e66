// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Loader resolving the licensor vtable from a shared library

use std::path::Path;

use libloading::Library;
use licensor_abi::{
	LicensorVTableFFI,
	constants::{LICENSOR_ABI_VERSION, symbols},
};
use tracing::debug;

use crate::error::{Error, Result};

/// Copy a function pointer out of `library`
///
/// # Safety
/// `T` must be the exact function pointer type the library exports under `name`.
unsafe fn resolve<T: Copy>(library: &Library, path: &Path, name: &[u8]) -> Result<T> {
	// SAFETY: Forwarded caller guarantee
	let symbol = unsafe { library.get::<T>(name) }.map_err(|source| Error::Load {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(*symbol)
}

/// Load a shared library and resolve every entry of the vtable
///
/// The returned vtable is only valid while the returned library stays loaded.
pub(crate) fn load(path: &Path) -> Result<(Library, LicensorVTableFFI)> {
	// SAFETY: Loading runs the library's initialisers, which the licensor library does not define
	let library = unsafe { Library::new(path) }.map_err(|source| Error::Load {
		path: path.to_path_buf(),
		source,
	})?;

	// SAFETY: Every type below matches the signature declared in licensor_abi::LicensorVTableFFI
	let vtable = unsafe {
		LicensorVTableFFI {
			abi_version: resolve(&library, path, symbols::ABI_VERSION)?,
			create_from_license_key: resolve(&library, path, symbols::CREATE_FROM_LICENSE_KEY)?,
			result_is_ok: resolve(&library, path, symbols::RESULT_IS_OK)?,
			validate: resolve(&library, path, symbols::VALIDATE)?,
			validate_detailed: resolve(&library, path, symbols::VALIDATE_DETAILED)?,
			bool_result_is_ok: resolve(&library, path, symbols::BOOL_RESULT_IS_OK)?,
			evaluator_inspect: resolve(&library, path, symbols::EVALUATOR_INSPECT)?,
			free_result: resolve(&library, path, symbols::FREE_RESULT)?,
			free_bool_result: resolve(&library, path, symbols::FREE_BOOL_RESULT)?,
			concat_strs: resolve(&library, path, symbols::CONCAT_STRS)?,
			free_cstring: resolve(&library, path, symbols::FREE_CSTRING)?,
		}
	};

	// SAFETY: abi_version takes no arguments and touches no state
	let actual = unsafe { (vtable.abi_version)() };
	if actual != LICENSOR_ABI_VERSION {
		return Err(Error::AbiMismatch {
			expected: LICENSOR_ABI_VERSION,
			actual,
		});
	}

	debug!(path = %path.display(), abi_version = actual, "loaded licensor library");
	Ok((library, vtable))
}
