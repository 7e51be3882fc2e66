// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ffi::c_char;

use licensor::Evaluator;
use licensor_abi::{BoolResultFFI, EvaluatorFFI, EvaluatorResultFFI};
use tracing::{debug, warn};

use crate::{
	guard::guard,
	ledger::{self, Allocation},
	string::{self, borrow_cstr, message_into_raw},
};

fn into_handle(evaluator: Evaluator) -> *mut EvaluatorFFI {
	let ptr = Box::into_raw(Box::new(evaluator)) as *mut EvaluatorFFI;
	ledger::track(ptr.cast_const(), Allocation::Evaluator);
	ptr
}

/// # Safety
/// `ptr` must be null or an evaluator handle that has not been released yet.
unsafe fn borrow_handle<'a>(ptr: *const EvaluatorFFI) -> Option<&'a Evaluator> {
	// SAFETY: Caller guarantees ptr came from into_handle
	unsafe { (ptr as *const Evaluator).as_ref() }
}

/// This creates a new Evaluator for the given key and domain to check against
///
/// # Safety
/// `key` and `domain` must be null or NUL-terminated strings, valid until the call returns.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_from_license_key(key: *const c_char, domain: *const c_char) -> EvaluatorResultFFI {
	guard("create_from_license_key", || {
		// SAFETY: Forwarded caller guarantee
		let (key, domain) = match unsafe { (borrow_cstr(key), borrow_cstr(domain)) } {
			(Some(key), Some(domain)) => (key, domain),
			(None, _) => return EvaluatorResultFFI::err(message_into_raw("key must not be null")),
			(_, None) => return EvaluatorResultFFI::err(message_into_raw("domain must not be null")),
		};
		let domain = domain.to_string_lossy();

		match Evaluator::from_license_key(key.to_bytes(), &domain) {
			Ok(evaluator) => {
				debug!(%domain, "created evaluator");
				EvaluatorResultFFI::ok(into_handle(evaluator))
			}
			Err(e) => {
				debug!(%domain, error = %e, "rejected license key");
				EvaluatorResultFFI::err(message_into_raw(&e.to_string()))
			}
		}
	})
}

/// Returns true iff the result carries an evaluator
///
/// # Safety
/// `result` must be null or point to a result returned by `create_from_license_key`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn result_is_ok(result: *const EvaluatorResultFFI) -> bool {
	// SAFETY: Caller guarantees result is null or valid
	unsafe { result.as_ref() }.is_some_and(EvaluatorResultFFI::is_ok)
}

/// Validates the license. Returns true if the license is valid for the domain
///
/// # Safety
/// `evaluator` must be null or the evaluator of a result that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn validate(evaluator: *const EvaluatorFFI) -> bool {
	guard("validate", || {
		// SAFETY: Forwarded caller guarantee
		match unsafe { borrow_handle(evaluator) } {
			Some(evaluator) => match evaluator.validate() {
				Ok(()) => true,
				Err(e) => {
					debug!(error = %e, "license did not validate");
					false
				}
			},
			None => {
				warn!("validate called with a null evaluator");
				false
			}
		}
	})
}

/// Validates the license, reporting the reason on failure
///
/// # Safety
/// `evaluator` must be null or the evaluator of a result that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn validate_detailed(evaluator: *const EvaluatorFFI) -> BoolResultFFI {
	guard("validate_detailed", || {
		// SAFETY: Forwarded caller guarantee
		match unsafe { borrow_handle(evaluator) } {
			Some(evaluator) => match evaluator.validate() {
				Ok(()) => BoolResultFFI::ok(true),
				Err(e) => BoolResultFFI::err(message_into_raw(&e.to_string())),
			},
			None => BoolResultFFI::err(message_into_raw("evaluator must not be null")),
		}
	})
}

/// # Safety
/// `result` must be null or point to a result returned by `validate_detailed`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bool_result_is_ok(result: *const BoolResultFFI) -> bool {
	// SAFETY: Caller guarantees result is null or valid
	unsafe { result.as_ref() }.is_some_and(BoolResultFFI::is_ok)
}

/// Returns the license as JSON (for debugging purposes only), null on failure
///
/// # Safety
/// `evaluator` must be null or the evaluator of a result that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn evaluator_inspect(evaluator: *const EvaluatorFFI) -> *mut c_char {
	guard("evaluator_inspect", || {
		// SAFETY: Forwarded caller guarantee
		let Some(evaluator) = (unsafe { borrow_handle(evaluator) }) else {
			return std::ptr::null_mut();
		};
		match evaluator.inspect_json() {
			Ok(json) => string::into_raw(&json),
			Err(e) => {
				warn!(error = %e, "cannot render license");
				std::ptr::null_mut()
			}
		}
	})
}

/// Releases the payload selected by the tag: the evaluator or the error string
///
/// # Safety
/// `result` must come from `create_from_license_key` and must be released exactly once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_result(result: EvaluatorResultFFI) {
	guard("free_result", || {
		debug!(ok = result.is_ok(), "free_result");
		if result.is_ok() {
			if result.evaluator.is_null() || !ledger::release(result.evaluator.cast_const(), Allocation::Evaluator) {
				return;
			}
			// SAFETY: Caller guarantees the evaluator came from into_handle
			drop(unsafe { Box::from_raw(result.evaluator as *mut Evaluator) });
		} else {
			// SAFETY: Caller guarantees err came from message_into_raw
			unsafe { string::release(result.err) }
		}
	})
}

/// Releases the error string of a bool result, if any
///
/// # Safety
/// `result` must come from `validate_detailed` and must be released exactly once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_bool_result(result: BoolResultFFI) {
	guard("free_bool_result", || {
		if !result.is_ok() {
			// SAFETY: Caller guarantees err came from message_into_raw
			unsafe { string::release(result.err) }
		}
	})
}

#[cfg(test)]
mod tests {
	use std::{
		ffi::{CStr, CString},
		ptr::null,
	};

	use ed25519_dalek::SigningKey;
	use licensor::{License, LicenseLevel, SignedLicense, sign};
	use licensor_abi::constants::{RESULT_ERR, RESULT_OK};

	use super::*;
	use crate::{
		free_cstring,
		ledger::{Violation, live, outstanding, reset, violations},
	};

	fn create(key: &str, domain: &str) -> EvaluatorResultFFI {
		let key = CString::new(key).unwrap();
		let domain = CString::new(domain).unwrap();
		unsafe { create_from_license_key(key.as_ptr(), domain.as_ptr()) }
	}

	/// A well-formed key whose signature no embedded key verifies
	fn unsigned_key(domain: &str) -> String {
		SignedLicense {
			license: some_license(domain),
			signature: vec![0u8; 64],
		}
		.serialize()
		.unwrap()
	}

	/// A key signed with the secret half of the embedded demo key (RFC 8032, test 1)
	fn demo_signed_key(domain: &str) -> String {
		let demo = SigningKey::from_bytes(&[
			0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c, 0xc4, 0x44,
			0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae, 0x7f, 0x60,
		]);
		sign(&some_license(domain), &demo).unwrap().serialize().unwrap()
	}

	fn some_license(domain: &str) -> License {
		License {
			id: "some-id".to_string(),
			level: LicenseLevel::Team,
			domain: domain.to_string(),
			valid_until: "9999-12-31T23:59:59Z".parse().unwrap(),
			seats: Some(5),
		}
	}

	fn err_text(result: &EvaluatorResultFFI) -> String {
		unsafe { CStr::from_ptr(result.err) }.to_str().unwrap().to_string()
	}

	#[test]
	fn test_empty_key_is_an_error_result() {
		reset();
		let result = create("", "");

		assert_eq!(result.tag, RESULT_ERR);
		assert!(!unsafe { result_is_ok(&result) });
		assert!(!unsafe { result_is_ok(&result) });
		assert!(result.evaluator.is_null());
		assert!(err_text(&result).starts_with("cannot unmarshal key"), "unexpected error: {}", err_text(&result));

		unsafe { free_result(result) };
		assert_eq!(outstanding(), 0);
		assert!(violations().is_empty());
	}

	#[test]
	fn test_null_inputs() {
		reset();
		let domain = CString::new("foobar.com").unwrap();

		let result = unsafe { create_from_license_key(null(), domain.as_ptr()) };
		assert!(!unsafe { result_is_ok(&result) });
		assert_eq!(err_text(&result), "key must not be null");
		unsafe { free_result(result) };

		let key = CString::new("").unwrap();
		let result = unsafe { create_from_license_key(key.as_ptr(), null()) };
		assert_eq!(err_text(&result), "domain must not be null");
		unsafe { free_result(result) };

		assert_eq!(outstanding(), 0);
	}

	#[test]
	fn test_well_formed_key_yields_evaluator() {
		reset();
		let result = create(&unsigned_key("foobar.com"), "foobar.com");

		assert_eq!(result.tag, RESULT_OK);
		assert!(unsafe { result_is_ok(&result) });
		assert!(!result.evaluator.is_null());
		assert!(result.err.is_null());
		assert_eq!(live(Allocation::Evaluator), 1);

		assert!(!unsafe { validate(result.evaluator) });

		let detailed = unsafe { validate_detailed(result.evaluator) };
		assert!(!unsafe { bool_result_is_ok(&detailed) });
		assert_eq!(unsafe { CStr::from_ptr(detailed.err) }.to_str().unwrap(), "cannot verify key");
		unsafe { free_bool_result(detailed) };

		let json = unsafe { evaluator_inspect(result.evaluator) };
		assert!(unsafe { CStr::from_ptr(json) }.to_str().unwrap().contains("\"domain\":\"foobar.com\""));
		unsafe { free_cstring(json) };

		unsafe { free_result(result) };
		assert_eq!(outstanding(), 0);
		assert!(violations().is_empty());
	}

	#[test]
	fn test_demo_signed_key_validates() {
		reset();
		let result = create(&demo_signed_key("foobar.com"), "foobar.com");
		assert!(unsafe { result_is_ok(&result) });

		assert!(unsafe { validate(result.evaluator) });

		let detailed = unsafe { validate_detailed(result.evaluator) };
		assert!(unsafe { bool_result_is_ok(&detailed) });
		assert!(detailed.result);
		assert!(detailed.err.is_null());
		unsafe { free_bool_result(detailed) };

		unsafe { free_result(result) };
		assert_eq!(outstanding(), 0);
		assert!(violations().is_empty());
	}

	#[test]
	fn test_demo_signed_key_on_other_domain() {
		reset();
		let result = create(&demo_signed_key("foobar.com"), "example.org");
		assert!(!unsafe { validate(result.evaluator) });

		let detailed = unsafe { validate_detailed(result.evaluator) };
		assert_eq!(
			unsafe { CStr::from_ptr(detailed.err) }.to_str().unwrap(),
			"wrong domain (foobar.com), expected example.org"
		);
		unsafe {
			free_bool_result(detailed);
			free_result(result);
		}
		assert_eq!(outstanding(), 0);
	}

	#[test]
	fn test_null_evaluator() {
		reset();
		assert!(!unsafe { result_is_ok(null()) });
		assert!(!unsafe { validate(null()) });
		assert!(unsafe { evaluator_inspect(null()) }.is_null());

		let detailed = unsafe { validate_detailed(null()) };
		assert!(!unsafe { bool_result_is_ok(&detailed) });
		unsafe { free_bool_result(detailed) };
		assert_eq!(outstanding(), 0);
	}

	#[test]
	fn test_leaked_result_is_outstanding() {
		reset();
		let result = create(&unsigned_key("foobar.com"), "foobar.com");
		assert_eq!(outstanding(), 1);

		unsafe { free_result(result) };
		assert_eq!(outstanding(), 0);
	}

	#[test]
	fn test_double_free_result_is_detected() {
		reset();
		let result = create(&unsigned_key("foobar.com"), "foobar.com");
		unsafe {
			free_result(result);
			free_result(result);
		}
		assert!(matches!(
			violations().as_slice(),
			[Violation::DoubleFree {
				kind: Allocation::Evaluator,
				..
			}]
		));
	}

	#[test]
	fn test_freeing_error_slot_separately_is_detected() {
		reset();
		let result = create("", "");
		unsafe {
			free_cstring(result.err);
			free_result(result);
		}
		assert!(matches!(
			violations().as_slice(),
			[Violation::DoubleFree {
				kind: Allocation::CString,
				..
			}]
		));
		assert_eq!(outstanding(), 0);
	}
}
