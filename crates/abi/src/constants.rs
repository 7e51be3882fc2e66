// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// ABI version, bumped whenever a type layout or a vtable signature changes
pub const LICENSOR_ABI_VERSION: u32 = 1;

/// Tag of an [`EvaluatorResultFFI`](crate::EvaluatorResultFFI) carrying an evaluator
pub const RESULT_OK: u8 = 0;

/// Tag of an [`EvaluatorResultFFI`](crate::EvaluatorResultFFI) carrying an error string
pub const RESULT_ERR: u8 = 1;

/// Exported symbol names, as resolved by a dynamically loading caller
pub mod symbols {
	pub const ABI_VERSION: &[u8] = b"licensor_abi_version\0";
	pub const CREATE_FROM_LICENSE_KEY: &[u8] = b"create_from_license_key\0";
	pub const RESULT_IS_OK: &[u8] = b"result_is_ok\0";
	pub const VALIDATE: &[u8] = b"validate\0";
	pub const VALIDATE_DETAILED: &[u8] = b"validate_detailed\0";
	pub const BOOL_RESULT_IS_OK: &[u8] = b"bool_result_is_ok\0";
	pub const EVALUATOR_INSPECT: &[u8] = b"evaluator_inspect\0";
	pub const FREE_RESULT: &[u8] = b"free_result\0";
	pub const FREE_BOOL_RESULT: &[u8] = b"free_bool_result\0";
	pub const CONCAT_STRS: &[u8] = b"concat_strs\0";
	pub const FREE_CSTRING: &[u8] = b"free_cstring\0";
}
