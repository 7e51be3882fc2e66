// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ffi::NulError, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Failure reported by the library through the error slot of a result
	#[error("{0}")]
	Callee(String),

	#[error("{0} returned null")]
	NullString(&'static str),

	#[error("input contains an interior NUL byte: {0}")]
	InteriorNul(#[from] NulError),

	#[error("cannot load {path}: {source}")]
	Load {
		path: PathBuf,
		source: libloading::Error,
	},

	#[error("library implements ABI version {actual}, expected {expected}")]
	AbiMismatch {
		expected: u32,
		actual: u32,
	},

	#[error("unexpected output: expected '{expected}', got '{actual}'")]
	Mismatch {
		expected: String,
		actual: String,
	},
}

impl Error {
	/// Process exit code reporting this error
	pub fn exit_code(&self) -> u8 {
		1
	}
}
