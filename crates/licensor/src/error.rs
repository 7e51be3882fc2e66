// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LicenseError>;

#[derive(Debug, Error)]
pub enum LicenseError {
	#[error("cannot decode key: {0}")]
	Decode(#[from] bs58::decode::Error),

	#[error("cannot unmarshal key: {0}")]
	Unmarshal(serde_json::Error),

	#[error("cannot remarshal key: {0}")]
	Remarshal(serde_json::Error),

	#[error("invalid public key: {0}")]
	InvalidPublicKey(ed25519_dalek::SignatureError),

	#[error("cannot verify key")]
	Unverified,

	#[error("wrong domain ({actual}), expected {expected}")]
	WrongDomain {
		actual: String,
		expected: String,
	},

	#[error("not valid anymore")]
	Expired,
}
