// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};

use crate::error::{LicenseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseLevel {
	Team,
	Enterprise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
	pub id: String,
	pub level: LicenseLevel,
	pub domain: String,
	pub valid_until: DateTime<Utc>,
	/// None means there is no seat limit
	pub seats: Option<i32>,
}

impl License {
	/// Bytes covered by the signature
	pub(crate) fn signed_bytes(&self) -> Result<Vec<u8>> {
		serde_json::to_vec(self).map_err(LicenseError::Remarshal)
	}
}

/// A license together with the ed25519 signature over its JSON encoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedLicense {
	pub license: License,
	pub signature: Vec<u8>,
}

impl SignedLicense {
	/// Parse a license key: base58 of the JSON encoded signed license
	pub fn deserialize(key: &[u8]) -> Result<SignedLicense> {
		let decoded = bs58::decode(key).into_vec()?;
		serde_json::from_slice(&decoded).map_err(LicenseError::Unmarshal)
	}

	/// Render the license key handed out to customers
	pub fn serialize(&self) -> Result<String> {
		let json = serde_json::to_vec(self).map_err(LicenseError::Remarshal)?;
		Ok(bs58::encode(json).into_string())
	}
}

/// Sign a license so that it can be used with the evaluator
pub fn sign(license: &License, signing_key: &SigningKey) -> Result<SignedLicense> {
	let signature = signing_key.sign(&license.signed_bytes()?);
	Ok(SignedLicense {
		license: license.clone(),
		signature: signature.to_bytes().to_vec(),
	})
}
