// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::error::{LicenseError, Result};

/// Verifying keys compiled into the library
const EMBEDDED_KEYS: &[[u8; 32]] = &[
	// Demo key (RFC 8032, test 1). Replace with the production signing key before shipping.
	[
		0xd7, 0x5a, 0x98, 0x01, 0x82, 0xb1, 0x0a, 0xb7, 0xd5, 0x4b, 0xfe, 0xd3, 0xc9, 0x64, 0x07, 0x3a, 0x0e, 0xe1,
		0x72, 0xf3, 0xda, 0xa6, 0x23, 0x25, 0xaf, 0x02, 0x1a, 0x68, 0xf7, 0x07, 0x51, 0x1a,
	],
];

/// Set of trusted verifying keys
#[derive(Debug, Clone, Default)]
pub struct Keyring {
	keys: Vec<VerifyingKey>,
}

impl Keyring {
	pub fn new() -> Self {
		Self::default()
	}

	/// The key ring compiled into the library
	pub fn embedded() -> Result<Self> {
		Self::from_bytes(EMBEDDED_KEYS)
	}

	fn from_bytes(keys: &[[u8; 32]]) -> Result<Self> {
		let keys = keys
			.iter()
			.map(|bytes| VerifyingKey::from_bytes(bytes).map_err(LicenseError::InvalidPublicKey))
			.collect::<Result<Vec<_>>>()?;
		Ok(Self {
			keys,
		})
	}

	pub fn with_key(mut self, key: VerifyingKey) -> Self {
		self.keys.push(key);
		self
	}

	/// Returns true if any trusted key verifies `signature` over `message`
	pub fn verifies(&self, message: &[u8], signature: &Signature) -> bool {
		self.keys.iter().any(|key| key.verify(message, signature).is_ok())
	}
}
