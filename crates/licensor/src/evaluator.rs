// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::Utc;
use ed25519_dalek::Signature;
use tracing::debug;

use crate::{
	error::{LicenseError, Result},
	keys::Keyring,
	license::{License, SignedLicense},
};

/// Evaluator determines whether a license key is valid for a domain
#[derive(Debug)]
pub struct Evaluator {
	signed: SignedLicense,
	/// Domain the license is evaluated against
	domain: String,
	keyring: Keyring,
}

impl Evaluator {
	/// Parse a license key, to be checked against the embedded key ring
	pub fn from_license_key(key: &[u8], domain: &str) -> Result<Evaluator> {
		Self::with_keyring(key, domain, Keyring::embedded()?)
	}

	pub fn with_keyring(key: &[u8], domain: &str, keyring: Keyring) -> Result<Evaluator> {
		let signed = SignedLicense::deserialize(key)?;
		debug!(id = %signed.license.id, domain, "parsed license key");
		Ok(Evaluator {
			signed,
			domain: domain.to_string(),
			keyring,
		})
	}

	/// Returns Ok(()) if the license is valid and an error with an explanation otherwise
	pub fn validate(&self) -> Result<()> {
		let license = &self.signed.license;

		let message = license.signed_bytes()?;
		let signature = Signature::from_slice(&self.signed.signature).map_err(|_| LicenseError::Unverified)?;
		if !self.keyring.verifies(&message, &signature) {
			return Err(LicenseError::Unverified);
		}

		if license.domain != self.domain {
			return Err(LicenseError::WrongDomain {
				actual: license.domain.clone(),
				expected: self.domain.clone(),
			});
		}

		if license.valid_until < Utc::now() {
			return Err(LicenseError::Expired);
		}

		Ok(())
	}

	/// License information, for debugging only
	pub fn inspect(&self) -> &License {
		&self.signed.license
	}

	pub fn inspect_json(&self) -> Result<String> {
		serde_json::to_string(self.inspect()).map_err(LicenseError::Remarshal)
	}
}

#[cfg(test)]
mod tests {
	use chrono::Duration;
	use ed25519_dalek::SigningKey;

	use super::*;
	use crate::license::{LicenseLevel, sign};

	const SOME_DOMAIN: &str = "foobar.com";
	const SOME_ID: &str = "730d5134-768c-4a05-b7cd-ecf3757cada9";

	fn signing_key() -> SigningKey {
		SigningKey::from_bytes(&[42u8; 32])
	}

	fn license(valid_for: Duration) -> License {
		License {
			id: SOME_ID.to_string(),
			level: LicenseLevel::Enterprise,
			domain: SOME_DOMAIN.to_string(),
			valid_until: Utc::now() + valid_for,
			seats: None,
		}
	}

	fn key_for(license: &License, signing_key: &SigningKey) -> String {
		sign(license, signing_key).unwrap().serialize().unwrap()
	}

	fn evaluator(key: &str, domain: &str) -> Evaluator {
		let keyring = Keyring::new().with_key(signing_key().verifying_key());
		Evaluator::with_keyring(key.as_bytes(), domain, keyring).unwrap()
	}

	#[test]
	fn test_valid_license() {
		let key = key_for(&license(Duration::hours(6)), &signing_key());
		let evaluator = evaluator(&key, SOME_DOMAIN);
		evaluator.validate().unwrap();
		assert_eq!(evaluator.inspect().id, SOME_ID);
	}

	#[test]
	fn test_wrong_domain() {
		let key = key_for(&license(Duration::hours(6)), &signing_key());
		let err = evaluator(&key, "example.org").validate().unwrap_err();
		assert_eq!(err.to_string(), "wrong domain (foobar.com), expected example.org");
	}

	#[test]
	fn test_expired_license() {
		let key = key_for(&license(Duration::hours(-6)), &signing_key());
		let err = evaluator(&key, SOME_DOMAIN).validate().unwrap_err();
		assert!(matches!(err, LicenseError::Expired), "unexpected error: {err}");
	}

	#[test]
	fn test_signed_by_untrusted_key() {
		let untrusted = SigningKey::from_bytes(&[13u8; 32]);
		let key = key_for(&license(Duration::hours(6)), &untrusted);
		let err = evaluator(&key, SOME_DOMAIN).validate().unwrap_err();
		assert_eq!(err.to_string(), "cannot verify key");
	}

	#[test]
	fn test_tampered_license() {
		let mut signed = sign(&license(Duration::hours(6)), &signing_key()).unwrap();
		signed.license.seats = Some(10_000);
		let key = signed.serialize().unwrap();

		let err = evaluator(&key, SOME_DOMAIN).validate().unwrap_err();
		assert!(matches!(err, LicenseError::Unverified), "unexpected error: {err}");
	}

	#[test]
	fn test_truncated_signature() {
		let mut signed = sign(&license(Duration::hours(6)), &signing_key()).unwrap();
		signed.signature.truncate(10);
		let key = signed.serialize().unwrap();

		let err = evaluator(&key, SOME_DOMAIN).validate().unwrap_err();
		assert!(matches!(err, LicenseError::Unverified), "unexpected error: {err}");
	}

	#[test]
	fn test_empty_key_is_rejected_before_validation() {
		let err = Evaluator::from_license_key(b"", "").unwrap_err();
		assert!(err.to_string().starts_with("cannot unmarshal key"));
	}

	#[test]
	fn test_embedded_keyring_rejects_foreign_signature() {
		let key = key_for(&license(Duration::hours(6)), &signing_key());
		let evaluator = Evaluator::from_license_key(key.as_bytes(), SOME_DOMAIN).unwrap();
		assert!(evaluator.validate().is_err());
	}

	#[test]
	fn test_embedded_keyring_accepts_demo_signed_license() {
		// RFC 8032, test 1: the secret half of the embedded demo key
		let demo = SigningKey::from_bytes(&[
			0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c, 0xc4, 0x44,
			0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae, 0x7f, 0x60,
		]);
		let key = key_for(&license(Duration::hours(6)), &demo);
		Evaluator::from_license_key(key.as_bytes(), SOME_DOMAIN).unwrap().validate().unwrap();
	}

	#[test]
	fn test_inspect_json() {
		let key = key_for(&license(Duration::hours(6)), &signing_key());
		let json = evaluator(&key, SOME_DOMAIN).inspect_json().unwrap();
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["domain"], SOME_DOMAIN);
		assert_eq!(value["level"], "Enterprise");
		assert!(value["seats"].is_null());
	}
}
