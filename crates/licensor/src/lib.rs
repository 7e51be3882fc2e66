// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! License evaluation
//!
//! The library behind the licensor C ABI: a license is a JSON document signed
//! with ed25519 and shipped as a base58 key. An [`Evaluator`] parses such a key
//! and checks it against a [`Keyring`] of trusted verifying keys, the domain it
//! is used on and its expiry.

pub mod error;
pub mod evaluator;
pub mod keys;
pub mod license;

pub use error::{LicenseError, Result};
pub use evaluator::Evaluator;
pub use keys::Keyring;
pub use license::{License, LicenseLevel, SignedLicense, sign};
