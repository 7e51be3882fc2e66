// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Caller side of the licensor boundary
//!
//! Every allocation the library hands over is wrapped in an owning guard
//! ([`Evaluator`], [`OwnedCString`]) that releases it through the matching
//! release function exactly once, on every exit path. Guards borrow the
//! [`Boundary`] they came from, so none can outlive a loaded library, and none
//! is `Clone`, so no handle ever has two owners.

pub mod boundary;
pub mod config;
pub mod error;
pub mod evaluator;
mod loader;
pub mod logging;
pub mod string;

pub use boundary::Boundary;
pub use config::BoundarySource;
pub use error::{Error, Result};
pub use evaluator::{Evaluator, Validation};
pub use logging::TracingBuilder;
pub use string::OwnedCString;
